//! Heat transfer equipment.

use svg::node::element as svg_element;

use super::{GlyphStyle, HALF, PortAnchor, SymbolDefinition, lead};

const SHELL_RADIUS: f32 = 22.0;

fn shell_circle(style: &GlyphStyle) -> svg_element::Circle {
    let circle = svg_element::Circle::new()
        .set("cx", 0)
        .set("cy", 0)
        .set("r", SHELL_RADIUS);
    filled!(circle, style)
}

/// Fired heater: a firebox with a radiant coil zig-zagging through it.
#[derive(Debug)]
pub struct Heater;

impl SymbolDefinition for Heater {
    fn tag_prefix(&self) -> &'static str {
        "H"
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let firebox = svg_element::Rectangle::new()
            .set("x", -22)
            .set("y", -24)
            .set("width", 44)
            .set("height", 48);
        let coil = svg_element::Polyline::new()
            .set("points", "-22,0 -14,-12 -6,12 2,-12 10,12 22,0");

        svg_element::Group::new()
            .add(lead((-HALF, 0.0), (-22.0, 0.0), style))
            .add(lead((22.0, 0.0), (HALF, 0.0), style))
            .add(filled!(firebox, style))
            .add(hollow!(coil, style))
    }
}

/// Cooler: an exchanger circle crossed by a single cooling coil.
#[derive(Debug)]
pub struct Cooler;

impl SymbolDefinition for Cooler {
    fn tag_prefix(&self) -> &'static str {
        "E"
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let coil = svg_element::Polyline::new().set("points", "-22,0 -12,-10 0,10 12,-10 22,0");
        let frost = svg_element::Line::new()
            .set("x1", -10)
            .set("y1", 14)
            .set("x2", 10)
            .set("y2", 14);

        svg_element::Group::new()
            .add(lead((-HALF, 0.0), (-SHELL_RADIUS, 0.0), style))
            .add(lead((SHELL_RADIUS, 0.0), (HALF, 0.0), style))
            .add(shell_circle(style))
            .add(hollow!(coil, style))
            .add(crate::apply_stroke!(frost, style.stroke()))
    }
}

/// Generic heat exchanger: a circle with an internal pair of opposed curves.
#[derive(Debug)]
pub struct HeatExchanger;

impl SymbolDefinition for HeatExchanger {
    fn tag_prefix(&self) -> &'static str {
        "E"
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let curves = svg_element::Path::new().set(
            "d",
            "M -22 0 C -10 -18, 10 -18, 22 0 M -22 0 C -10 18, 10 18, 22 0",
        );

        svg_element::Group::new()
            .add(lead((-HALF, 0.0), (-SHELL_RADIUS, 0.0), style))
            .add(lead((SHELL_RADIUS, 0.0), (HALF, 0.0), style))
            .add(shell_circle(style))
            .add(hollow!(curves, style))
    }
}

const SHELL_HALF_LENGTH: f32 = 26.0;
const SHELL_HALF_HEIGHT: f32 = 14.0;
const NOZZLE_OFFSET: f32 = 14.0;

static SHELL_TUBE_PORTS: [PortAnchor; 4] = [
    PortAnchor::new("shell_in", -NOZZLE_OFFSET, -HALF),
    PortAnchor::new("shell_out", NOZZLE_OFFSET, HALF),
    PortAnchor::new("tube_in", -HALF, 0.0),
    PortAnchor::new("tube_out", HALF, 0.0),
];

/// Shell-and-tube exchanger: a horizontal shell with a U-tube bundle. Tube
/// side enters and leaves through the heads, shell side through the top and
/// bottom nozzles.
#[derive(Debug)]
pub struct ShellTube;

impl SymbolDefinition for ShellTube {
    fn tag_prefix(&self) -> &'static str {
        "E"
    }

    fn ports(&self) -> &'static [PortAnchor] {
        &SHELL_TUBE_PORTS
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let shell = svg_element::Rectangle::new()
            .set("x", -SHELL_HALF_LENGTH)
            .set("y", -SHELL_HALF_HEIGHT)
            .set("width", 2.0 * SHELL_HALF_LENGTH)
            .set("height", 2.0 * SHELL_HALF_HEIGHT)
            .set("rx", 4);
        let bundle = svg_element::Path::new().set("d", "M -18 -6 L 14 -6 A 6 6 0 0 1 14 6 L -18 6");

        svg_element::Group::new()
            .add(lead((-HALF, 0.0), (-SHELL_HALF_LENGTH, 0.0), style))
            .add(lead((SHELL_HALF_LENGTH, 0.0), (HALF, 0.0), style))
            .add(lead((-NOZZLE_OFFSET, -HALF), (-NOZZLE_OFFSET, -SHELL_HALF_HEIGHT), style))
            .add(lead((NOZZLE_OFFSET, SHELL_HALF_HEIGHT), (NOZZLE_OFFSET, HALF), style))
            .add(filled!(shell, style))
            .add(hollow!(bundle, style))
    }
}
