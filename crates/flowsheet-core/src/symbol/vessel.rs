//! Vessels: storage, phase separation and reaction.

use svg::node::element as svg_element;

use super::{GlyphStyle, HALF, PortAnchor, SymbolDefinition, lead};
use crate::draw::StrokeStyle;

/// Atmospheric storage tank with a domed roof.
#[derive(Debug)]
pub struct Tank;

impl SymbolDefinition for Tank {
    fn tag_prefix(&self) -> &'static str {
        "T"
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let body = svg_element::Path::new().set(
            "d",
            "M -22 -16 Q 0 -30 22 -16 L 22 26 L -22 26 Z",
        );
        let level = svg_element::Line::new()
            .set("x1", -22)
            .set("y1", 8)
            .set("x2", 22)
            .set("y2", 8);
        let level_stroke = style
            .stroke()
            .clone()
            .with_style(StrokeStyle::Dashed)
            .with_width(1.0);

        svg_element::Group::new()
            .add(lead((-HALF, 0.0), (-22.0, 0.0), style))
            .add(lead((22.0, 0.0), (HALF, 0.0), style))
            .add(filled!(body, style))
            .add(crate::apply_stroke!(level, &level_stroke))
    }
}

const DRUM_HALF_WIDTH: f32 = 14.0;
const DRUM_HALF_HEIGHT: f32 = 26.0;

static SEPARATOR_PORTS: [PortAnchor; 3] = [
    PortAnchor::new("inlet", -HALF, 0.0),
    PortAnchor::new("vapor_out", 0.0, -HALF),
    PortAnchor::new("liquid_out", 0.0, HALF),
];

/// Vertical flash drum: feed enters the side, vapor leaves the top and
/// liquid the bottom.
#[derive(Debug)]
pub struct Separator;

impl SymbolDefinition for Separator {
    fn tag_prefix(&self) -> &'static str {
        "D"
    }

    fn ports(&self) -> &'static [PortAnchor] {
        &SEPARATOR_PORTS
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let drum = svg_element::Rectangle::new()
            .set("x", -DRUM_HALF_WIDTH)
            .set("y", -DRUM_HALF_HEIGHT)
            .set("width", 2.0 * DRUM_HALF_WIDTH)
            .set("height", 2.0 * DRUM_HALF_HEIGHT)
            .set("rx", DRUM_HALF_WIDTH);
        let mist_pad = svg_element::Rectangle::new()
            .set("x", -8)
            .set("y", -16)
            .set("width", 16)
            .set("height", 4);

        svg_element::Group::new()
            .add(lead((-HALF, 0.0), (-DRUM_HALF_WIDTH, 0.0), style))
            .add(lead((0.0, -HALF), (0.0, -DRUM_HALF_HEIGHT), style))
            .add(lead((0.0, DRUM_HALF_HEIGHT), (0.0, HALF), style))
            .add(filled!(drum, style))
            .add(hollow!(mist_pad, style))
    }
}

const HORIZONTAL_HALF_LENGTH: f32 = 26.0;
const HORIZONTAL_HALF_HEIGHT: f32 = 13.0;
const WEIR_X: f32 = 8.0;

static THREE_PHASE_PORTS: [PortAnchor; 4] = [
    PortAnchor::new("inlet", -HALF, 0.0),
    PortAnchor::new("vapor_out", 16.0, -HALF),
    PortAnchor::new("oil_out", HALF, 6.0),
    PortAnchor::new("water_out", -10.0, HALF),
];

/// Horizontal three-phase separator: a weir holds back the oil layer and a
/// boot below the inlet collects water.
#[derive(Debug)]
pub struct ThreePhaseSeparator;

impl SymbolDefinition for ThreePhaseSeparator {
    fn tag_prefix(&self) -> &'static str {
        "D"
    }

    fn ports(&self) -> &'static [PortAnchor] {
        &THREE_PHASE_PORTS
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let vessel = svg_element::Rectangle::new()
            .set("x", -HORIZONTAL_HALF_LENGTH)
            .set("y", -HORIZONTAL_HALF_HEIGHT)
            .set("width", 2.0 * HORIZONTAL_HALF_LENGTH)
            .set("height", 2.0 * HORIZONTAL_HALF_HEIGHT)
            .set("rx", HORIZONTAL_HALF_HEIGHT);
        let boot = svg_element::Rectangle::new()
            .set("x", -16)
            .set("y", HORIZONTAL_HALF_HEIGHT)
            .set("width", 12)
            .set("height", 10);

        svg_element::Group::new()
            .add(lead((-HALF, 0.0), (-HORIZONTAL_HALF_LENGTH, 0.0), style))
            .add(lead((16.0, -HALF), (16.0, -HORIZONTAL_HALF_HEIGHT), style))
            .add(lead((HORIZONTAL_HALF_LENGTH, 6.0), (HALF, 6.0), style))
            .add(lead((-10.0, HORIZONTAL_HALF_HEIGHT + 10.0), (-10.0, HALF), style))
            .add(filled!(boot, style))
            .add(filled!(vessel, style))
            .add(lead((WEIR_X, HORIZONTAL_HALF_HEIGHT), (WEIR_X, 0.0), style))
    }
}

/// Stirred reactor: a vessel with an agitator shaft and impeller.
#[derive(Debug)]
pub struct Reactor;

impl SymbolDefinition for Reactor {
    fn tag_prefix(&self) -> &'static str {
        "R"
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let vessel = svg_element::Rectangle::new()
            .set("x", -20)
            .set("y", -26)
            .set("width", 40)
            .set("height", 52)
            .set("rx", 10);
        let impeller = svg_element::Path::new().set("d", "M -10 10 L 10 18 M -10 18 L 10 10");

        svg_element::Group::new()
            .add(lead((-HALF, 0.0), (-20.0, 0.0), style))
            .add(lead((20.0, 0.0), (HALF, 0.0), style))
            .add(filled!(vessel, style))
            .add(lead((0.0, -HALF), (0.0, 14.0), style))
            .add(hollow!(impeller, style))
    }
}
