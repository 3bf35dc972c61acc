//! Throttling valves.

use svg::node::element as svg_element;

use super::{GlyphStyle, HALF, SymbolDefinition, lead};

const WING: f32 = 20.0;
const WING_HEIGHT: f32 = 12.0;

/// The bow-tie body shared by every valve: two triangles meeting at the seat.
fn body(style: &GlyphStyle) -> svg_element::Group {
    let upstream = svg_element::Polygon::new().set(
        "points",
        format!("{},{} 0,0 {},{}", -WING, -WING_HEIGHT, -WING, WING_HEIGHT),
    );
    let downstream = svg_element::Polygon::new().set(
        "points",
        format!("{},{} 0,0 {},{}", WING, -WING_HEIGHT, WING, WING_HEIGHT),
    );

    svg_element::Group::new()
        .add(lead((-HALF, 0.0), (-WING, 0.0), style))
        .add(lead((WING, 0.0), (HALF, 0.0), style))
        .add(filled!(upstream, style))
        .add(filled!(downstream, style))
}

#[derive(Debug)]
pub struct Valve;

impl SymbolDefinition for Valve {
    fn tag_prefix(&self) -> &'static str {
        "V"
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        body(style)
    }
}

/// Control valve: the plain valve body with a stem and diaphragm actuator.
#[derive(Debug)]
pub struct ControlValve;

impl SymbolDefinition for ControlValve {
    fn tag_prefix(&self) -> &'static str {
        "CV"
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let actuator = svg_element::Path::new().set("d", "M -12 -18 A 12 12 0 0 1 12 -18 Z");

        body(style)
            .add(lead((0.0, 0.0), (0.0, -18.0), style))
            .add(filled!(actuator, style))
    }
}
