//! Rotating machinery: pumps and compressors.

use svg::node::element as svg_element;

use super::{GlyphStyle, HALF, SymbolDefinition, lead};

const BODY_RADIUS: f32 = 20.0;

/// Centrifugal pump: a casing circle with a discharge wedge pointing at the
/// outlet.
#[derive(Debug)]
pub struct Pump;

impl SymbolDefinition for Pump {
    fn tag_prefix(&self) -> &'static str {
        "P"
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let casing = svg_element::Circle::new()
            .set("cx", 0)
            .set("cy", 0)
            .set("r", BODY_RADIUS);
        let wedge = svg_element::Polygon::new().set("points", "-8,-12 14,0 -8,12");

        svg_element::Group::new()
            .add(lead((-HALF, 0.0), (-BODY_RADIUS, 0.0), style))
            .add(lead((BODY_RADIUS, 0.0), (HALF, 0.0), style))
            .add(filled!(casing, style))
            .add(hollow!(wedge, style))
    }
}

/// Compressor: a trapezoid narrowing toward the discharge side.
#[derive(Debug)]
pub struct Compressor;

impl SymbolDefinition for Compressor {
    fn tag_prefix(&self) -> &'static str {
        "K"
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let body = svg_element::Polygon::new().set("points", "-20,-22 20,-10 20,10 -20,22");

        svg_element::Group::new()
            .add(lead((-HALF, 0.0), (-20.0, 0.0), style))
            .add(lead((20.0, 0.0), (HALF, 0.0), style))
            .add(filled!(body, style))
    }
}
