//! Fallback symbol for classes the library does not know.

use svg::node::element as svg_element;

use super::{GlyphStyle, HALF, PortAnchor, SymbolDefinition};

/// A bordered square of the nominal footprint. Pipes to it anchor on the
/// equipment center.
#[derive(Debug)]
pub struct Placeholder;

impl SymbolDefinition for Placeholder {
    fn tag_prefix(&self) -> &'static str {
        "?"
    }

    fn ports(&self) -> &'static [PortAnchor] {
        &[]
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let frame = svg_element::Rectangle::new()
            .set("x", -HALF)
            .set("y", -HALF)
            .set("width", 2.0 * HALF)
            .set("height", 2.0 * HALF);

        svg_element::Group::new().add(filled!(frame, style))
    }
}
