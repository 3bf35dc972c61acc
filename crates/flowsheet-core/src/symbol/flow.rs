//! Stream junctions: mixers and splitters.

use svg::node::element as svg_element;

use super::{GlyphStyle, HALF, PortAnchor, SymbolDefinition, lead};

const BRANCH: f32 = 15.0;

static MIXER_PORTS: [PortAnchor; 3] = [
    PortAnchor::new("inlet", -HALF, -BRANCH),
    PortAnchor::new("inlet2", -HALF, BRANCH),
    PortAnchor::new("outlet", HALF, 0.0),
];

static SPLITTER_PORTS: [PortAnchor; 3] = [
    PortAnchor::new("inlet", -HALF, 0.0),
    PortAnchor::new("outlet", HALF, -BRANCH),
    PortAnchor::new("outlet2", HALF, BRANCH),
];

/// Two feeds converging into one product.
#[derive(Debug)]
pub struct Mixer;

impl SymbolDefinition for Mixer {
    fn tag_prefix(&self) -> &'static str {
        "M"
    }

    fn ports(&self) -> &'static [PortAnchor] {
        &MIXER_PORTS
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let body = svg_element::Polygon::new().set("points", "-18,-22 18,0 -18,22");

        svg_element::Group::new()
            .add(lead((-HALF, -BRANCH), (-18.0, -BRANCH), style))
            .add(lead((-HALF, BRANCH), (-18.0, BRANCH), style))
            .add(lead((18.0, 0.0), (HALF, 0.0), style))
            .add(filled!(body, style))
    }
}

/// One feed divided into two products.
#[derive(Debug)]
pub struct Splitter;

impl SymbolDefinition for Splitter {
    fn tag_prefix(&self) -> &'static str {
        "S"
    }

    fn ports(&self) -> &'static [PortAnchor] {
        &SPLITTER_PORTS
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let body = svg_element::Polygon::new().set("points", "18,-22 -18,0 18,22");

        svg_element::Group::new()
            .add(lead((-HALF, 0.0), (-18.0, 0.0), style))
            .add(lead((18.0, -BRANCH), (HALF, -BRANCH), style))
            .add(lead((18.0, BRANCH), (HALF, BRANCH), style))
            .add(filled!(body, style))
    }
}
