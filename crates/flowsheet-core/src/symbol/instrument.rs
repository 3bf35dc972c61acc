//! Inline instrument balloons. Instruments carry no process ports.

use svg::node::{Text as SvgText, element as svg_element};

use super::{GlyphStyle, PortAnchor, SymbolDefinition};

const BALLOON_RADIUS: f32 = 16.0;

/// A field-mounted indicator drawn as a circle holding its function letters.
#[derive(Debug)]
pub struct Indicator {
    letters: &'static str,
}

pub static PRESSURE: Indicator = Indicator { letters: "PI" };
pub static TEMPERATURE: Indicator = Indicator { letters: "TI" };
pub static FLOW: Indicator = Indicator { letters: "FI" };

impl SymbolDefinition for Indicator {
    fn tag_prefix(&self) -> &'static str {
        self.letters
    }

    fn ports(&self) -> &'static [PortAnchor] {
        &[]
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let balloon = svg_element::Circle::new()
            .set("cx", 0)
            .set("cy", 0)
            .set("r", BALLOON_RADIUS);
        let letters = svg_element::Text::new("")
            .set("x", 0)
            .set("y", 0)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", "sans-serif")
            .set("font-size", 11)
            .set("fill", style.stroke().color().to_string())
            .add(SvgText::new(self.letters));

        svg_element::Group::new()
            .add(filled!(balloon, style))
            .add(letters)
    }
}
