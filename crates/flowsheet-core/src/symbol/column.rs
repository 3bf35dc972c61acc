//! Fractionation columns.

use svg::node::element as svg_element;

use super::{GlyphStyle, PortAnchor, SymbolDefinition, lead};
use crate::geometry::Size;

const WIDTH: f32 = 40.0;
const HEIGHT: f32 = 120.0;
const SHELL_HALF_WIDTH: f32 = 14.0;
const SHELL_HALF_HEIGHT: f32 = 54.0;
const TRAYS: usize = 6;

static COLUMN_PORTS: [PortAnchor; 4] = [
    PortAnchor::new("feed", -WIDTH / 2.0, 0.0),
    PortAnchor::new("overhead", 0.0, -HEIGHT / 2.0),
    PortAnchor::new("bottoms", 0.0, HEIGHT / 2.0),
    PortAnchor::new("reflux", WIDTH / 2.0, -36.0),
];

/// A tall capsule lined with alternating segmental trays.
#[derive(Debug)]
pub struct Column;

impl SymbolDefinition for Column {
    fn tag_prefix(&self) -> &'static str {
        "C"
    }

    fn footprint(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }

    fn ports(&self) -> &'static [PortAnchor] {
        &COLUMN_PORTS
    }

    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group {
        let shell = svg_element::Rectangle::new()
            .set("x", -SHELL_HALF_WIDTH)
            .set("y", -SHELL_HALF_HEIGHT)
            .set("width", 2.0 * SHELL_HALF_WIDTH)
            .set("height", 2.0 * SHELL_HALF_HEIGHT)
            .set("rx", SHELL_HALF_WIDTH);

        let mut group = svg_element::Group::new()
            .add(lead((-WIDTH / 2.0, 0.0), (-SHELL_HALF_WIDTH, 0.0), style))
            .add(lead((0.0, -HEIGHT / 2.0), (0.0, -SHELL_HALF_HEIGHT), style))
            .add(lead((0.0, SHELL_HALF_HEIGHT), (0.0, HEIGHT / 2.0), style))
            .add(lead((SHELL_HALF_WIDTH, -36.0), (WIDTH / 2.0, -36.0), style))
            .add(filled!(shell, style));

        // Trays alternate between the left and right wall, leaving a downcomer gap.
        let pitch = 2.0 * (SHELL_HALF_HEIGHT - SHELL_HALF_WIDTH) / (TRAYS as f32 + 1.0);
        for i in 0..TRAYS {
            let y = -(SHELL_HALF_HEIGHT - SHELL_HALF_WIDTH) + pitch * (i as f32 + 1.0);
            let (x1, x2) = if i % 2 == 0 {
                (-SHELL_HALF_WIDTH, SHELL_HALF_WIDTH * 0.4)
            } else {
                (-SHELL_HALF_WIDTH * 0.4, SHELL_HALF_WIDTH)
            };
            group = group.add(lead((x1, y), (x2, y), style));
        }

        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_draws_every_tray() {
        let rendered = Column.render_glyph(&GlyphStyle::default()).to_string();
        // Four port leads plus the trays.
        assert_eq!(rendered.matches("<line").count(), 4 + TRAYS);
    }

    #[test]
    fn test_column_is_taller_than_wide() {
        let footprint = Column.footprint();
        assert!(footprint.height() > footprint.width());
    }
}
