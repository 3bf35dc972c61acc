//! The drafting title block in the bottom-right corner.

use chrono::{DateTime, Utc};
use svg::node::element as svg_element;

use flowsheet_core::{
    apply_stroke,
    draw::{Drawable, Text},
    geometry::{Bounds, Point, Size},
};

use super::Theme;

/// Fixed nominal size of the block.
pub const TITLE_BLOCK_SIZE: Size = Size::new(260.0, 84.0);

/// Clearance between the block, the border and anything drawn above it.
const GAP: f32 = 10.0;
const TITLE_ROW: f32 = 28.0;
const INFO_ROW: f32 = 18.0;
const TEXT_INDENT: f32 = 8.0;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Where the block goes and how large the canvas must become to hold it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub canvas: Size,
    pub top_left: Point,
}

impl Placement {
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.top_left, TITLE_BLOCK_SIZE)
    }
}

/// Anchors the block to the bottom-right corner inside the border.
///
/// The canvas is widened if the block would not fit, then grown downward
/// until the block overlaps none of `obstacles`. Growing only ever moves the
/// block down, so every pass clears at least one more obstacle.
pub fn place(canvas: Size, border_inset: f32, obstacles: &[Bounds]) -> Placement {
    let edge = border_inset + GAP;
    let mut width = canvas.width().max(TITLE_BLOCK_SIZE.width() + 2.0 * edge);
    let mut height = canvas.height().max(TITLE_BLOCK_SIZE.height() + 2.0 * edge);
    width = width.ceil();
    height = height.ceil();

    let at = |width: f32, height: f32| {
        Point::new(
            width - edge - TITLE_BLOCK_SIZE.width(),
            height - edge - TITLE_BLOCK_SIZE.height(),
        )
    };

    for _ in 0..=obstacles.len() {
        let block = Bounds::new_from_top_left(at(width, height), TITLE_BLOCK_SIZE);
        let lowest_overlap = obstacles
            .iter()
            .filter(|obstacle| obstacle.intersects(&block))
            .map(|obstacle| obstacle.max_y())
            .fold(None, |acc: Option<f32>, y| Some(acc.map_or(y, |a| a.max(y))));

        match lowest_overlap {
            Some(max_y) => height += (max_y + GAP - block.min_y()).ceil(),
            None => break,
        }
    }

    Placement {
        canvas: Size::new(width, height),
        top_left: at(width, height),
    }
}

/// Contents of the title block.
#[derive(Debug)]
pub struct TitleBlock<'a> {
    title: &'a str,
    generated_at: DateTime<Utc>,
    equipment_count: usize,
    connection_count: usize,
}

impl<'a> TitleBlock<'a> {
    pub fn new(
        title: &'a str,
        generated_at: DateTime<Utc>,
        equipment_count: usize,
        connection_count: usize,
    ) -> Self {
        Self {
            title,
            generated_at,
            equipment_count,
            connection_count,
        }
    }

    fn info_lines(&self) -> [String; 3] {
        [
            format!("Generated: {}", self.generated_at.format(TIMESTAMP_FORMAT)),
            format!("Equipment: {}", self.equipment_count),
            format!("Connections: {}", self.connection_count),
        ]
    }

    pub fn render(&self, top_left: Point, theme: &Theme) -> svg_element::Group {
        let frame = svg_element::Rectangle::new()
            .set("x", top_left.x())
            .set("y", top_left.y())
            .set("width", TITLE_BLOCK_SIZE.width())
            .set("height", TITLE_BLOCK_SIZE.height())
            .set("fill", theme.background().to_string());
        let divider_y = top_left.y() + TITLE_ROW;
        let divider = svg_element::Line::new()
            .set("x1", top_left.x())
            .set("y1", divider_y)
            .set("x2", top_left.x() + TITLE_BLOCK_SIZE.width())
            .set("y2", divider_y);

        let left = top_left.x() + TEXT_INDENT;
        let title = Text::new(theme.title_text(), self.title)
            .render_to_svg(Point::new(left, top_left.y() + TITLE_ROW / 2.0));

        let mut group = svg_element::Group::new()
            .set("class", "title-block")
            .add(apply_stroke!(frame, theme.border()))
            .add(apply_stroke!(divider, theme.border()))
            .add(title);

        for (i, line) in self.info_lines().iter().enumerate() {
            let y = divider_y + INFO_ROW * (i as f32 + 0.5);
            group = group.add(Text::new(theme.info_text(), line).render_to_svg(Point::new(left, y)));
        }

        group
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_place_bottom_right_without_obstacles() {
        let placement = place(Size::new(600.0, 400.0), 10.0, &[]);

        assert_eq!(placement.canvas, Size::new(600.0, 400.0));
        let bounds = placement.bounds();
        assert_eq!(bounds.max_x(), 600.0 - 20.0);
        assert_eq!(bounds.max_y(), 400.0 - 20.0);
    }

    #[test]
    fn test_place_widens_small_canvas() {
        let placement = place(Size::new(200.0, 200.0), 10.0, &[]);

        assert!(placement.canvas.width() >= TITLE_BLOCK_SIZE.width() + 40.0);
        assert!(placement.bounds().min_x() >= 20.0);
    }

    #[test]
    fn test_place_grows_below_obstacle() {
        let obstacle = Bounds::new_from_top_left(Point::new(400.0, 250.0), Size::new(100.0, 100.0));
        let placement = place(Size::new(600.0, 400.0), 10.0, &[obstacle]);

        assert!(placement.canvas.height() > 400.0);
        assert!(!placement.bounds().intersects(&obstacle));
        assert!(placement.bounds().min_y() >= obstacle.max_y() + GAP);
    }

    #[test]
    fn test_place_clears_stacked_obstacles() {
        let obstacles = [
            Bounds::new_from_top_left(Point::new(400.0, 300.0), Size::new(50.0, 40.0)),
            Bounds::new_from_top_left(Point::new(420.0, 380.0), Size::new(50.0, 120.0)),
        ];
        let placement = place(Size::new(600.0, 400.0), 10.0, &obstacles);

        for obstacle in &obstacles {
            assert!(!placement.bounds().intersects(obstacle));
        }
    }

    #[test]
    fn test_render_lines() {
        let theme = Theme::from_config(&AppConfig::default()).unwrap();
        let generated_at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        let block = TitleBlock::new("Unit <100>", generated_at, 2, 1);

        let svg = block.render(Point::new(0.0, 0.0), &theme).to_string();
        assert!(svg.contains("Unit &lt;100&gt;"));
        assert!(svg.contains("Generated: 2024-03-09 14:05:00 UTC"));
        assert!(svg.contains("Equipment: 2"));
        assert!(svg.contains("Connections: 1"));
    }
}
