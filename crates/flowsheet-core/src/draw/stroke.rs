//! Stroke definitions for outlines, pipes and signal lines.
//!
//! A [`StrokeDefinition`] bundles color, width, dash pattern, cap and join.
//! Apply it to any SVG element with [`apply_stroke!`](crate::apply_stroke!):
//!
//! ```
//! use flowsheet_core::color::Color;
//! use flowsheet_core::draw::StrokeDefinition;
//! use svg::node::element as svg_element;
//!
//! let pipe = StrokeDefinition::solid(Color::new("#1f4e79").unwrap(), 2.0);
//! let line = svg_element::Line::new().set("x1", 0).set("x2", 10);
//! let line = flowsheet_core::apply_stroke!(line, &pipe);
//! ```
//!
//! | Property | SVG attribute |
//! |----------|---------------|
//! | `color` | `stroke`, `stroke-opacity` |
//! | `width` | `stroke-width` |
//! | `style` | `stroke-dasharray` |
//! | `cap` | `stroke-linecap` |
//! | `join` | `stroke-linejoin` |

use crate::color::Color;

/// Line pattern of a stroke.
///
/// Instrument signal lines are dashed by drafting convention; process lines
/// are solid.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// 5 on, 5 off
    Dashed,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
        }
    }
}

/// How line endpoints are rendered (`stroke-linecap`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
}

impl StrokeCap {
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
        }
    }
}

/// How line corners are rendered (`stroke-linejoin`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
}

impl StrokeJoin {
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
        }
    }
}

/// A stroke definition for rendering lines and borders.
///
/// # Examples
///
/// ```
/// use flowsheet_core::color::Color;
/// use flowsheet_core::draw::{StrokeDefinition, StrokeJoin, StrokeStyle};
///
/// let outline = StrokeDefinition::default();
/// assert_eq!(outline.width(), 1.0);
///
/// let signal = StrokeDefinition::solid(Color::default(), 1.0).with_style(StrokeStyle::Dashed);
/// assert_eq!(signal.style().to_svg_value(), Some("5,5"));
///
/// let pipe = StrokeDefinition::solid(Color::new("navy").unwrap(), 2.0)
///     .with_join(StrokeJoin::Round);
/// assert_eq!(pipe.join(), StrokeJoin::Round);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// Creates a solid stroke with butt caps and miter joins.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: StrokeJoin) -> Self {
        self.join = join;
        self
    }
}

impl Default for StrokeDefinition {
    /// Black, 1 unit wide, solid.
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::Solid,
            cap: StrokeCap::Butt,
            join: StrokeJoin::Miter,
        }
    }
}

/// Applies every attribute of a [`StrokeDefinition`] to an SVG element.
///
/// Expands to the element with `stroke`, `stroke-opacity`, `stroke-width`,
/// `stroke-linecap`, `stroke-linejoin` and (for patterned styles)
/// `stroke-dasharray` set.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value())
            .set("stroke-linejoin", $stroke.join().to_svg_value());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
        assert_eq!(stroke.cap(), StrokeCap::Butt);
        assert_eq!(stroke.join(), StrokeJoin::Miter);
    }

    #[test]
    fn test_stroke_builders() {
        let stroke = StrokeDefinition::solid(Color::new("red").unwrap(), 2.0)
            .with_width(3.0)
            .with_cap(StrokeCap::Round)
            .with_join(StrokeJoin::Round);

        assert_eq!(stroke.width(), 3.0);
        assert_eq!(stroke.cap().to_svg_value(), "round");
        assert_eq!(stroke.join().to_svg_value(), "round");
    }

    #[test]
    fn test_apply_stroke_sets_dasharray_only_when_patterned() {
        let solid = StrokeDefinition::default();
        let line = crate::apply_stroke!(svg_element::Line::new(), &solid);
        let rendered = line.to_string();
        assert!(rendered.contains("stroke-width=\"1\""));
        assert!(!rendered.contains("stroke-dasharray"));

        let dashed = StrokeDefinition::solid(Color::default(), 1.0).with_style(StrokeStyle::Dashed);
        let line = crate::apply_stroke!(svg_element::Line::new(), &dashed);
        assert!(line.to_string().contains("stroke-dasharray=\"5,5\""));
    }
}
