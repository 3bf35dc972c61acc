//! Escaped text labels.
//!
//! Tags, display names and parameter lines are user-edited text. They are
//! escaped with [`escape_xml`] and inserted as raw character data, so no input
//! can break document well-formedness.
//!
//! ```
//! # use flowsheet_core::draw::{Drawable, Text, TextDefinition};
//! # use flowsheet_core::geometry::Point;
//! let style = TextDefinition::new("Arial", 12);
//! let label = Text::new(&style, "Feed <A> & \"B\"");
//!
//! let rendered = label.render_to_svg(Point::new(10.0, 20.0)).to_string();
//! assert!(rendered.contains("Feed &lt;A&gt; &amp; &quot;B&quot;"));
//! assert!(!rendered.contains("<A>"));
//! ```

use svg::node::{Blob, element as svg_element};

use crate::{
    color::Color,
    draw::Drawable,
    geometry::{Bounds, Point, Size},
};

/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f32 = 0.6;
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Escapes the five markup-significant characters.
///
/// # Examples
///
/// ```
/// # use flowsheet_core::draw::escape_xml;
/// assert_eq!(escape_xml(r#"a<b>&"c"'d'"#), "a&lt;b&gt;&amp;&quot;c&quot;&apos;d&apos;");
/// assert_eq!(escape_xml("plain"), "plain");
/// ```
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Font and alignment shared by a family of labels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
    anchor: TextAnchor,
    bold: bool,
}

impl TextDefinition {
    pub fn new(font_family: &str, font_size: u16) -> Self {
        Self {
            font_family: font_family.to_string(),
            font_size,
            color: None,
            anchor: TextAnchor::Middle,
            bold: false,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_font_size(mut self, font_size: u16) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    /// Height of one line of text in diagram units.
    pub fn line_height(&self) -> f32 {
        f32::from(self.font_size) * LINE_HEIGHT_FACTOR
    }
}

/// A single-line label bound to a [`TextDefinition`].
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: String,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &str) -> Self {
        Self {
            definition,
            content: content.to_string(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Bounds of the label when rendered at `position`, honoring the anchor.
    pub fn bounds_at(&self, position: Point) -> Bounds {
        let size = self.size();
        let left = match self.definition.anchor {
            TextAnchor::Start => position.x(),
            TextAnchor::Middle => position.x() - size.width() / 2.0,
            TextAnchor::End => position.x() - size.width(),
        };
        Bounds::new_from_top_left(
            Point::new(left, position.y() - size.height() / 2.0),
            size,
        )
    }
}

impl Drawable for Text<'_> {
    /// Renders a `<text>` element vertically centered on `position`.
    fn render_to_svg(&self, position: Point) -> Box<dyn svg::Node> {
        let mut text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", self.definition.anchor.to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family.as_str())
            .set("font-size", self.definition.font_size);

        if let Some(color) = self.definition.color {
            text = text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }
        if self.definition.bold {
            text = text.set("font-weight", "bold");
        }

        Box::new(text.add(Blob::new(escape_xml(&self.content))))
    }

    /// Estimated extent; fonts are not measured, so this is a fixed-advance
    /// approximation.
    fn size(&self) -> Size {
        let chars = self.content.chars().count() as f32;
        let font_size = f32::from(self.definition.font_size);
        Size::new(
            chars * font_size * CHAR_WIDTH_FACTOR,
            self.definition.line_height(),
        )
    }
}
