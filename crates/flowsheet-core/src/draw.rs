//! Drawing primitives for schematic output.
//!
//! Everything that ends up in the SVG goes through one of these types: strokes
//! for outlines and pipes, escaped text labels, and the layer collector that
//! fixes the document's z-order.
mod layer;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{Text, TextAnchor, TextDefinition, escape_xml};

use crate::geometry::{Point, Size};

/// A component that can render itself at a diagram position.
pub trait Drawable: std::fmt::Debug {
    fn render_to_svg(&self, position: Point) -> Box<dyn svg::Node>;
    fn size(&self) -> Size;
}
