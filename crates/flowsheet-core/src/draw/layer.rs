//! Layer-based z-ordering for the assembled document.
//!
//! Drawables push nodes into a [`LayeredOutput`] tagged with a
//! [`RenderLayer`]; rendering emits one `<g data-layer="...">` per non-empty
//! layer in declaration order, bottom to top.
//!
//! ```
//! # use flowsheet_core::draw::{LayeredOutput, RenderLayer};
//! # use svg::node::element::{Group, Path};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Piping, Box::new(Path::new()));
//! output.add_to_layer(RenderLayer::Equipment, Box::new(Group::new()));
//!
//! // Equipment is emitted before piping regardless of insertion order.
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// One group per equipment instance
    Equipment,
    /// Pipe paths and their flow arrows
    Piping,
    /// The title block, always on top
    TitleBlock,
}

impl RenderLayer {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Equipment => "equipment",
            Self::Piping => "piping",
            Self::TitleBlock => "title-block",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to `layer`. Insertion order is kept within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute. The sort is stable, so nodes keep their insertion order
    /// inside a layer.
    pub fn render(mut self) -> Vec<SvgNode> {
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((current_layer, group.add(node)))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        result.push(Box::new(group) as SvgNode);
                    }
                    let group = svg_element::Group::new().set("data-layer", layer.name());
                    Some((layer, group.add(node)))
                }
            };
        }

        if let Some((_, group)) = current {
            result.push(Box::new(group) as SvgNode);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::Rectangle;

    use super::*;

    #[test]
    fn test_layered_output_new() {
        assert!(LayeredOutput::new().render().is_empty());
    }

    #[test]
    fn test_empty_layers_are_skipped() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Equipment, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::TitleBlock, Box::new(Rectangle::new()));

        let rendered: Vec<String> = output.render().iter().map(|n| n.to_string()).collect();
        assert_eq!(rendered.len(), 2);
        assert!(!rendered.iter().any(|g| g.contains("data-layer=\"piping\"")));
    }

    #[test]
    fn test_layered_output_order() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::TitleBlock, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Piping, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Equipment, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Equipment, Box::new(Rectangle::new()));

        let rendered: Vec<String> = output.render().iter().map(|n| n.to_string()).collect();
        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].contains("data-layer=\"equipment\""));
        assert!(rendered[1].contains("data-layer=\"piping\""));
        assert!(rendered[2].contains("data-layer=\"title-block\""));
        assert_eq!(rendered[0].matches("<rect").count(), 2);
    }
}
