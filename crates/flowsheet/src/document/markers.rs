//! Reusable `<defs>` resources.

use svg::node::element::{Definitions, Marker, Path};

use flowsheet_core::color::Color;

/// Id of the flow-direction arrowhead referenced by every pipe.
pub const FLOW_ARROW_ID: &str = "flow-arrow";

/// Builds the single definitions block holding the flow arrowhead.
pub fn definitions(color: Color) -> Definitions {
    let arrow = Marker::new()
        .set("id", FLOW_ARROW_ID)
        .set("viewBox", "0 0 10 10")
        .set("refX", 9)
        .set("refY", 5)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(
            Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10 z")
                .set("fill", color.to_string()),
        );

    Definitions::new().add(arrow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_marker() {
        let rendered = definitions(Color::default()).to_string();
        assert_eq!(rendered.matches("<marker").count(), 1);
        assert!(rendered.contains("id=\"flow-arrow\""));
        assert!(rendered.contains("orient=\"auto\""));
    }
}
