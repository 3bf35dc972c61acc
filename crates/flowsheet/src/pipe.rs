//! Pipe routing and rendering.
//!
//! A connection becomes a [`PipeRoute`]: the caller's polyline when it
//! supplies at least two sample points, otherwise a straight segment between
//! the two rotated, world-anchored ports. Every route carries a flow arrow at
//! its middle.

use log::{trace, warn};
use svg::node::element as svg_element;

use flowsheet_core::{
    apply_stroke,
    draw::StrokeDefinition,
    geometry::{Bounds, CanvasTransform, Point},
    model::{Equipment, PipeConnection},
};

use crate::document::markers::FLOW_ARROW_ID;

/// Length of the short shaft that carries the arrowhead marker.
const ARROW_SHAFT: f32 = 8.0;

/// How the route was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// The connection's own sample points.
    Polyline,
    /// Fallback straight line between the two ports.
    Straight,
}

/// Position and unit direction of the flow arrow on a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowArrow {
    position: Point,
    direction: Point,
}

impl FlowArrow {
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn direction(&self) -> Point {
        self.direction
    }
}

/// A resolved pipe in diagram coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeRoute {
    kind: RouteKind,
    points: Vec<Point>,
    arrow: FlowArrow,
}

/// Direction of `to - from`, falling back to +x when the two coincide.
fn direction_or_default(from: Point, to: Point) -> Point {
    to.sub_point(from)
        .normalize()
        .unwrap_or(Point::new(1.0, 0.0))
}

impl PipeRoute {
    /// Resolves the route of `connection` between its two endpoints.
    pub fn resolve(
        connection: &PipeConnection,
        from: &Equipment,
        to: &Equipment,
        transform: &CanvasTransform,
    ) -> Self {
        let samples = connection.sample_points();
        if samples.len() >= 2 {
            let points: Vec<Point> = samples
                .iter()
                .map(|p| transform.world_position(p.to_point()))
                .collect();
            let middle = points.len() / 2;
            let before = points[middle.saturating_sub(1)];
            let after = points[(middle + 1).min(points.len() - 1)];
            let arrow = FlowArrow {
                position: points[middle],
                direction: direction_or_default(before, after),
            };
            return Self {
                kind: RouteKind::Polyline,
                points,
                arrow,
            };
        }

        let start = port_position(from, connection.from_port(), transform);
        let end = port_position(to, connection.to_port(), transform);
        Self {
            kind: RouteKind::Straight,
            points: vec![start, end],
            arrow: FlowArrow {
                position: start.midpoint(end),
                direction: direction_or_default(start, end),
            },
        }
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn arrow(&self) -> FlowArrow {
        self.arrow
    }

    /// Thin boxes around each segment, for collision checks.
    pub fn segment_bounds(&self, half_width: f32) -> Vec<Bounds> {
        self.points
            .windows(2)
            .filter_map(|pair| Bounds::from_points(pair.iter().copied()))
            .map(|bounds| bounds.inflate(half_width))
            .collect()
    }

    /// SVG path data through every point.
    pub fn path_data(&self) -> String {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let command = if i == 0 { "M" } else { "L" };
                format!("{command} {} {}", p.x(), p.y())
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Renders the pipe path and its flow arrow.
    pub fn render(&self, stroke: &StrokeDefinition) -> svg_element::Group {
        let path = svg_element::Path::new()
            .set("class", "pipe")
            .set("d", self.path_data())
            .set("fill", "none");

        let tail = self
            .arrow
            .position
            .sub_point(self.arrow.direction.scale(ARROW_SHAFT));
        let shaft = svg_element::Line::new()
            .set("class", "flow-arrow")
            .set("x1", tail.x())
            .set("y1", tail.y())
            .set("x2", self.arrow.position.x())
            .set("y2", self.arrow.position.y())
            .set("marker-end", format!("url(#{FLOW_ARROW_ID})"));

        svg_element::Group::new()
            .add(apply_stroke!(path, stroke))
            .add(apply_stroke!(shaft, stroke))
    }
}

/// World position of a named port, or the bare equipment position when the
/// class has no such port.
pub fn port_position(equipment: &Equipment, port: &str, transform: &CanvasTransform) -> Point {
    let position = equipment.position().to_point();
    match equipment.class().symbol().port(port) {
        Some(local) => {
            let anchored = transform.anchor_position(position, equipment.rotation(), local);
            trace!(id:% = equipment.id(), port = port, x = anchored.x(), y = anchored.y(); "Resolved port");
            anchored
        }
        None => {
            if equipment.class().is_known() {
                warn!(
                    id:% = equipment.id(),
                    class:% = equipment.class(),
                    port = port;
                    "Unknown port, anchoring on equipment center"
                );
            }
            transform.world_position(position)
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use flowsheet_core::model::PlanPosition;

    use super::*;

    fn plan_strategy() -> impl Strategy<Value = PlanPosition> {
        (-50.0f32..50.0, -50.0f32..50.0).prop_map(|(x, z)| PlanPosition::new(x, z))
    }

    fn rotation_strategy() -> impl Strategy<Value = f32> {
        prop_oneof![Just(0.0f32), Just(90.0), Just(180.0), Just(270.0), -360.0f32..360.0]
    }

    fn samples_strategy() -> impl Strategy<Value = Vec<PlanPosition>> {
        prop::collection::vec(plan_strategy(), 0..8)
    }

    fn route_for(
        from: PlanPosition,
        to: PlanPosition,
        rotation: f32,
        samples: Vec<PlanPosition>,
    ) -> PipeRoute {
        let pump = Equipment::new("a", "pump", from).with_rotation(rotation);
        let tank = Equipment::new("b", "tank", to);
        let transform = CanvasTransform::from_positions(
            [from.to_point(), to.to_point()]
                .into_iter()
                .chain(samples.iter().map(|p| p.to_point())),
            80.0,
            40.0,
        )
        .unwrap();
        let connection = PipeConnection::new("a", "outlet", "b", "inlet").with_sample_points(samples);
        PipeRoute::resolve(&connection, &pump, &tank, &transform)
    }

    /// The arrow always points along a unit direction.
    fn check_arrow_direction_is_unit(
        from: PlanPosition,
        to: PlanPosition,
        rotation: f32,
        samples: Vec<PlanPosition>,
    ) -> Result<(), TestCaseError> {
        let route = route_for(from, to, rotation, samples);
        let direction = route.arrow().direction();

        prop_assert!(approx_eq!(f32, direction.hypot(), 1.0, epsilon = 0.001));
        Ok(())
    }

    /// Two or more sample points are drawn verbatim; fewer fall back to a
    /// straight segment between the ports.
    fn check_route_kind(
        from: PlanPosition,
        to: PlanPosition,
        samples: Vec<PlanPosition>,
    ) -> Result<(), TestCaseError> {
        let count = samples.len();
        let route = route_for(from, to, 0.0, samples);

        if count >= 2 {
            prop_assert_eq!(route.kind(), RouteKind::Polyline);
            prop_assert_eq!(route.points().len(), count);
            prop_assert_eq!(route.arrow().position(), route.points()[count / 2]);
        } else {
            prop_assert_eq!(route.kind(), RouteKind::Straight);
            prop_assert_eq!(route.points().len(), 2);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_arrow_direction_is_unit(
            from in plan_strategy(),
            to in plan_strategy(),
            rotation in rotation_strategy(),
            samples in samples_strategy(),
        ) {
            check_arrow_direction_is_unit(from, to, rotation, samples)?;
        }

        #[test]
        fn prop_route_kind(
            from in plan_strategy(),
            to in plan_strategy(),
            samples in samples_strategy(),
        ) {
            check_route_kind(from, to, samples)?;
        }
    }
}
