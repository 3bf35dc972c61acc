//! Geometric primitives and the model-to-diagram transform.
//!
//! This module provides the coordinate math used by every stage of schematic
//! generation: points, sizes and bounding boxes in diagram space, rotation of
//! symbol-local offsets, and the [`CanvasTransform`] that maps plan positions
//! (model units) onto the drawing canvas.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`rotate_local_offset`] - Clockwise rotation of a local anchor offset
//! - [`CanvasTransform`] - Scale + offset derived from the equipment bounding box
//!
//! # Coordinate System
//!
//! Diagram coordinates follow SVG conventions. The plan `z` axis of the model
//! maps onto the diagram `y` axis, so "further along z" is "further down":
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!   +Y (model +Z)
//! ```
//!
//! Rotations are expressed in degrees and are clockwise-positive in the plan
//! frame. See [`rotate_local_offset`] for the exact convention.

use log::{debug, warn};

use crate::symbol::NOMINAL_SYMBOL_SIZE;

/// A 2D point representing a position in diagram (or symbol-local) space.
///
/// Points use `f32` coordinates and provide operations for basic vector math.
///
/// # Examples
///
/// ```
/// # use flowsheet_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns true when both coordinates are finite numbers
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowsheet_core::geometry::Point;
    /// let point = Point::new(10.0, 20.0);
    ///
    /// let doubled = point.scale(2.0);
    /// assert_eq!(doubled.x(), 20.0);
    /// assert_eq!(doubled.y(), 40.0);
    /// ```
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns the unit vector pointing in the same direction, or `None`
    /// when the point is (numerically) the origin.
    pub fn normalize(self) -> Option<Self> {
        let length = self.hypot();
        if length < 1e-6 {
            return None;
        }
        Some(self.scale(1.0 / length))
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds, and the size
    /// is distributed equally in all directions around that center.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates the smallest bounds containing every point, or `None` for an
    /// empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowsheet_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_points([Point::new(1.0, 5.0), Point::new(-2.0, 3.0)]).unwrap();
    /// assert_eq!(bounds.min_x(), -2.0);
    /// assert_eq!(bounds.max_y(), 5.0);
    ///
    /// assert!(Bounds::from_points(std::iter::empty()).is_none());
    /// ```
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        points.into_iter().fold(None, |acc, p| {
            let point_bounds = Self {
                min_x: p.x,
                min_y: p.y,
                max_x: p.x,
                max_y: p.y,
            };
            Some(match acc {
                Some(bounds) => point_bounds.merge(&bounds),
                None => point_bounds,
            })
        })
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Grows the bounds by `amount` on every side.
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    /// Returns true when the two boxes share interior area.
    ///
    /// Boxes that merely touch along an edge do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowsheet_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
    /// let b = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
    /// let c = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));
    ///
    /// assert!(a.intersects(&b));
    /// assert!(!a.intersects(&c));
    /// ```
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

/// Rotates a symbol-local offset by `angle_degrees`, clockwise-positive.
///
/// The rotation negates the angle and applies the standard counter-clockwise
/// rotation matrix:
///
/// ```text
/// θ  = -angle
/// x' = dx·cos θ − dz·sin θ
/// z' = dx·sin θ + dz·cos θ
/// ```
///
/// Glyphs are rotated with the same convention (see
/// [`svg_rotation_degrees`]), so a port anchor rotated here lands on the
/// matching point of the rotated glyph.
///
/// # Examples
///
/// ```
/// # use flowsheet_core::geometry::{rotate_local_offset, Point};
/// let anchor = Point::new(30.0, 0.0);
///
/// let unrotated = rotate_local_offset(anchor, 0.0);
/// assert_eq!(unrotated, anchor);
///
/// let quarter = rotate_local_offset(anchor, 90.0);
/// assert!(quarter.x().abs() < 1e-4);
/// assert!((quarter.y() + 30.0).abs() < 1e-4);
/// ```
pub fn rotate_local_offset(offset: Point, angle_degrees: f32) -> Point {
    if angle_degrees == 0.0 {
        return offset;
    }
    let theta = (-angle_degrees).to_radians();
    let (sin, cos) = theta.sin_cos();
    Point::new(
        offset.x * cos - offset.y * sin,
        offset.x * sin + offset.y * cos,
    )
}

/// Returns the angle to pass to an SVG `rotate()` transform so that a glyph
/// turns the same way as [`rotate_local_offset`] turns its anchors.
///
/// SVG rotates positive angles with the plain counter-clockwise matrix in a
/// y-down frame, so the model angle is negated here exactly as it is in
/// [`rotate_local_offset`].
pub fn svg_rotation_degrees(angle_degrees: f32) -> f32 {
    if angle_degrees == 0.0 {
        0.0
    } else {
        -angle_degrees
    }
}

/// The affine map from plan positions (model units) to diagram coordinates.
///
/// Derived once per generation call from the bounding box of all equipment
/// positions:
///
/// - `scale` is fixed (diagram units per model unit),
/// - the canvas is `extent × scale + 2 × margin + 2 × NOMINAL_SYMBOL_SIZE` in
///   each dimension, reserving room for the outermost symbols and their labels,
/// - the offset puts the bounding box minimum one margin plus half a symbol
///   inside the canvas origin.
///
/// # Examples
///
/// ```
/// # use flowsheet_core::geometry::{CanvasTransform, Point};
/// let transform = CanvasTransform::from_positions([Point::new(0.0, 0.0)], 80.0, 40.0).unwrap();
///
/// // A single point still yields a valid, positive canvas.
/// assert!(transform.canvas_size().width() > 0.0);
/// assert!(transform.canvas_size().height() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    scale: f32,
    offset: Point,
    canvas_size: Size,
}

impl CanvasTransform {
    /// Derives the transform for the given plan positions.
    ///
    /// Returns `None` when there are no positions, or when the positions are
    /// so far apart that the canvas or its offset overflows `f32`.
    pub fn from_positions<I>(positions: I, scale: f32, margin: f32) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let bounds = Bounds::from_points(positions)?;

        let reserve = 2.0 * margin + 2.0 * NOMINAL_SYMBOL_SIZE;
        let canvas_size = Size::new(
            bounds.width() * scale + reserve,
            bounds.height() * scale + reserve,
        );

        let inset = margin + NOMINAL_SYMBOL_SIZE / 2.0;
        let offset = Point::new(
            inset - bounds.min_x() * scale,
            inset - bounds.min_y() * scale,
        );

        if !canvas_size.is_finite() || !offset.is_finite() {
            warn!(
                plan_width = bounds.width(),
                plan_height = bounds.height();
                "Plan extent overflows the canvas"
            );
            return None;
        }

        debug!(
            plan_width = bounds.width(),
            plan_height = bounds.height(),
            canvas_width = canvas_size.width(),
            canvas_height = canvas_size.height();
            "Derived canvas transform"
        );

        Some(Self {
            scale,
            offset,
            canvas_size,
        })
    }

    /// Returns the scale factor (diagram units per model unit)
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Returns the translation applied after scaling
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Returns the canvas size derived from the bounding box
    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Maps a plan position to diagram coordinates: `position × scale + offset`.
    pub fn world_position(&self, position: Point) -> Point {
        position.scale(self.scale).add_point(self.offset)
    }

    /// Maps a symbol-local anchor onto the diagram: rotate first, then
    /// translate to the symbol's world position.
    pub fn anchor_position(&self, position: Point, rotation: f32, local: Point) -> Point {
        self.world_position(position)
            .add_point(rotate_local_offset(local, rotation))
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn anchor_strategy() -> impl Strategy<Value = Point> {
        (-100.0f32..100.0, -100.0f32..100.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn angle_strategy() -> impl Strategy<Value = f32> {
        -720.0f32..720.0
    }

    fn positions_strategy() -> impl Strategy<Value = Vec<Point>> {
        prop::collection::vec(point_strategy(), 1..32)
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Rotating by θ and then by -θ should return the original anchor.
    fn check_rotation_roundtrip(p: Point, angle: f32) -> Result<(), TestCaseError> {
        let roundtrip = rotate_local_offset(rotate_local_offset(p, angle), -angle);

        prop_assert!(approx_eq!(f32, roundtrip.x(), p.x(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, roundtrip.y(), p.y(), epsilon = 0.01));
        Ok(())
    }

    /// Rotation should never change the distance from the symbol center.
    fn check_rotation_preserves_length(p: Point, angle: f32) -> Result<(), TestCaseError> {
        let rotated = rotate_local_offset(p, angle);

        prop_assert!(approx_eq!(f32, rotated.hypot(), p.hypot(), epsilon = 0.01));
        Ok(())
    }

    /// Every non-empty position set yields a strictly positive canvas.
    fn check_canvas_is_positive(positions: Vec<Point>) -> Result<(), TestCaseError> {
        let transform = CanvasTransform::from_positions(positions, 80.0, 40.0);

        prop_assert!(transform.is_some());
        let size = transform.map(|t| t.canvas_size()).unwrap_or_default();
        prop_assert!(size.width() > 0.0);
        prop_assert!(size.height() > 0.0);
        Ok(())
    }

    /// Every equipment center lands inside the canvas with room for half a symbol.
    fn check_positions_inside_canvas(positions: Vec<Point>) -> Result<(), TestCaseError> {
        let Some(transform) = CanvasTransform::from_positions(positions.clone(), 80.0, 40.0)
        else {
            return Err(TestCaseError::fail("non-empty positions must frame"));
        };
        let size = transform.canvas_size();
        let half = NOMINAL_SYMBOL_SIZE / 2.0;

        for p in positions {
            let world = transform.world_position(p);
            prop_assert!(world.x() - half >= -0.5);
            prop_assert!(world.y() - half >= -0.5);
            prop_assert!(world.x() + half <= size.width() + 0.5);
            prop_assert!(world.y() + half <= size.height() + 0.5);
        }
        Ok(())
    }

    /// The transform is affine: plan differences scale uniformly.
    fn check_transform_is_linear(
        positions: Vec<Point>,
        a: Point,
        b: Point,
    ) -> Result<(), TestCaseError> {
        let scale = 80.0;
        let Some(transform) = CanvasTransform::from_positions(positions, scale, 40.0) else {
            return Err(TestCaseError::fail("non-empty positions must frame"));
        };

        let world_delta = transform.world_position(a).sub_point(transform.world_position(b));
        let plan_delta = a.sub_point(b).scale(scale);

        prop_assert!(approx_eq!(f32, world_delta.x(), plan_delta.x(), epsilon = 0.1));
        prop_assert!(approx_eq!(f32, world_delta.y(), plan_delta.y(), epsilon = 0.1));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn rotation_roundtrip(p in anchor_strategy(), angle in angle_strategy()) {
            check_rotation_roundtrip(p, angle)?;
        }

        #[test]
        fn rotation_preserves_length(p in anchor_strategy(), angle in angle_strategy()) {
            check_rotation_preserves_length(p, angle)?;
        }

        #[test]
        fn canvas_is_positive(positions in positions_strategy()) {
            check_canvas_is_positive(positions)?;
        }

        #[test]
        fn positions_inside_canvas(positions in positions_strategy()) {
            check_positions_inside_canvas(positions)?;
        }

        #[test]
        fn transform_is_linear(
            positions in positions_strategy(),
            a in point_strategy(),
            b in point_strategy(),
        ) {
            check_transform_is_linear(positions, a, b)?;
        }
    }
}
