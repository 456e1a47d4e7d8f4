//! Geometric primitives for graph layout and rendering.
//!
//! - [`Point`] - a position in viewport space, also used as a 2-D vector
//!   (velocities, forces, pan offsets)
//! - [`Size`] - viewport or node extent
//! - [`Bounds`] - axis-aligned rectangle given by its min and max corners
//!
//! # Coordinate System
//!
//! Coordinates follow SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! The origin is the top-left corner of the viewport.

/// A position or displacement in viewport space.
///
/// # Examples
///
/// ```
/// # use nodeweave_core::geometry::Point;
/// let a = Point::new(3.0, 0.0);
/// let b = Point::new(0.0, 4.0);
///
/// assert_eq!(a.distance(b), 5.0);
/// assert_eq!(b.sub_point(a), Point::new(-3.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// True for the origin (a zero vector)
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Returns true if neither coordinate is NaN or infinite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise sum.
    ///
    /// ```
    /// # use nodeweave_core::geometry::Point;
    /// let position = Point::new(100.0, 50.0);
    /// let velocity = Point::new(-2.5, 4.0);
    /// assert_eq!(position.add_point(velocity), Point::new(97.5, 54.0));
    /// ```
    pub fn add_point(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference, the vector from `other` to `self`
    pub fn sub_point(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Length of the vector
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }

    /// Multiplies both coordinates by `factor`
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Point at `radius` from this point in the direction of `angle` (radians)
    pub fn polar_offset(self, radius: f32, angle: f32) -> Self {
        Self::new(
            self.x + radius * angle.cos(),
            self.y + radius * angle.sin(),
        )
    }

    /// Rectangle of the given size centered on this point
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Width and height of a rectangular area.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Middle of an area of this size anchored at the origin.
    ///
    /// ```
    /// # use nodeweave_core::geometry::Size;
    /// let viewport = Size::new(800.0, 600.0);
    /// let center = viewport.center();
    /// assert_eq!(center.x(), 400.0);
    /// assert_eq!(center.y(), 300.0);
    /// ```
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half = Point::new(size.width / 2.0, size.height / 2.0);
        Self {
            min_x: center.x - half.x,
            min_y: center.y - half.y,
            max_x: center.x + half.x,
            max_y: center.y + half.y,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Smallest rectangle covering both.
    ///
    /// ```
    /// # use nodeweave_core::geometry::{Point, Size};
    /// let a = Point::new(0.0, 0.0).to_bounds(Size::new(10.0, 10.0));
    /// let b = Point::new(20.0, 0.0).to_bounds(Size::new(10.0, 10.0));
    ///
    /// let both = a.merge(&b);
    /// assert_eq!(both.min_x(), -5.0);
    /// assert_eq!(both.width(), 30.0);
    /// assert_eq!(both.height(), 10.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::{approx_eq, assert_approx_eq};
    use proptest::{prelude::*, test_runner::TestCaseError};

    use super::*;

    #[test]
    fn test_default_point_is_zero() {
        assert!(Point::default().is_zero());
        assert!(!Point::new(0.0, 1.0).is_zero());
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, -2.0).is_finite());
        assert!(!Point::new(f32::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f32::INFINITY).is_finite());
    }

    #[test]
    fn test_point_scale() {
        assert_eq!(Point::new(10.0, -4.0).scale(0.5), Point::new(5.0, -2.0));
    }

    #[test]
    fn test_point_polar_offset() {
        let center = Point::new(100.0, 100.0);

        let right = center.polar_offset(50.0, 0.0);
        assert_approx_eq!(f32, right.x(), 150.0, epsilon = 0.001);
        assert_approx_eq!(f32, right.y(), 100.0, epsilon = 0.001);

        let down = center.polar_offset(50.0, std::f32::consts::FRAC_PI_2);
        assert_approx_eq!(f32, down.x(), 100.0, epsilon = 0.001);
        assert_approx_eq!(f32, down.y(), 150.0, epsilon = 0.001);
    }

    #[test]
    fn test_node_bounds() {
        let bounds = Point::new(50.0, 40.0).to_bounds(Size::new(20.0, 10.0));
        assert_eq!(bounds.min_x(), 40.0);
        assert_eq!(bounds.min_y(), 35.0);
        assert_eq!(bounds.max_x(), 60.0);
        assert_eq!(bounds.max_y(), 45.0);
        assert_eq!(bounds.width(), 20.0);
        assert_eq!(bounds.height(), 10.0);
    }

    fn coordinate() -> impl Strategy<Value = f32> {
        -10_000.0f32..10_000.0
    }

    fn any_point() -> impl Strategy<Value = Point> {
        (coordinate(), coordinate()).prop_map(|(x, y)| Point::new(x, y))
    }

    fn any_bounds() -> impl Strategy<Value = Bounds> {
        (any_point(), 0.0f32..1_000.0, 0.0f32..1_000.0)
            .prop_map(|(center, w, h)| center.to_bounds(Size::new(w, h)))
    }

    /// `(a + b) - b` gives back `a`, up to rounding.
    fn check_add_then_sub(a: Point, b: Point) -> Result<(), TestCaseError> {
        let back = a.add_point(b).sub_point(b);
        prop_assert!(approx_eq!(f32, back.x(), a.x(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, back.y(), a.y(), epsilon = 0.01));
        Ok(())
    }

    /// Distance is symmetric and obeys the triangle inequality.
    fn check_distance_metric(a: Point, b: Point, c: Point) -> Result<(), TestCaseError> {
        let ab = a.distance(b);
        prop_assert!(ab >= 0.0);
        prop_assert!(approx_eq!(f32, ab, b.distance(a), epsilon = 0.001));
        prop_assert!(a.distance(c) <= ab + b.distance(c) + 0.01);
        Ok(())
    }

    /// A polar offset lands exactly `radius` away.
    fn check_polar_offset_radius(
        center: Point,
        radius: f32,
        angle: f32,
    ) -> Result<(), TestCaseError> {
        let moved = center.polar_offset(radius, angle);
        prop_assert!(approx_eq!(f32, center.distance(moved), radius, epsilon = 0.01));
        Ok(())
    }

    /// The merge of two rectangles covers both of them.
    fn check_merge_covers(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        let merged = a.merge(&b);
        for part in [a, b] {
            prop_assert!(merged.min_x() <= part.min_x());
            prop_assert!(merged.min_y() <= part.min_y());
            prop_assert!(merged.max_x() >= part.max_x());
            prop_assert!(merged.max_y() >= part.max_y());
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn add_then_sub(a in any_point(), b in any_point()) {
            check_add_then_sub(a, b)?;
        }

        #[test]
        fn distance_metric(a in any_point(), b in any_point(), c in any_point()) {
            check_distance_metric(a, b, c)?;
        }

        #[test]
        fn polar_offset_radius(
            center in any_point(),
            radius in 0.0f32..1_000.0,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            check_polar_offset_radius(center, radius, angle)?;
        }

        #[test]
        fn merge_covers(a in any_bounds(), b in any_bounds()) {
            check_merge_covers(a, b)?;
        }
    }
}
