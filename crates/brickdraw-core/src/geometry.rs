//! Geometric primitives for diagram placement and grid snapping.
//!
//! This module provides the geometric types used throughout Brickdraw for
//! positioning entities on the canvas, computing port locations and routing
//! connection polylines.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - The axis-aligned box an entity occupies, used for hit testing
//! - [`snap_to_grid`] - Rounds a scalar to the nearest grid line
//!
//! # Coordinate System
//!
//! Brickdraw uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Entity positions refer to the top-left corner of the entity's bounding
//! box. Rotation is expressed in degrees, clockwise, matching SVG's
//! `rotate()` transform.

/// Rounds `value` to the nearest multiple of `grid`.
///
/// A non-positive `grid` disables snapping and returns `value` unchanged.
///
/// # Examples
///
/// ```
/// # use brickdraw_core::geometry::snap_to_grid;
/// assert_eq!(snap_to_grid(103.0, 25.0), 100.0);
/// assert_eq!(snap_to_grid(113.0, 25.0), 125.0);
/// assert_eq!(snap_to_grid(-13.0, 25.0), -25.0);
/// ```
pub fn snap_to_grid(value: f32, grid: f32) -> f32 {
    if grid <= 0.0 {
        return value;
    }
    (value / grid).round() * grid
}

/// A 2D point representing a position in canvas coordinate space.
///
/// # Examples
///
/// ```
/// # use brickdraw_core::geometry::Point;
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
    pub fn new(x: f32, y: f32) -> Self {
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

    /// Adds another point to this point, returning a new point
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

    /// Returns the angle in radians of the vector from `self` to `other`.
    ///
    /// The angle is measured from the positive x-axis; with y pointing down
    /// positive angles turn clockwise on screen.
    pub fn angle_to(self, other: Point) -> f32 {
        let delta = other.sub_point(self);
        delta.y.atan2(delta.x)
    }

    /// Returns the point at `distance` from `self` in direction `angle` (radians).
    pub fn offset_polar(self, distance: f32, angle: f32) -> Self {
        Self {
            x: self.x + distance * angle.cos(),
            y: self.y + distance * angle.sin(),
        }
    }

    /// Rotates this point about `center` by `degrees`, clockwise on screen.
    ///
    /// # Examples
    ///
    /// ```
    /// # use brickdraw_core::geometry::Point;
    /// let p = Point::new(10.0, 0.0).rotate_about(Point::default(), 90.0);
    /// assert!(p.x().abs() < 1e-4);
    /// assert!((p.y() - 10.0).abs() < 1e-4);
    /// ```
    pub fn rotate_about(self, center: Point, degrees: f32) -> Self {
        if degrees == 0.0 {
            return self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let local = self.sub_point(center);
        Self {
            x: center.x + local.x * cos - local.y * sin,
            y: center.y + local.x * sin + local.y * cos,
        }
    }

    /// Snaps both coordinates to the nearest grid intersection.
    pub fn snap_to_grid(self, grid: f32) -> Self {
        Self {
            x: snap_to_grid(self.x, grid),
            y: snap_to_grid(self.y, grid),
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the offset from the top-left corner to the center.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
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
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns true if `point` lies inside or on the edge of the bounds.
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(0.0, 25.0), 0.0);
        assert_eq!(snap_to_grid(12.4, 25.0), 0.0);
        assert_eq!(snap_to_grid(12.6, 25.0), 25.0);
        assert_eq!(snap_to_grid(207.0, 25.0), 200.0);
        assert_eq!(snap_to_grid(-40.0, 25.0), -50.0);
    }

    #[test]
    fn test_snap_to_grid_disabled() {
        assert_eq!(snap_to_grid(13.7, 0.0), 13.7);
        assert_eq!(snap_to_grid(13.7, -5.0), 13.7);
    }

    #[test]
    fn test_point_snap_to_grid() {
        let p = Point::new(103.0, 207.0).snap_to_grid(25.0);
        assert_eq!(p, Point::new(100.0, 200.0));
    }

    #[test]
    fn test_point_add_sub() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.add_point(b), Point::new(13.0, 24.0));
        assert_eq!(a.sub_point(b), Point::new(7.0, 16.0));
    }

    #[test]
    fn test_point_hypot() {
        assert_eq!(Point::new(3.0, 4.0).hypot(), 5.0);
    }

    #[test]
    fn test_point_angle_to() {
        let origin = Point::default();
        assert_eq!(origin.angle_to(Point::new(10.0, 0.0)), 0.0);
        let down = origin.angle_to(Point::new(0.0, 10.0));
        assert!((down - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_point_offset_polar() {
        let p = Point::new(1.0, 1.0).offset_polar(5.0, 0.0);
        assert_eq!(p, Point::new(6.0, 1.0));
    }

    #[test]
    fn test_point_rotate_about_center() {
        let center = Point::new(25.0, 25.0);
        let bottom_middle = Point::new(25.0, 50.0);

        let rotated = bottom_middle.rotate_about(center, 90.0);
        assert!((rotated.x() - 0.0).abs() < 1e-4);
        assert!((rotated.y() - 25.0).abs() < 1e-4);

        let rotated = bottom_middle.rotate_about(center, 180.0);
        assert!((rotated.x() - 25.0).abs() < 1e-4);
        assert!((rotated.y() - 0.0).abs() < 1e-4);
    }

    #[test]
    fn test_point_rotate_zero_is_identity() {
        let p = Point::new(12.5, 7.0);
        assert_eq!(p.rotate_about(Point::new(100.0, 100.0), 0.0), p);
    }

    #[test]
    fn test_size_center() {
        let size = Size::new(50.0, 80.0);
        assert_eq!(size.center(), Point::new(25.0, 40.0));
    }

    #[test]
    fn test_bounds_new_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(75.0, 175.0), Size::new(50.0, 50.0));
        assert_eq!(bounds.center(), Point::new(100.0, 200.0));
        assert!(bounds.contains(Point::new(125.0, 225.0)));
        assert!(!bounds.contains(Point::new(74.0, 200.0)));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new_from_top_left(Point::default(), Size::new(10.0, 10.0));
        assert!(bounds.contains(Point::new(5.0, 5.0)));
        assert!(bounds.contains(Point::new(10.0, 0.0)));
        assert!(!bounds.contains(Point::new(10.1, 5.0)));
    }

}
