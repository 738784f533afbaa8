//! Arrowhead geometry for connection paths.
//!
//! Every completed segment of a connection carries one arrowhead at its
//! midpoint, pointing from the segment start towards its end. The arrowhead
//! is an isosceles triangle with tip length [`ARROW_LENGTH`] and half-angle
//! [`ARROW_HALF_ANGLE`].

use std::f32::consts::{FRAC_PI_4, PI};

use crate::geometry::Point;

/// Distance from the segment midpoint to the arrow tip and to both base corners.
pub const ARROW_LENGTH: f32 = 5.0;

/// Half of the opening angle of the arrowhead, in radians.
pub const ARROW_HALF_ANGLE: f32 = FRAC_PI_4;

/// A triangular direction marker placed on a path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    tip: Point,
    left: Point,
    right: Point,
}

impl ArrowHead {
    /// Builds the arrowhead for the segment `start -> end` with the default size.
    ///
    /// # Examples
    ///
    /// ```
    /// use brickdraw_core::draw::ArrowHead;
    /// use brickdraw_core::geometry::Point;
    ///
    /// let arrow = ArrowHead::on_segment(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
    /// assert_eq!(arrow.tip(), Point::new(55.0, 0.0));
    /// ```
    pub fn on_segment(start: Point, end: Point) -> Self {
        Self::with_size(start, end, ARROW_LENGTH, ARROW_HALF_ANGLE)
    }

    /// Builds an arrowhead with an explicit tip length and half-angle (radians).
    pub fn with_size(start: Point, end: Point, length: f32, half_angle: f32) -> Self {
        let center = start.midpoint(end);
        let angle = start.angle_to(end);
        Self {
            tip: center.offset_polar(length, angle),
            left: center.offset_polar(length, angle + PI - half_angle),
            right: center.offset_polar(length, angle + PI + half_angle),
        }
    }

    pub fn tip(&self) -> Point {
        self.tip
    }

    pub fn left(&self) -> Point {
        self.left
    }

    pub fn right(&self) -> Point {
        self.right
    }

    /// Returns the triangle corners in drawing order.
    pub fn points(&self) -> [Point; 3] {
        [self.tip, self.left, self.right]
    }
}
