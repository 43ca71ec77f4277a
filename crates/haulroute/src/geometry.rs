//! Plane geometry shared by layout, markers and rendering.

// Coordinate fields are self-explanatory
#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// 2D point in surface pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0)
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Linear interpolation toward `other`; `t = 0` is `self`, `t = 1` is `other`
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Midpoint between two points
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        self.lerp(other, 0.5)
    }

    /// Heading in radians from `self` toward `other`, as `atan2(dy, dx)`
    #[must_use]
    pub fn heading_to(self, other: Self) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Euclidean distance to `other`
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Offset by `(dx, dy)`
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Drawing surface size in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check if size has positive, finite area
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Center of the surface
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_lerp_endpoints() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(30.0, -20.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.midpoint(b), Point::new(20.0, 0.0));
    }

    #[test]
    fn test_heading() {
        let origin = Point::ZERO;
        assert!((origin.heading_to(Point::new(1.0, 0.0))).abs() < 1e-12);
        assert!((origin.heading_to(Point::new(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!((origin.heading_to(Point::new(-1.0, 0.0)) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_distance_and_offset() {
        let a = Point::new(0.0, 0.0);
        assert!((a.distance_to(Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
        assert_eq!(a.offset(2.0, -1.0), Point::new(2.0, -1.0));
    }

    #[test]
    fn test_size() {
        assert!(Size::new(800.0, 600.0).has_area());
        assert!(!Size::new(0.0, 600.0).has_area());
        assert!(!Size::new(f64::NAN, 600.0).has_area());
        assert_eq!(Size::new(800.0, 600.0).center(), Point::new(400.0, 300.0));
    }
}
