//! Geometry aliases used throughout perfboard.
//!
//! Gauges are computed in `f64` so that the generated path data matches what a
//! browser would compute for the same inputs.

pub use euclid;

/// A point in the gauge's drawing plane. The y axis points down, as in SVG.
///
/// Alias for ```euclid::default::Point2D<f64>```.
pub type Point = euclid::default::Point2D<f64>;

/// A vector in the gauge's drawing plane.
///
/// Alias for ```euclid::default::Vector2D<f64>```.
pub type Vector = euclid::default::Vector2D<f64>;

/// An angle in radians.
///
/// Alias for ```euclid::Angle<f64>```.
pub type Angle = euclid::Angle<f64>;

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub const fn vector(x: f64, y: f64) -> Vector {
    Vector::new(x, y)
}

/// Shorthand for `Angle { radians: value }`.
#[inline]
pub const fn radians(radians: f64) -> Angle {
    Angle { radians }
}

/// Shorthand for `Angle { radians: value * PI / 180.0 }`.
#[inline]
pub fn degrees(degrees: f64) -> Angle {
    Angle {
        radians: degrees * std::f64::consts::PI / 180.0,
    }
}

/// Converts a dial angle (degrees, clockwise from 12 o'clock) into the
/// screen-space angle measured from the positive x axis.
#[inline]
pub fn dial_angle(angle_degrees: f64) -> Angle {
    degrees(angle_degrees - 90.0)
}
