//! Polar arc geometry for circular gauges.
//!
//! Angles are in degrees, measured clockwise from the 12 o'clock position, on
//! a plane whose y axis points down.
use perfboard_core::math::{dial_angle, point, vector, Point};

use crate::path::{ArcFlags, SvgPath};

/// Converts a dial angle around `(center_x, center_y)` into a point.
///
/// `0°` lands straight above the center and angles grow clockwise. Non-finite
/// inputs are not rejected and propagate into the result.
pub fn polar_to_cartesian(center_x: f64, center_y: f64, radius: f64, angle_degrees: f64) -> Point {
    let angle = dial_angle(angle_degrees);
    point(
        center_x + radius * angle.radians.cos(),
        center_y + radius * angle.radians.sin(),
    )
}

/// Path data for a gauge fill arc between `start_angle` and `end_angle`.
///
/// The path starts at `end_angle` and runs back to `start_angle` with the
/// sweep flag cleared, so a following line to the center closes a wedge.
pub fn describe_arc(x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> SvgPath {
    ArcPath::new(point(x, y), radius, start_angle, end_angle).fill_path()
}

/// Path data for a straight guide mark from the center to the circle.
pub fn create_guideline(x: f64, y: f64, radius: f64, angle: f64) -> SvgPath {
    SvgPath::line(point(x, y), polar_to_cartesian(x, y, radius, angle))
}

/// Path data for a text label arc between `start_angle` and `end_angle`.
///
/// Unlike [`describe_arc`] the path runs from start to end with the sweep flag
/// set, so text placed on it reads left to right.
pub fn create_label_arc(x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> SvgPath {
    ArcPath::new(point(x, y), radius, start_angle, end_angle).label_path()
}

/// A segment of a circle on a gauge dial.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcPath {
    /// The center of the arc.
    pub center: Point,
    /// The radius of the arc.
    pub radius: f64,
    /// The start of the segment, in degrees clockwise from 12 o'clock.
    pub start_angle: f64,
    /// The end of the segment, in degrees clockwise from 12 o'clock.
    pub end_angle: f64,
}

impl ArcPath {
    pub const fn new(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// The point at `start_angle`.
    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    /// The point at `end_angle`.
    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }

    /// The point on this arc's circle at the given dial angle.
    pub fn point_at(&self, angle_degrees: f64) -> Point {
        polar_to_cartesian(self.center.x, self.center.y, self.radius, angle_degrees)
    }

    pub fn sweep_degrees(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Whether the SVG large-arc flag must be set, i.e. the sweep exceeds 180°.
    pub fn is_large_arc(&self) -> bool {
        !(self.sweep_degrees() <= 180.0)
    }

    /// The arc drawn from end to start with the sweep flag cleared.
    pub fn fill_path(&self) -> SvgPath {
        let path = SvgPath::builder()
            .move_to(self.end_point())
            .arc_to(
                vector(self.radius, self.radius),
                0.0,
                ArcFlags {
                    large_arc: self.is_large_arc(),
                    sweep: false,
                },
                self.start_point(),
            )
            .build();
        log::trace!("fill arc {:?}: {}", self, path);
        path
    }

    /// The arc drawn from start to end with the sweep flag set.
    pub fn label_path(&self) -> SvgPath {
        let path = SvgPath::builder()
            .move_to(self.start_point())
            .arc_to(
                vector(self.radius, self.radius),
                0.0,
                ArcFlags {
                    large_arc: self.is_large_arc(),
                    sweep: true,
                },
                self.end_point(),
            )
            .build();
        log::trace!("label arc {:?}: {}", self, path);
        path
    }
}
