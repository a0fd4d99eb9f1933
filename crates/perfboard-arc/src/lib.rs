//! Polar arc geometry and SVG path data for circular gauges.

pub mod arc;
pub mod path;

pub use arc::{create_guideline, create_label_arc, describe_arc, polar_to_cartesian, ArcPath};
pub use path::{ArcFlags, PathBuilder, PathCommand, SvgPath};

pub use lyon;
pub use perfboard_core;
