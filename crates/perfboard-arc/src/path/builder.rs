// The following code was copied and modified from
// https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/graphics/src/geometry/path/builder.rs
// Iced license (MIT): https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/LICENSE

use super::{ArcFlags, PathCommand, SvgPath};

use perfboard_core::math::{Point, Vector};
use smallvec::SmallVec;

/// An [`SvgPath`] builder.
///
/// Once a [`SvgPath`] is built, it can no longer be mutated.
pub struct PathBuilder {
    commands: SmallVec<[PathCommand; 4]>,
}

impl PathBuilder {
    /// Creates a new [`PathBuilder`].
    pub fn new() -> Self {
        Self {
            commands: SmallVec::new(),
        }
    }

    pub(super) fn from_commands(commands: SmallVec<[PathCommand; 4]>) -> Self {
        Self { commands }
    }

    /// Moves the starting point of a new sub-path to the given `Point`.
    pub fn move_to(mut self, point: Point) -> Self {
        self.commands.push(PathCommand::MoveTo(point));
        self
    }

    /// Connects the last point in the path to the given `Point` with a
    /// straight line.
    pub fn line_to(mut self, point: Point) -> Self {
        self.commands.push(PathCommand::LineTo(point));
        self
    }

    /// Adds an elliptical arc from the current point to `to`.
    ///
    /// `x_rotation` is in degrees. The flags select which of the four
    /// candidate arcs is drawn, exactly as in the SVG `A` command.
    pub fn arc_to(mut self, radii: Vector, x_rotation: f64, flags: ArcFlags, to: Point) -> Self {
        self.commands.push(PathCommand::ArcTo {
            radii,
            x_rotation,
            flags,
            to,
        });
        self
    }

    /// Closes the current sub-path with a straight line to its starting point.
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Builds the [`SvgPath`] of this [`PathBuilder`].
    pub fn build(self) -> SvgPath {
        SvgPath {
            commands: self.commands,
        }
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}
