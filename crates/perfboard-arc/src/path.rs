mod builder;

pub use builder::PathBuilder;

#[doc(no_inline)]
pub use lyon::path::ArcFlags;

pub use lyon::path as lyon_path;

use std::fmt;

use perfboard_core::math::{Point, Vector};
use smallvec::SmallVec;

/// A single drawing command of an [`SvgPath`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathCommand {
    /// `M x y`
    MoveTo(Point),
    /// `L x y`
    LineTo(Point),
    /// `A rx ry x-axis-rotation large-arc-flag sweep-flag x y`
    ArcTo {
        radii: Vector,
        /// Rotation of the ellipse's x axis, in degrees.
        x_rotation: f64,
        flags: ArcFlags,
        to: Point,
    },
    /// `Z`
    Close,
}

impl PathCommand {
    /// The point the pen rests on after this command, if it moves the pen.
    pub fn end_point(&self) -> Option<Point> {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => Some(*p),
            Self::ArcTo { to, .. } => Some(*to),
            Self::Close => None,
        }
    }

    fn write_tokens(&self, f: &mut fmt::Formatter<'_>, precision: Option<u8>) -> fmt::Result {
        match self {
            Self::MoveTo(p) => {
                f.write_str("M ")?;
                write_point(f, *p, precision)
            }
            Self::LineTo(p) => {
                f.write_str("L ")?;
                write_point(f, *p, precision)
            }
            Self::ArcTo {
                radii,
                x_rotation,
                flags,
                to,
            } => {
                f.write_str("A ")?;
                write_number(f, radii.x, precision)?;
                f.write_str(" ")?;
                write_number(f, radii.y, precision)?;
                f.write_str(" ")?;
                write_number(f, *x_rotation, precision)?;
                write!(
                    f,
                    " {} {} ",
                    u8::from(flags.large_arc),
                    u8::from(flags.sweep)
                )?;
                write_point(f, *to, precision)
            }
            Self::Close => f.write_str("Z"),
        }
    }
}

/// Path data in the SVG path mini-language.
///
/// The [`Display`](fmt::Display) impl produces space separated tokens, for
/// example `M 50 10 A 40 40 0 0 0 90 50`, ready to be used as the `d`
/// attribute of an SVG `<path>` element.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SvgPath {
    commands: SmallVec<[PathCommand; 4]>,
}

impl SvgPath {
    /// Number of fractional digits written by the [`Display`](fmt::Display) impl.
    pub const DEFAULT_PRECISION: u8 = 6;

    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    /// Creates a new [`SvgPath`] representing a line segment given its
    /// starting and end points.
    pub fn line(from: Point, to: Point) -> Self {
        PathBuilder::new().move_to(from).line_to(to).build()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The point of the first `M` command.
    pub fn start_point(&self) -> Option<Point> {
        self.commands.iter().find_map(|cmd| match cmd {
            PathCommand::MoveTo(p) => Some(*p),
            _ => None,
        })
    }

    /// The point the pen rests on after the last drawing command.
    pub fn end_point(&self) -> Option<Point> {
        self.commands.iter().rev().find_map(PathCommand::end_point)
    }

    /// Turns the path back into a builder so more commands can be appended.
    pub fn into_builder(self) -> PathBuilder {
        PathBuilder::from_commands(self.commands)
    }

    /// Renders the path data with at most `precision` fractional digits.
    ///
    /// `None` writes every coordinate at full precision.
    pub fn to_string_with_precision(&self, precision: Option<u8>) -> String {
        format!("{}", Formatted { path: self, precision })
    }

    /// Converts the path into a [`lyon`] path so it can be tessellated or
    /// measured.
    ///
    /// Returns `None` if any coordinate is not finite, since lyon rejects
    /// such paths.
    pub fn to_lyon(&self) -> Option<lyon::path::Path> {
        use lyon::path::builder::SvgPathBuilder;

        let is_finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
        let finite = self.commands.iter().all(|cmd| match cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => is_finite(p),
            PathCommand::ArcTo {
                radii,
                x_rotation,
                to,
                ..
            } => {
                radii.x.is_finite()
                    && radii.y.is_finite()
                    && x_rotation.is_finite()
                    && is_finite(to)
            }
            PathCommand::Close => true,
        });
        if !finite {
            log::debug!("not converting non-finite path to lyon: {}", self);
            return None;
        }

        let to_lyon = |p: Point| lyon::math::point(p.x as f32, p.y as f32);

        let mut raw = lyon::path::Path::builder().with_svg();
        for cmd in self.commands.iter() {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    raw.move_to(to_lyon(p));
                }
                PathCommand::LineTo(p) => {
                    raw.line_to(to_lyon(p));
                }
                PathCommand::ArcTo {
                    radii,
                    x_rotation,
                    flags,
                    to,
                } => {
                    raw.arc_to(
                        lyon::math::vector(radii.x as f32, radii.y as f32),
                        lyon::math::Angle::degrees(x_rotation as f32),
                        flags,
                        to_lyon(to),
                    );
                }
                PathCommand::Close => {
                    raw.close();
                }
            }
        }

        Some(raw.build())
    }
}

impl fmt::Display for SvgPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = Formatted {
            path: self,
            precision: Some(Self::DEFAULT_PRECISION),
        };
        fmt::Display::fmt(&formatted, f)
    }
}

struct Formatted<'a> {
    path: &'a SvgPath,
    precision: Option<u8>,
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.path.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            cmd.write_tokens(f, self.precision)?;
        }
        Ok(())
    }
}

fn write_point(f: &mut fmt::Formatter<'_>, p: Point, precision: Option<u8>) -> fmt::Result {
    write_number(f, p.x, precision)?;
    f.write_str(" ")?;
    write_number(f, p.y, precision)
}

/// Writes a number the way a browser prints it in path data: no trailing
/// zeros, no negative zero, and `NaN`/`Infinity` passed through as tokens.
fn write_number(f: &mut fmt::Formatter<'_>, value: f64, precision: Option<u8>) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("NaN");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }

    let mut value = match precision {
        Some(digits) => {
            let scale = 10f64.powi(i32::from(digits));
            let scaled = (value * scale).round();
            if scaled.is_finite() {
                scaled / scale
            } else {
                value
            }
        }
        None => value,
    };
    if value == 0.0 {
        value = 0.0;
    }

    write!(f, "{}", value)
}
