//! This module re-exports the types from the [`rgb`](https://crates.io/crates/rgb) crate,
//! along with the palette used by the dashboard.

// The following code was copied and modified from
// https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/core/src/color.rs
// Iced license (MIT): https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/LICENSE

pub use rgb::*;

/// The color black with full opacity
pub const BLACK: RGBA8 = RGBA8 {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};

/// Background of a test that has no status yet.
pub const STATUS_NEUTRAL: RGBA8 = RGBA8 {
    r: 0xf3,
    g: 0xf4,
    b: 0xf6,
    a: 255,
};
/// A test that is blocked or failing.
pub const STATUS_RED: RGBA8 = RGBA8 {
    r: 0xef,
    g: 0x44,
    b: 0x44,
    a: 255,
};
/// A test that is at risk.
pub const STATUS_AMBER: RGBA8 = RGBA8 {
    r: 0xf5,
    g: 0x9e,
    b: 0x0b,
    a: 255,
};
/// A test that is on track.
pub const STATUS_GREEN: RGBA8 = RGBA8 {
    r: 0x22,
    g: 0xc5,
    b: 0x5e,
    a: 255,
};

/// The unfilled track of a gauge.
pub const TRACK: RGBA8 = RGBA8 {
    r: 0xe5,
    g: 0xe7,
    b: 0xeb,
    a: 255,
};
/// Radial guide marks.
pub const GUIDELINE: RGBA8 = RGBA8 {
    r: 0x9c,
    g: 0xa3,
    b: 0xaf,
    a: 255,
};
/// The execution progress fill.
pub const EXECUTION: RGBA8 = RGBA8 {
    r: 0x3b,
    g: 0x82,
    b: 0xf6,
    a: 255,
};

/// Formats the color as a CSS hex string (`#rrggbb`), ignoring alpha.
pub fn to_hex(color: RGBA8) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// The alpha channel of the color in the range `[0.0, 1.0]`.
pub fn opacity(color: RGBA8) -> f32 {
    f32::from(color.a) * (1.0 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting() {
        assert_eq!(to_hex(BLACK), "#000000");
        assert_eq!(to_hex(STATUS_GREEN), "#22c55e");
        assert_eq!(to_hex(STATUS_AMBER), "#f59e0b");
    }

    #[test]
    fn opacity_range() {
        assert_eq!(opacity(RGBA8 { a: 0, ..BLACK }), 0.0);
        assert_eq!(opacity(STATUS_RED), 1.0);
    }
}
