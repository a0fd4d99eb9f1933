//! Circular gauges built from arc path data.

use std::fmt::{self, Write};

use perfboard_arc::{create_guideline, create_label_arc, describe_arc, SvgPath};
use perfboard_core::color::{self, RGBA8};
use perfboard_core::math::Point;

use crate::record::PerformanceTest;

/// Visual parameters of a [`Gauge`].
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeStyle {
    /// Stroke width of the unfilled track.
    pub track_width: f64,
    pub track_color: RGBA8,
    pub guideline_width: f64,
    pub guideline_color: RGBA8,
    /// Number of radial guide marks, spread evenly over the dial span.
    pub guideline_count: usize,
    pub label_color: RGBA8,
    pub font_size: f64,
    /// Distance between the dial and the circle the label is written on.
    pub label_offset: f64,
    /// Fractional digits written into path data. `None` for full precision.
    pub precision: Option<u8>,
}

impl Default for GaugeStyle {
    fn default() -> Self {
        Self {
            track_width: 2.0,
            track_color: color::TRACK,
            guideline_width: 1.0,
            guideline_color: color::GUIDELINE,
            guideline_count: 5,
            label_color: color::BLACK,
            font_size: 10.0,
            label_offset: 6.0,
            precision: Some(SvgPath::DEFAULT_PRECISION),
        }
    }
}

/// A dial that fills clockwise from `start_angle` to `end_angle` as its value
/// goes from 0 to 100 percent.
///
/// Angles are in degrees, clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill_color: RGBA8,
    pub style: GaugeStyle,
}

impl Gauge {
    /// A gauge spanning the lower-open 270° arc from -135° to 135°.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            start_angle: -135.0,
            end_angle: 135.0,
            fill_color: color::EXECUTION,
            style: GaugeStyle::default(),
        }
    }

    pub fn with_span(mut self, start_angle: f64, end_angle: f64) -> Self {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
        self
    }

    pub fn with_fill_color(mut self, fill_color: RGBA8) -> Self {
        self.fill_color = fill_color;
        self
    }

    pub fn with_style(mut self, style: GaugeStyle) -> Self {
        self.style = style;
        self
    }

    /// The dial angle for a value in percent, clamped to `0..=100`.
    pub fn value_angle(&self, percent: f64) -> f64 {
        let clamped = if percent.is_nan() {
            log::warn!("gauge value is NaN, drawing it as empty");
            0.0
        } else {
            let clamped = percent.clamp(0.0, 100.0);
            if clamped != percent {
                log::warn!("gauge value {percent} clamped to {clamped}");
            }
            clamped
        };

        self.start_angle + (self.end_angle - self.start_angle) * clamped / 100.0
    }

    /// The whole dial span as an open arc.
    pub fn track_path(&self) -> SvgPath {
        describe_arc(
            self.center.x,
            self.center.y,
            self.radius,
            self.start_angle,
            self.end_angle,
        )
    }

    /// A closed wedge from the start of the dial to the value's angle.
    pub fn fill_path(&self, percent: f64) -> SvgPath {
        describe_arc(
            self.center.x,
            self.center.y,
            self.radius,
            self.start_angle,
            self.value_angle(percent),
        )
        .into_builder()
        .line_to(self.center)
        .close()
        .build()
    }

    /// An arc outside the dial that text can follow left to right.
    pub fn label_path(&self, radius_offset: f64) -> SvgPath {
        create_label_arc(
            self.center.x,
            self.center.y,
            self.radius + radius_offset,
            self.start_angle,
            self.end_angle,
        )
    }

    /// `count` guide marks spread evenly over the dial, both ends included.
    pub fn guidelines(&self, count: usize) -> Vec<SvgPath> {
        let step = match count {
            0 => return Vec::new(),
            1 => 0.0,
            _ => (self.end_angle - self.start_angle) / (count - 1) as f64,
        };

        (0..count)
            .map(|i| {
                create_guideline(
                    self.center.x,
                    self.center.y,
                    self.radius,
                    self.start_angle + step * i as f64,
                )
            })
            .collect()
    }

    /// Renders the gauge as a standalone SVG document.
    pub fn to_svg(&self, percent: f64, label: &str) -> String {
        let mut svg = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_svg(&mut svg, percent, label);
        svg
    }

    pub fn write_svg(&self, w: &mut impl Write, percent: f64, label: &str) -> fmt::Result {
        let style = &self.style;
        let precision = style.precision;
        let d = |path: &SvgPath| path.to_string_with_precision(precision);

        let margin = style.label_offset + style.font_size + style.track_width;
        let extent = self.radius + margin;
        let min_x = self.center.x - extent;
        let min_y = self.center.y - extent;
        let side = extent * 2.0;

        writeln!(
            w,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{min_x} {min_y} {side} {side}" width="{side}" height="{side}">"#
        )?;
        writeln!(
            w,
            r#"  <defs><path id="gauge-label" d="{}"/></defs>"#,
            d(&self.label_path(style.label_offset))
        )?;
        writeln!(
            w,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            d(&self.track_path()),
            color::to_hex(style.track_color),
            style.track_width
        )?;
        writeln!(
            w,
            r#"  <path d="{}" fill="{}" fill-opacity="{}"/>"#,
            d(&self.fill_path(percent)),
            color::to_hex(self.fill_color),
            color::opacity(self.fill_color)
        )?;
        for guideline in self.guidelines(style.guideline_count) {
            writeln!(
                w,
                r#"  <path d="{}" stroke="{}" stroke-width="{}"/>"#,
                d(&guideline),
                color::to_hex(style.guideline_color),
                style.guideline_width
            )?;
        }
        writeln!(
            w,
            r##"  <text font-size="{}" fill="{}"><textPath href="#gauge-label" startOffset="50%" text-anchor="middle">{}</textPath></text>"##,
            style.font_size,
            color::to_hex(style.label_color),
            escape_xml(label)
        )?;
        w.write_str("</svg>\n")
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

impl PerformanceTest {
    /// An SVG gauge of achieved versus target throughput.
    pub fn execution_gauge_svg(&self, gauge: &Gauge) -> String {
        let percent = match self.achieved_percentage() {
            Some(percent) => percent,
            None => {
                log::warn!("test {} has no target TPS", self.reference());
                0.0
            }
        };
        let label = format!(
            "{}: {} / {} TPS",
            self.reference(),
            self.execution().achieved_tps,
            self.execution().target_tps
        );

        gauge
            .clone()
            .with_fill_color(color::EXECUTION)
            .to_svg(percent, &label)
    }

    /// One SVG gauge per preparation area, filled in the test's status color.
    pub fn preparation_gauge_svgs(&self, gauge: &Gauge) -> [String; 3] {
        let gauge = gauge.clone().with_fill_color(self.status.color());
        self.preparation()
            .labelled()
            .map(|(label, value)| gauge.to_svg(f64::from(value), &format!("{label} {value}%")))
    }
}
