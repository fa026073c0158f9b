//! Continuous color scales and per-feature map styling.

use serde::{Serialize, Serializer};
use std::fmt;

/// An sRGB color with 8-bit channels.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// CSS functional notation, e.g. `rgb(250, 248, 193)`.
    pub fn css_rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Formats as lowercase `#rrggbb`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Red-yellow-blue diverging scheme, 11 stops from red to blue.
pub const RD_YL_BU: &[Rgb] = &[
    Rgb::from_hex(0xa50026),
    Rgb::from_hex(0xd73027),
    Rgb::from_hex(0xf46d43),
    Rgb::from_hex(0xfdae61),
    Rgb::from_hex(0xfee090),
    Rgb::from_hex(0xffffbf),
    Rgb::from_hex(0xe0f3f8),
    Rgb::from_hex(0xabd9e9),
    Rgb::from_hex(0x74add1),
    Rgb::from_hex(0x4575b4),
    Rgb::from_hex(0x313695),
];

/// Continuous interpolation through a fixed list of color stops.
///
/// Each channel follows a uniform cubic B-spline through the stops, so the
/// ramp is smooth and starts and ends exactly on the first and last stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolator {
    stops: &'static [Rgb],
}

impl Interpolator {
    /// Needs at least two stops.
    pub const fn new(stops: &'static [Rgb]) -> Self {
        assert!(stops.len() >= 2);
        Self { stops }
    }

    pub const fn rd_yl_bu() -> Self {
        Self::new(RD_YL_BU)
    }

    /// Color at `t`, clamped to `[0, 1]`.
    pub fn at(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.stops.len() - 1;
        let i = if t >= 1.0 { n - 1 } else { (t * n as f64).floor() as usize };
        let local = (t - i as f64 / n as f64) * n as f64;
        let channel = |pick: fn(&Rgb) -> u8| -> u8 {
            let v1 = pick(&self.stops[i]) as f64;
            let v2 = pick(&self.stops[i + 1]) as f64;
            let v0 = if i > 0 {
                pick(&self.stops[i - 1]) as f64
            } else {
                2.0 * v1 - v2
            };
            let v3 = if i < n - 1 {
                pick(&self.stops[i + 2]) as f64
            } else {
                2.0 * v2 - v1
            };
            basis(local, v0, v1, v2, v3).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            channel(|c: &Rgb| c.r),
            channel(|c: &Rgb| c.g),
            channel(|c: &Rgb| c.b),
        )
    }
}

fn basis(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

/// Maps values in a fixed domain onto an [`Interpolator`].
///
/// The domain is `(start, end)`: `start` maps to the first stop and `end` to
/// the last, so `start > end` inverts the ramp. Values outside the domain
/// clamp to the nearest end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub domain: (f64, f64),
    pub interpolator: Interpolator,
}

impl ColorScale {
    pub const fn new(domain: (f64, f64), interpolator: Interpolator) -> Self {
        Self {
            domain,
            interpolator,
        }
    }

    /// The choropleth scale: RdYlBu over the inverted domain `[1, 0]`, so 1
    /// lands on dark red and 0 on dark blue regardless of the data.
    pub const fn heatmap() -> Self {
        Self::new((1.0, 0.0), Interpolator::rd_yl_bu())
    }

    /// Normalised position of `value` along the domain, before clamping.
    pub fn position(&self, value: f64) -> f64 {
        let (start, end) = self.domain;
        if start == end {
            0.0
        } else {
            (value - start) / (end - start)
        }
    }

    /// Color for `value`. NaN is drawn like an absent value.
    pub fn color(&self, value: f64) -> Rgb {
        let value = if value.is_nan() { ABSENT_DISPLAY_VALUE } else { value };
        self.interpolator.at(self.position(value))
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::heatmap()
    }
}

/// Region outline color.
pub const STROKE_COLOR: Rgb = Rgb::from_hex(0x333333);
pub const STROKE_WEIGHT: f64 = 1.0;
pub const FILL_OPACITY: f64 = 0.8;

/// Value used to color and label a region that has no value.
pub const ABSENT_DISPLAY_VALUE: f64 = 0.0;

/// Fill and outline for one map feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    pub fill_color: Rgb,
    pub stroke_color: Rgb,
    pub stroke_weight: f64,
    pub fill_opacity: f64,
}

fn display_value(value: Option<f64>) -> f64 {
    value.filter(|v| !v.is_nan()).unwrap_or(ABSENT_DISPLAY_VALUE)
}

/// Style a feature with `value`. Absent values are drawn as 0.
pub fn style_feature(scale: &ColorScale, value: Option<f64>) -> FeatureStyle {
    FeatureStyle {
        fill_color: scale.color(display_value(value)),
        stroke_color: STROKE_COLOR,
        stroke_weight: STROKE_WEIGHT,
        fill_opacity: FILL_OPACITY,
    }
}

/// Hover text: region name (or `Unknown`) and the value to two decimals.
pub fn tooltip(name: Option<&str>, value: Option<f64>) -> String {
    let name = name.filter(|n| !n.is_empty()).unwrap_or("Unknown");
    format!("Region: {}<br/>Value: {:.2}", name, display_value(value))
}
