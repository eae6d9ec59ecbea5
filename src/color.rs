use palette::Srgb;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB colour with channels in `[0, 255]`, kept unquantized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    /// Quantize to 8-bit sRGB channels.
    pub fn to_srgb8(&self) -> Srgb<u8> {
        let unit = |c: f64| (c / 255.0).clamp(0.0, 1.0) as f32;
        Srgb::new(unit(self.r), unit(self.g), unit(self.b)).into_format::<u8>()
    }

    /// `#RRGGBB`, as used for SVG fills.
    pub fn to_hex(&self) -> String {
        let c = self.to_srgb8();
        format!("#{:02X}{:02X}{:02X}", c.red, c.green, c.blue)
    }
}

// ---------------------------------------------------------------------------
// HSL → RGB
// ---------------------------------------------------------------------------

/// Convert hue (degrees), saturation and lightness (both percent, 0–100)
/// to an RGB colour.
///
/// Hue is not pre-clamped; each channel's hue is wrapped by
/// [`hue_to_channel`], so `360` lands on the same colour as `0`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Color {
    let s = s / 100.0;
    let l = l / 100.0;

    if s == 0.0 {
        let v = l * 255.0;
        return Color::new(v, v, v);
    }

    let m2 = if l <= 0.5 { l * (s + 1.0) } else { l + s - l * s };
    let m1 = l * 2.0 - m2;
    let hue = h / 360.0;

    Color::new(
        255.0 * hue_to_channel(m1, m2, hue + 1.0 / 3.0),
        255.0 * hue_to_channel(m1, m2, hue),
        255.0 * hue_to_channel(m1, m2, hue - 1.0 / 3.0),
    )
}

/// Piecewise-linear channel intensity in `[0, 1]` for a hue fraction.
///
/// The hue is brought back into range with a single step of ±1, which covers
/// the ±1/3 channel offsets around a hue already in `[0, 1]`.
pub fn hue_to_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = if hue < 0.0 {
        hue + 1.0
    } else if hue > 1.0 {
        hue - 1.0
    } else {
        hue
    };

    if 6.0 * hue < 1.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if 2.0 * hue < 1.0 {
        m2
    } else if 3.0 * hue < 2.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}
