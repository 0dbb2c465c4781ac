//! Speed-to-color ramp
//!
//! Display adapters color each particle by its speed relative to the
//! configured cap. The ramp is a single affine hue function at full
//! saturation and brightness.

use serde::{Deserialize, Serialize};

use crate::consts::{HUE_OFFSET, HUE_SLOPE};

/// RGB color with channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Color from hue (degrees, any range), saturation and brightness in [0, 1]
    pub fn from_hsb(hue: f64, saturation: f64, brightness: f64) -> Self {
        let h = (hue.rem_euclid(360.0) / 60.0) % 6.0;
        let sector = h.floor();
        let f = h - sector;
        let v = brightness;
        let p = v * (1.0 - saturation);
        let q = v * (1.0 - saturation * f);
        let t = v * (1.0 - saturation * (1.0 - f));
        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self { r, g, b }
    }

    /// Packed 0xRRGGBB for renderers that want integers
    pub fn to_rgb_u32(self) -> u32 {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

/// Hue (degrees, unwrapped) for a speed under the given cap
#[inline]
pub fn speed_hue(speed: f64, max_velocity: f64) -> f64 {
    HUE_SLOPE * (speed / max_velocity) + HUE_OFFSET
}

/// Display color for a speed under the given cap
pub fn speed_color(speed: f64, max_velocity: f64) -> Color {
    Color::from_hsb(speed_hue(speed, max_velocity), 1.0, 1.0)
}
