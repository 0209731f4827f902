//! Color definitions for the clock face
//!
//! All colors are RGB565. To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Backdrop behind the dimming overlay - deep night blue
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(24 >> 3, 52 >> 2, 96 >> 3);

/// Hour and minutes - warm white
pub const COLOR_HOUR_MINUTES: Rgb565 = Rgb565::new(250 >> 3, 244 >> 2, 228 >> 3);

/// Seconds - muted amber
pub const COLOR_SECONDS: Rgb565 = Rgb565::new(235 >> 3, 176 >> 2, 92 >> 3);

/// AM/PM marker - pale amber
pub const COLOR_AM_PM: Rgb565 = Rgb565::new(240 >> 3, 204 >> 2, 150 >> 3);

/// Date line - light gray-blue
pub const COLOR_DATE: Rgb565 = Rgb565::new(190 >> 3, 204 >> 2, 220 >> 3);

/// Brightness / opacity readout
pub const COLOR_READOUT: Rgb565 = Rgb565::new(31, 63, 31);

/// Drop shadows
pub const COLOR_SHADOW: Rgb565 = Rgb565::BLACK;

/// Colors of every element on the clock face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockPalette {
    pub background: Rgb565,
    pub hour_minutes: Rgb565,
    pub seconds: Rgb565,
    pub am_pm: Rgb565,
    pub date: Rgb565,
    pub readout: Rgb565,
    pub shadow: Rgb565,
}

impl Default for ClockPalette {
    fn default() -> Self {
        Self {
            background: COLOR_BACKGROUND,
            hour_minutes: COLOR_HOUR_MINUTES,
            seconds: COLOR_SECONDS,
            am_pm: COLOR_AM_PM,
            date: COLOR_DATE,
            readout: COLOR_READOUT,
            shadow: COLOR_SHADOW,
        }
    }
}

/// Scale every channel of `color` toward black by `factor` (clamped to 0..=1).
pub fn scale_color(color: Rgb565, factor: f32) -> Rgb565 {
    let factor = if factor.is_nan() {
        0.0
    } else {
        factor.clamp(0.0, 1.0)
    };
    let scale = |channel: u8| (channel as f32 * factor) as u8;
    Rgb565::new(scale(color.r()), scale(color.g()), scale(color.b()))
}
