//! Styling for the clock face
//!
//! - [`colors`] - Color constants, the clock palette and RGB565 scaling
//! - [`RenderStyle`] - per-frame style of one text element

pub mod colors;

pub use colors::{
    COLOR_AM_PM, COLOR_BACKGROUND, COLOR_DATE, COLOR_HOUR_MINUTES, COLOR_READOUT, COLOR_SECONDS,
    COLOR_SHADOW, ClockPalette, scale_color,
};

use embedded_graphics::pixelcolor::Rgb565;

/// Style of one text element for one frame.
///
/// Built fresh by the layout engine every frame; nothing mutates a style
/// after it has been handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Font size in pixels (cap height of the scaled font)
    pub font_size: f32,
    pub color: Rgb565,
    /// Drop-shadow displacement in pixels; zero disables the shadow
    pub shadow_offset: i32,
    pub shadow_color: Rgb565,
}

impl RenderStyle {
    pub const fn new(font_size: f32, color: Rgb565) -> Self {
        Self {
            font_size,
            color,
            shadow_offset: 0,
            shadow_color: COLOR_SHADOW,
        }
    }

    pub const fn with_shadow(mut self, offset: i32, color: Rgb565) -> Self {
        self.shadow_offset = offset;
        self.shadow_color = color;
        self
    }
}
