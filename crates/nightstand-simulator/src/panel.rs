//! Simulated screen backlight and background overlay.
//!
//! The simulator has no backlight, so brightness and overlay alpha are
//! folded into the colors written to the SDL framebuffer: every pixel is
//! scaled by the backlight level, and the background (drawn with `clear`)
//! is additionally darkened by the black overlay.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use nightstand_core::brightness::{DisplaySink, SinkError};
use nightstand_core::ui::styling::scale_color;

/// Light output at brightness zero; a real panel never goes fully dark.
const MIN_BACKLIGHT: f32 = 0.1;

pub struct SimulatedPanel {
    brightness: f32,
    overlay_alpha: f32,
    changed: bool,
}

impl Default for SimulatedPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPanel {
    pub fn new() -> Self {
        Self {
            brightness: 1.0,
            overlay_alpha: 0.0,
            changed: false,
        }
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Whether anything changed since the last call.
    pub fn take_changed(&mut self) -> bool {
        core::mem::take(&mut self.changed)
    }

    /// Factor applied to every color drawn.
    pub fn backlight(&self) -> f32 {
        MIN_BACKLIGHT + (1.0 - MIN_BACKLIGHT) * self.brightness
    }

    /// Factor applied to the background color.
    pub fn background_level(&self) -> f32 {
        self.backlight() * (1.0 - self.overlay_alpha)
    }

    /// Wrap `target` so drawing through it shows the current panel state.
    pub fn target<'a, D>(&self, target: &'a mut D) -> PanelTarget<'a, D>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        PanelTarget {
            inner: target,
            backlight: self.backlight(),
            background: self.background_level(),
        }
    }
}

fn unit(value: f32) -> Result<f32, SinkError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SinkError::Rejected(value))
    }
}

impl DisplaySink for SimulatedPanel {
    fn set_screen_brightness(&mut self, value: f32) -> Result<(), SinkError> {
        let value = unit(value)?;
        if value != self.brightness {
            debug!("Backlight {:.2}", value);
            self.brightness = value;
            self.changed = true;
        }
        Ok(())
    }

    fn set_overlay_dim_alpha(&mut self, alpha: f32) -> Result<(), SinkError> {
        let alpha = unit(alpha)?;
        if alpha != self.overlay_alpha {
            debug!("Overlay alpha {:.2}", alpha);
            self.overlay_alpha = alpha;
            self.changed = true;
        }
        Ok(())
    }
}

/// Draw target that dims colors the way the panel would.
pub struct PanelTarget<'a, D> {
    inner: &'a mut D,
    backlight: f32,
    background: f32,
}

impl<D> Dimensions for PanelTarget<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn bounding_box(&self) -> Rectangle {
        self.inner.bounding_box()
    }
}

impl<D> DrawTarget for PanelTarget<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let backlight = self.backlight;
        self.inner.draw_iter(
            pixels
                .into_iter()
                .map(|Pixel(point, color)| Pixel(point, scale_color(color, backlight))),
        )
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.inner.fill_solid(area, scale_color(color, self.backlight))
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.inner.clear(scale_color(color, self.background))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    const GRAY: Rgb565 = Rgb565::new(20, 40, 20);

    #[test]
    fn test_rejects_out_of_range() {
        let mut panel = SimulatedPanel::new();
        assert_eq!(panel.set_screen_brightness(1.5), Err(SinkError::Rejected(1.5)));
        assert!(panel.set_overlay_dim_alpha(f32::NAN).is_err());
        assert_eq!(panel.brightness(), 1.0);
        assert!(!panel.take_changed());
    }

    #[test]
    fn test_changes_are_reported_once() {
        let mut panel = SimulatedPanel::new();
        panel.set_screen_brightness(0.5).unwrap();
        assert!(panel.take_changed());
        assert!(!panel.take_changed());

        panel.set_screen_brightness(0.5).unwrap();
        assert!(!panel.take_changed(), "same value is not a change");
    }

    #[test]
    fn test_full_overlay_blacks_out_background_only() {
        let mut panel = SimulatedPanel::new();
        panel.set_overlay_dim_alpha(1.0).unwrap();

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        let mut target = panel.target(&mut display);
        target.clear(GRAY).unwrap();
        target
            .fill_solid(&Rectangle::new(Point::new(1, 1), Size::new(2, 2)), GRAY)
            .unwrap();

        assert_eq!(display.get_pixel(Point::new(0, 0)), Some(Rgb565::BLACK));
        assert_eq!(display.get_pixel(Point::new(1, 1)), Some(GRAY));
    }

    #[test]
    fn test_zero_brightness_keeps_some_light() {
        let mut panel = SimulatedPanel::new();
        panel.set_screen_brightness(0.0).unwrap();

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        panel
            .target(&mut display)
            .fill_solid(&Rectangle::new(Point::zero(), Size::new(1, 1)), GRAY)
            .unwrap();

        assert_eq!(display.get_pixel(Point::zero()), Some(Rgb565::new(2, 4, 2)));
    }
}
