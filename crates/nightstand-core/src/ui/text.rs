// src/ui/text.rs
//! Text measurement and drawing at arbitrary font sizes
//!
//! The layout engine only needs two primitives: "how wide is this string at
//! size S" and "how tall is a line at size S". [`ScaledMonoFont`] answers both
//! for an embedded-graphics mono font magnified by a floating-point factor,
//! and [`MonoTextSurface`] draws with it onto any `Rgb565` draw target.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii::FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};

use crate::fit::TextExtent;
use crate::ui::styling::RenderStyle;

/// Half-extent of the glyph-space bounding box reported by the scaling
/// adapter. Glyph coordinates never leave a few hundred pixels.
const GLYPH_SPACE_EXTENT: i32 = 1 << 14;

/// Text measurement primitive.
pub trait TextMetrics {
    /// Advance width of `text` in pixels at `font_size`.
    fn measure_text_width(&self, text: &str, font_size: f32) -> i32;

    /// Height of a line (baseline to top of capitals) at `font_size`.
    fn text_height(&self, font_size: f32) -> i32;

    fn extent(&self, text: &str, font_size: f32) -> TextExtent {
        TextExtent::new(
            self.measure_text_width(text, font_size),
            self.text_height(font_size),
        )
    }
}

/// Something text can be measured against and drawn onto.
pub trait RenderSurface: TextMetrics {
    type Error;

    /// Pixel size of the drawable area.
    fn canvas_size(&self) -> Size;

    /// Fill the whole canvas with `color`.
    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error>;

    /// Draw `text` with its baseline-left corner at `origin`.
    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &RenderStyle,
    ) -> Result<(), Self::Error>;
}

/// A mono font magnified to any pixel size.
///
/// Font size is the height of the rows above (and including) the baseline,
/// so `text_height(size)` is `size` up to truncation.
#[derive(Clone, Copy)]
pub struct ScaledMonoFont {
    font: &'static MonoFont<'static>,
}

impl Default for ScaledMonoFont {
    fn default() -> Self {
        Self::new(&FONT_10X20)
    }
}

impl ScaledMonoFont {
    pub const fn new(font: &'static MonoFont<'static>) -> Self {
        Self { font }
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    /// Magnification applied to the bitmap glyphs at `font_size`.
    pub fn scale(&self, font_size: f32) -> f32 {
        font_size / self.ascent() as f32
    }

    fn ascent(&self) -> u32 {
        self.font.baseline + 1
    }
}

impl TextMetrics for ScaledMonoFont {
    fn measure_text_width(&self, text: &str, font_size: f32) -> i32 {
        let chars = text.chars().count() as u32;
        if chars == 0 || !(font_size > 0.0) {
            return 0;
        }
        let unscaled = chars * self.font.character_size.width
            + (chars - 1) * self.font.character_spacing;
        (unscaled as f32 * self.scale(font_size)) as i32
    }

    fn text_height(&self, font_size: f32) -> i32 {
        if !(font_size > 0.0) {
            return 0;
        }
        (self.ascent() as f32 * self.scale(font_size)) as i32
    }
}

/// [`RenderSurface`] over an embedded-graphics draw target.
pub struct MonoTextSurface<'a, D> {
    target: &'a mut D,
    font: ScaledMonoFont,
}

impl<'a, D> MonoTextSurface<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: &'a mut D) -> Self {
        Self {
            target,
            font: ScaledMonoFont::default(),
        }
    }

    fn draw_scaled(
        &mut self,
        text: &str,
        origin: Point,
        color: Rgb565,
        scale: f32,
    ) -> Result<(), D::Error> {
        let font = self.font.font();
        let mut scaled = ScaledTarget {
            inner: &mut *self.target,
            origin,
            scale,
        };
        Text::with_baseline(
            text,
            Point::zero(),
            MonoTextStyle::new(font, color),
            Baseline::Alphabetic,
        )
        .draw(&mut scaled)?;
        Ok(())
    }
}

impl<D> TextMetrics for MonoTextSurface<'_, D> {
    fn measure_text_width(&self, text: &str, font_size: f32) -> i32 {
        self.font.measure_text_width(text, font_size)
    }

    fn text_height(&self, font_size: f32) -> i32 {
        self.font.text_height(font_size)
    }
}

impl<D> RenderSurface for MonoTextSurface<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn canvas_size(&self) -> Size {
        self.target.bounding_box().size
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.target.clear(color)
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &RenderStyle,
    ) -> Result<(), Self::Error> {
        if !(style.font_size > 0.0) {
            return Ok(());
        }
        let scale = self.font.scale(style.font_size);

        if style.shadow_offset != 0 {
            let offset = Point::new(style.shadow_offset, style.shadow_offset);
            self.draw_scaled(text, origin + offset, style.shadow_color, scale)?;
        }
        self.draw_scaled(text, origin, style.color, scale)
    }
}

/// Draw target adapter that magnifies every pixel drawn into it.
///
/// Glyph pixel `(x, y)` becomes the block spanning
/// `floor(x * scale)..floor((x + 1) * scale)` (and likewise vertically),
/// offset by `origin`, so neighbouring blocks tile without gaps or overlap.
struct ScaledTarget<'a, D> {
    inner: &'a mut D,
    origin: Point,
    scale: f32,
}

impl<D> Dimensions for ScaledTarget<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(
            Point::new(-GLYPH_SPACE_EXTENT, -GLYPH_SPACE_EXTENT),
            Size::new_equal(2 * GLYPH_SPACE_EXTENT as u32),
        )
    }
}

impl<D> DrawTarget for ScaledTarget<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let x0 = floor_to_i32(point.x as f32 * self.scale);
            let x1 = floor_to_i32((point.x + 1) as f32 * self.scale);
            let y0 = floor_to_i32(point.y as f32 * self.scale);
            let y1 = floor_to_i32((point.y + 1) as f32 * self.scale);

            if x1 > x0 && y1 > y0 {
                let block = Rectangle::new(
                    self.origin + Point::new(x0, y0),
                    Size::new((x1 - x0) as u32, (y1 - y0) as u32),
                );
                self.inner.fill_solid(&block, color)?;
            }
        }
        Ok(())
    }
}

/// `f32::floor` without `std`.
fn floor_to_i32(value: f32) -> i32 {
    let truncated = value as i32;
    if truncated as f32 > value {
        truncated - 1
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    fn font() -> ScaledMonoFont {
        ScaledMonoFont::default()
    }

    #[test]
    fn test_floor_handles_negatives() {
        assert_eq!(floor_to_i32(2.7), 2);
        assert_eq!(floor_to_i32(-2.5), -3);
        assert_eq!(floor_to_i32(-3.0), -3);
        assert_eq!(floor_to_i32(0.0), 0);
    }

    #[test]
    fn test_width_scales_with_size() {
        let font = font();
        let native = font.ascent() as f32;
        let cell = FONT_10X20.character_size.width + FONT_10X20.character_spacing;

        assert_eq!(
            font.measure_text_width("00", native),
            (2 * cell - FONT_10X20.character_spacing) as i32
        );
        assert_eq!(
            font.measure_text_width("00", native * 2.0),
            2 * font.measure_text_width("00", native)
        );
        assert_eq!(font.measure_text_width("", 100.0), 0);
        assert_eq!(font.measure_text_width("12:00", 0.0), 0);
    }

    #[test]
    fn test_width_is_monotonic_in_size() {
        let font = font();
        let mut last = 0;
        for step in 1..400 {
            let width = font.measure_text_width("Monday, October 19, 2026", step as f32 * 0.5);
            assert!(width >= last, "width shrank at size {}", step as f32 * 0.5);
            last = width;
        }
    }

    #[test]
    fn test_height_tracks_font_size() {
        let font = font();
        assert_eq!(font.text_height(48.0), 48);
        assert_eq!(font.text_height(-1.0), 0);
    }

    #[test]
    fn test_draw_magnifies_glyphs() {
        let style = RenderStyle::new(font().ascent() as f32, Rgb565::WHITE);

        let mut native: MockDisplay<Rgb565> = MockDisplay::new();
        MonoTextSurface::new(&mut native)
            .draw_text("1", Point::new(2, 30), &style)
            .unwrap();
        let native_area = native.affected_area();

        let mut doubled: MockDisplay<Rgb565> = MockDisplay::new();
        let double_style = RenderStyle::new(style.font_size * 2.0, Rgb565::WHITE);
        MonoTextSurface::new(&mut doubled)
            .draw_text("1", Point::new(2, 40), &double_style)
            .unwrap();
        let doubled_area = doubled.affected_area();

        assert!(native_area.size.width > 0);
        assert_eq!(doubled_area.size.width, native_area.size.width * 2);
        assert_eq!(doubled_area.size.height, native_area.size.height * 2);
    }

    #[test]
    fn test_shadow_drawn_behind_text() {
        let style = RenderStyle::new(font().ascent() as f32, Rgb565::WHITE)
            .with_shadow(3, Rgb565::BLACK);

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        MonoTextSurface::new(&mut display)
            .draw_text("-", Point::new(2, 30), &style)
            .unwrap();

        let area = display.affected_area();
        let mut white = 0;
        let mut black = 0;
        for point in area.points() {
            match display.get_pixel(point) {
                Some(color) if color == Rgb565::WHITE => white += 1,
                Some(color) if color == Rgb565::BLACK => black += 1,
                _ => {}
            }
        }
        assert!(white > 0, "text pixels missing");
        assert!(black > 0, "shadow pixels missing");
    }

    #[test]
    fn test_surface_reports_canvas_size() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        let surface = MonoTextSurface::new(&mut display);
        assert_eq!(surface.canvas_size(), Size::new(64, 64));
    }
}
