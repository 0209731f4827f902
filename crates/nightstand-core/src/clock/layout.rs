//! Per-frame layout of the clock face.
//!
//! Two fit searches run every frame: the date line against the full canvas
//! width, and the hour:minutes + gap + seconds block against the full canvas
//! width. The seconds and AM/PM sizes are derived from the hour:minutes size
//! on every probe of the second search.
//!
//! Sizing always measures the seconds as [`WIDEST_SECONDS`]; the real
//! seconds string is only substituted when drawing. Digit advance widths
//! differ, so sizing against the live string would make the clock breathe
//! from one second to the next.

use embedded_graphics::prelude::*;
use log::debug;

use crate::clock::text::{DisplayText, HourFormat};
use crate::config::ClockConfig;
use crate::fit::{FitResult, TextExtent, TextFitSizer};
use crate::ui::styling::{ClockPalette, RenderStyle};
use crate::ui::text::TextMetrics;

/// The widest possible seconds string.
pub const WIDEST_SECONDS: &str = "00";

/// Where and how one text element is drawn.
///
/// `origin` is the left end of the text baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPlacement {
    pub origin: Point,
    pub style: RenderStyle,
}

/// Draw origins and styles of every element for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    pub hour_minutes: TextPlacement,
    pub seconds: TextPlacement,
    /// `None` in 24-hour mode
    pub am_pm: Option<TextPlacement>,
    pub date: TextPlacement,
    /// Outcome of the combined hour:minutes + seconds search
    pub clock_fit: FitResult,
    /// Outcome of the date search
    pub date_fit: FitResult,
    /// Pixel gap between hour:minutes and seconds
    pub seconds_space: i32,
}

/// Computes [`LayoutGeometry`] frame after frame.
///
/// The only state carried between frames is the last converged
/// hour:minutes and date sizes, which seed the next searches so a steady
/// clock converges in a couple of probes.
pub struct ClockLayoutEngine {
    clock_sizer: TextFitSizer,
    date_sizer: TextFitSizer,
    seconds_space_factor: f32,
    seconds_size_factor: f32,
    am_pm_size_factor: f32,
    shadow_offset_big: i32,
    shadow_offset_small: i32,
    palette: ClockPalette,
    hour_minutes_size: f32,
    date_size: f32,
}

impl ClockLayoutEngine {
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            clock_sizer: TextFitSizer::new(config.clock_fit_step),
            date_sizer: TextFitSizer::new(config.date_fit_step),
            seconds_space_factor: config.seconds_space_factor,
            seconds_size_factor: config.seconds_size_factor,
            am_pm_size_factor: config.am_pm_size_factor,
            shadow_offset_big: config.shadow_offset_big,
            shadow_offset_small: config.shadow_offset_small,
            palette: config.palette,
            hour_minutes_size: config.initial_font_size,
            date_size: config.initial_font_size,
        }
    }

    /// Size the search will start from on the next frame.
    pub fn hour_minutes_size(&self) -> f32 {
        self.hour_minutes_size
    }

    pub fn date_size(&self) -> f32 {
        self.date_size
    }

    /// Lay out one frame on a `canvas` sized surface.
    pub fn layout<M: TextMetrics>(
        &mut self,
        metrics: &M,
        canvas: Size,
        text: &DisplayText,
        format: HourFormat,
    ) -> LayoutGeometry {
        let canvas_width = canvas.width as i32;
        let canvas_height = canvas.height as i32;

        let date_fit = self.fit_date(metrics, &text.date, canvas_width);
        // Cap height: descenders of the date hang below this line and are
        // not reserved, so they may reach into the gap above hour:minutes.
        let date_height = date_fit.measured_height;

        let seconds_space = (self.seconds_space_factor * canvas_width as f32) as i32;
        let clock_fit =
            self.fit_hour_minutes_seconds(metrics, &text.hour_minutes, seconds_space, canvas_width);

        let hour_minutes_size = clock_fit.size;
        let seconds_size = hour_minutes_size * self.seconds_size_factor;
        let am_pm_size = hour_minutes_size * self.am_pm_size_factor;

        let hour_minutes = metrics.extent(&text.hour_minutes, hour_minutes_size);
        let seconds = metrics.extent(WIDEST_SECONDS, seconds_size);

        // Centre the combined block horizontally, and hour:minutes vertically
        // in the space left under the date.
        let hour_minutes_x = (canvas_width - clock_fit.measured_width) / 2;
        let hour_minutes_top = (canvas_height - hour_minutes.height - date_height) / 2;
        let hour_minutes_y = hour_minutes_top + hour_minutes.height + date_height;

        let seconds_x = hour_minutes_x + hour_minutes.width + seconds_space;
        let seconds_y = hour_minutes_y;

        let am_pm = format.shows_am_pm().then(|| TextPlacement {
            origin: Point::new(seconds_x, seconds_y - seconds.height),
            style: RenderStyle::new(am_pm_size, self.palette.am_pm)
                .with_shadow(self.shadow_offset_small, self.palette.shadow),
        });

        let date_x = (canvas_width - date_fit.measured_width) / 2;
        let date_y = date_height;

        debug!(
            "Layout {}x{}: clock size {} ({}px wide), date size {} ({}px wide)",
            canvas.width,
            canvas.height,
            clock_fit.size,
            clock_fit.measured_width,
            date_fit.size,
            date_fit.measured_width
        );

        LayoutGeometry {
            hour_minutes: TextPlacement {
                origin: Point::new(hour_minutes_x, hour_minutes_y),
                style: RenderStyle::new(hour_minutes_size, self.palette.hour_minutes)
                    .with_shadow(self.shadow_offset_big, self.palette.shadow),
            },
            seconds: TextPlacement {
                origin: Point::new(seconds_x, seconds_y),
                style: RenderStyle::new(seconds_size, self.palette.seconds)
                    .with_shadow(self.shadow_offset_small, self.palette.shadow),
            },
            am_pm,
            date: TextPlacement {
                origin: Point::new(date_x, date_y),
                style: RenderStyle::new(date_fit.size, self.palette.date)
                    .with_shadow(self.shadow_offset_small, self.palette.shadow),
            },
            clock_fit,
            date_fit,
            seconds_space,
        }
    }

    fn fit_date<M: TextMetrics>(&mut self, metrics: &M, date: &str, target_width: i32) -> FitResult {
        let fit = self
            .date_sizer
            .fit(target_width, self.date_size, |size| metrics.extent(date, size));
        self.date_size = fit.size;
        fit
    }

    fn fit_hour_minutes_seconds<M: TextMetrics>(
        &mut self,
        metrics: &M,
        hour_minutes: &str,
        seconds_space: i32,
        target_width: i32,
    ) -> FitResult {
        let seconds_factor = self.seconds_size_factor;
        let fit = self
            .clock_sizer
            .fit(target_width, self.hour_minutes_size, |size| {
                let hour_minutes = metrics.extent(hour_minutes, size);
                let seconds = metrics.measure_text_width(WIDEST_SECONDS, size * seconds_factor);
                TextExtent::new(
                    hour_minutes.width + seconds_space + seconds,
                    hour_minutes.height,
                )
            });
        self.hour_minutes_size = fit.size;
        fit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::text::WallClock;
    use core::cell::Cell;
    use time::{Date, Month};

    /// Proportional-width metrics: '1' is narrow, everything else is wide.
    struct FakeMetrics {
        probes: Cell<usize>,
    }

    impl FakeMetrics {
        fn new() -> Self {
            Self {
                probes: Cell::new(0),
            }
        }
    }

    impl TextMetrics for FakeMetrics {
        fn measure_text_width(&self, text: &str, font_size: f32) -> i32 {
            self.probes.set(self.probes.get() + 1);
            let units: f32 = text
                .chars()
                .map(|c| match c {
                    '1' => 0.35,
                    ':' | ',' | ' ' => 0.25,
                    _ => 0.6,
                })
                .sum();
            (units * font_size) as i32
        }

        fn text_height(&self, font_size: f32) -> i32 {
            font_size as i32
        }
    }

    const CANVAS: Size = Size::new(800, 480);

    fn text(hour: u8, minute: u8, second: u8, format: HourFormat) -> DisplayText {
        let date = Date::from_calendar_date(2026, Month::October, 19).unwrap();
        DisplayText::new(WallClock::new(hour, minute, second), date, format)
    }

    #[test]
    fn test_clock_block_fits_canvas_width() {
        let metrics = FakeMetrics::new();
        let mut engine = ClockLayoutEngine::new(&ClockConfig::default());
        let text = text(14, 5, 9, HourFormat::TwelveHour);
        let geometry = engine.layout(&metrics, CANVAS, &text, HourFormat::TwelveHour);

        let hour_minutes_width =
            metrics.measure_text_width(&text.hour_minutes, geometry.hour_minutes.style.font_size);
        let seconds_width =
            metrics.measure_text_width(WIDEST_SECONDS, geometry.seconds.style.font_size);
        let total = hour_minutes_width + geometry.seconds_space + seconds_width;

        assert!(total <= CANVAS.width as i32, "{total}px overflows");
        assert_eq!(total, geometry.clock_fit.measured_width);
        assert!((31..=32).contains(&geometry.seconds_space), "about 4% of 800px");
    }

    #[test]
    fn test_derived_sizes_follow_hour_minutes() {
        let metrics = FakeMetrics::new();
        let mut engine = ClockLayoutEngine::new(&ClockConfig::default());
        let geometry = engine.layout(
            &metrics,
            CANVAS,
            &text(14, 5, 9, HourFormat::TwelveHour),
            HourFormat::TwelveHour,
        );

        let size = geometry.hour_minutes.style.font_size;
        assert_eq!(geometry.seconds.style.font_size, size * 0.37);
        let am_pm = geometry.am_pm.expect("12-hour mode draws AM/PM");
        assert_eq!(am_pm.style.font_size, size * 0.26);
    }

    #[test]
    fn test_placements() {
        let metrics = FakeMetrics::new();
        let mut engine = ClockLayoutEngine::new(&ClockConfig::default());
        let text = text(14, 5, 9, HourFormat::TwelveHour);
        let geometry = engine.layout(&metrics, CANVAS, &text, HourFormat::TwelveHour);

        let hm = geometry.hour_minutes;
        let hm_extent = metrics.extent(&text.hour_minutes, hm.style.font_size);
        let date_height = geometry.date_fit.measured_height;

        // Seconds share the hour:minutes baseline, one gap to the right.
        assert_eq!(geometry.seconds.origin.y, hm.origin.y);
        assert_eq!(
            geometry.seconds.origin.x,
            hm.origin.x + hm_extent.width + geometry.seconds_space
        );

        // Block is centred horizontally.
        let left_margin = hm.origin.x;
        let right_margin = CANVAS.width as i32 - (hm.origin.x + geometry.clock_fit.measured_width);
        assert!((left_margin - right_margin).abs() <= 1);

        // hour:minutes is centred in the area under the date.
        let top = hm.origin.y - hm_extent.height;
        let above = top - date_height;
        let below = CANVAS.height as i32 - hm.origin.y;
        assert!((above - below).abs() <= 1, "above {above} below {below}");

        // AM/PM sits on top of the seconds, aligned with them.
        let am_pm = geometry.am_pm.unwrap();
        let seconds_height = metrics.text_height(geometry.seconds.style.font_size);
        assert_eq!(am_pm.origin.x, geometry.seconds.origin.x);
        assert_eq!(am_pm.origin.y, geometry.seconds.origin.y - seconds_height);

        // Date is centred and hangs from the top edge.
        assert_eq!(geometry.date.origin.y, date_height);
        assert_eq!(
            geometry.date.origin.x,
            (CANVAS.width as i32 - geometry.date_fit.measured_width) / 2
        );
        assert!(geometry.date_fit.measured_width <= CANVAS.width as i32);
    }

    #[test]
    fn test_twenty_four_hour_mode_omits_am_pm() {
        let metrics = FakeMetrics::new();
        let mut engine = ClockLayoutEngine::new(&ClockConfig::default());
        let geometry = engine.layout(
            &metrics,
            CANVAS,
            &text(14, 5, 9, HourFormat::TwentyFourHour),
            HourFormat::TwentyFourHour,
        );
        assert!(geometry.am_pm.is_none());
    }

    #[test]
    fn test_seconds_digits_never_change_the_size() {
        let metrics = FakeMetrics::new();
        let mut engine = ClockLayoutEngine::new(&ClockConfig::default());
        let narrow = engine.layout(
            &metrics,
            CANVAS,
            &text(14, 5, 11, HourFormat::TwelveHour),
            HourFormat::TwelveHour,
        );
        let wide = engine.layout(
            &metrics,
            CANVAS,
            &text(14, 5, 8, HourFormat::TwelveHour),
            HourFormat::TwelveHour,
        );
        assert_eq!(narrow.hour_minutes, wide.hour_minutes);
        assert_eq!(narrow.seconds, wide.seconds);
        assert_eq!(narrow.am_pm, wide.am_pm);
    }

    #[test]
    fn test_warm_start_converges_quickly() {
        let metrics = FakeMetrics::new();
        let mut engine = ClockLayoutEngine::new(&ClockConfig::default());
        let text = text(14, 5, 9, HourFormat::TwelveHour);

        let first = engine.layout(&metrics, CANVAS, &text, HourFormat::TwelveHour);
        let cold_probes = metrics.probes.replace(0);

        let second = engine.layout(&metrics, CANVAS, &text, HourFormat::TwelveHour);
        let warm_probes = metrics.probes.get();

        assert_eq!(first, second);
        assert!(
            warm_probes * 4 < cold_probes,
            "warm {warm_probes} vs cold {cold_probes}"
        );
        assert_eq!(engine.hour_minutes_size(), first.clock_fit.size);
        assert_eq!(engine.date_size(), first.date_fit.size);
    }

    #[test]
    fn test_relayout_after_resize() {
        let metrics = FakeMetrics::new();
        let mut engine = ClockLayoutEngine::new(&ClockConfig::default());
        let text = text(9, 41, 0, HourFormat::TwelveHour);

        let large = engine.layout(&metrics, CANVAS, &text, HourFormat::TwelveHour);
        let small_canvas = Size::new(320, 240);
        let small = engine.layout(&metrics, small_canvas, &text, HourFormat::TwelveHour);

        assert!(small.clock_fit.size < large.clock_fit.size);
        assert!(small.clock_fit.measured_width <= small_canvas.width as i32);
        assert!(small.date_fit.measured_width <= small_canvas.width as i32);
    }
}
