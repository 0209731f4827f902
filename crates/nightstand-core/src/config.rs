//! Clock configuration and tuning constants.

use embassy_time::Duration;

use crate::clock::HourFormat;
use crate::ui::styling::ClockPalette;

/// Font size every search starts from before the first frame converges.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Size increment of the date line fit search.
pub const DATE_FIT_STEP: f32 = 6.0;

/// Size increment of the hour:minutes + seconds fit search.
pub const CLOCK_FIT_STEP: f32 = 6.0;

/// Gap between hour:minutes and seconds, as a fraction of the canvas width.
pub const SECONDS_SPACE_FACTOR: f32 = 0.04;

/// Seconds font size relative to the hour:minutes font size.
pub const SECONDS_SIZE_FACTOR: f32 = 0.37;

/// AM/PM font size relative to the hour:minutes font size.
pub const AM_PM_SIZE_FACTOR: f32 = 0.26;

/// How often the saved brightness / opacity is reapplied while active.
pub const REAPPLY_PERIOD: Duration = Duration::from_secs(60);

/// How long the value readout stays on screen after the last touch move.
pub const READOUT_DURATION: Duration = Duration::from_millis(2000);

/// Shadow radius of the hour:minutes text in pixels.
pub const SHADOW_RADIUS_BIG_PX: i32 = 6;

/// Shadow radius of the seconds, AM/PM and date text in pixels.
pub const SHADOW_RADIUS_SMALL_PX: i32 = 3;

/// Readout font size as a fraction of the canvas height.
pub const READOUT_SIZE_FACTOR: f32 = 0.08;

/// Runtime configuration of the clock face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockConfig {
    pub hour_format: HourFormat,
    pub initial_font_size: f32,
    pub date_fit_step: f32,
    pub clock_fit_step: f32,
    pub seconds_space_factor: f32,
    pub seconds_size_factor: f32,
    pub am_pm_size_factor: f32,
    pub reapply_period: Duration,
    pub readout_duration: Duration,
    pub readout_size_factor: f32,
    /// Drop-shadow offset of the hour:minutes text.
    pub shadow_offset_big: i32,
    /// Drop-shadow offset of every other text element.
    pub shadow_offset_small: i32,
    pub palette: ClockPalette,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            hour_format: HourFormat::default(),
            initial_font_size: DEFAULT_FONT_SIZE,
            date_fit_step: DATE_FIT_STEP,
            clock_fit_step: CLOCK_FIT_STEP,
            seconds_space_factor: SECONDS_SPACE_FACTOR,
            seconds_size_factor: SECONDS_SIZE_FACTOR,
            am_pm_size_factor: AM_PM_SIZE_FACTOR,
            reapply_period: REAPPLY_PERIOD,
            readout_duration: READOUT_DURATION,
            readout_size_factor: READOUT_SIZE_FACTOR,
            shadow_offset_big: shadow_offset(SHADOW_RADIUS_BIG_PX),
            shadow_offset_small: shadow_offset(SHADOW_RADIUS_SMALL_PX),
            palette: ClockPalette::default(),
        }
    }
}

impl ClockConfig {
    pub fn with_hour_format(mut self, hour_format: HourFormat) -> Self {
        self.hour_format = hour_format;
        self
    }
}

/// Shadows are displaced by two thirds of their radius.
const fn shadow_offset(radius: i32) -> i32 {
    radius * 2 / 3
}
