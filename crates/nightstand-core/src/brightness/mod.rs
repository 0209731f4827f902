//! Brightness and background-opacity control.
//!
//! A vertical drag sets a value (`1.0` at the top edge, `0.0` at the bottom):
//! the left half of the screen adjusts screen brightness, the right half the
//! opacity of the background (a black overlay whose alpha is `1 - value`).
//! Values apply live on every move and are saved on release into the slot for
//! the current day/night period. A periodic reapplication pass restores the
//! saved values for whatever period is current, so crossing the day/night
//! boundary while the clock sits untouched switches settings on its own.

pub mod settings;

use core::fmt::Write;

use embassy_time::Duration;
use embedded_graphics::prelude::*;
use log::{debug, info, warn};
use thiserror_no_std::Error;

use crate::moment::Moment;
use crate::period::Period;
use crate::scheduler::{CancelToken, Scheduler, SchedulerError, TaskKind};
use crate::ticker::{Cadence, PeriodicTicker};
use crate::ui::core::{TouchEvent, TouchPoint};

pub use settings::{PersistedSettings, SettingKey, SettingsError, SettingsStore};

/// Which display property a gesture adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustmentZone {
    Brightness,
    BackgroundOpacity,
}

impl AdjustmentZone {
    /// Left half adjusts brightness, right half background opacity.
    pub fn from_touch_x(x: i32, view_width: u32) -> Self {
        if x < (view_width / 2) as i32 {
            AdjustmentZone::Brightness
        } else {
            AdjustmentZone::BackgroundOpacity
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AdjustmentZone::Brightness => "Brightness",
            AdjustmentZone::BackgroundOpacity => "Background",
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SinkError {
    #[error("display rejected value {0}")]
    Rejected(f32),
}

/// Where brightness and overlay alpha end up.
pub trait DisplaySink {
    /// Screen brightness, `0.0..=1.0`.
    fn set_screen_brightness(&mut self, value: f32) -> Result<(), SinkError>;

    /// Alpha of the black overlay above the background, `0.0..=1.0`.
    fn set_overlay_dim_alpha(&mut self, alpha: f32) -> Result<(), SinkError>;
}

/// Clamp to `0.0..=1.0`, mapping NaN to `0.0`.
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Overlay alpha that produces background opacity `value`.
pub fn overlay_alpha(value: f32) -> f32 {
    1.0 - clamp_unit(value)
}

/// 8-bit alpha of the black overlay for background opacity `value`.
pub fn overlay_alpha_u8(value: f32) -> u8 {
    (255.0 * overlay_alpha(value)) as u8
}

/// One value derived from a touch position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub zone: AdjustmentZone,
    /// Unclamped: positions outside the view produce values outside `0..=1`.
    pub value: f32,
}

impl Adjustment {
    pub fn new(zone: AdjustmentZone, value: f32) -> Self {
        Self { zone, value }
    }

    /// Value for a touch at `point` in a view of `view` size.
    pub fn value_at(point: TouchPoint, view: Size) -> f32 {
        1.0 - point.y as f32 / view.height as f32
    }

    /// Whole percent, truncated, of the unclamped value.
    pub fn percent(&self) -> i32 {
        (self.value * 100.0) as i32
    }

    /// Text shown while dragging, e.g. "Brightness: 42%".
    pub fn readout(&self) -> heapless::String<32> {
        let mut text = heapless::String::new();
        write!(&mut text, "{}: {}%", self.zone.label(), self.percent()).ok();
        text
    }
}

/// Maps drags to applied and persisted display settings.
pub struct BrightnessOpacityController {
    view: Size,
    /// Zone pinned at touch-down for the gesture in progress
    gesture_zone: Option<AdjustmentZone>,
    last: Option<Adjustment>,
    reapply: PeriodicTicker,
}

impl BrightnessOpacityController {
    pub fn new(view: Size, reapply_period: Duration) -> Self {
        Self {
            view,
            gesture_zone: None,
            last: None,
            reapply: PeriodicTicker::new(TaskKind::Reapply, Cadence::Every(reapply_period)),
        }
    }

    pub fn set_view_size(&mut self, view: Size) {
        self.view = view;
    }

    pub fn view_size(&self) -> Size {
        self.view
    }

    /// Apply a touch event.
    ///
    /// Press pins the zone for the whole gesture; every event with a position
    /// applies the value live; Release and Cancel also save the last applied
    /// value for the period of `hour`. Returns the adjustment applied, for
    /// the readout.
    pub fn on_touch<K, S>(
        &mut self,
        event: TouchEvent,
        hour: u8,
        sink: &mut K,
        store: &mut S,
    ) -> Result<Option<Adjustment>, SettingsError>
    where
        K: DisplaySink,
        S: SettingsStore,
    {
        let applied = match event.point() {
            Some(point) => {
                let zone = match (event, self.gesture_zone) {
                    (TouchEvent::Press(_), _) | (_, None) => {
                        let zone = AdjustmentZone::from_touch_x(point.x, self.view.width);
                        self.gesture_zone = Some(zone);
                        zone
                    }
                    (_, Some(zone)) => zone,
                };
                let adjustment = Adjustment::new(zone, Adjustment::value_at(point, self.view));
                Self::apply(adjustment, sink);
                self.last = Some(adjustment);
                Some(adjustment)
            }
            None => self.last,
        };

        if event.is_final() {
            let pinned = self.gesture_zone.take();
            if let (Some(_), Some(adjustment)) = (pinned, applied) {
                self.persist(adjustment, hour, store)?;
            }
        }
        Ok(applied)
    }

    fn persist<S: SettingsStore>(
        &self,
        adjustment: Adjustment,
        hour: u8,
        store: &mut S,
    ) -> Result<(), SettingsError> {
        let key = SettingKey::new(adjustment.zone, Period::classify(hour));
        let value = clamp_unit(adjustment.value);
        store.put(key, value)?;
        info!("Saved {} = {}", key.as_str(), value);
        Ok(())
    }

    /// Push `adjustment` to the display, clamped. Failures are logged only.
    pub fn apply<K: DisplaySink>(adjustment: Adjustment, sink: &mut K) {
        let value = clamp_unit(adjustment.value);
        let result = match adjustment.zone {
            AdjustmentZone::Brightness => sink.set_screen_brightness(value),
            AdjustmentZone::BackgroundOpacity => sink.set_overlay_dim_alpha(overlay_alpha(value)),
        };
        if let Err(e) = result {
            warn!("Could not apply {:?} {}: {}", adjustment.zone, value, e);
        }
    }

    /// Apply the saved value of each zone for the period of `hour`.
    ///
    /// Unset slots leave the display untouched. Returns how many values were
    /// applied.
    pub fn reapply<K, S>(&self, hour: u8, sink: &mut K, store: &S) -> usize
    where
        K: DisplaySink,
        S: SettingsStore,
    {
        let period = Period::classify(hour);
        let mut applied = 0;
        for zone in [AdjustmentZone::Brightness, AdjustmentZone::BackgroundOpacity] {
            let key = SettingKey::new(zone, period);
            if let Some(value) = store.get(key) {
                Self::apply(Adjustment::new(zone, value), sink);
                applied += 1;
            }
        }
        debug!("Reapplied {} {} settings", applied, period.label());
        applied
    }

    /// Start the periodic reapplication pass. The first pass is due at once.
    pub fn activate(
        &mut self,
        scheduler: &mut Scheduler,
        now: &Moment,
    ) -> Result<(), SchedulerError> {
        self.reapply.activate(scheduler, now)
    }

    /// Stop the reapplication pass.
    pub fn deactivate(&mut self, scheduler: &mut Scheduler) {
        self.reapply.deactivate(scheduler);
    }

    pub fn is_active(&self) -> bool {
        self.reapply.is_active()
    }

    /// Handle a reapplication firing: reschedule, then reapply for the hour
    /// of `now`. Stale firings do nothing.
    pub fn on_reapply_fired<K, S>(
        &mut self,
        scheduler: &mut Scheduler,
        token: CancelToken,
        now: &Moment,
        sink: &mut K,
        store: &S,
    ) -> Result<bool, SchedulerError>
    where
        K: DisplaySink,
        S: SettingsStore,
    {
        if !self.reapply.on_fire(scheduler, token, now)? {
            return Ok(false);
        }
        self.reapply(now.wall_clock().hour, sink, store);
        Ok(true)
    }
}
