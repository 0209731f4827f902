//! Display manager driving the clock page, the tickers and the brightness
//! controller.
//!
//! The host owns the event loop. It feeds the manager [`DisplayRequest`]s
//! (or calls the matching methods directly), calls [`DisplayManager::poll`]
//! whenever [`DisplayManager::next_wakeup`] has passed, and hands a render
//! surface to [`DisplayManager::render`] to draw the page when it is dirty.
//!
//! Both tickers only run between [`resume`](DisplayManager::resume) and
//! [`pause`](DisplayManager::pause).

use embassy_time::{Duration, Instant};
use embedded_graphics::prelude::*;
use log::{debug, info};
use thiserror_no_std::Error;

use crate::brightness::{BrightnessOpacityController, DisplaySink, SettingsError, SettingsStore};
use crate::clock::HourFormat;
use crate::config::ClockConfig;
use crate::moment::Moment;
use crate::pages::{ClockPage, Page, PageEvent};
use crate::scheduler::{MAX_SCHEDULED_TASKS, Scheduler, SchedulerError, TaskKind};
use crate::ticker::PeriodicTicker;
use crate::ui::core::TouchEvent;
use crate::ui::text::RenderSurface;

/// Request to the display manager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayRequest {
    /// Screen became visible: start ticking and reapply saved settings
    Resume(Moment),
    /// Screen hidden at the given time: end any gesture, stop ticking
    Pause(Moment),
    /// Run any scheduled work due at the given time
    Poll(Moment),
    /// Handle a touch event at the given time
    HandleTouch(TouchEvent, Moment),
    /// Force a redraw of the page
    Redraw,
    SetHourFormat(HourFormat),
    /// The drawable area changed size
    Resize(Size),
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("scheduling failed: {0}")]
    Scheduler(#[from] SchedulerError),
    #[error("settings failed: {0}")]
    Settings(#[from] SettingsError),
}

pub struct DisplayManager<S, K> {
    page: ClockPage,
    controller: BrightnessOpacityController,
    scheduler: Scheduler,
    clock_ticker: PeriodicTicker,
    store: S,
    sink: K,
    readout_duration: Duration,
    active: bool,
}

impl<S, K> DisplayManager<S, K>
where
    S: SettingsStore,
    K: DisplaySink,
{
    pub fn new(config: &ClockConfig, size: Size, store: S, sink: K) -> Self {
        Self {
            page: ClockPage::new(config, size),
            controller: BrightnessOpacityController::new(size, config.reapply_period),
            scheduler: Scheduler::new(),
            clock_ticker: PeriodicTicker::clock(),
            store,
            sink,
            readout_duration: config.readout_duration,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn page(&self) -> &ClockPage {
        &self.page
    }

    pub fn controller(&self) -> &BrightnessOpacityController {
        &self.controller
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// When `poll` next has work to do.
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    /// Start the clock and reapplication tickers and run their first firing.
    ///
    /// Resuming while active does nothing.
    pub fn resume(&mut self, now: &Moment) -> Result<(), DisplayError> {
        if self.active {
            debug!("Resume while active ignored");
            return Ok(());
        }
        self.page.on_activate();
        self.clock_ticker.activate(&mut self.scheduler, now)?;
        self.controller.activate(&mut self.scheduler, now)?;
        self.active = true;
        info!("Display resumed on {} page", self.page.title());
        self.poll(now)
    }

    /// End any gesture in progress as cancelled, then stop both tickers.
    /// Nothing scheduled before this call runs afterwards.
    ///
    /// The tickers stop even when saving the cancelled gesture fails; that
    /// error is returned afterwards.
    pub fn pause(&mut self, now: &Moment) -> Result<(), DisplayError> {
        if !self.active {
            return Ok(());
        }
        let cancelled = self.controller.on_touch(
            TouchEvent::Cancel,
            now.wall_clock().hour,
            &mut self.sink,
            &mut self.store,
        );
        self.clock_ticker.deactivate(&mut self.scheduler);
        self.controller.deactivate(&mut self.scheduler);
        self.page.on_deactivate();
        self.active = false;
        info!("Display paused on {} page", self.page.title());
        cancelled?;
        Ok(())
    }

    /// Run every firing due at `now`, one at a time.
    pub fn poll(&mut self, now: &Moment) -> Result<(), DisplayError> {
        // Each firing reschedules itself, so a zero period would never drain.
        for _ in 0..MAX_SCHEDULED_TASKS {
            let Some((token, kind)) = self.scheduler.pop_due(now.instant) else {
                break;
            };
            match kind {
                TaskKind::ClockTick => {
                    if self.clock_ticker.on_fire(&mut self.scheduler, token, now)? {
                        self.page.on_event(&PageEvent::Tick(*now));
                    }
                }
                TaskKind::Reapply => {
                    self.controller.on_reapply_fired(
                        &mut self.scheduler,
                        token,
                        now,
                        &mut self.sink,
                        &self.store,
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Apply a touch event and show the resulting value.
    ///
    /// Touches while paused are ignored.
    pub fn handle_touch(&mut self, event: TouchEvent, now: &Moment) -> Result<(), DisplayError> {
        if !self.active {
            debug!("Touch while paused ignored: {:?}", event);
            return Ok(());
        }
        let hour = now.wall_clock().hour;
        let applied = self
            .controller
            .on_touch(event, hour, &mut self.sink, &mut self.store)?;

        if let (Some(adjustment), Some(_)) = (applied, event.point()) {
            self.page.on_event(&PageEvent::Readout {
                adjustment,
                expires: now.instant + self.readout_duration,
            });
        }
        Ok(())
    }

    pub fn set_hour_format(&mut self, format: HourFormat) {
        if self.page.on_event(&PageEvent::HourFormatChanged(format)) {
            info!("Hour format set to {:?}", format);
        }
    }

    pub fn resize(&mut self, size: Size) {
        if self.page.bounds().size == size {
            return;
        }
        self.controller.set_view_size(size);
        self.page.on_event(&PageEvent::Resized(size));
        debug!("Resized to {}x{}", size.width, size.height);
    }

    /// Draw the page onto `surface` if it changed. Returns whether it drew.
    pub fn render<R: RenderSurface>(&mut self, surface: &mut R) -> Result<bool, R::Error> {
        self.resize(surface.canvas_size());
        if !self.page.is_dirty() {
            return Ok(false);
        }
        self.page.draw_page(surface)?;
        self.page.mark_clean();
        Ok(true)
    }

    /// Process a display request.
    pub fn process_request(&mut self, request: DisplayRequest) -> Result<(), DisplayError> {
        debug!("Processing request: {:?}", request);
        match request {
            DisplayRequest::Resume(now) => self.resume(&now)?,
            DisplayRequest::Pause(now) => self.pause(&now)?,
            DisplayRequest::Poll(now) => self.poll(&now)?,
            DisplayRequest::HandleTouch(event, now) => self.handle_touch(event, &now)?,
            DisplayRequest::Redraw => self.page.mark_dirty(),
            DisplayRequest::SetHourFormat(format) => self.set_hour_format(format),
            DisplayRequest::Resize(size) => self.resize(size),
        }
        Ok(())
    }
}
