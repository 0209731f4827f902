// src/pages/clock.rs
//! Full-screen clock face: date on top, hour:minutes with seconds and AM/PM
//! beside it, and a transient brightness/opacity readout at the bottom.

use embassy_time::Instant;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::clock::{ClockLayoutEngine, DisplayText, HourFormat, LayoutGeometry};
use crate::config::ClockConfig;
use crate::moment::Moment;
use crate::pages::page::{Page, PageEvent};
use crate::ui::styling::{ClockPalette, RenderStyle};
use crate::ui::text::RenderSurface;

type ReadoutText = heapless::String<32>;

#[derive(Debug, Clone)]
struct Readout {
    text: ReadoutText,
    expires: Instant,
}

pub struct ClockPage {
    engine: ClockLayoutEngine,
    format: HourFormat,
    palette: ClockPalette,
    readout_size_factor: f32,
    shadow_offset_small: i32,
    bounds: Rectangle,
    now: Option<Moment>,
    readout: Option<Readout>,
    dirty: bool,
}

impl ClockPage {
    pub fn new(config: &ClockConfig, size: Size) -> Self {
        Self {
            engine: ClockLayoutEngine::new(config),
            format: config.hour_format,
            palette: config.palette,
            readout_size_factor: config.readout_size_factor,
            shadow_offset_small: config.shadow_offset_small,
            bounds: Rectangle::new(Point::zero(), size),
            now: None,
            readout: None,
            dirty: true,
        }
    }

    pub fn hour_format(&self) -> HourFormat {
        self.format
    }

    /// Time shown by the last tick.
    pub fn now(&self) -> Option<&Moment> {
        self.now.as_ref()
    }

    /// Readout text currently on screen, if any.
    pub fn readout(&self) -> Option<&str> {
        self.readout.as_ref().map(|r| r.text.as_str())
    }

    fn expire_readout(&mut self, now: Instant) -> bool {
        match &self.readout {
            Some(readout) if readout.expires <= now => {
                self.readout = None;
                true
            }
            _ => false,
        }
    }

    fn draw_clock<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        now: &Moment,
    ) -> Result<LayoutGeometry, S::Error> {
        let text = DisplayText::new(now.wall_clock(), now.local.date(), self.format);
        let canvas = surface.canvas_size();
        let geometry = self.engine.layout(&*surface, canvas, &text, self.format);

        surface.draw_text(&text.date, geometry.date.origin, &geometry.date.style)?;
        surface.draw_text(
            &text.hour_minutes,
            geometry.hour_minutes.origin,
            &geometry.hour_minutes.style,
        )?;
        // Sized as the widest seconds string, drawn as the real one.
        surface.draw_text(&text.seconds, geometry.seconds.origin, &geometry.seconds.style)?;
        if let Some(am_pm) = &geometry.am_pm {
            surface.draw_text(&text.am_pm, am_pm.origin, &am_pm.style)?;
        }
        Ok(geometry)
    }

    fn draw_readout<S: RenderSurface>(&self, surface: &mut S, text: &str) -> Result<(), S::Error> {
        let canvas = surface.canvas_size();
        let style = RenderStyle::new(
            canvas.height as f32 * self.readout_size_factor,
            self.palette.readout,
        )
        .with_shadow(self.shadow_offset_small, self.palette.shadow);

        let extent = surface.extent(text, style.font_size);
        let origin = Point::new(
            (canvas.width as i32 - extent.width) / 2,
            canvas.height as i32 - extent.height / 2,
        );
        surface.draw_text(text, origin, &style)
    }
}

impl Page for ClockPage {
    fn title(&self) -> &str {
        "Clock"
    }

    fn on_activate(&mut self) {
        self.dirty = true;
    }

    fn on_deactivate(&mut self) {
        self.readout = None;
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        match event {
            PageEvent::Tick(moment) => {
                self.now = Some(*moment);
                self.expire_readout(moment.instant);
                self.dirty = true;
                true
            }
            PageEvent::Readout {
                adjustment,
                expires,
            } => {
                self.readout = Some(Readout {
                    text: adjustment.readout(),
                    expires: *expires,
                });
                self.dirty = true;
                true
            }
            PageEvent::HourFormatChanged(format) => {
                if *format == self.format {
                    return false;
                }
                self.format = *format;
                self.dirty = true;
                true
            }
            PageEvent::Resized(size) => {
                self.bounds = Rectangle::new(Point::zero(), *size);
                self.dirty = true;
                true
            }
        }
    }

    fn draw_page<S: RenderSurface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        surface.clear(self.palette.background)?;

        let Some(now) = self.now else {
            return Ok(());
        };
        let geometry = self.draw_clock(surface, &now)?;
        debug!(
            "Drew clock face, hour:minutes size {}",
            geometry.hour_minutes.style.font_size
        );

        if let Some(readout) = &self.readout {
            if readout.expires > now.instant {
                self.draw_readout(surface, readout.text.as_str())?;
            }
        }
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
