// src/pages/page.rs
//! Core page abstraction.
//!
//! A [`Page`] owns its state and dirty flag and draws itself onto any
//! [`RenderSurface`]. The [`DisplayManager`](crate::display_manager::DisplayManager)
//! calls these methods in a fixed order:
//!
//! 1. **`on_activate`** when the page starts being shown.
//! 2. **`on_event`** for every incoming [`PageEvent`].
//! 3. **`draw_page`** when `is_dirty()` is true, followed by `mark_clean`.
//! 4. **`on_deactivate`** when the page stops being shown.

use embassy_time::Instant;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::brightness::Adjustment;
use crate::clock::HourFormat;
use crate::moment::Moment;
use crate::ui::text::RenderSurface;

/// Events delivered to the active page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// Clock tick carrying the time to display
    Tick(Moment),
    /// A drag applied a value; show it until `expires`
    Readout {
        adjustment: Adjustment,
        expires: Instant,
    },
    HourFormatChanged(HourFormat),
    /// The drawable area changed size
    Resized(Size),
}

/// Trait every displayable page implements.
pub trait Page {
    /// Human-readable title, used in logs.
    fn title(&self) -> &str;

    /// Called once when this page starts being shown.
    fn on_activate(&mut self) {}

    /// Called once when this page stops being shown.
    fn on_deactivate(&mut self) {}

    /// Handle an incoming [`PageEvent`].
    ///
    /// Returns `true` if the event changed what the page would draw.
    fn on_event(&mut self, _event: &PageEvent) -> bool {
        false
    }

    /// Render the entire page onto `surface`.
    fn draw_page<S: RenderSurface>(&mut self, surface: &mut S) -> Result<(), S::Error>;

    /// Bounding rectangle of this page (the full screen).
    fn bounds(&self) -> Rectangle;

    fn is_dirty(&self) -> bool;

    /// Clear the dirty flag after a successful draw.
    fn mark_clean(&mut self);

    /// Force a redraw on the next frame.
    fn mark_dirty(&mut self);
}
