//! Desktop simulator for the nightstand clock face.
//!
//! Renders the clock page in an SDL2 window via `embedded-graphics-simulator`.
//! Brightness and background opacity are simulated by dimming the colors
//! written to the window, and the day/night settings are saved to a file.
//!
//! # Controls
//!
//! | Input                      | Action                          |
//! |----------------------------|---------------------------------|
//! | Drag on the left half      | Screen brightness               |
//! | Drag on the right half     | Background opacity              |
//! | H                          | Toggle 12/24-hour format        |
//! | P                          | Pause / resume the clock        |
//! | Q / Esc                    | Quit                            |
//!
//! # Environment
//!
//! Read from the process environment and an optional `.env` file:
//! `NIGHTSTAND_24H`, `NIGHTSTAND_WIDTH`, `NIGHTSTAND_HEIGHT`,
//! `NIGHTSTAND_SETTINGS_PATH`.

mod config;
mod panel;
mod settings_file;

use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use nightstand_core::Moment;
use nightstand_core::display_manager::{DisplayManager, DisplayRequest};
use nightstand_core::ui::{MonoTextSurface, TouchEvent, TouchPoint};

use crate::config::SimulatorConfig;
use crate::panel::SimulatedPanel;
use crate::settings_file::FileSettingsStore;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

type Manager = DisplayManager<FileSettingsStore, SimulatedPanel>;

/// Reads both host clocks.
struct HostClock {
    offset: UtcOffset,
}

impl HostClock {
    /// Must run before any other thread starts: the local offset can only
    /// be queried soundly while the process is single-threaded.
    fn new() -> Self {
        let offset = UtcOffset::current_local_offset().unwrap_or_else(|e| {
            warn!("Local UTC offset unavailable ({}), showing UTC", e);
            UtcOffset::UTC
        });
        Self { offset }
    }

    fn now(&self) -> Moment {
        let local = OffsetDateTime::now_utc().to_offset(self.offset);
        Moment::new(
            embassy_time::Instant::now(),
            PrimitiveDateTime::new(local.date(), local.time()),
        )
    }
}

fn dispatch(manager: &mut Manager, request: DisplayRequest) {
    if let Err(e) = manager.process_request(request) {
        error!("Display request failed: {}", e);
    }
}

fn main() {
    // Load .env before the logger so it can set RUST_LOG.
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("Ignoring .env: {}", e);
        }
    }

    let clock = HostClock::new();

    let config = SimulatorConfig::from_env();
    info!("Starting nightstand simulator");
    info!(
        "Display: {}x{}, {:?}",
        config.size.width, config.size.height, config.clock.hour_format
    );
    info!("Drag left half = brightness, right half = background. H=12/24h  P=pause  Q=quit");

    let mut display = SimulatorDisplay::<Rgb565>::new(config.size);
    let output_settings = OutputSettingsBuilder::new().build();
    let mut window = Window::new("Nightstand Simulator", &output_settings);

    let store = FileSettingsStore::open(&config.settings_path);
    info!("Settings file: {}", store.path().display());
    let mut manager = Manager::new(&config.clock, config.size, store, SimulatedPanel::new());
    dispatch(&mut manager, DisplayRequest::Resume(clock.now()));

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    render(&mut manager, &mut display);
    window.update(&display);

    let mut pressed = false;

    'running: loop {
        let frame_start = std::time::Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            let now = clock.now();
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }

                    if keycode == Keycode::H {
                        let format = manager.page().hour_format().toggled();
                        dispatch(&mut manager, DisplayRequest::SetHourFormat(format));
                    } else if keycode == Keycode::P {
                        if manager.is_active() {
                            dispatch(&mut manager, DisplayRequest::Pause(now));
                        } else {
                            dispatch(&mut manager, DisplayRequest::Resume(now));
                        }
                    }
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    pressed = true;
                    let touch = TouchEvent::Press(TouchPoint::from(point));
                    dispatch(&mut manager, DisplayRequest::HandleTouch(touch, now));
                }

                SimulatorEvent::MouseMove { point } if pressed => {
                    let touch = TouchEvent::Drag(TouchPoint::from(point));
                    dispatch(&mut manager, DisplayRequest::HandleTouch(touch, now));
                }

                SimulatorEvent::MouseButtonUp { point, .. } if pressed => {
                    pressed = false;
                    let touch = TouchEvent::Release(TouchPoint::from(point));
                    dispatch(&mut manager, DisplayRequest::HandleTouch(touch, now));
                }

                _ => {}
            }
        }

        // --- Scheduled work -------------------------------------------------
        let now = clock.now();
        if manager.next_wakeup().is_some_and(|due| due <= now.instant) {
            dispatch(&mut manager, DisplayRequest::Poll(now));
        }

        // --- Render -------------------------------------------------------
        if manager.sink_mut().take_changed() {
            dispatch(&mut manager, DisplayRequest::Redraw);
        }
        render(&mut manager, &mut display);
        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    dispatch(&mut manager, DisplayRequest::Pause(clock.now()));
    info!("Simulator exiting");
}

/// Draw the page through the simulated panel if it changed.
fn render(manager: &mut Manager, display: &mut SimulatorDisplay<Rgb565>) {
    let mut target = manager.sink().target(display);
    let mut surface = MonoTextSurface::new(&mut target);
    if let Err(e) = manager.render(&mut surface) {
        error!("Draw error: {:?}", e);
    }
}
