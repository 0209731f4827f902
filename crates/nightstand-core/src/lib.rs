//! Hardware-independent core library for the nightstand clock
//!
//! This crate contains all platform-agnostic logic for a full-screen clock
//! face: the text-fit search that sizes the clock to the screen, the layout
//! of the hour:minutes, seconds, AM/PM and date lines, the cooperative
//! scheduler that drives second-aligned redraws, and the brightness /
//! background-opacity controller with its day/night settings.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests). The
//! host owns every clock: each call that needs "now" receives a [`Moment`].

#![no_std]

extern crate alloc;

pub mod brightness;
pub mod clock;
pub mod config;
pub mod display_manager;
pub mod fit;
pub mod moment;
pub mod pages;
pub mod period;
pub mod scheduler;
pub mod ticker;
pub mod ui;

pub use moment::Moment;
