//! Clock text derivation and layout.

pub mod layout;
pub mod text;

pub use layout::{ClockLayoutEngine, LayoutGeometry, TextPlacement, WIDEST_SECONDS};
pub use text::{DisplayText, HourFormat, WallClock};
