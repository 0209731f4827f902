//! Pages drawn by the display manager
//!
//! - [`page`] - the [`Page`] trait and the events pages react to
//! - [`clock`] - the full-screen clock face

pub mod clock;
pub mod page;

pub use clock::ClockPage;
pub use page::{Page, PageEvent};
