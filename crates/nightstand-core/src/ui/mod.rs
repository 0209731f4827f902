// src/ui/mod.rs
//! Nightstand UI primitives
//!
//! This module provides:
//! - Touch input types shared by the page and the brightness controller
//! - The text render surface (measurement + drawing) the layout engine
//!   sizes against, with an embedded-graphics implementation
//! - Colors and the clock palette

pub mod core;
pub mod styling;
pub mod text;

// Re-export commonly used items
pub use self::core::{TouchEvent, TouchPoint};
pub use styling::{ClockPalette, RenderStyle};
pub use text::{MonoTextSurface, RenderSurface, ScaledMonoFont, TextMetrics};
