// src/ui/core.rs
//! Touch input types

use embedded_graphics::prelude::*;

/// A touch position in view coordinates.
///
/// Signed so that drags leaving the view (above the top edge, left of the
/// left edge) are reported as-is rather than clamped by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: i32,
    pub y: i32,
}

impl TouchPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<Point> for TouchPoint {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

/// Phases of a single-finger gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    /// Finger down
    Press(TouchPoint),
    /// Finger moved while down
    Drag(TouchPoint),
    /// Finger lifted
    Release(TouchPoint),
    /// Gesture aborted by the input layer
    Cancel,
}

impl TouchEvent {
    pub fn point(&self) -> Option<TouchPoint> {
        match self {
            TouchEvent::Press(p) | TouchEvent::Drag(p) | TouchEvent::Release(p) => Some(*p),
            TouchEvent::Cancel => None,
        }
    }

    /// Whether this event ends the gesture.
    pub fn is_final(&self) -> bool {
        matches!(self, TouchEvent::Release(_) | TouchEvent::Cancel)
    }
}
