//! Day / night classification of the local hour.
//!
//! Never cache a [`Period`]: the boundary can be crossed while the clock sits
//! untouched, so every period-dependent decision classifies the hour afresh.

/// First hour (inclusive) of the day period.
pub const DAY_START_HOUR: u8 = 8;

/// First hour (inclusive) of the night period.
pub const NIGHT_START_HOUR: u8 = 23;

/// Which set of saved display settings is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Day,
    Night,
}

impl Period {
    /// `Day` for hours 8..=22, `Night` for everything else.
    pub const fn classify(hour: u8) -> Self {
        if hour >= DAY_START_HOUR && hour < NIGHT_START_HOUR {
            Self::Day
        } else {
            Self::Night
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}
