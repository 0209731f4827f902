//! Persisted brightness / opacity slots.
//!
//! Four independent optional values keyed by (zone, period). An absent slot
//! means "do not override": the live display value is left alone.

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::brightness::AdjustmentZone;
use crate::period::Period;

/// Address of one persisted slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingKey {
    pub zone: AdjustmentZone,
    pub period: Period,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::new(AdjustmentZone::Brightness, Period::Day),
        SettingKey::new(AdjustmentZone::Brightness, Period::Night),
        SettingKey::new(AdjustmentZone::BackgroundOpacity, Period::Day),
        SettingKey::new(AdjustmentZone::BackgroundOpacity, Period::Night),
    ];

    pub const fn new(zone: AdjustmentZone, period: Period) -> Self {
        Self { zone, period }
    }

    /// Stable name of the slot, e.g. `brightness.day`.
    pub const fn as_str(&self) -> &'static str {
        match (self.zone, self.period) {
            (AdjustmentZone::Brightness, Period::Day) => "brightness.day",
            (AdjustmentZone::Brightness, Period::Night) => "brightness.night",
            (AdjustmentZone::BackgroundOpacity, Period::Day) => "opacity.day",
            (AdjustmentZone::BackgroundOpacity, Period::Night) => "opacity.night",
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to encode settings")]
    Encode,
    #[error("failed to decode settings")]
    Decode,
    #[error("settings storage error: {0}")]
    Storage(heapless::String<64>),
}

impl SettingsError {
    /// Storage error carrying as much of `message` as fits.
    pub fn storage(message: &str) -> Self {
        let mut text = heapless::String::new();
        for c in message.chars() {
            if text.push(c).is_err() {
                break;
            }
        }
        SettingsError::Storage(text)
    }
}

/// Typed key/value store for the four slots.
pub trait SettingsStore {
    fn get(&self, key: SettingKey) -> Option<f32>;

    fn put(&mut self, key: SettingKey, value: f32) -> Result<(), SettingsError>;

    fn has(&self, key: SettingKey) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory slots, encodable with postcard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSettings {
    brightness_day: Option<f32>,
    brightness_night: Option<f32>,
    opacity_day: Option<f32>,
    opacity_night: Option<f32>,
}

impl PersistedSettings {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: SettingKey) -> &Option<f32> {
        match (key.zone, key.period) {
            (AdjustmentZone::Brightness, Period::Day) => &self.brightness_day,
            (AdjustmentZone::Brightness, Period::Night) => &self.brightness_night,
            (AdjustmentZone::BackgroundOpacity, Period::Day) => &self.opacity_day,
            (AdjustmentZone::BackgroundOpacity, Period::Night) => &self.opacity_night,
        }
    }

    fn slot_mut(&mut self, key: SettingKey) -> &mut Option<f32> {
        match (key.zone, key.period) {
            (AdjustmentZone::Brightness, Period::Day) => &mut self.brightness_day,
            (AdjustmentZone::Brightness, Period::Night) => &mut self.brightness_night,
            (AdjustmentZone::BackgroundOpacity, Period::Day) => &mut self.opacity_day,
            (AdjustmentZone::BackgroundOpacity, Period::Night) => &mut self.opacity_night,
        }
    }

    pub fn clear(&mut self, key: SettingKey) {
        *self.slot_mut(key) = None;
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SettingsError> {
        postcard::to_allocvec(self).map_err(|_| SettingsError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SettingsError> {
        postcard::from_bytes(bytes).map_err(|_| SettingsError::Decode)
    }
}

impl SettingsStore for PersistedSettings {
    fn get(&self, key: SettingKey) -> Option<f32> {
        *self.slot(key)
    }

    fn put(&mut self, key: SettingKey, value: f32) -> Result<(), SettingsError> {
        *self.slot_mut(key) = Some(value);
        Ok(())
    }
}
