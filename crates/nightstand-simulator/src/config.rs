//! Simulator configuration, read from the environment (and `.env`).

use std::path::PathBuf;
use std::str::FromStr;

use embedded_graphics::prelude::*;
use log::warn;

use nightstand_core::clock::HourFormat;
use nightstand_core::config::ClockConfig;

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 480;
const DEFAULT_SETTINGS_PATH: &str = "nightstand-settings.bin";

pub struct SimulatorConfig {
    pub clock: ClockConfig,
    pub size: Size,
    pub settings_path: PathBuf,
}

impl SimulatorConfig {
    /// Build from `NIGHTSTAND_*` variables. Call `dotenvy::dotenv()` first
    /// to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let hour_format = match lookup("NIGHTSTAND_24H").as_deref().map(parse_flag) {
            Some(Some(true)) => HourFormat::TwentyFourHour,
            Some(None) => {
                warn!("NIGHTSTAND_24H is not a boolean, using 12-hour mode");
                HourFormat::TwelveHour
            }
            _ => HourFormat::TwelveHour,
        };

        let width = parse_or(&lookup, "NIGHTSTAND_WIDTH", DEFAULT_WIDTH);
        let height = parse_or(&lookup, "NIGHTSTAND_HEIGHT", DEFAULT_HEIGHT);
        let settings_path = lookup("NIGHTSTAND_SETTINGS_PATH")
            .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string())
            .into();

        Self {
            clock: ClockConfig::default().with_hour_format(hour_format),
            size: Size::new(width.max(1), height.max(1)),
            settings_path,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(name) {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {}={:?}, using {}", name, value, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> SimulatorConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SimulatorConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.size, Size::new(800, 480));
        assert_eq!(config.clock.hour_format, HourFormat::TwelveHour);
        assert_eq!(config.settings_path, PathBuf::from("nightstand-settings.bin"));
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("NIGHTSTAND_24H", "true"),
            ("NIGHTSTAND_WIDTH", "1024"),
            ("NIGHTSTAND_HEIGHT", " 600 "),
            ("NIGHTSTAND_SETTINGS_PATH", "/tmp/clock.bin"),
        ]);
        assert_eq!(config.clock.hour_format, HourFormat::TwentyFourHour);
        assert_eq!(config.size, Size::new(1024, 600));
        assert_eq!(config.settings_path, PathBuf::from("/tmp/clock.bin"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config(&[("NIGHTSTAND_24H", "maybe"), ("NIGHTSTAND_WIDTH", "wide")]);
        assert_eq!(config.clock.hour_format, HourFormat::TwelveHour);
        assert_eq!(config.size.width, 800);
    }

    #[test]
    fn test_flags() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("Off"), Some(false));
        assert_eq!(parse_flag(""), None);
    }
}
