//! Settings store backed by a postcard file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use nightstand_core::brightness::{PersistedSettings, SettingKey, SettingsError, SettingsStore};

/// Keeps the four slots in memory and rewrites the file on every `put`.
pub struct FileSettingsStore {
    path: PathBuf,
    settings: PersistedSettings,
}

impl FileSettingsStore {
    /// Load `path`, starting empty when it is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = match fs::read(&path) {
            Ok(bytes) => match PersistedSettings::from_bytes(&bytes) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    warn!("Ignoring {}: {}", path.display(), e);
                    PersistedSettings::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No settings at {}, starting empty", path.display());
                PersistedSettings::new()
            }
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                PersistedSettings::new()
            }
        };
        Self { path, settings }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), SettingsError> {
        let bytes = self.settings.to_bytes()?;
        fs::write(&self.path, &bytes).map_err(|e| SettingsError::storage(&e.to_string()))?;
        debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: SettingKey) -> Option<f32> {
        self.settings.get(key)
    }

    fn put(&mut self, key: SettingKey, value: f32) -> Result<(), SettingsError> {
        self.settings.put(key, value)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightstand_core::brightness::AdjustmentZone;
    use nightstand_core::period::Period;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("nightstand-{}-{}.bin", name, std::process::id()))
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = temp_path("reopen");
        let key = SettingKey::new(AdjustmentZone::Brightness, Period::Night);

        let mut store = FileSettingsStore::open(&path);
        assert_eq!(store.path(), path.as_path());
        assert_eq!(store.get(key), None);
        store.put(key, 0.3).unwrap();

        let reopened = FileSettingsStore::open(&path);
        assert_eq!(reopened.get(key), Some(0.3));
        assert!(!reopened.has(SettingKey::new(AdjustmentZone::Brightness, Period::Day)));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, [0xff, 0xff, 0xff]).unwrap();

        let store = FileSettingsStore::open(&path);
        assert!(SettingKey::ALL.iter().all(|key| !store.has(*key)));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unwritable_path_reports_storage_error() {
        let path = temp_path("missing-dir").join("settings.bin");
        let mut store = FileSettingsStore::open(&path);
        let key = SettingKey::new(AdjustmentZone::BackgroundOpacity, Period::Day);

        let err = store.put(key, 0.5).unwrap_err();
        assert!(matches!(err, SettingsError::Storage(_)));
        // The in-memory value is still usable.
        assert_eq!(store.get(key), Some(0.5));
    }
}
