//! Player preferences
//!
//! Persisted as JSON in LocalStorage, separate from gameplay tuning.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw burst particles
    pub particles: bool,
    /// Reduced motion (suppresses the glitch jitter)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective glitch jitter (respects reduced_motion)
    pub fn effective_jitter(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings from persistent storage
    pub fn load() -> Self {
        Self::load_from(storage::read(STORAGE_KEY))
    }

    /// Settings from a stored JSON blob; missing or malformed blobs give the
    /// defaults
    pub fn load_from(stored: Option<String>) -> Self {
        let Some(json) = stored else {
            log::info!("Using default settings");
            return Self::default();
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Persist settings
    pub fn save(&self) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage::write(STORAGE_KEY, &json) {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::error!("Cannot serialize settings: {}", e),
        }
    }
}

const STORAGE_KEY: &str = "node_burst_settings";

/// LocalStorage access; the native build has no persistent store
#[cfg(target_arch = "wasm32")]
mod storage {
    fn local() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub fn read(key: &str) -> Option<String> {
        local()?.get_item(key).ok().flatten()
    }

    pub fn write(key: &str, value: &str) -> bool {
        local().is_some_and(|s| s.set_item(key, value).is_ok())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod storage {
    pub fn read(_key: &str) -> Option<String> {
        None
    }

    pub fn write(_key: &str, _value: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_jitter() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_jitter());
        assert!(Settings::default().effective_jitter());
    }

    #[test]
    fn test_load_falls_back_on_missing_or_malformed() {
        assert_eq!(Settings::load_from(None), Settings::default());
        assert_eq!(Settings::load_from(Some("[1, 2".to_string())), Settings::default());

        let loaded = Settings::load_from(Some(r#"{ "particles": false }"#.to_string()));
        assert!(!loaded.particles);
        assert!(!loaded.reduced_motion);
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_native_build_has_no_store() {
        Settings {
            particles: false,
            ..Default::default()
        }
        .save();
        assert_eq!(Settings::load(), Settings::default());
    }
}
