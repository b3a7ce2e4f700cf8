use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Playlists at least this long count as a probable feature even without
/// chapters.
pub const MIN_FEATURE_LENGTH_SECS: f64 = 3000.0;

const DEFAULT_LANGUAGE: &str = "en";

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_min_feature_length() -> f64 {
    MIN_FEATURE_LENGTH_SECS
}

/// Settings read from the host configuration. Missing keys take their
/// defaults and unknown keys are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Preferred audio language, as a language name or ISO/Windows code.
    pub audio_language: String,
    /// Preferred subtitle language, as a language name or ISO/Windows code.
    pub subtitle_language: String,
    /// Request a display refresh-rate change once a playlist is chosen.
    pub auto_refresh_rate: bool,
    pub min_feature_length_secs: f64,
    pub scan: ScanOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            audio_language: default_language(),
            subtitle_language: default_language(),
            auto_refresh_rate: false,
            min_feature_length_secs: default_min_feature_length(),
            scan: ScanOptions::default(),
        }
    }
}

/// Decides which scanned playlists are marked valid.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScanOptions {
    pub filter_short: bool,
    pub short_length_secs: f64,
    pub filter_looping: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            filter_short: true,
            short_length_secs: 20.0,
            filter_looping: false,
        }
    }
}

/// Looks for a settings file: the explicit path, then `./bdselect.toml`,
/// then `<config dir>/bdselect/config.toml`.
pub fn find_settings_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_owned());
    }
    let cwd_config = PathBuf::from("bdselect.toml");
    if cwd_config.exists() {
        return Some(cwd_config);
    }
    if let Some(config_dir) = dirs::config_dir() {
        let xdg_config = config_dir.join("bdselect").join("config.toml");
        if xdg_config.exists() {
            return Some(xdg_config);
        }
    }
    None
}

pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}

/// Loads settings from `path` if given, falling back to defaults when the
/// file can't be read.
pub fn load_settings_or_default(path: Option<&Path>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match load_settings(path) {
        Ok(settings) => {
            tracing::debug!("Loaded settings from {}", path.display());
            settings
        }
        Err(e) => {
            tracing::warn!("Using default settings, {}: {}", path.display(), e);
            Settings::default()
        }
    }
}
