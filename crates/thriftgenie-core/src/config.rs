// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration and data directory resolution.
//
// Only caller-side defaults live here. Encoder quality, PNG compression and
// the lighting thresholds are engine constants.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{BackgroundType, EnhancementOptions};

/// File name of the persisted configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "THRIFTGENIE_DATA_DIR";

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Options used when the caller does not specify any.
    pub default_options: EnhancementOptions,
    /// Maximum width for web-optimised output.
    pub web_max_width: u32,
    /// Run web optimisation after the enhancement pipeline.
    pub optimize_for_web: bool,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_options: EnhancementOptions {
                remove_background: false,
                correct_lighting: true,
                background_type: BackgroundType::White,
            },
            web_max_width: 1200,
            optimize_for_web: true,
            log_filter: "info".into(),
        }
    }
}

impl AppConfig {
    /// Load `config.json` from `data_dir`.
    ///
    /// Returns `None` when the file is missing or cannot be parsed; callers
    /// fall back to [`AppConfig::default`].
    pub fn load(data_dir: &Path) -> Option<Self> {
        let path = data_dir.join(CONFIG_FILE);
        let raw = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(config) => {
                debug!(path = %path.display(), "configuration loaded");
                Some(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed configuration");
                None
            }
        }
    }

    /// Write this configuration to `config.json` in `data_dir`.
    pub fn save(&self, data_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(data_dir)?;
        let path = data_dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}

/// Return the application data directory.
///
/// Resolution order: `THRIFTGENIE_DATA_DIR`, `XDG_DATA_HOME/thriftgenie`,
/// `$HOME/.local/share/thriftgenie`, then the system temp directory.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs_fallback().join("thriftgenie")
}

fn dirs_fallback() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    std::env::temp_dir()
}
