// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Persisted application settings (JSON in the data directory).

use std::path::Path;

use docframe_core::AppConfig;
use docframe_core::error::Result;
use tracing::{info, warn};

const CONFIG_FILE: &str = "config.json";

/// Load the persisted config, writing the defaults on first run.
///
/// An unreadable or malformed file is reported and replaced by defaults for
/// this run (the file itself is left alone).
pub fn load_or_init(data_dir: &Path) -> AppConfig {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        let config = AppConfig::default();
        match persist_config(data_dir, &config) {
            Ok(()) => info!(path = %path.display(), "default config written"),
            Err(e) => warn!(error = %e, "could not write default config"),
        }
        return config;
    }

    match load_config(data_dir) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config unreadable; using defaults");
            AppConfig::default()
        }
    }
}

pub fn load_config(data_dir: &Path) -> Result<AppConfig> {
    let data = std::fs::read_to_string(data_dir.join(CONFIG_FILE))?;
    Ok(serde_json::from_str(&data)?)
}

pub fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(data_dir.join(CONFIG_FILE), json)?;
    Ok(())
}
