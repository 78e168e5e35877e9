// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Where docframe keeps its settings.

use std::path::PathBuf;

use tracing::warn;

const APP_DIR: &str = "docframe";

/// Settings directory, created on first use.
///
/// `DOCFRAME_DATA_DIR` wins outright; otherwise the XDG data home is used.
pub fn data_dir() -> PathBuf {
    let dir = match non_empty_var("DOCFRAME_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => resolve(non_empty_var("XDG_DATA_HOME"), non_empty_var("HOME")),
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!(path = %dir.display(), error = %e, "cannot create data directory");
    }
    dir
}

/// `$XDG_DATA_HOME/docframe`, then `$HOME/.local/share/docframe`, then the
/// system temp directory.
fn resolve(xdg_data_home: Option<String>, home: Option<String>) -> PathBuf {
    let base = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home.map(|h| PathBuf::from(h).join(".local/share")))
        .unwrap_or_else(std::env::temp_dir);
    base.join(APP_DIR)
}

// Unset and empty are treated alike.
fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
