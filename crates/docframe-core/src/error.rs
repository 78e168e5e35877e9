// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Docframe.

use thiserror::Error;

/// Top-level error type for all Docframe operations.
///
/// The per-frame detection path never produces these: degenerate contours
/// and frames without a matching document are normal outcomes. Errors only
/// arise at the edges (frame acquisition, capture encoding, configuration).
#[derive(Debug, Error)]
pub enum DocframeError {
    // -- Frame errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("frame has no pixels ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },

    // -- Frame source --
    #[error("frame source error: {0}")]
    FrameSource(String),

    #[error("frame source is closed")]
    SourceClosed,

    #[error("camera backend not available on this platform")]
    PlatformUnavailable,

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocframeError>;
