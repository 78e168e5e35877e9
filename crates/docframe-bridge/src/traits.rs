// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definition for frame acquisition.

use docframe_core::error::Result;
use image::RgbImage;

/// A source of raw colour frames.
///
/// Sources start closed. `open` acquires the underlying device or sequence
/// and `close` releases it; both are idempotent.
pub trait FrameSource {
    /// Human-readable name (e.g. "still:/path/to/frames").
    fn name(&self) -> &str;

    /// Acquire the device or sequence.
    fn open(&mut self) -> Result<()>;

    /// Fetch the next frame.
    ///
    /// `Ok(None)` means no frame this tick (or a finite sequence ran out);
    /// the caller skips analysis. Reading a closed source returns
    /// `DocframeError::SourceClosed`.
    fn read_frame(&mut self) -> Result<Option<RgbImage>>;

    /// Release the device or sequence.
    fn close(&mut self);

    fn is_open(&self) -> bool;

    /// True once a finite source has nothing more to deliver.
    fn is_finished(&self) -> bool {
        false
    }
}
