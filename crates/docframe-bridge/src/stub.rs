// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub source for builds without a camera backend.
//
// Every acquisition returns `PlatformUnavailable`.

use docframe_core::error::{DocframeError, Result};
use image::RgbImage;

use crate::traits::FrameSource;

/// No-op source returned when no camera backend is compiled in.
pub struct StubSource;

impl FrameSource for StubSource {
    fn name(&self) -> &str {
        "camera (stub)"
    }

    fn open(&mut self) -> Result<()> {
        tracing::warn!("FrameSource::open called on stub source");
        Err(DocframeError::PlatformUnavailable)
    }

    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        Err(DocframeError::PlatformUnavailable)
    }

    fn close(&mut self) {}

    fn is_open(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_is_unavailable() {
        let mut source = StubSource;
        assert!(matches!(source.open(), Err(DocframeError::PlatformUnavailable)));
        assert!(matches!(source.read_frame(), Err(DocframeError::PlatformUnavailable)));
        assert!(!source.is_open());
        source.close();
    }
}
