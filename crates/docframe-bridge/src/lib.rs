// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Docframe — Frame-source abstractions.
//!
//! The detector never talks to a camera. Hosts inject a [`traits::FrameSource`]
//! with an explicit `open`/`close` lifecycle and pull one frame per tick.

pub mod still;
pub mod stub;
pub mod traits;

pub use still::StillSequence;
pub use stub::StubSource;
pub use traits::FrameSource;

/// Returns the default live source for the current platform.
///
/// No camera backend ships yet, so every platform gets the stub, which
/// reports `PlatformUnavailable` on `open`.
pub fn default_source() -> Box<dyn FrameSource> {
    Box::new(StubSource)
}
