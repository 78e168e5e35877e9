// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docframe-detect — Per-frame document framing detection.
//
// Each analyze call thresholds the frame, extracts external contours, keeps
// the ones that approximate to a quadrilateral of the expected page size,
// checks whether their padded corners reach the frame corners, and draws the
// guide markers in the resulting colour. Nothing is carried between frames.

pub mod analyzer;
pub mod capture;
pub mod contour;
pub mod corners;
pub mod overlay;
pub mod polygon;
pub mod preprocess;
pub mod size;

// Re-export the primary entry points so callers can use `docframe_detect::FrameAnalyzer` etc.
pub use analyzer::{FrameAnalysis, FrameAnalyzer};
pub use capture::{encode_png, save_capture};
pub use contour::Contour;
