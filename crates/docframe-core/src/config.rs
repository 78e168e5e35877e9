// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detector and application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DocframeError, Result};
use crate::types::{GuideColor, PaperSize};

/// Tuning constants for the per-frame document detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Global luminance threshold; pixels at or above it are "on".
    pub threshold: u8,
    /// Polygon approximation tolerance as a fraction of contour perimeter.
    pub epsilon_ratio: f64,
    /// Physical page the operator is framing.
    pub paper_size: PaperSize,
    /// Divisor of the `mm * frame_dimension / reference_units` footprint heuristic.
    pub reference_units: u32,
    /// Half-width of the accepted size band, in percent of the footprint.
    pub tolerance_percent: u32,
    /// Outward padding applied to a matched box before the corner test.
    pub buffer_space: i64,
    /// Guide marker appearance.
    pub overlay: OverlayConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: 120,
            epsilon_ratio: 0.02,
            paper_size: PaperSize::A4,
            reference_units: 1000,
            tolerance_percent: 10,
            buffer_space: 20,
            overlay: OverlayConfig::default(),
        }
    }
}

impl DetectorConfig {
    /// Reject values the detector cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon_ratio > 0.0 && self.epsilon_ratio < 1.0) {
            return Err(DocframeError::Config(format!(
                "epsilon_ratio must be in (0, 1), got {}",
                self.epsilon_ratio
            )));
        }
        if self.reference_units == 0 {
            return Err(DocframeError::Config(
                "reference_units must be non-zero".into(),
            ));
        }
        if self.tolerance_percent >= 100 {
            return Err(DocframeError::Config(format!(
                "tolerance_percent must be below 100, got {}",
                self.tolerance_percent
            )));
        }
        if self.overlay.thickness == 0 {
            return Err(DocframeError::Config(
                "overlay thickness must be at least 1 pixel".into(),
            ));
        }
        Ok(())
    }
}

/// Fixed "L" corner markers drawn over every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Distance of each marker's anchor from its frame corner, on both axes.
    pub inset: u32,
    /// Length of each marker arm.
    pub arm_length: u32,
    /// Stroke width of each arm.
    pub thickness: u32,
    /// Colour while the document is not yet framed.
    pub idle_color: GuideColor,
    /// Colour once all four corners are touched.
    pub ready_color: GuideColor,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            inset: 50,
            arm_length: 20,
            thickness: 2,
            idle_color: GuideColor::WHITE,
            ready_color: GuideColor::GREEN,
        }
    }
}

/// Persistent settings for the host application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Detector tuning.
    pub detector: DetectorConfig,
    /// Analyze calls per second.
    pub frame_rate: u32,
    /// File name the captured still is written to.
    pub capture_file: String,
    /// Capture automatically on the first ready frame.
    pub auto_capture: bool,
    /// Directory of still images used as the frame source.
    pub frame_dir: Option<PathBuf>,
    /// Restart the still-image sequence after its last frame.
    pub loop_frames: bool,
    /// When set, annotated frames are written here.
    pub preview_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            frame_rate: 30,
            capture_file: "captured_image.png".into(),
            auto_capture: true,
            frame_dir: None,
            loop_frames: false,
            preview_dir: None,
        }
    }
}

impl AppConfig {
    /// Highest accepted `frame_rate`; the tick period is whole milliseconds.
    pub const MAX_FRAME_RATE: u32 = 1000;

    /// Reject values the host loop or the detector cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(1..=Self::MAX_FRAME_RATE).contains(&self.frame_rate) {
            return Err(DocframeError::Config(format!(
                "frame_rate must be in 1..={}, got {}",
                Self::MAX_FRAME_RATE,
                self.frame_rate
            )));
        }
        if self.capture_file.is_empty() {
            return Err(DocframeError::Config("capture_file must not be empty".into()));
        }
        self.detector.validate()
    }
}
