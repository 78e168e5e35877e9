// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Docframe: frame geometry, target paper sizes, and the
// per-frame corner-touch record.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height), portrait orientation.
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Tabloid => (279, 432),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

/// Pixel dimensions of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether `(x, y)` lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for FrameSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle in pixel coordinates.
///
/// `width` and `height` count pixels inclusively, so a box spanning columns
/// 10..=19 has `x = 10, width = 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Expected pixel size of the document for one frame resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetFootprint {
    pub width: u32,
    pub height: u32,
}

/// One of the four canonical frame corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All corners in canonical order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];
}

/// Which frame corners a padded document box has reached in the current frame.
///
/// Entries only ever go from `false` to `true`; a fresh record is created for
/// every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerTouch {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl CornerTouch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `corner` was touched.
    pub fn mark(&mut self, corner: Corner) {
        *self.slot(corner) = true;
    }

    pub fn is_touched(&self, corner: Corner) -> bool {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomLeft => self.bottom_left,
            Corner::BottomRight => self.bottom_right,
        }
    }

    /// Logical OR of another record into this one.
    pub fn merge(&mut self, other: &CornerTouch) {
        for corner in Corner::ALL {
            if other.is_touched(corner) {
                self.mark(corner);
            }
        }
    }

    /// True once all four corners are touched (the readiness signal).
    pub fn all(&self) -> bool {
        Corner::ALL.iter().all(|c| self.is_touched(*c))
    }

    pub fn count(&self) -> usize {
        Corner::ALL.iter().filter(|c| self.is_touched(**c)).count()
    }

    /// Entries in canonical order (top-left, top-right, bottom-left, bottom-right).
    pub fn as_array(&self) -> [bool; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    fn slot(&mut self, corner: Corner) -> &mut bool {
        match corner {
            Corner::TopLeft => &mut self.top_left,
            Corner::TopRight => &mut self.top_right,
            Corner::BottomLeft => &mut self.bottom_left,
            Corner::BottomRight => &mut self.bottom_right,
        }
    }
}

/// RGB colour used for the on-frame guide markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideColor(pub [u8; 3]);

impl GuideColor {
    pub const WHITE: GuideColor = GuideColor([255, 255, 255]);
    pub const GREEN: GuideColor = GuideColor([0, 255, 0]);
}

/// Metadata for a still image written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub captured_at: DateTime<Utc>,
}
