// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner-touch evaluation for matched document boxes.

use docframe_core::{BoundingBox, Corner, CornerTouch, FrameSize};

/// The four corners of `bbox` pushed outward diagonally by `buffer` pixels.
pub fn padded_corners(bbox: &BoundingBox, buffer: i64) -> [(Corner, i64, i64); 4] {
    let left = i64::from(bbox.x) - buffer;
    let top = i64::from(bbox.y) - buffer;
    let right = i64::from(bbox.x) + i64::from(bbox.width) + buffer;
    let bottom = i64::from(bbox.y) + i64::from(bbox.height) + buffer;

    [
        (Corner::TopLeft, left, top),
        (Corner::TopRight, right, top),
        (Corner::BottomLeft, left, bottom),
        (Corner::BottomRight, right, bottom),
    ]
}

/// Mark every padded corner of `bbox` that lands inside the frame.
///
/// Entries already set are never cleared, so calling this for each matched
/// box in a frame ORs their contributions together.
pub fn accumulate_touch(touch: &mut CornerTouch, bbox: &BoundingBox, buffer: i64, frame: FrameSize) {
    for (corner, x, y) in padded_corners(bbox, buffer) {
        if frame.contains(x, y) {
            touch.mark(corner);
        }
    }
}
