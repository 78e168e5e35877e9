// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Guide overlay — fixed "L" corner markers whose colour reports readiness.

use docframe_core::{Corner, FrameSize, GuideColor, OverlayConfig};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

/// A straight stroke between two points, in frame coordinates.
pub type Segment = ((f32, f32), (f32, f32));

/// Pick the marker colour for the current readiness state.
pub fn guide_color(ready: bool, config: &OverlayConfig) -> GuideColor {
    if ready {
        config.ready_color
    } else {
        config.idle_color
    }
}

/// Anchor point of the marker for `corner`, `inset` pixels in from the
/// matching frame corner on both axes.
pub fn marker_anchor(corner: Corner, frame: FrameSize, inset: u32) -> (i64, i64) {
    let inset = i64::from(inset);
    let right = i64::from(frame.width) - inset;
    let bottom = i64::from(frame.height) - inset;
    match corner {
        Corner::TopLeft => (inset, inset),
        Corner::TopRight => (right, inset),
        Corner::BottomLeft => (inset, bottom),
        Corner::BottomRight => (right, bottom),
    }
}

/// Every stroke making up the four markers.
///
/// Each marker has a horizontal and a vertical arm leaving its anchor toward
/// the frame centre. Strokes thicker than one pixel are built from parallel
/// one-pixel lines offset toward the centre.
pub fn marker_segments(frame: FrameSize, config: &OverlayConfig) -> Vec<Segment> {
    let arm = config.arm_length as f32;
    let mut segments = Vec::with_capacity(8 * config.thickness as usize);

    for corner in Corner::ALL {
        let (ax, ay) = marker_anchor(corner, frame, config.inset);
        let (ax, ay) = (ax as f32, ay as f32);
        let (dx, dy) = inward(corner);

        for offset in 0..config.thickness {
            let o = offset as f32;
            // Horizontal arm, shifted vertically.
            let y = ay + dy * o;
            segments.push(((ax, y), (ax + dx * arm, y)));
            // Vertical arm, shifted horizontally.
            let x = ax + dx * o;
            segments.push(((x, ay), (x, ay + dy * arm)));
        }
    }

    segments
}

/// Draw the four corner markers onto `frame` in `color`.
///
/// Marker positions depend only on the frame size, never on what was
/// detected. Strokes falling outside the frame are clipped.
pub fn draw_guides(frame: &mut RgbImage, color: GuideColor, config: &OverlayConfig) {
    let size = FrameSize::new(frame.width(), frame.height());
    let pixel = Rgb(color.0);
    for (start, end) in marker_segments(size, config) {
        draw_line_segment_mut(frame, start, end, pixel);
    }
}

/// Unit direction from a corner toward the frame centre.
fn inward(corner: Corner) -> (f32, f32) {
    match corner {
        Corner::TopLeft => (1.0, 1.0),
        Corner::TopRight => (-1.0, 1.0),
        Corner::BottomLeft => (1.0, -1.0),
        Corner::BottomRight => (-1.0, -1.0),
    }
}
