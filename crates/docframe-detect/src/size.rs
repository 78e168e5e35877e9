// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Size matching of candidate boxes against the expected page footprint.

use docframe_core::{BoundingBox, FrameSize, PaperSize, TargetFootprint};

/// Expected document size in pixels for a frame.
///
/// Each side is `round(paper_mm * frame_dimension / reference_units)`: the
/// paper width scales with the frame width and the paper height with the
/// frame height. This is a tuning heuristic, not a DPI conversion, and the
/// arithmetic is kept as-is.
pub fn target_footprint(
    frame: FrameSize,
    paper: PaperSize,
    reference_units: u32,
) -> TargetFootprint {
    let (paper_w_mm, paper_h_mm) = paper.dimensions_mm();
    TargetFootprint {
        width: scale_rounded(paper_w_mm, frame.width, reference_units),
        height: scale_rounded(paper_h_mm, frame.height, reference_units),
    }
}

/// Whether both sides of `bbox` fall inside the inclusive band
/// `[(100 - tolerance_percent)%, (100 + tolerance_percent)%]` of the footprint.
pub fn matches_footprint(
    bbox: &BoundingBox,
    footprint: &TargetFootprint,
    tolerance_percent: u32,
) -> bool {
    within_band(bbox.width, footprint.width, tolerance_percent)
        && within_band(bbox.height, footprint.height, tolerance_percent)
}

fn within_band(actual: u32, expected: u32, tolerance_percent: u32) -> bool {
    // Integer form of `expected * (1 ± p/100)` so the band edges are exact.
    let actual = u64::from(actual) * 100;
    let expected = u64::from(expected);
    let tolerance = u64::from(tolerance_percent);
    actual >= expected * 100u64.saturating_sub(tolerance) && actual <= expected * (100 + tolerance)
}

/// `round(mm * dimension / units)`, halves rounded up.
fn scale_rounded(mm: u32, dimension: u32, units: u32) -> u32 {
    let numerator = u64::from(mm) * u64::from(dimension);
    let units = u64::from(units.max(1));
    ((2 * numerator + units) / (2 * units)) as u32
}
