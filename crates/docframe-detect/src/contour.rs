// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External contour extraction from a binary mask.
//
// Border following is delegated to `imageproc::contours::find_contours`
// (Suzuki-Abe). The mask is traced inside a one-pixel background border so
// regions touching the frame edge classify the same as interior ones. Only
// outermost outer borders are kept, and runs of points along a straight step
// direction are collapsed to their end points.

use image::GrayImage;
use image::imageops::replace;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;
use tracing::{debug, instrument};

use crate::preprocess::BinaryMask;

/// One closed external boundary, in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point<i32>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Find the external contours of every connected "on" region in `mask`.
///
/// Borders of holes, and of regions nested inside holes, are dropped. The
/// order of the returned contours carries no meaning. Regions that touch
/// the frame edge are found like any other.
#[instrument(level = "trace", skip(mask), fields(width = mask.width(), height = mask.height()))]
pub fn external_contours(mask: &BinaryMask) -> Vec<Contour> {
    let padded = pad_mask(mask);
    let contours: Vec<Contour> = find_contours::<i32>(&padded)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| {
            let points = c
                .points
                .into_iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect();
            Contour::new(compress_chain(points))
        })
        .collect();

    debug!(count = contours.len(), "External contours extracted");
    contours
}

/// Copy `mask` into the centre of a canvas one pixel larger on every side.
///
/// Border following starts its scan at column 0; a region already on that
/// column would otherwise be traced as a hole.
fn pad_mask(mask: &BinaryMask) -> GrayImage {
    let mut padded = GrayImage::new(mask.width() + 2, mask.height() + 2);
    replace(&mut padded, mask, 1, 1);
    padded
}

/// Drop interior points of straight runs from a closed point chain.
///
/// Repeated points (including a closing copy of the first point) are removed
/// first. A point is then kept when the step arriving at it differs from the
/// step leaving it, wrapping around at the ends.
pub fn compress_chain(mut points: Vec<Point<i32>>) -> Vec<Point<i32>> {
    points.dedup();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    let n = points.len();
    if n < 3 {
        return points;
    }

    let step = |from: Point<i32>, to: Point<i32>| (to.x - from.x, to.y - from.y);

    let kept: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();

    // A chain with no direction change cannot be closed; keep it as traced.
    if kept.is_empty() { points } else { kept }
}
