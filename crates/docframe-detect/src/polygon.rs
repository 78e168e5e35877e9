// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral filtering — closed-curve polygon approximation
// (Douglas-Peucker) and axis-aligned bounds of four-vertex candidates.

use docframe_core::BoundingBox;
use imageproc::point::Point;
use tracing::trace;

use crate::contour::Contour;

/// Approximate a contour and return the bounds of its polygon if it has
/// exactly four vertices.
///
/// The approximation tolerance is `epsilon_ratio` times the contour's closed
/// perimeter, so it scales with how large the document appears. Vertex count
/// is the only test: angles and convexity are not checked.
///
/// Contours with fewer than three points, and candidates whose bounds
/// collapse to a line, are skipped.
pub fn quadrilateral_bounds(contour: &Contour, epsilon_ratio: f64) -> Option<BoundingBox> {
    if contour.len() < 3 {
        trace!(points = contour.len(), "Degenerate contour skipped");
        return None;
    }

    let perimeter = closed_perimeter(contour.points());
    if perimeter <= 0.0 {
        return None;
    }

    let polygon = approximate_closed(contour.points(), epsilon_ratio * perimeter);
    if polygon.len() != 4 {
        trace!(vertices = polygon.len(), "Not a quadrilateral");
        return None;
    }

    bounding_box(&polygon)
}

/// Length of a closed polyline, including the segment from the last point
/// back to the first.
pub fn closed_perimeter(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| distance(points[i], points[(i + 1) % n]))
        .sum()
}

/// Douglas-Peucker approximation of a closed curve.
///
/// The curve is split at a pair of mutually distant points into two open
/// chains, each chain is simplified independently, and the two halves are
/// joined. The result lists every kept vertex once.
pub fn approximate_closed(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let start = farthest_from(points, 0);
    let end = farthest_from(points, start);
    if start == end {
        // Every point coincides.
        return vec![points[start]];
    }

    let forward = chain_between(points, start, end);
    let backward = chain_between(points, end, start);

    let mut polygon = simplify_open(&forward, epsilon);
    polygon.extend(simplify_open(&backward, epsilon));
    polygon
}

/// Axis-aligned bounds of a point set, counting pixels inclusively.
///
/// Returns `None` when the points span zero width or zero height.
pub fn bounding_box(points: &[Point<i32>]) -> Option<BoundingBox> {
    let first = points.first()?;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    if min_x == max_x || min_y == max_y {
        trace!("Zero-area bounds skipped");
        return None;
    }

    Some(BoundingBox::new(
        min_x,
        min_y,
        (max_x - min_x + 1) as u32,
        (max_y - min_y + 1) as u32,
    ))
}

// -- Douglas-Peucker helpers --------------------------------------------------

/// Simplify an open chain, returning the kept points without the final one.
///
/// Uses an explicit work stack so long contours cannot exhaust the call stack.
fn simplify_open(chain: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    let Some(last) = chain.len().checked_sub(1) else {
        return Vec::new();
    };

    let mut keep = vec![false; chain.len()];
    keep[0] = true;

    let mut stack = vec![(0usize, last)];
    while let Some((first, end)) = stack.pop() {
        if end <= first + 1 {
            continue;
        }

        let (index, dist) = (first + 1..end)
            .map(|i| (i, segment_distance(chain[i], chain[first], chain[end])))
            .fold((first, 0.0f64), |best, cur| if cur.1 > best.1 { cur } else { best });

        if dist > epsilon {
            keep[index] = true;
            stack.push((first, index));
            stack.push((index, end));
        }
    }

    chain[..last]
        .iter()
        .zip(&keep)
        .filter(|(_, kept)| **kept)
        .map(|(p, _)| *p)
        .collect()
}

/// Points from index `from` to index `to` inclusive, wrapping past the end.
fn chain_between(points: &[Point<i32>], from: usize, to: usize) -> Vec<Point<i32>> {
    let n = points.len();
    let len = (to + n - from) % n + 1;
    (0..len).map(|k| points[(from + k) % n]).collect()
}

fn farthest_from(points: &[Point<i32>], origin: usize) -> usize {
    let o = points[origin];
    let mut best = origin;
    let mut best_dist = 0i64;
    for (i, p) in points.iter().enumerate() {
        let dx = i64::from(p.x - o.x);
        let dy = i64::from(p.y - o.y);
        let d = dx * dx + dy * dy;
        if d > best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

/// Perpendicular distance from `p` to the line through `a` and `b`, or the
/// point distance when `a` and `b` coincide.
fn segment_distance(p: Point<i32>, a: Point<i32>, b: Point<i32>) -> f64 {
    let (ax, ay) = (f64::from(a.x), f64::from(a.y));
    let (bx, by) = (f64::from(b.x), f64::from(b.y));
    let (px, py) = (f64::from(p.x), f64::from(p.y));

    let dx = bx - ax;
    let dy = by - ay;
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    ((px - ax) * dy - (py - ay) * dx).abs() / length
}

fn distance(a: Point<i32>, b: Point<i32>) -> f64 {
    let dx = f64::from(b.x - a.x);
    let dy = f64::from(b.y - a.y);
    (dx * dx + dy * dy).sqrt()
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::external_contours;
    use image::{GrayImage, Luma};
    use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut};
    use imageproc::rect::Rect;

    fn pts(coords: &[(i32, i32)]) -> Vec<Point<i32>> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn perimeter_of_square() {
        let square = pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
        assert!((closed_perimeter(&square) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn noisy_rectangle_reduces_to_four_vertices() {
        // Long edges with single-pixel wobble.
        let outline = pts(&[
            (0, 0),
            (50, 1),
            (100, 0),
            (101, 60),
            (100, 120),
            (50, 119),
            (0, 120),
            (1, 60),
        ]);
        let epsilon = 0.02 * closed_perimeter(&outline);
        let polygon = approximate_closed(&outline, epsilon);
        assert_eq!(polygon.len(), 4, "got {polygon:?}");
    }

    #[test]
    fn small_detour_dropped_at_larger_tolerance() {
        // (20, 5) sits about 14 px off the chord from (40, 0) to (20, 30).
        let outline = pts(&[(0, 0), (40, 0), (20, 5), (20, 30)]);
        assert_eq!(approximate_closed(&outline, 1.0).len(), 4);
        assert_eq!(approximate_closed(&outline, 15.0).len(), 3);
    }

    #[test]
    fn bounds_count_pixels_inclusively() {
        let quad = pts(&[(10, 20), (29, 20), (29, 49), (10, 49)]);
        assert_eq!(bounding_box(&quad), Some(BoundingBox::new(10, 20, 20, 30)));
    }

    #[test]
    fn flat_bounds_are_rejected() {
        let line = pts(&[(0, 5), (10, 5), (20, 5), (30, 5)]);
        assert_eq!(bounding_box(&line), None);
    }

    #[test]
    fn short_contour_is_skipped() {
        let contour = Contour::new(pts(&[(3, 3), (4, 3)]));
        assert_eq!(quadrilateral_bounds(&contour, 0.02), None);
    }

    #[test]
    fn filled_rectangle_is_accepted() {
        let mut mask = GrayImage::new(200, 200);
        draw_filled_rect_mut(&mut mask, Rect::at(20, 30).of_size(100, 140), Luma([255]));

        let contours = external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(
            quadrilateral_bounds(&contours[0], 0.02),
            Some(BoundingBox::new(20, 30, 100, 140))
        );
    }

    #[test]
    fn filled_pentagon_is_rejected() {
        let mut mask = GrayImage::new(400, 400);
        let pentagon = pts(&[(200, 20), (371, 144), (306, 346), (94, 346), (29, 144)]);
        draw_polygon_mut(&mut mask, &pentagon, Luma([255]));

        let contours = external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(quadrilateral_bounds(&contours[0], 0.02), None);
    }
}
