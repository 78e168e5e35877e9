// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the per-frame detector in the docframe-detect crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use docframe_detect::FrameAnalyzer;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// One full analyze call on a 640x480 frame holding a page-sized bright
/// rectangle, roughly what a webcam delivers every 33 ms.
fn bench_analyze_vga(c: &mut Criterion) {
    let mut frame = RgbImage::from_pixel(640, 480, Rgb([25, 25, 25]));
    // Footprint at 640x480 is 134x143.
    draw_filled_rect_mut(&mut frame, Rect::at(250, 160).of_size(134, 143), Rgb([230, 230, 230]));

    let analyzer = FrameAnalyzer::default();

    c.bench_function("analyze (640x480)", |b| {
        b.iter(|| {
            let mut working = black_box(frame.clone());
            black_box(analyzer.analyze(&mut working));
        });
    });
}

criterion_group!(benches, bench_analyze_vga);
criterion_main!(benches);
