// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Frame analyzer — composes preprocessing, contour extraction, quadrilateral
// filtering, size matching, corner-touch evaluation and the guide overlay
// into one call per frame.

use docframe_core::error::{DocframeError, Result};
use docframe_core::{BoundingBox, CornerTouch, DetectorConfig, FrameSize, TargetFootprint};
use image::RgbImage;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::contour::external_contours;
use crate::corners::accumulate_touch;
use crate::overlay::{draw_guides, guide_color};
use crate::polygon::quadrilateral_bounds;
use crate::preprocess::{BinaryMask, binarize};
use crate::size::{matches_footprint, target_footprint};

/// Outcome of analyzing one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameAnalysis {
    /// Which frame corners a matched document box reached.
    pub touch: CornerTouch,
    /// All four corners touched: the document fills the view.
    pub ready: bool,
    /// External contours found in the mask.
    pub contours: usize,
    /// Contours that approximated to four vertices.
    pub quadrilaterals: usize,
    /// Quadrilateral bounds that passed the size check.
    pub matches: Vec<BoundingBox>,
    /// Expected document size for this frame.
    pub footprint: TargetFootprint,
}

/// Stateless per-frame document framing detector.
///
/// Holds only configuration; every call starts from a fresh corner-touch
/// record, so results never depend on earlier frames.
///
/// ```ignore
/// let analyzer = FrameAnalyzer::new(DetectorConfig::default())?;
/// let analysis = analyzer.analyze(&mut frame);
/// if analysis.ready {
///     // markers are now green
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameAnalyzer {
    config: DetectorConfig,
}

impl FrameAnalyzer {
    // -- Construction ---------------------------------------------------------

    /// Create an analyzer after validating `config`.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    // -- Accessors ------------------------------------------------------------

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    // -- Analysis -------------------------------------------------------------

    /// Detect the document in `frame` and draw the guide markers onto it.
    #[instrument(level = "debug", skip_all, fields(width = frame.width(), height = frame.height()))]
    pub fn analyze(&self, frame: &mut RgbImage) -> FrameAnalysis {
        let analysis = self.evaluate(frame);
        self.render(frame, analysis.ready);
        analysis
    }

    /// Like [`analyze`](Self::analyze), but rejects frames with no pixels.
    pub fn try_analyze(&self, frame: &mut RgbImage) -> Result<FrameAnalysis> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Err(DocframeError::EmptyFrame { width, height });
        }
        Ok(self.analyze(frame))
    }

    /// Detect the document without touching the frame.
    pub fn evaluate(&self, frame: &RgbImage) -> FrameAnalysis {
        let size = FrameSize::new(frame.width(), frame.height());
        if size.is_empty() {
            return self.empty_analysis(size);
        }
        let mask = binarize(frame, self.config.threshold);
        self.evaluate_mask(&mask)
    }

    /// Run detection on an already binarized mask.
    pub fn evaluate_mask(&self, mask: &BinaryMask) -> FrameAnalysis {
        let size = FrameSize::new(mask.width(), mask.height());
        if size.is_empty() {
            return self.empty_analysis(size);
        }

        let footprint = target_footprint(size, self.config.paper_size, self.config.reference_units);
        let contours = external_contours(mask);

        let mut touch = CornerTouch::new();
        let mut quadrilaterals = 0;
        let mut matches = Vec::new();

        for contour in &contours {
            let Some(bbox) = quadrilateral_bounds(contour, self.config.epsilon_ratio) else {
                continue;
            };
            quadrilaterals += 1;

            if !matches_footprint(&bbox, &footprint, self.config.tolerance_percent) {
                trace!(?bbox, ?footprint, "Quadrilateral outside size band");
                continue;
            }

            accumulate_touch(&mut touch, &bbox, self.config.buffer_space, size);
            matches.push(bbox);
        }

        let ready = touch.all();
        debug!(
            contours = contours.len(),
            quadrilaterals,
            matched = matches.len(),
            touched = touch.count(),
            ready,
            "Frame evaluated"
        );

        FrameAnalysis {
            touch,
            ready,
            contours: contours.len(),
            quadrilaterals,
            matches,
            footprint,
        }
    }

    /// Draw the guide markers in the colour for `ready`.
    pub fn render(&self, frame: &mut RgbImage, ready: bool) {
        let color = guide_color(ready, &self.config.overlay);
        draw_guides(frame, color, &self.config.overlay);
    }

    fn empty_analysis(&self, size: FrameSize) -> FrameAnalysis {
        FrameAnalysis {
            touch: CornerTouch::new(),
            ready: false,
            contours: 0,
            quadrilaterals: 0,
            matches: Vec::new(),
            footprint: target_footprint(size, self.config.paper_size, self.config.reference_units),
        }
    }
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use docframe_core::{Corner, GuideColor};
    use image::{GrayImage, Luma, Rgb};
    use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut};
    use imageproc::point::Point;
    use imageproc::rect::Rect;

    const BACKGROUND: Rgb<u8> = Rgb([20, 20, 20]);
    const PAPER: Rgb<u8> = Rgb([235, 235, 235]);

    /// 1000x1000 dark frame with bright rectangles at the given positions.
    fn frame_with(rects: &[(i32, i32, u32, u32)]) -> RgbImage {
        let mut frame = RgbImage::from_pixel(1000, 1000, BACKGROUND);
        for &(x, y, w, h) in rects {
            draw_filled_rect_mut(&mut frame, Rect::at(x, y).of_size(w, h), PAPER);
        }
        frame
    }

    fn analyzer() -> FrameAnalyzer {
        FrameAnalyzer::default()
    }

    #[test]
    fn blank_frame_is_not_ready() {
        let mut frame = frame_with(&[]);
        let analysis = analyzer().analyze(&mut frame);

        assert_eq!(analysis.contours, 0);
        assert_eq!(analysis.touch.as_array(), [false; 4]);
        assert!(!analysis.ready);
        assert_eq!(frame.get_pixel(50, 50).0, GuideColor::WHITE.0);
    }

    #[test]
    fn page_sized_document_is_ready() {
        let mut frame = frame_with(&[(100, 100, 210, 297)]);
        let analysis = analyzer().analyze(&mut frame);

        assert_eq!(analysis.footprint, TargetFootprint { width: 210, height: 297 });
        assert_eq!(analysis.matches, vec![BoundingBox::new(100, 100, 210, 297)]);
        assert!(analysis.touch.all());
        assert!(analysis.ready);
        assert_eq!(frame.get_pixel(50, 50).0, GuideColor::GREEN.0);
        assert_eq!(frame.get_pixel(950, 950).0, GuideColor::GREEN.0);
    }

    #[test]
    fn undersized_document_is_not_ready() {
        let mut frame = frame_with(&[(100, 100, 150, 200)]);
        let analysis = analyzer().analyze(&mut frame);

        assert_eq!(analysis.quadrilaterals, 1);
        assert!(analysis.matches.is_empty());
        assert!(!analysis.ready);
        assert_eq!(frame.get_pixel(50, 50).0, GuideColor::WHITE.0);
    }

    #[test]
    fn pentagon_is_skipped() {
        let mut mask = GrayImage::new(1000, 1000);
        let pentagon: Vec<Point<i32>> = [(500, 300), (650, 420), (600, 600), (400, 600), (350, 420)]
            .iter()
            .map(|&(x, y)| Point::new(x, y))
            .collect();
        draw_polygon_mut(&mut mask, &pentagon, Luma([255]));

        let analysis = analyzer().evaluate_mask(&mask);
        assert_eq!(analysis.contours, 1);
        assert_eq!(analysis.quadrilaterals, 0);
        assert!(!analysis.ready);
    }

    #[test]
    fn corners_accumulate_across_documents() {
        // Near the right edge: only the left-hand padded corners stay inside.
        // Near the left edge: only the right-hand padded corners stay inside.
        let frame = frame_with(&[(780, 100, 210, 297), (5, 500, 210, 297)]);
        let analysis = analyzer().evaluate(&frame);

        assert_eq!(analysis.matches.len(), 2);
        assert!(analysis.touch.is_touched(Corner::TopLeft));
        assert!(analysis.touch.is_touched(Corner::BottomLeft));
        assert!(analysis.touch.is_touched(Corner::TopRight));
        assert!(analysis.touch.is_touched(Corner::BottomRight));
        assert!(analysis.ready);
    }

    #[test]
    fn document_on_left_edge_still_contributes_corners() {
        let frame = frame_with(&[(780, 100, 210, 297), (0, 500, 210, 297)]);
        let analysis = analyzer().evaluate(&frame);

        assert_eq!(analysis.contours, 2);
        assert_eq!(analysis.matches.len(), 2);
        assert_eq!(analysis.touch.as_array(), [true, true, true, true]);
        assert!(analysis.ready);
    }

    #[test]
    fn each_half_alone_is_not_ready() {
        let right = analyzer().evaluate(&frame_with(&[(780, 100, 210, 297)]));
        assert_eq!(right.touch.as_array(), [true, false, true, false]);
        assert!(!right.ready);

        let left = analyzer().evaluate(&frame_with(&[(5, 500, 210, 297)]));
        assert_eq!(left.touch.as_array(), [false, true, false, true]);
        assert!(!left.ready);
    }

    #[test]
    fn repeated_analysis_is_identical() {
        let frame = frame_with(&[(100, 100, 210, 297), (600, 50, 80, 80)]);
        let a = analyzer().analyze(&mut frame.clone());
        let b = analyzer().analyze(&mut frame.clone());
        assert_eq!(a, b);
    }

    #[test]
    fn no_state_carries_between_frames() {
        let analyzer = analyzer();
        assert!(analyzer.evaluate(&frame_with(&[(100, 100, 210, 297)])).ready);
        let next = analyzer.evaluate(&frame_with(&[]));
        assert_eq!(next.touch, CornerTouch::new());
        assert!(!next.ready);
    }

    #[test]
    fn evaluate_leaves_frame_untouched() {
        let frame = frame_with(&[(100, 100, 210, 297)]);
        let before = frame.clone();
        let _ = analyzer().evaluate(&frame);
        assert_eq!(frame, before);
    }

    #[test]
    fn empty_frame_rejected_by_try_analyze() {
        let mut frame = RgbImage::new(0, 0);
        assert!(matches!(
            analyzer().try_analyze(&mut frame),
            Err(DocframeError::EmptyFrame { width: 0, height: 0 })
        ));
        assert!(!analyzer().analyze(&mut frame).ready);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = DetectorConfig {
            tolerance_percent: 150,
            ..Default::default()
        };
        assert!(FrameAnalyzer::new(config).is_err());
    }
}
