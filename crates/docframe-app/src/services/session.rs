// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture session — pulls frames from the injected source, runs the detector
// once per tick, and persists the most recent raw frame on request.
//
// The session keeps the latest raw frame and the previous readiness flag for
// logging; the detector itself is stateless.

use std::path::{Path, PathBuf};

use docframe_bridge::FrameSource;
use docframe_core::CaptureRecord;
use docframe_core::error::{DocframeError, Result};
use docframe_detect::{FrameAnalysis, FrameAnalyzer, save_capture};
use image::RgbImage;
use tracing::{debug, info, warn};

/// What one tick produced.
#[derive(Debug)]
pub enum TickOutcome {
    /// A frame was acquired and analyzed.
    Analyzed(FrameAnalysis),
    /// The source had no frame this tick; nothing was analyzed.
    NoFrame,
}

pub struct CaptureSession {
    source: Box<dyn FrameSource>,
    analyzer: FrameAnalyzer,
    capture_path: PathBuf,
    preview_dir: Option<PathBuf>,
    latest_raw: Option<RgbImage>,
    was_ready: bool,
    frames_analyzed: u64,
}

impl CaptureSession {
    pub fn new(
        source: Box<dyn FrameSource>,
        analyzer: FrameAnalyzer,
        capture_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            analyzer,
            capture_path: capture_path.into(),
            preview_dir: None,
            latest_raw: None,
            was_ready: false,
            frames_analyzed: 0,
        }
    }

    /// Write every annotated frame into `dir`.
    pub fn with_preview_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.preview_dir = Some(dir.into());
        self
    }

    // -- Lifecycle ------------------------------------------------------------

    /// Open the frame source.
    pub fn start(&mut self) -> Result<()> {
        info!(source = self.source.name(), "starting capture session");
        self.source.open()
    }

    /// Close the frame source. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.source.is_open() {
            info!(frames = self.frames_analyzed, "capture session stopped");
        }
        self.source.close();
    }

    pub fn is_finished(&self) -> bool {
        self.source.is_finished()
    }

    // -- Per-tick work --------------------------------------------------------

    /// Acquire one frame and analyze it.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let Some(raw) = self.source.read_frame()? else {
            debug!("no frame this tick");
            return Ok(TickOutcome::NoFrame);
        };

        let mut annotated = raw.clone();
        let analysis = self.analyzer.analyze(&mut annotated);
        self.frames_analyzed += 1;

        if analysis.ready != self.was_ready {
            info!(
                ready = analysis.ready,
                frame = self.frames_analyzed,
                "document framing changed"
            );
            self.was_ready = analysis.ready;
        }

        if let Some(dir) = &self.preview_dir {
            let path = dir.join(format!("frame_{:06}.png", self.frames_analyzed));
            if let Err(e) = save_capture(&annotated, &path) {
                warn!(error = %e, "preview frame not written");
            }
        }

        self.latest_raw = Some(raw);
        Ok(TickOutcome::Analyzed(analysis))
    }

    // -- Capture --------------------------------------------------------------

    /// Persist the most recent raw frame (without overlay).
    pub fn capture(&self) -> Result<CaptureRecord> {
        let frame = self
            .latest_raw
            .as_ref()
            .ok_or_else(|| DocframeError::FrameSource("no frame acquired yet".into()))?;
        let record = save_capture(frame, &self.capture_path)?;
        info!(path = %record.path.display(), "image captured");
        Ok(record)
    }

    // -- Accessors ------------------------------------------------------------

    pub fn capture_path(&self) -> &Path {
        &self.capture_path
    }

    pub fn frames_analyzed(&self) -> u64 {
        self.frames_analyzed
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docframe_bridge::StillSequence;
    use docframe_core::GuideColor;
    use image::Rgb;
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    fn blank() -> RgbImage {
        RgbImage::from_pixel(1000, 1000, Rgb([15, 15, 15]))
    }

    fn framed_page() -> RgbImage {
        let mut frame = blank();
        draw_filled_rect_mut(&mut frame, Rect::at(300, 300).of_size(210, 297), Rgb([240, 240, 240]));
        frame
    }

    fn session(frames: Vec<RgbImage>, capture: &Path) -> CaptureSession {
        CaptureSession::new(
            Box::new(StillSequence::from_frames(frames)),
            FrameAnalyzer::default(),
            capture,
        )
    }

    #[test]
    fn tick_before_start_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut s = session(vec![blank()], &dir.path().join("c.png"));
        assert!(matches!(s.tick(), Err(DocframeError::SourceClosed)));
    }

    #[test]
    fn ticks_follow_the_sequence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut s = session(vec![blank(), framed_page()], &dir.path().join("c.png"))
            .with_preview_dir(dir.path());
        s.start().expect("start");

        match s.tick().expect("tick 1") {
            TickOutcome::Analyzed(a) => assert!(!a.ready),
            other => panic!("unexpected outcome: {other:?}"),
        }
        match s.tick().expect("tick 2") {
            TickOutcome::Analyzed(a) => assert!(a.ready),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(s.is_finished());
        assert!(matches!(s.tick().expect("tick 3"), TickOutcome::NoFrame));
        assert_eq!(s.frames_analyzed(), 2);

        let idle = image::open(dir.path().join("frame_000001.png")).expect("preview 1").to_rgb8();
        let ready = image::open(dir.path().join("frame_000002.png")).expect("preview 2").to_rgb8();
        assert_eq!(idle.get_pixel(50, 50).0, GuideColor::WHITE.0);
        assert_eq!(ready.get_pixel(50, 50).0, GuideColor::GREEN.0);
    }

    #[test]
    fn capture_stores_raw_frame_without_overlay() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("captured_image.png");
        let mut s = session(vec![framed_page()], &path);
        s.start().expect("start");
        s.tick().expect("tick");

        let record = s.capture().expect("capture");
        assert_eq!(record.path, path);

        let saved = image::open(&path).expect("reopen").to_rgb8();
        assert_eq!(saved, framed_page());
    }

    #[test]
    fn capture_without_frame_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let s = session(vec![], &dir.path().join("c.png"));
        assert!(matches!(s.capture(), Err(DocframeError::FrameSource(_))));
    }

    #[test]
    fn preview_frames_are_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let preview = dir.path().join("preview");
        std::fs::create_dir_all(&preview).expect("mkdir");

        let mut s = session(vec![blank(), blank()], &dir.path().join("c.png"))
            .with_preview_dir(&preview);
        s.start().expect("start");
        s.tick().expect("tick");
        s.tick().expect("tick");

        assert!(preview.join("frame_000001.png").exists());
        assert!(preview.join("frame_000002.png").exists());
    }
}
