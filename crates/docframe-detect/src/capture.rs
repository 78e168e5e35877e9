// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Still capture — encodes a raw (pre-overlay) frame for persistence.

use std::path::Path;

use chrono::Utc;
use docframe_core::CaptureRecord;
use docframe_core::error::{DocframeError, Result};
use image::{ImageFormat, RgbImage};
use tracing::{info, instrument};

/// Encode a frame as PNG bytes.
pub fn encode_png(frame: &RgbImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    frame
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| DocframeError::ImageError(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Write `frame` to `path`. The format is inferred from the file extension.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_capture(frame: &RgbImage, path: impl AsRef<Path>) -> Result<CaptureRecord> {
    let path = path.as_ref();
    if frame.width() == 0 || frame.height() == 0 {
        return Err(DocframeError::EmptyFrame {
            width: frame.width(),
            height: frame.height(),
        });
    }

    frame.save(path).map_err(|err| {
        DocframeError::ImageError(format!(
            "failed to save capture to {}: {}",
            path.display(),
            err
        ))
    })?;

    info!(width = frame.width(), height = frame.height(), "Frame captured");
    Ok(CaptureRecord {
        path: path.to_path_buf(),
        width: frame.width(),
        height: frame.height(),
        captured_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn png_bytes_carry_signature() {
        let frame = RgbImage::from_pixel(8, 8, Rgb([1, 2, 3]));
        let bytes = encode_png(&frame).expect("encode");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn saved_capture_reloads_identically() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("captured_image.png");
        let mut frame = RgbImage::from_pixel(16, 9, Rgb([40, 80, 120]));
        frame.put_pixel(3, 4, Rgb([250, 0, 0]));

        let record = save_capture(&frame, &path).expect("save");
        assert_eq!(record.path, path);
        assert_eq!((record.width, record.height), (16, 9));

        let reloaded = image::open(&path).expect("reopen").to_rgb8();
        assert_eq!(reloaded, frame);
    }

    #[test]
    fn unknown_extension_is_an_image_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let frame = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        let result = save_capture(&frame, dir.path().join("capture.unknownext"));
        assert!(matches!(result, Err(DocframeError::ImageError(_))));
    }

    #[test]
    fn empty_frame_is_refused() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = save_capture(&RgbImage::new(0, 0), dir.path().join("x.png"));
        assert!(matches!(result, Err(DocframeError::EmptyFrame { .. })));
    }
}
