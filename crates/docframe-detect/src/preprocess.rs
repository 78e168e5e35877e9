// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Frame preprocessing — luminance conversion and fixed-threshold binarization.

use image::{GrayImage, RgbImage};
use tracing::{instrument, trace};

/// Single-channel mask with pixels in {0, 255}.
pub type BinaryMask = GrayImage;

/// Value written for pixels in the "on" class.
pub const MASK_ON: u8 = 255;

/// Convert a colour frame to a binary mask.
///
/// The frame is reduced to luminance, then every pixel at or above
/// `threshold` becomes [`MASK_ON`] and every other pixel becomes 0. The input
/// frame is not modified.
#[instrument(level = "trace", skip(frame), fields(width = frame.width(), height = frame.height()))]
pub fn binarize(frame: &RgbImage, threshold: u8) -> BinaryMask {
    let mut mask = image::imageops::grayscale(frame);
    threshold_in_place(&mut mask, threshold);
    trace!("Frame binarized");
    mask
}

/// Apply the fixed global threshold to an already single-channel image.
pub fn threshold_in_place(gray: &mut GrayImage, threshold: u8) {
    for pixel in gray.pixels_mut() {
        pixel.0[0] = if pixel.0[0] >= threshold { MASK_ON } else { 0 };
    }
}
