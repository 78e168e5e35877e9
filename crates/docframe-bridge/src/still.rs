// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Still-image sequence source — replays in-memory frames or the images in a
// directory as if they came from a camera.

use std::path::{Path, PathBuf};

use docframe_core::error::{DocframeError, Result};
use image::{ImageFormat, RgbImage};
use tracing::{debug, info, warn};

use crate::traits::FrameSource;

enum Origin {
    Memory(Vec<RgbImage>),
    Directory { dir: PathBuf, files: Vec<PathBuf> },
}

/// Replays a fixed sequence of frames.
///
/// Directory sequences list every file with a recognised image extension,
/// sorted by name, when opened; frames are decoded one at a time as they are
/// read. A file that fails to decode yields no frame for that tick.
pub struct StillSequence {
    name: String,
    origin: Origin,
    cursor: usize,
    looping: bool,
    open: bool,
}

impl StillSequence {
    /// Replay frames held in memory.
    pub fn from_frames(frames: Vec<RgbImage>) -> Self {
        Self {
            name: format!("still:memory[{}]", frames.len()),
            origin: Origin::Memory(frames),
            cursor: 0,
            looping: false,
            open: false,
        }
    }

    /// Replay the images found in `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        Self {
            name: format!("still:{}", dir.display()),
            origin: Origin::Directory {
                dir,
                files: Vec::new(),
            },
            cursor: 0,
            looping: false,
            open: false,
        }
    }

    /// Restart from the first frame after the last one instead of ending.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Number of frames in one pass (known once opened for directories).
    pub fn len(&self) -> usize {
        match &self.origin {
            Origin::Memory(frames) => frames.len(),
            Origin::Directory { files, .. } => files.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when a non-looping sequence has delivered its last frame.
    pub fn is_exhausted(&self) -> bool {
        !self.looping && self.cursor >= self.len()
    }

    fn next_index(&mut self) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        if self.cursor >= len {
            if !self.looping {
                return None;
            }
            self.cursor = 0;
        }
        let index = self.cursor;
        self.cursor += 1;
        Some(index)
    }
}

impl FrameSource for StillSequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> Result<()> {
        if self.open {
            return Ok(());
        }
        if let Origin::Directory { dir, files } = &mut self.origin {
            *files = list_images(dir)?;
            info!(dir = %dir.display(), frames = files.len(), "Still sequence opened");
        }
        self.cursor = 0;
        self.open = true;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        if !self.open {
            return Err(DocframeError::SourceClosed);
        }
        let Some(index) = self.next_index() else {
            return Ok(None);
        };

        match &self.origin {
            Origin::Memory(frames) => Ok(Some(frames[index].clone())),
            Origin::Directory { files, .. } => {
                let path = &files[index];
                match image::open(path) {
                    Ok(img) => {
                        debug!(path = %path.display(), "Frame decoded");
                        Ok(Some(img.to_rgb8()))
                    }
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "Frame could not be decoded");
                        Ok(None)
                    }
                }
            }
        }
    }

    fn close(&mut self) {
        if self.open {
            debug!(source = %self.name, "Still sequence closed");
        }
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn is_finished(&self) -> bool {
        self.is_exhausted()
    }
}

impl Drop for StillSequence {
    fn drop(&mut self) {
        self.close();
    }
}

/// Image files directly inside `dir`, sorted by file name.
fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|err| {
        DocframeError::FrameSource(format!("cannot read {}: {}", dir.display(), err))
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && ImageFormat::from_path(path).is_ok())
        .collect();
    files.sort();
    Ok(files)
}
