//! # Texture Module
//!
//! CPU-side mirror of an image shown in a plot pane. One `TextureData` lives
//! per pane for the whole session and is reallocated in place whenever the
//! image changes; the `revision` counter tells the GUI when to rebuild its
//! toolkit handle.

use anyhow::{bail, ensure, Result};

/// Pixel layouts the panes can display.
pub const SUPPORTED_CHANNELS: [usize; 3] = [1, 3, 4];

/// 8-bit image data for a single pane.
#[derive(Debug, Clone, Default)]
pub struct TextureData {
    rows: usize,
    cols: usize,
    channels: usize,
    pixels: Vec<u8>,
    revision: u64,
}

impl TextureData {
    /// An empty texture. Nothing is displayed until the first `reallocate`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces shape and content.
    ///
    /// # Arguments
    /// * `channels` - One of [`SUPPORTED_CHANNELS`]
    /// * `rows`, `cols` - Image shape
    /// * `pixels` - Exactly `rows * cols * channels` bytes
    ///
    /// # Returns
    /// * `Result<u64>` - The new revision; on error the texture is unchanged
    pub fn reallocate(
        &mut self,
        channels: usize,
        rows: usize,
        cols: usize,
        pixels: Vec<u8>,
    ) -> Result<u64> {
        if !SUPPORTED_CHANNELS.contains(&channels) {
            bail!("texture cannot have {} channels", channels);
        }
        ensure!(
            pixels.len() == rows * cols * channels,
            "texture of {}x{}x{} needs {} bytes, got {}",
            rows,
            cols,
            channels,
            rows * cols * channels,
            pixels.len()
        );
        self.rows = rows;
        self.cols = cols;
        self.channels = channels;
        self.pixels = pixels;
        self.revision += 1;
        Ok(self.revision)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixels expanded to RGBA, as the image widget expects.
    pub fn to_rgba8(&self) -> Vec<u8> {
        match self.channels {
            4 => self.pixels.clone(),
            3 => self
                .pixels
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            1 => self.pixels.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            _ => Vec::new(),
        }
    }
}
