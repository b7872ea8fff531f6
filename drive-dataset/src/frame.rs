//! Processed frame and record types.

use crate::common::*;

/// The height, width and channel extents of a processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameShape {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl FrameShape {
    pub fn pixel_count(&self) -> usize {
        self.height * self.width * self.channels
    }
}

/// A preprocessed single-channel frame stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFrame {
    height: usize,
    width: usize,
    pixels: Vec<u8>,
}

impl ProcessedFrame {
    pub fn new(height: usize, width: usize, pixels: Vec<u8>) -> Result<Self> {
        ensure!(
            height > 0 && width > 0,
            "frame extents must be positive, but get {}x{}",
            height,
            width
        );
        ensure!(
            pixels.len() == height * width,
            "pixel buffer length {} does not match a {}x{} frame",
            pixels.len(),
            height,
            width
        );
        Ok(Self {
            height,
            width,
            pixels,
        })
    }

    pub fn shape(&self) -> FrameShape {
        FrameShape {
            height: self.height,
            width: self.width,
            channels: 1,
        }
    }

    /// Get a reference to the frame's pixels.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// A horizontally mirrored copy of the frame.
    pub fn flipped(&self) -> Self {
        let pixels = self
            .pixels
            .chunks_exact(self.width)
            .flat_map(|row| row.iter().rev().copied())
            .collect();
        Self {
            height: self.height,
            width: self.width,
            pixels,
        }
    }

    /// Converts the frame back to an image buffer.
    pub fn to_image(&self) -> GrayImage {
        // the buffer length is enforced by the constructor
        GrayImage::from_raw(self.width as u32, self.height as u32, self.pixels.clone()).unwrap()
    }
}

/// One training record, a processed frame paired with its steering label.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub frame: ProcessedFrame,
    pub label: f64,
}
