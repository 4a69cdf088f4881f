//! Per-pixel accumulation and display buffers.
//!
//! Both are flat, row-major arrays indexed by `y * width + x`.

use crate::{RenderError, RenderResult};
use lux_math::Vec4;
use std::path::Path;

/// Fold a new per-frame estimate into the running average.
///
/// Frame 0 stores the estimate as-is; frame `n` moves `1 / (n + 1)` of the
/// way towards it. With frame indices 0, 1, 2, ... this is the arithmetic
/// mean of all estimates so far.
#[inline]
pub fn blend(previous: Vec4, estimate: Vec4, frame_index: u32) -> Vec4 {
    if frame_index == 0 {
        return estimate;
    }
    let weight = 1.0 / (frame_index as f32 + 1.0);
    previous + (estimate - previous) * weight
}

/// Running RGBA average of every frame traced since the last reset.
#[derive(Debug, Clone)]
pub struct AccumulationBuffer {
    width: u32,
    height: u32,
    cells: Vec<Vec4>,
}

impl AccumulationBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Vec4::ZERO; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate for a new image size; previous contents are dropped.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// Forget all accumulated samples.
    pub fn reset(&mut self) {
        self.cells.fill(Vec4::ZERO);
    }

    /// Get the cell at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.cells[(y * self.width + x) as usize]
    }

    pub fn cells(&self) -> &[Vec4] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Vec4] {
        &mut self.cells
    }
}

/// Packed 8-bit RGBA pixels, rewritten from the accumulation buffer every
/// frame.
#[derive(Debug, Clone)]
pub struct DisplayBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl DisplayBuffer {
    /// Create a display buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        &mut self.pixels
    }

    /// Raw RGBA bytes, four per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| image::Rgba(self.get(x, y)))
    }

    /// Write the buffer to disk; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        self.to_image().save(path.as_ref())?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}

/// Confirm a buffer matches the frame dimensions.
pub(crate) fn check_size(width: u32, height: u32, buffer_width: u32, buffer_height: u32) -> RenderResult<()> {
    if (width, height) != (buffer_width, buffer_height) {
        return Err(RenderError::SizeMismatch {
            width,
            height,
            buffer_width,
            buffer_height,
        });
    }
    Ok(())
}
