//! Indexed image export
//!
//! Turns decoded LCW pixel indices into an RGB image through a [`Palette`]
//! and writes it as PNG.

use crate::palette::Palette;
use crate::{LcwError, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

/// An 8-bit indexed image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl IndexedImage {
    /// Create an image from exactly `width * height` pixel indices
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let size = pixel_count(width, height)?;
        if pixels.len() != size {
            return Err(LcwError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image from decoder output of any length
    ///
    /// Short data is padded with index 0 and long data is truncated.
    pub fn from_decoded(mut data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let size = pixel_count(width, height)?;
        if data.len() != size {
            log::warn!(
                "Data size ({}) doesn't match image dimensions ({}x{}={})",
                data.len(),
                width,
                height,
                size
            );
            data.resize(size, 0);
        }
        Ok(Self {
            width,
            height,
            pixels: data,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel indices
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Resolve every index through `palette`
    pub fn to_rgb_image(&self, palette: &Palette) -> RgbImage {
        let width = self.width as usize;
        RgbImage::from_fn(self.width, self.height, |x, y| {
            Rgb(palette.get(self.pixels[y as usize * width + x as usize]))
        })
    }

    /// Write the image as PNG
    pub fn save_png<P: AsRef<Path>>(&self, palette: &Palette, path: P) -> Result<()> {
        let path = path.as_ref();
        self.to_rgb_image(palette)
            .save_with_format(path, ImageFormat::Png)?;
        log::debug!(
            "PNG saved to {} ({}x{})",
            path.display(),
            self.width,
            self.height
        );
        Ok(())
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(LcwError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(LcwError::InvalidDimensions { width, height })
}
