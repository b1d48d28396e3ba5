use crate::{ImageError, PixelFormat, RasterImage};
use inkdigit_base::{Tensor, Vec2};

/// BT.601 luma weights (R, G, B).
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Single-channel 8-bit intensity image.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayscaleImage {
    size: Vec2<usize>,
    data: Vec<u8>,
}

impl GrayscaleImage {
    pub fn new(size: Vec2<usize>, data: Vec<u8>) -> Result<Self, ImageError> {
        // reuse the raster checks for zero sizes and length
        let raster = RasterImage::new(size, PixelFormat::Gray8, data)?;
        Ok(Self {
            size,
            data: raster.into_data(),
        })
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Sample at column `x`, row `y`.
    pub fn sample(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.size.x + x]
    }

    /// Map every sample to `255 - s`.
    pub fn inverted(&self) -> Self {
        Self {
            size: self.size,
            data: self.data.iter().map(|&s| 255 - s).collect(),
        }
    }

    /// `[height, width]` tensor of the samples, row-major.
    pub fn to_tensor(&self) -> Result<Tensor<u8>, ImageError> {
        Ok(Tensor::new(vec![self.size.y, self.size.x], self.data.clone())?)
    }

    pub fn to_raster(&self) -> RasterImage {
        RasterImage::from_parts(self.size, PixelFormat::Gray8, self.data.clone())
    }
}

/// `0.299 R + 0.587 G + 0.114 B`, rounded to the nearest integer.
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMA_WEIGHTS[0] * r as f32 + LUMA_WEIGHTS[1] * g as f32 + LUMA_WEIGHTS[2] * b as f32;
    y.round().clamp(0.0, 255.0) as u8
}

/// Collapse a raster to one luminance channel.
///
/// A `Gray8` raster is already luminance and is copied unchanged, so applying
/// this to its own output is a no-op.
pub fn to_grayscale(image: &RasterImage) -> GrayscaleImage {
    let format = image.format();
    let data = match format {
        PixelFormat::Gray8 => image.data().to_vec(),
        _ => image
            .data()
            .chunks_exact(format.bytes_per_pixel())
            .map(|pixel| {
                let (r, g, b) = format.rgb(pixel);
                luminance(r, g, b)
            })
            .collect(),
    };
    GrayscaleImage {
        size: image.size(),
        data,
    }
}
