use crate::{ImageError, PixelFormat};
use inkdigit_base::{Tensor, TensorError, Vec2, element_count};

/// Bytes needed for a `size` raster of `format`; both sides must be non-zero
/// and the total must fit in `usize`.
fn byte_count(size: Vec2<usize>, format: PixelFormat) -> Result<usize, ImageError> {
    let invalid = || ImageError::InvalidDimensions {
        width: size.x,
        height: size.y,
    };
    if size.x == 0 || size.y == 0 {
        return Err(invalid());
    }
    element_count(&[size.x, size.y, format.bytes_per_pixel()]).map_err(|_| invalid())
}

/// A captured W×H bitmap. Rows are stored top to bottom, no padding.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    size: Vec2<usize>,
    format: PixelFormat,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap `data`, which must hold exactly `width * height` pixels of `format`.
    pub fn new(size: Vec2<usize>, format: PixelFormat, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = byte_count(size, format)?;
        if data.len() != expected {
            return Err(ImageError::Tensor(TensorError::ShapeMismatch {
                expected,
                got: data.len(),
            }));
        }
        Ok(Self { size, format, data })
    }

    // caller guarantees size and length already agree
    pub(crate) fn from_parts(size: Vec2<usize>, format: PixelFormat, data: Vec<u8>) -> Self {
        Self { size, format, data }
    }

    /// A raster with every pixel set to `pixel`.
    pub fn filled(size: Vec2<usize>, format: PixelFormat, pixel: &[u8]) -> Result<Self, ImageError> {
        if pixel.len() != format.bytes_per_pixel() {
            return Err(ImageError::Tensor(TensorError::ShapeMismatch {
                expected: format.bytes_per_pixel(),
                got: pixel.len(),
            }));
        }
        byte_count(size, format)?;
        let data = pixel.repeat(size.x * size.y);
        Ok(Self { size, format, data })
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

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Bytes of the pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let bpp = self.format.bytes_per_pixel();
        let offset = (y * self.size.x + x) * bpp;
        &self.data[offset..offset + bpp]
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let bpp = self.format.bytes_per_pixel();
        let offset = (y * self.size.x + x) * bpp;
        &mut self.data[offset..offset + bpp]
    }

    /// HWC view: `[height, width, channels]`.
    pub fn to_tensor(&self) -> Result<Tensor<u8>, ImageError> {
        Ok(Tensor::new(
            vec![self.size.y, self.size.x, self.format.bytes_per_pixel()],
            self.data.clone(),
        )?)
    }
}
