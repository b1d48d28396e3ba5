/// Byte layout of one pixel in a `RasterImage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Gray8,
    Rgb8,
    /// R, G, B, A
    Rgba8,
    /// A, R, G, B
    Argb8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 | PixelFormat::Argb8 => 4,
        }
    }

    /// Extract (r, g, b) from one pixel's bytes. Alpha is dropped.
    pub(crate) fn rgb(&self, pixel: &[u8]) -> (u8, u8, u8) {
        match self {
            PixelFormat::Gray8 => (pixel[0], pixel[0], pixel[0]),
            PixelFormat::Rgb8 | PixelFormat::Rgba8 => (pixel[0], pixel[1], pixel[2]),
            PixelFormat::Argb8 => (pixel[1], pixel[2], pixel[3]),
        }
    }
}

pub fn argb_to_rgba(data: &[u8]) -> Vec<u8> {
    data.chunks_exact(4)
        .flat_map(|c| [c[1], c[2], c[3], c[0]])
        .collect()
}
