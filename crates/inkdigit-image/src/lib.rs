//! Raster images for the inkdigit pipeline.
//!
//! `RasterImage` holds a captured bitmap in one of a few byte layouts,
//! `resize` rescales it with a bicubic filter and `to_grayscale` collapses it
//! to a `GrayscaleImage` using BT.601 luma weights. Decoding and BMP encoding
//! wrap the `image` crate.

pub mod error;
pub mod gray;
pub mod pixelformat;
pub mod raster;
pub mod resize;

pub use error::ImageError;
pub use gray::{GrayscaleImage, LUMA_WEIGHTS, luminance, to_grayscale};
pub use pixelformat::PixelFormat;
pub use raster::RasterImage;
pub use resize::{RESIZE_FILTER, resize};

use crates_image::{ExtendedColorType, ImageEncoder};

fn decode_image_inner(data: &[u8]) -> Result<RasterImage, ImageError> {
    let img = crates_image::load_from_memory(data)?;
    resize::from_dynamic(img)
}

fn encode_bmp_inner(image: &GrayscaleImage) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    let encoder = crates_image::codecs::bmp::BmpEncoder::new(&mut buffer);
    encoder
        .write_image(
            image.data(),
            image.width() as u32,
            image.height() as u32,
            ExtendedColorType::L8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Decodes PNG, JPEG or BMP bytes into a `RasterImage`.
///
/// 8-bit gray, RGB and RGBA images keep their layout; anything else is
/// converted to `Rgba8`. The decoding runs on tokio's blocking thread pool.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub async fn decode_image(data: &[u8]) -> Result<RasterImage, ImageError> {
    let owned = data.to_vec();
    tokio::task::spawn_blocking(move || decode_image_inner(&owned))
        .await
        .map_err(|e| ImageError::Decode(e.to_string()))?
}

/// Synchronous variant of [`decode_image`].
pub fn decode_image_blocking(data: &[u8]) -> Result<RasterImage, ImageError> {
    decode_image_inner(data)
}

/// Encodes a grayscale image as an 8-bit BMP.
pub fn encode_bmp(image: &GrayscaleImage) -> Result<Vec<u8>, ImageError> {
    encode_bmp_inner(image)
}
