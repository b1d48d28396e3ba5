use crate::{ImageError, PixelFormat, RasterImage, pixelformat::argb_to_rgba};
use crates_image::{DynamicImage, GrayImage, RgbImage, RgbaImage, imageops::FilterType};
use inkdigit_base::Vec2;

/// Resampling filter used for every resize.
///
/// Catmull-Rom is the bicubic kernel; nearest-neighbor would break up thin strokes.
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

fn dimension(value: usize, size: Vec2<usize>) -> Result<u32, ImageError> {
    u32::try_from(value).map_err(|_| ImageError::InvalidDimensions {
        width: size.x,
        height: size.y,
    })
}

pub(crate) fn to_dynamic(image: &RasterImage) -> Result<DynamicImage, ImageError> {
    let size = image.size();
    let (w, h) = (dimension(size.x, size)?, dimension(size.y, size)?);
    let data = image.data().to_vec();
    let dynamic = match image.format() {
        PixelFormat::Gray8 => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
        PixelFormat::Rgb8 => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
        PixelFormat::Rgba8 => RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        PixelFormat::Argb8 => {
            RgbaImage::from_raw(w, h, argb_to_rgba(&data)).map(DynamicImage::ImageRgba8)
        }
    };
    dynamic.ok_or_else(|| ImageError::Decode(format!("buffer does not hold {w}x{h} pixels")))
}

pub(crate) fn from_dynamic(image: DynamicImage) -> Result<RasterImage, ImageError> {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let (format, data) = match image {
        DynamicImage::ImageLuma8(buf) => (PixelFormat::Gray8, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (PixelFormat::Rgb8, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (PixelFormat::Rgba8, buf.into_raw()),
        other => (PixelFormat::Rgba8, other.to_rgba8().into_raw()),
    };
    RasterImage::new(Vec2::new(w, h), format, data)
}

/// Scale `image` to exactly `size` with bicubic resampling.
///
/// The pixel format is kept, except `Argb8` which comes back as `Rgba8`.
pub fn resize(image: &RasterImage, size: Vec2<usize>) -> Result<RasterImage, ImageError> {
    if size.x == 0 || size.y == 0 {
        return Err(ImageError::InvalidDimensions {
            width: size.x,
            height: size.y,
        });
    }
    let (w, h) = (dimension(size.x, size)?, dimension(size.y, size)?);
    if image.size() == size && image.format() != PixelFormat::Argb8 {
        return Ok(image.clone());
    }
    let resized = to_dynamic(image)?.resize_exact(w, h, RESIZE_FILTER);
    from_dynamic(resized)
}
