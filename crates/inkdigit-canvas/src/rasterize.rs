use crate::{CaptureError, Surface};
use inkdigit_base::Vec2;
use inkdigit_image::{PixelFormat, RasterImage};

/// Logical units per inch; a surface captured at this DPI maps one unit to one pixel.
pub const LOGICAL_DPI: f32 = 96.0;

/// Largest capture side in pixels.
pub const MAX_CAPTURE_DIMENSION: usize = 16_384;

/// Pixel size of a capture of `layout` at `dpi`, truncated toward zero.
///
/// Sides above `MAX_CAPTURE_DIMENSION` give `CaptureError::TooLarge`.
pub fn pixel_size(layout: Vec2<f32>, dpi: f32) -> Result<Vec2<usize>, CaptureError> {
    let not_ready = || CaptureError::SurfaceNotReady {
        width: layout.x,
        height: layout.y,
    };
    let scale = dpi / LOGICAL_DPI;
    if !layout.x.is_finite() || !layout.y.is_finite() || !scale.is_finite() || scale <= 0.0 {
        return Err(not_ready());
    }
    let width = (layout.x * scale).max(0.0) as usize;
    let height = (layout.y * scale).max(0.0) as usize;
    if width == 0 || height == 0 {
        return Err(not_ready());
    }
    if width > MAX_CAPTURE_DIMENSION || height > MAX_CAPTURE_DIMENSION {
        return Err(CaptureError::TooLarge { width, height });
    }
    Ok(Vec2::new(width, height))
}

/// Capture `surface` as an RGBA bitmap at `dpi`.
///
/// # Errors
///
/// Returns `CaptureError::SurfaceNotReady` when the surface would produce a
/// bitmap with a zero dimension, e.g. before its first layout pass, and
/// `CaptureError::TooLarge` when a side exceeds `MAX_CAPTURE_DIMENSION`.
pub fn rasterize(surface: &dyn Surface, dpi: f32) -> Result<RasterImage, CaptureError> {
    let layout = surface.layout_size();
    let size = pixel_size(layout, dpi)?;

    // transparent black, like an unpainted render target
    let mut target = RasterImage::filled(size, PixelFormat::Rgba8, &[0, 0, 0, 0])?;
    surface.render(&mut target, dpi / LOGICAL_DPI);

    log::debug!(
        "rasterized {}x{} surface to {}x{} pixels",
        layout.x,
        layout.y,
        size.x,
        size.y
    );
    Ok(target)
}
