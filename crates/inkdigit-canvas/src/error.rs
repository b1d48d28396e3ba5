use std::fmt;

#[derive(Debug)]
pub enum CaptureError {
    /// The surface has no pixels yet (not laid out, or sized to zero).
    SurfaceNotReady { width: f32, height: f32 },
    /// The capture would exceed `MAX_CAPTURE_DIMENSION` pixels on a side.
    TooLarge { width: usize, height: usize },
    Image(inkdigit_image::ImageError),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::SurfaceNotReady { width, height } => {
                write!(f, "surface not ready: layout size {width}x{height}")
            }
            CaptureError::TooLarge { width, height } => {
                write!(f, "capture too large: {width}x{height} pixels")
            }
            CaptureError::Image(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<inkdigit_image::ImageError> for CaptureError {
    fn from(err: inkdigit_image::ImageError) -> Self {
        CaptureError::Image(err)
    }
}
