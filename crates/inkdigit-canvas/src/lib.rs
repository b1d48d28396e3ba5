//! Drawing surfaces and their capture into raster images.

pub mod error;
pub mod ink;
pub mod rasterize;
pub mod surface;

pub use error::CaptureError;
pub use ink::{BLACK, InkCanvas, Pen, Stroke, WHITE};
pub use rasterize::{LOGICAL_DPI, MAX_CAPTURE_DIMENSION, pixel_size, rasterize};
pub use surface::Surface;
