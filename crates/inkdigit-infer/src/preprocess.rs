use crate::InferError;
use inkdigit_base::{Tensor, Vec2};
use inkdigit_image::{GrayscaleImage, RasterImage, encode_bmp, resize, to_grayscale};
use std::path::PathBuf;

/// Target image size and polarity for the preprocessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessConfig {
    pub width: usize,
    pub height: usize,
    /// Map samples to `255 - s` before normalizing (for white-on-black models).
    pub invert: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            width: 28,
            height: 28,
            invert: false,
        }
    }
}

/// Receives the intermediate grayscale image of every request.
pub trait DiagnosticSink {
    fn inspect(&mut self, image: &GrayscaleImage);
}

/// Writes the intermediate image to `path` as BMP, overwriting it each time.
///
/// Failures are logged and otherwise ignored.
pub struct BmpDump {
    path: PathBuf,
}

impl BmpDump {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl DiagnosticSink for BmpDump {
    fn inspect(&mut self, image: &GrayscaleImage) {
        let written = encode_bmp(image)
            .map_err(|e| e.to_string())
            .and_then(|bytes| std::fs::write(&self.path, bytes).map_err(|e| e.to_string()));
        match written {
            Ok(()) => log::debug!("wrote diagnostic bitmap to {}", self.path.display()),
            Err(e) => log::warn!(
                "failed to write diagnostic bitmap to {}: {e}",
                self.path.display()
            ),
        }
    }
}

/// Row-major flatten of a `[H, W]` or `[H, W, 1]` sample grid into a
/// `[1, 1, H, W]` tensor, each sample divided by 255.
pub fn flatten<T: Copy + Into<f32>>(samples: &Tensor<T>) -> Result<Tensor<f32>, InferError> {
    let (height, width) = match samples.shape.as_slice() {
        [h, w] | [h, w, 1] => (*h, *w),
        _ => {
            return Err(InferError::ShapeMismatch {
                expected: "[H, W] or [H, W, 1]".to_string(),
                got: format!("{:?}", samples.shape),
            });
        }
    };

    let mut data = Vec::with_capacity(height * width);
    for row in 0..height {
        for col in 0..width {
            let sample: f32 = samples.data[row * width + col].into();
            data.push(sample / 255.0);
        }
    }

    Ok(Tensor::new(vec![1, 1, height, width], data)?)
}

/// Turns a captured raster into the model's input tensor.
///
/// Resize (bicubic) → luminance (BT.601, once) → optional inversion →
/// flatten/normalize. The result has `width * height` values in `[0, 1]`.
pub struct Preprocessor {
    config: PreprocessConfig,
    sink: Option<Box<dyn DiagnosticSink>>,
}

impl Preprocessor {
    pub fn new(config: PreprocessConfig) -> Result<Self, InferError> {
        if config.width == 0 || config.height == 0 {
            return Err(InferError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }
        Ok(Self { config, sink: None })
    }

    pub fn with_diagnostic_sink(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    pub fn target_size(&self) -> Vec2<usize> {
        Vec2::new(self.config.width, self.config.height)
    }

    /// Resize and convert to the grayscale image the model will see.
    pub fn grayscale(&self, raster: &RasterImage) -> Result<GrayscaleImage, InferError> {
        let resized = resize(raster, self.target_size())?;
        let gray = to_grayscale(&resized);
        Ok(if self.config.invert { gray.inverted() } else { gray })
    }

    pub fn preprocess(&mut self, raster: &RasterImage) -> Result<Tensor<f32>, InferError> {
        let gray = self.grayscale(raster)?;
        if let Some(sink) = self.sink.as_mut() {
            sink.inspect(&gray);
        }
        flatten(&gray.to_tensor()?)
    }
}
