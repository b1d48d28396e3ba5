use crate::{
    Backend, BmpDump, DigitClassifier, InferError, ModelSource, Prediction, Preprocessor,
    RecognizerConfig,
};
use inkdigit_canvas::{CaptureError, InkCanvas, LOGICAL_DPI, Surface, rasterize};
use std::fmt;

/// Terminal failure of one recognize request.
#[derive(Debug)]
pub enum RecognizeError {
    SurfaceNotReady { width: f32, height: f32 },
    ModelLoad(String),
    Inference(String),
    InvalidDimensions { width: usize, height: usize },
}

impl fmt::Display for RecognizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognizeError::SurfaceNotReady { width, height } => {
                write!(f, "surface not ready: layout size {width}x{height}")
            }
            RecognizeError::ModelLoad(msg) => write!(f, "model load failure: {msg}"),
            RecognizeError::Inference(msg) => write!(f, "inference failure: {msg}"),
            RecognizeError::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
        }
    }
}

impl std::error::Error for RecognizeError {}

impl From<CaptureError> for RecognizeError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::SurfaceNotReady { width, height } => {
                RecognizeError::SurfaceNotReady { width, height }
            }
            CaptureError::TooLarge { width, height } => {
                RecognizeError::InvalidDimensions { width, height }
            }
            CaptureError::Image(err) => InferError::from(err).into(),
        }
    }
}

impl From<InferError> for RecognizeError {
    fn from(err: InferError) -> Self {
        match err {
            InferError::ModelLoad(msg) => RecognizeError::ModelLoad(msg),
            InferError::InvalidDimensions { width, height } => {
                RecognizeError::InvalidDimensions { width, height }
            }
            other => RecognizeError::Inference(other.to_string()),
        }
    }
}

/// Rasterize → preprocess → classify, plus the label currently on display.
pub struct Recognizer {
    preprocessor: Preprocessor,
    classifier: DigitClassifier,
    dpi: f32,
    label: Option<usize>,
}

impl Recognizer {
    pub fn new(preprocessor: Preprocessor, classifier: DigitClassifier) -> Self {
        Self {
            preprocessor,
            classifier,
            dpi: LOGICAL_DPI,
            label: None,
        }
    }

    /// Build the full pipeline from `config`, loading the model through `backend`.
    pub fn from_config(
        config: &RecognizerConfig,
        backend: &dyn Backend,
    ) -> Result<Self, RecognizeError> {
        let mut preprocessor = Preprocessor::new(config.preprocess())?;
        if let Some(path) = &config.diagnostic_path {
            preprocessor = preprocessor.with_diagnostic_sink(Box::new(BmpDump::new(path)));
        }
        let classifier =
            DigitClassifier::new(ModelSource::File(config.model_path.clone()), backend)?;
        Ok(Self::new(preprocessor, classifier).with_dpi(config.dpi))
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Classify what is currently drawn on `surface`.
    ///
    /// On success the digit becomes the displayed label. On failure the label
    /// is cleared and the error returned; nothing is retried.
    pub fn recognize(&mut self, surface: &dyn Surface) -> Result<Prediction, RecognizeError> {
        match self.run(surface) {
            Ok(prediction) => {
                log::info!("recognized digit {}", prediction.digit);
                self.label = Some(prediction.digit);
                Ok(prediction)
            }
            Err(err) => {
                log::error!("recognition failed: {err}");
                self.label = None;
                Err(err)
            }
        }
    }

    fn run(&mut self, surface: &dyn Surface) -> Result<Prediction, RecognizeError> {
        let raster = rasterize(surface, self.dpi)?;
        let input = self.preprocessor.preprocess(&raster)?;
        Ok(self.classifier.classify(&input)?)
    }

    /// Erase the canvas and the displayed label.
    pub fn clear(&mut self, canvas: &mut InkCanvas) {
        canvas.clear();
        self.label = None;
    }

    pub fn digit(&self) -> Option<usize> {
        self.label
    }

    /// Text for the result label; empty when nothing is recognized.
    pub fn label(&self) -> String {
        self.label.map(|d| d.to_string()).unwrap_or_default()
    }
}
