//! Digit recognition over ONNX Runtime.
//!
//! `Preprocessor` turns a captured canvas into the `[1, 1, 28, 28]` tensor the
//! MNIST model expects, `DigitClassifier` runs the model through a `Backend`
//! and `Recognizer` ties capture, preprocessing and classification together.

pub mod backend;
pub mod backends;
pub mod classifier;
pub mod config;
pub mod device;
pub mod error;
pub mod modelsource;
pub mod preprocess;
pub mod recognizer;
pub mod session;

pub use backend::Backend;
pub use backends::OnnxBackend;
pub use classifier::{
    CLASS_COUNT, DigitClassifier, INPUT_NAME, INPUT_SHAPE, OUTPUT_NAME, OUTPUT_SHAPE, Prediction,
    argmax,
};
pub use config::RecognizerConfig;
pub use device::Device;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use preprocess::{BmpDump, DiagnosticSink, PreprocessConfig, Preprocessor, flatten};
pub use recognizer::{RecognizeError, Recognizer};
pub use session::{ElementType, Session, TensorInfo};
