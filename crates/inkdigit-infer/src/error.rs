use crate::Device;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    /// The model could not be loaded, or its signature is not the expected one.
    ModelLoad(String),
    InvalidInput {
        name: String,
        expected_names: Vec<String>,
    },
    ShapeMismatch {
        expected: String,
        got: String,
    },
    InvalidDimensions {
        width: usize,
        height: usize,
    },
    /// The runtime rejected the input or failed while running the model.
    Inference(String),
    Backend(String),
    UnsupportedDevice(Device),
    Io(String),
    Config(String),
    Image(inkdigit_image::ImageError),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(
                f,
                "invalid input '{name}', model expects one of: {}",
                expected_names.join(", ")
            ),
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            InferError::Inference(msg) => write!(f, "inference error: {msg}"),
            InferError::Backend(msg) => write!(f, "backend error: {msg}"),
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::Io(msg) => write!(f, "io error: {msg}"),
            InferError::Config(msg) => write!(f, "config error: {msg}"),
            InferError::Image(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for InferError {
    fn from(err: serde_json::Error) -> Self {
        InferError::Config(err.to_string())
    }
}

impl From<inkdigit_image::ImageError> for InferError {
    fn from(err: inkdigit_image::ImageError) -> Self {
        match err {
            inkdigit_image::ImageError::InvalidDimensions { width, height } => {
                InferError::InvalidDimensions { width, height }
            }
            other => InferError::Image(other),
        }
    }
}

impl From<inkdigit_base::TensorError> for InferError {
    fn from(err: inkdigit_base::TensorError) -> Self {
        InferError::ShapeMismatch {
            expected: "consistent tensor shape".to_string(),
            got: err.to_string(),
        }
    }
}
