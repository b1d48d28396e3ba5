use crate::InferError;
use inkdigit_base::Tensor;
use std::collections::HashMap;

/// Element type of a declared model input or output.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
    F32,
    Other(String),
}

/// Declared type of a model input or output. `None` dimensions are dynamic.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorInfo {
    pub element_type: ElementType,
    pub shape: Vec<Option<usize>>,
}

impl TensorInfo {
    pub fn f32(shape: &[usize]) -> Self {
        Self {
            element_type: ElementType::F32,
            shape: shape.iter().map(|&d| Some(d)).collect(),
        }
    }

    /// True when every fixed dimension equals the one in `shape` and the ranks agree.
    pub fn accepts(&self, shape: &[usize]) -> bool {
        self.shape.len() == shape.len()
            && self
                .shape
                .iter()
                .zip(shape)
                .all(|(declared, &dim)| declared.is_none_or(|d| d == dim))
    }
}

/// A loaded model, reused across requests.
pub trait Session {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
    /// Declared type of input `name`; `None` when unknown or not a tensor.
    fn input_info(&self, name: &str) -> Option<TensorInfo>;
    /// Declared type of output `name`; `None` when unknown or not a tensor.
    fn output_info(&self, name: &str) -> Option<TensorInfo>;
}
