#![allow(dead_code)]

use inkdigit_base::Tensor;
use inkdigit_infer::{
    Backend, INPUT_NAME, INPUT_SHAPE, InferError, ModelSource, OUTPUT_NAME, OUTPUT_SHAPE, Session,
    TensorInfo,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Session that returns fixed scores and remembers the last input it saw.
pub struct StubSession {
    pub input_names: Vec<String>,
    pub output_names: Vec<String>,
    pub input_info: Option<TensorInfo>,
    pub output_info: Option<TensorInfo>,
    pub scores: Vec<f32>,
    pub last_input: Rc<RefCell<Option<Tensor<f32>>>>,
    pub fail: bool,
}

impl StubSession {
    pub fn new(scores: Vec<f32>) -> Self {
        Self {
            input_names: vec![INPUT_NAME.to_string()],
            output_names: vec![OUTPUT_NAME.to_string()],
            input_info: Some(TensorInfo::f32(&INPUT_SHAPE)),
            output_info: Some(TensorInfo::f32(&OUTPUT_SHAPE)),
            scores,
            last_input: Rc::new(RefCell::new(None)),
            fail: false,
        }
    }
}

impl Session for StubSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        if self.fail {
            return Err(InferError::Inference("stub failure".to_string()));
        }
        let (name, tensor) = &inputs[0];
        assert_eq!(*name, INPUT_NAME);
        *self.last_input.borrow_mut() = Some(tensor.clone());

        let output = Tensor::new(vec![1, self.scores.len()], self.scores.clone())?;
        let mut outputs = HashMap::new();
        for output_name in &self.output_names {
            outputs.insert(output_name.clone(), output.clone());
        }
        Ok(outputs)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }

    fn input_info(&self, name: &str) -> Option<TensorInfo> {
        self.input_names
            .iter()
            .any(|n| n == name)
            .then(|| self.input_info.clone())
            .flatten()
    }

    fn output_info(&self, name: &str) -> Option<TensorInfo> {
        self.output_names
            .iter()
            .any(|n| n == name)
            .then(|| self.output_info.clone())
            .flatten()
    }
}

/// Backend handing out `StubSession`s with the given scores.
pub struct StubBackend {
    pub scores: Vec<f32>,
    pub last_input: Rc<RefCell<Option<Tensor<f32>>>>,
}

impl StubBackend {
    pub fn new(scores: Vec<f32>) -> Self {
        Self {
            scores,
            last_input: Rc::new(RefCell::new(None)),
        }
    }
}

impl Backend for StubBackend {
    fn name(&self) -> &str {
        "stub"
    }

    fn load_model(&self, _model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        let mut session = StubSession::new(self.scores.clone());
        session.last_input = self.last_input.clone();
        Ok(Box::new(session))
    }
}

pub fn one_hot(digit: usize) -> Vec<f32> {
    let mut scores = vec![0.0; 10];
    scores[digit] = 1.0;
    scores
}
