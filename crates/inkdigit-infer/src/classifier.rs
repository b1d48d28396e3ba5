use crate::{Backend, ElementType, InferError, ModelSource, Session, TensorInfo};
use inkdigit_base::Tensor;

/// Input tensor name declared by the MNIST model.
pub const INPUT_NAME: &str = "Input3";
/// Output tensor name declared by the MNIST model.
pub const OUTPUT_NAME: &str = "Plus214_Output_0";
pub const INPUT_SHAPE: [usize; 4] = [1, 1, 28, 28];
pub const CLASS_COUNT: usize = 10;
pub const OUTPUT_SHAPE: [usize; 2] = [1, CLASS_COUNT];

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub digit: usize,
    pub scores: Vec<f32>,
}

/// Index of the largest score; the lowest index wins ties.
///
/// NaN scores are skipped. Returns `None` when no score is comparable.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}

fn check_signature(
    name: &str,
    info: Option<TensorInfo>,
    expected: &[usize],
) -> Result<(), InferError> {
    let info = info.ok_or_else(|| {
        InferError::ModelLoad(format!("'{name}' is not a tensor with a known type"))
    })?;
    if info.element_type != ElementType::F32 {
        return Err(InferError::ModelLoad(format!(
            "'{name}' has element type {:?}, expected float32",
            info.element_type
        )));
    }
    if !info.accepts(expected) {
        return Err(InferError::ModelLoad(format!(
            "'{name}' is declared as {:?}, expected {expected:?}",
            info.shape
        )));
    }
    Ok(())
}

/// Digit classifier over a session exposing `Input3` → `Plus214_Output_0`.
pub struct DigitClassifier {
    session: Box<dyn Session>,
}

impl DigitClassifier {
    /// Load `model` through `backend` and check its signature.
    pub fn new(model: ModelSource, backend: &dyn Backend) -> Result<Self, InferError> {
        let session = backend.load_model(model)?;
        log::info!("loaded digit model with {} backend", backend.name());
        Self::from_session(session)
    }

    /// Wrap an already loaded session.
    ///
    /// # Errors
    ///
    /// `InferError::ModelLoad` when the session lacks the `Input3` input or the
    /// `Plus214_Output_0` output, or when either is not a float32 tensor of
    /// shape `[1, 1, 28, 28]` and `[1, 10]` respectively.
    pub fn from_session(session: Box<dyn Session>) -> Result<Self, InferError> {
        if !session.input_names().iter().any(|n| n == INPUT_NAME) {
            return Err(InferError::ModelLoad(format!(
                "model has no input '{INPUT_NAME}' (inputs: {})",
                session.input_names().join(", ")
            )));
        }
        if !session.output_names().iter().any(|n| n == OUTPUT_NAME) {
            return Err(InferError::ModelLoad(format!(
                "model has no output '{OUTPUT_NAME}' (outputs: {})",
                session.output_names().join(", ")
            )));
        }
        check_signature(INPUT_NAME, session.input_info(INPUT_NAME), &INPUT_SHAPE)?;
        check_signature(OUTPUT_NAME, session.output_info(OUTPUT_NAME), &OUTPUT_SHAPE)?;
        Ok(Self { session })
    }

    /// Run the model on a `[1, 1, 28, 28]` input and pick the top digit.
    pub fn classify(&mut self, input: &Tensor<f32>) -> Result<Prediction, InferError> {
        if input.shape != INPUT_SHAPE {
            return Err(InferError::ShapeMismatch {
                expected: format!("{INPUT_SHAPE:?}"),
                got: format!("{:?}", input.shape),
            });
        }

        let mut outputs = self.session.run(&[(INPUT_NAME, input.clone())])?;
        let output = outputs
            .remove(OUTPUT_NAME)
            .ok_or_else(|| InferError::Inference(format!("model produced no '{OUTPUT_NAME}'")))?;

        if output.len() != CLASS_COUNT {
            return Err(InferError::Inference(format!(
                "expected {CLASS_COUNT} scores, got {} (shape {:?})",
                output.len(),
                output.shape
            )));
        }

        let digit = argmax(&output.data)
            .ok_or_else(|| InferError::Inference("model returned no comparable scores".to_string()))?;

        Ok(Prediction {
            digit,
            scores: output.data,
        })
    }
}
