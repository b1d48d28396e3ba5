use crate::{Backend, Device, ElementType, InferError, ModelSource, Session, TensorInfo};
use inkdigit_base::Tensor;
use ndarray::{ArrayD, ArrayViewD};
use ort::{
    inputs,
    session::Session as OrtSession,
    tensor::TensorElementType,
    value::{TensorRef, ValueType},
};
use std::collections::HashMap;
use std::sync::OnceLock;

static ORT_INIT: OnceLock<()> = OnceLock::new();

fn ensure_ort_init() {
    ORT_INIT.get_or_init(|| {
        let _ = ort::init().with_name("inkdigit").commit();
    });
}

/// ONNX Runtime backend.
pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}

impl Default for OnnxBackend {
    fn default() -> Self {
        Self::new(Device::Cpu)
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        if let ModelSource::File(path) = &model {
            if !path.is_file() {
                return Err(InferError::ModelLoad(format!(
                    "model file not found: {}",
                    path.display()
                )));
            }
        }
        ensure_ort_init();

        let device = &self.device;
        let builder = OrtSession::builder().map_err(|e| {
            InferError::Backend(format!("failed to create session builder: {e}"))
        })?;

        let mut builder = match device {
            Device::Cpu => {
                log::info!("[onnx] using CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::CUDAExecutionProvider;
                log::info!("[onnx] using CUDA execution provider (device_id={device_id})");
                builder
                    .with_execution_providers([CUDAExecutionProvider::default()
                        .with_device_id(*device_id)
                        .build()])
                    .map_err(|_| InferError::UnsupportedDevice(device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(device.clone()));
            }
        };

        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(&path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load {}: {e}", path.display()))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(&bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {e}"))
            })?,
        };

        let inputs: Vec<(String, Option<TensorInfo>)> = session
            .inputs()
            .iter()
            .map(|input| (input.name().to_string(), tensor_info(input.dtype())))
            .collect();
        let outputs: Vec<(String, Option<TensorInfo>)> = session
            .outputs()
            .iter()
            .map(|output| (output.name().to_string(), tensor_info(output.dtype())))
            .collect();
        log::debug!("[onnx] inputs {inputs:?}, outputs {outputs:?}");

        Ok(Box::new(OnnxSession {
            session,
            input_names: inputs.iter().map(|(name, _)| name.clone()).collect(),
            output_names: outputs.iter().map(|(name, _)| name.clone()).collect(),
            input_infos: inputs.into_iter().collect(),
            output_infos: outputs.into_iter().collect(),
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
    input_infos: HashMap<String, Option<TensorInfo>>,
    output_infos: HashMap<String, Option<TensorInfo>>,
}

/// Declared element type and shape of a tensor value; symbolic dimensions
/// (`-1`) become `None`.
fn tensor_info(value_type: &ValueType) -> Option<TensorInfo> {
    match value_type {
        ValueType::Tensor { ty, shape, .. } => Some(TensorInfo {
            element_type: match ty {
                TensorElementType::Float32 => ElementType::F32,
                other => ElementType::Other(format!("{other:?}")),
            },
            shape: shape.iter().map(|&dim| usize::try_from(dim).ok()).collect(),
        }),
        _ => None,
    }
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        for (name, _) in inputs {
            if !self.input_names.iter().any(|n| n == name) {
                return Err(InferError::InvalidInput {
                    name: name.to_string(),
                    expected_names: self.input_names.clone(),
                });
            }
        }

        // single-input models only; the digit model has exactly one
        let [(name, tensor)] = inputs else {
            return Err(InferError::Backend(format!(
                "expected exactly one input, got {}",
                inputs.len()
            )));
        };

        let array = tensor_to_ndarray(tensor.clone())?;
        let tensor_ref = TensorRef::from_array_view(array.view())
            .map_err(|e| InferError::Inference(format!("failed to create tensor ref: {e}")))?;
        let outputs = self
            .session
            .run(inputs![*name => tensor_ref])
            .map_err(|e| InferError::Inference(format!("inference failed: {e}")))?;

        let mut result = HashMap::new();
        for output_name in &self.output_names {
            let value = &outputs[output_name.as_str()];
            let array = value.try_extract_array::<f32>().map_err(|e| {
                InferError::Inference(format!("output '{output_name}' is not f32: {e}"))
            })?;
            result.insert(output_name.clone(), ndarray_to_tensor(array)?);
        }

        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }

    fn input_info(&self, name: &str) -> Option<TensorInfo> {
        self.input_infos.get(name).cloned().flatten()
    }

    fn output_info(&self, name: &str) -> Option<TensorInfo> {
        self.output_infos.get(name).cloned().flatten()
    }
}

pub fn tensor_to_ndarray(tensor: Tensor<f32>) -> Result<ArrayD<f32>, InferError> {
    ArrayD::from_shape_vec(tensor.shape, tensor.data)
        .map_err(|e| InferError::Backend(format!("failed to create ndarray from tensor: {e}")))
}

pub fn ndarray_to_tensor(array: ArrayViewD<'_, f32>) -> Result<Tensor<f32>, InferError> {
    let shape = array.shape().to_vec();
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}
