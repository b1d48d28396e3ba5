use inkdigit_infer::{
    Device, ElementType, INPUT_NAME, INPUT_SHAPE, InferError, ModelSource, OUTPUT_NAME, TensorInfo,
};

#[test]
fn test_model_signature_constants() {
    assert_eq!(INPUT_NAME, "Input3");
    assert_eq!(OUTPUT_NAME, "Plus214_Output_0");
    assert_eq!(INPUT_SHAPE.iter().product::<usize>(), 784);
}

#[test]
fn test_device_display() {
    assert_eq!(Device::Cpu.to_string(), "CPU");
    assert_eq!(Device::Cuda { device_id: 2 }.to_string(), "CUDA(device_id=2)");
}

#[test]
fn test_infer_error_display() {
    assert_eq!(
        InferError::ModelLoad("failed to load".to_string()).to_string(),
        "model load error: failed to load"
    );
    assert_eq!(
        InferError::Inference("bad shape".to_string()).to_string(),
        "inference error: bad shape"
    );
    assert_eq!(
        InferError::InvalidDimensions { width: 0, height: 28 }.to_string(),
        "invalid dimensions: 0x28"
    );

    let msg = InferError::InvalidInput {
        name: "data".to_string(),
        expected_names: vec!["Input3".to_string()],
    }
    .to_string();
    assert!(msg.contains("data"));
    assert!(msg.contains("Input3"));

    assert!(
        InferError::UnsupportedDevice(Device::Cuda { device_id: 0 })
            .to_string()
            .contains("unsupported device")
    );
}

#[test]
fn test_image_invalid_dimensions_maps_to_infer_invalid_dimensions() {
    let err: InferError = inkdigit_image::ImageError::InvalidDimensions {
        width: 0,
        height: 0,
    }
    .into();
    assert!(matches!(err, InferError::InvalidDimensions { .. }));
}

#[test]
fn test_model_source_variants() {
    match ModelSource::File("mnist.onnx".into()) {
        ModelSource::File(path) => assert_eq!(path.to_str(), Some("mnist.onnx")),
        ModelSource::Memory(_) => panic!("expected File variant"),
    }
    match ModelSource::Memory(vec![1, 2, 3]) {
        ModelSource::Memory(bytes) => assert_eq!(bytes, vec![1, 2, 3]),
        ModelSource::File(_) => panic!("expected Memory variant"),
    }
}

#[test]
fn test_tensor_info_accepts_matching_shape() {
    let info = TensorInfo::f32(&INPUT_SHAPE);
    assert_eq!(info.element_type, ElementType::F32);
    assert!(info.accepts(&[1, 1, 28, 28]));
    assert!(!info.accepts(&[1, 1, 28, 27]));
    assert!(!info.accepts(&[1, 28, 28]));
}

#[test]
fn test_tensor_info_dynamic_dimensions_match_anything() {
    let info = TensorInfo {
        element_type: ElementType::F32,
        shape: vec![None, Some(10)],
    };
    assert!(info.accepts(&[1, 10]));
    assert!(info.accepts(&[32, 10]));
    assert!(!info.accepts(&[1, 1000]));
}
