use inkdigit_base::{init_file_logger, init_stdout_logger};
use inkdigit_image::decode_image;
use inkdigit_infer::{
    BmpDump, DigitClassifier, ModelSource, OnnxBackend, Preprocessor, RecognizerConfig,
};

fn usage() -> ! {
    eprintln!("usage: classify-image <image> [config.json]");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let Some(image_path) = args.next() else {
        usage();
    };
    let config = match args.next() {
        Some(path) => RecognizerConfig::load(path)?,
        None => RecognizerConfig::default(),
    };

    match &config.log_dir {
        Some(dir) => init_file_logger(dir)?,
        None => init_stdout_logger(),
    }

    let mut preprocessor = Preprocessor::new(config.preprocess())?;
    if let Some(path) = &config.diagnostic_path {
        preprocessor = preprocessor.with_diagnostic_sink(Box::new(BmpDump::new(path)));
    }

    let backend = OnnxBackend::new(config.device()?);
    log::info!("loading model {}", config.model_path.display());
    let mut classifier =
        DigitClassifier::new(ModelSource::File(config.model_path.clone()), &backend)?;

    let bytes = tokio::fs::read(&image_path).await?;
    let image = decode_image(&bytes).await?;
    log::debug!(
        "decoded {image_path}: {}x{} {:?}",
        image.width(),
        image.height(),
        image.format()
    );

    let input = preprocessor.preprocess(&image)?;
    let prediction = classifier.classify(&input)?;

    println!("digit: {}", prediction.digit);
    for (digit, score) in prediction.scores.iter().enumerate() {
        println!("  {digit}: {score:.4}");
    }
    Ok(())
}
