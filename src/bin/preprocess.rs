use clap::Parser;
use image::DynamicImage;
use material_ocr::preprocessing::{Pipeline, PreprocessingResult, Preset};
use material_ocr::{error, input, logging, OcrError, PreprocessConfig};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "preprocess")]
#[command(about = "Denoise and adaptively threshold an image ahead of OCR")]
#[command(version)]
pub struct Args {
    /// Image to read
    pub input: PathBuf,

    /// Where to write the processed image (format taken from the extension)
    pub output: PathBuf,

    /// Print a JSON report of the preprocessing steps on stdout
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl From<Args> for PreprocessConfig {
    fn from(args: Args) -> Self {
        Self {
            input: args.input,
            output: args.output,
            json: args.json,
        }
    }
}

#[derive(Serialize)]
struct PreprocessReport<'a> {
    output: String,
    width: u32,
    height: u32,
    #[serde(flatten)]
    preprocessing: &'a PreprocessingResult,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let outcome = logging::init(&args.log_level).and_then(|()| run(args.into()));
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => error::report(&err),
    }
}

fn run(config: PreprocessConfig) -> anyhow::Result<()> {
    let gray = input::load_grayscale(&config.input)?;

    let result = Pipeline::new(Preset::Adaptive).process(DynamicImage::ImageLuma8(gray))?;

    result
        .image
        .save(&config.output)
        .map_err(|source| OcrError::WriteFailed {
            path: config.output.clone(),
            source,
        })?;

    tracing::info!(
        "Wrote {} ({}x{}) in {}ms",
        config.output.display(),
        result.image.width(),
        result.image.height(),
        result.total_time_ms
    );

    if config.json {
        let report = PreprocessReport {
            output: config.output.display().to_string(),
            width: result.image.width(),
            height: result.image.height(),
            preprocessing: &result,
        };
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    }

    Ok(())
}
