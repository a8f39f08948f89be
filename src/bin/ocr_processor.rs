use clap::Parser;
use material_ocr::config::DEFAULT_DEBUG_OUTPUT;
use material_ocr::engines::TesseractEngine;
use material_ocr::preprocessing::steps::grayscale;
use material_ocr::preprocessing::{Pipeline, PreprocessingResult, Preset};
use material_ocr::{
    error, input, logging, note, EngineConfig, Note, OcrConfig, OcrEngine, OcrError,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "ocr_processor")]
#[command(about = "Binarize an image and print the text Tesseract finds in it")]
#[command(version)]
pub struct Args {
    /// Image to recognize
    pub image: PathBuf,

    /// Where to write the binarized image [default: debug_output_final.png]
    #[arg(long, conflicts_with = "no_debug_output")]
    pub debug_output: Option<PathBuf>,

    /// Do not write the binarized image
    #[arg(long)]
    pub no_debug_output: bool,

    /// Path to the tesseract binary (searched on PATH and common install locations if unset)
    #[arg(long, env = "TESSERACT_CMD")]
    pub tesseract_path: Option<PathBuf>,

    /// Path to tessdata directory
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata_dir: Option<PathBuf>,

    /// Retry on the plain grayscale image when the text looks unusable
    #[arg(long)]
    pub fallback: bool,

    /// Print a JSON report instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl From<Args> for OcrConfig {
    fn from(args: Args) -> Self {
        let debug_output = if args.no_debug_output {
            None
        } else {
            Some(
                args.debug_output
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DEBUG_OUTPUT)),
            )
        };

        Self {
            image: args.image,
            debug_output,
            engine: EngineConfig {
                binary: args.tesseract_path,
                tessdata_path: args.tessdata_dir,
                ..EngineConfig::default()
            },
            fallback: args.fallback,
            json: args.json,
        }
    }
}

#[derive(Serialize)]
struct OcrReport<'a> {
    text: &'a str,
    note: Note,
    fallback_used: bool,
    engine: &'static str,
    debug_image: Option<String>,
    preprocessing: &'a PreprocessingResult,
    processing_time_ms: u64,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let outcome = logging::init(&args.log_level).and_then(|()| run(args.into()));
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => error::report(&err),
    }
}

fn run(config: OcrConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    let image = input::load_image(&config.image)?;
    let plain = config.fallback.then(|| grayscale::to_luma(&image));
    let preprocessed = Pipeline::new(Preset::Otsu).process(image)?;
    let binary = preprocessed.image.to_luma8();

    // Written before the engine runs so it is there even when OCR fails
    if let Some(path) = &config.debug_output {
        binary.save(path).map_err(|source| OcrError::WriteFailed {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Wrote debug image to {}", path.display());
    }

    let engine = TesseractEngine::new(&config.engine)?;
    let mut result = engine.recognize(&binary)?;

    let mut fallback_used = false;
    if let Some(plain) = &plain {
        if note::is_weak(&result.text) {
            tracing::info!(
                "Result {:?} looks unusable, retrying on the grayscale image",
                result.text
            );
            result = engine.recognize(plain)?;
            fallback_used = true;
        }
    }

    let processing_time_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        "OCR completed in {}ms with {} at {}, text length: {}",
        processing_time_ms,
        engine.description(),
        engine.binary().display(),
        result.text.len()
    );

    let mut stdout = std::io::stdout().lock();
    if config.json {
        let report = OcrReport {
            text: &result.text,
            note: Note::from_text(&result.text),
            fallback_used,
            engine: engine.name(),
            debug_image: config
                .debug_output
                .as_ref()
                .map(|p| p.display().to_string()),
            preprocessing: &preprocessed,
            processing_time_ms,
        };
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", result.text)?;
    }

    Ok(())
}
