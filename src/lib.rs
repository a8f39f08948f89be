//! Image preprocessing and Tesseract OCR for scanned study material.
//!
//! The library backs two command-line tools:
//!
//! - `preprocess` cleans up an image with a Gaussian blur and adaptive
//!   thresholding and writes the result to disk.
//! - `ocr_processor` upscales, blurs and Otsu-thresholds an image, keeps a
//!   debug copy, and prints the text Tesseract finds in it. With
//!   `--fallback` a weak result is retried on the plain grayscale image.

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod input;
pub mod logging;
pub mod note;
pub mod preprocessing;

pub use config::{EngineConfig, OcrConfig, PreprocessConfig};
pub use engine::{OcrEngine, OcrResult};
pub use error::{ErrorKind, OcrError};
pub use note::Note;
