//! Image preprocessing for OCR
//!
//! Two fixed pipelines: adaptive thresholding for standalone cleanup and
//! Otsu thresholding ahead of the OCR engine.

pub mod pipeline;
pub mod steps;

pub use pipeline::{Pipeline, PreprocessingResult, Preset, StepTiming};
