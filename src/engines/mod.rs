//! OCR engine implementations

pub mod tesseract;

pub use tesseract::TesseractEngine;
