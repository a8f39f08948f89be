use crate::error::OcrError;
use image::GrayImage;

/// OCR processing result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrResult {
    /// Recognized text, trimmed of surrounding whitespace
    pub text: String,
}

/// Trait that all OCR engines must implement
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "tesseract")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Recognize the text in a preprocessed grayscale image
    fn recognize(&self, image: &GrayImage) -> Result<OcrResult, OcrError>;
}
