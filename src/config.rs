use std::path::PathBuf;

/// Default location of the binarized image written by the OCR runner
pub const DEFAULT_DEBUG_OUTPUT: &str = "debug_output_final.png";

/// Preprocessor configuration
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub json: bool,
}

/// OCR runner configuration
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub image: PathBuf,
    /// Where to write the binarized image; `None` skips the write
    pub debug_output: Option<PathBuf>,
    pub engine: EngineConfig,
    /// Retry on the plain grayscale image when the first result is weak
    pub fallback: bool,
    pub json: bool,
}

/// Tesseract invocation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Explicit path to the tesseract binary. When unset the binary is
    /// searched on PATH and in common install locations.
    pub binary: Option<PathBuf>,
    /// Directory holding the `.traineddata` files
    pub tessdata_path: Option<PathBuf>,
    pub language: String,
    /// OCR engine mode (`--oem`)
    pub engine_mode: u8,
    /// Page segmentation mode (`--psm`)
    pub page_segmentation_mode: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: None,
            tessdata_path: None,
            language: "eng".to_string(),
            engine_mode: 3,
            page_segmentation_mode: 6,
        }
    }
}
