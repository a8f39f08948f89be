use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Image not found")]
    ImageNotFound(PathBuf),

    #[error("Failed to read image")]
    DecodeFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Tesseract not found (searched: {})", display_paths(.searched))]
    EngineNotFound { searched: Vec<PathBuf> },

    #[error("Tesseract at {} could not be started: {source}", .path.display())]
    EngineNotStarted {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("OCR engine failed ({status}): {stderr}")]
    EngineFailed { status: String, stderr: String },

    #[error("Preprocessing failed: {0}")]
    PreprocessingError(String),

    #[error("Failed to write image to {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of an [`OcrError`], used to pick the process exit code.
///
/// `Input` and `EngineUnavailable` are the ones a user can fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    EngineUnavailable,
    Processing,
}

impl ErrorKind {
    pub fn code(&self) -> u8 {
        match self {
            ErrorKind::Input => 1,
            ErrorKind::EngineUnavailable => 2,
            ErrorKind::Processing => 3,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl OcrError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OcrError::ImageNotFound(_) | OcrError::DecodeFailed { .. } => ErrorKind::Input,
            OcrError::EngineNotFound { .. } | OcrError::EngineNotStarted { .. } => {
                ErrorKind::EngineUnavailable
            }
            OcrError::EngineFailed { .. }
            | OcrError::PreprocessingError(_)
            | OcrError::WriteFailed { .. }
            | OcrError::Internal(_) => ErrorKind::Processing,
        }
    }
}

/// Print `ERROR: <message>` on stderr and pick the exit code for `err`
///
/// Errors that are not an [`OcrError`] count as processing failures.
pub fn report(err: &anyhow::Error) -> ExitCode {
    eprintln!("ERROR: {}", err);
    match err.downcast_ref::<OcrError>() {
        Some(ocr_error) => ocr_error.kind().exit_code(),
        None => ErrorKind::Processing.exit_code(),
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
