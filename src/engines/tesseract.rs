//! Tesseract engine implementation
//!
//! Runs the `tesseract` command-line program as a child process. The binary is
//! taken from configuration when given, otherwise searched on PATH and in the
//! usual install locations.

use crate::config::EngineConfig;
use crate::engine::{OcrEngine, OcrResult};
use crate::error::OcrError;
use image::{GrayImage, ImageFormat};
use std::ffi::{OsStr, OsString};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Install locations checked after PATH
const INSTALL_DIRS: &[&str] = &[
    "/usr/bin",
    "/usr/local/bin",
    "/opt/homebrew/bin",
    "/opt/local/bin",
    r"C:\Program Files\Tesseract-OCR",
    r"C:\Program Files (x86)\Tesseract-OCR",
];

/// Tesseract OCR Engine
pub struct TesseractEngine {
    /// Resolved path of the tesseract executable
    binary: PathBuf,
    config: EngineConfig,
}

impl TesseractEngine {
    /// Create an engine, locating the tesseract binary
    pub fn new(config: &EngineConfig) -> Result<Self, OcrError> {
        let binary = locate_binary(config.binary.as_deref())?;

        tracing::info!(
            "Using tesseract at {} (language: {}, oem: {}, psm: {})",
            binary.display(),
            config.language,
            config.engine_mode,
            config.page_segmentation_mode
        );

        Ok(Self {
            binary,
            config: config.clone(),
        })
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Arguments for `tesseract <input> stdout [options]`
    fn command_args(&self, input: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            input.as_os_str().to_os_string(),
            "stdout".into(),
            "--oem".into(),
            self.config.engine_mode.to_string().into(),
            "--psm".into(),
            self.config.page_segmentation_mode.to_string().into(),
            "-l".into(),
            self.config.language.clone().into(),
        ];

        if let Some(tessdata) = &self.config.tessdata_path {
            args.push("--tessdata-dir".into());
            args.push(tessdata.as_os_str().to_os_string());
        }

        args
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn description(&self) -> &'static str {
        "Tesseract OCR command-line engine"
    }

    fn recognize(&self, image: &GrayImage) -> Result<OcrResult, OcrError> {
        // Tesseract reads from a file; the PNG is removed when `input` drops
        let mut input = tempfile::Builder::new()
            .prefix("material-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Internal(format!("Failed to create temp file: {}", e)))?;

        image
            .write_to(input.as_file_mut(), ImageFormat::Png)
            .map_err(|e| OcrError::Internal(format!("Failed to encode image as PNG: {}", e)))?;
        input
            .flush()
            .map_err(|e| OcrError::Internal(format!("Failed to write temp file: {}", e)))?;

        let args = self.command_args(input.path());
        tracing::debug!(
            "Running {} {:?} on {}x{} image",
            self.binary.display(),
            args,
            image.width(),
            image.height()
        );

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|e| {
                tracing::debug!("Could not spawn {}: {}", self.binary.display(), e);
                match e.kind() {
                    ErrorKind::NotFound => OcrError::EngineNotFound {
                        searched: vec![self.binary.clone()],
                    },
                    _ => OcrError::EngineNotStarted {
                        path: self.binary.clone(),
                        source: e,
                    },
                }
            })?;

        if !output.status.success() {
            return Err(OcrError::EngineFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::debug!("Tesseract returned {} chars", text.len());

        Ok(OcrResult { text })
    }
}

/// Find the tesseract executable
///
/// An explicit path is used as is (a bare name is looked up on PATH) and is
/// never silently replaced by another install.
pub fn locate_binary(explicit: Option<&Path>) -> Result<PathBuf, OcrError> {
    let install_dirs: Vec<PathBuf> = INSTALL_DIRS.iter().map(PathBuf::from).collect();
    locate_binary_in(explicit, std::env::var_os("PATH").as_deref(), &install_dirs)
}

fn locate_binary_in(
    explicit: Option<&Path>,
    path_var: Option<&OsStr>,
    install_dirs: &[PathBuf],
) -> Result<PathBuf, OcrError> {
    let path_dirs: Vec<PathBuf> = path_var
        .map(|p| std::env::split_paths(p).collect())
        .unwrap_or_default();

    if let Some(explicit) = explicit {
        if explicit.is_file() {
            return Ok(explicit.to_path_buf());
        }
        if is_bare_name(explicit) {
            let names = [explicit.as_os_str().to_os_string()];
            return search(&path_dirs, &names);
        }
        return Err(OcrError::EngineNotFound {
            searched: vec![explicit.to_path_buf()],
        });
    }

    let names = executable_names();
    let dirs: Vec<PathBuf> = path_dirs
        .into_iter()
        .chain(install_dirs.iter().cloned())
        .collect();
    search(&dirs, &names)
}

fn search(dirs: &[PathBuf], names: &[OsString]) -> Result<PathBuf, OcrError> {
    let mut searched = Vec::new();
    for dir in dirs {
        for name in names {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Ok(candidate);
            }
            searched.push(candidate);
        }
    }
    Err(OcrError::EngineNotFound { searched })
}

fn is_bare_name(path: &Path) -> bool {
    path.components().count() == 1 && path.parent() == Some(Path::new(""))
}

fn executable_names() -> Vec<OsString> {
    if cfg!(windows) {
        vec!["tesseract.exe".into(), "tesseract".into()]
    } else {
        vec!["tesseract".into()]
    }
}
