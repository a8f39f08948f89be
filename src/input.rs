//! Loading input images
//!
//! Both command-line tools go through these functions so that a missing file
//! and an undecodable file are reported the same way everywhere.

use crate::error::OcrError;
use crate::preprocessing::steps::grayscale;
use image::{DynamicImage, GrayImage, ImageReader};
use std::path::Path;

/// Load an image, checking that it exists and decodes
///
/// The format is guessed from the file content, so an image with a wrong or
/// missing extension still loads, and a text file renamed to `.png` does not.
pub fn load_image(path: &Path) -> Result<DynamicImage, OcrError> {
    if !path.exists() {
        tracing::debug!("Input {} does not exist", path.display());
        return Err(OcrError::ImageNotFound(path.to_path_buf()));
    }

    let decode_failed = |source: image::ImageError| {
        tracing::debug!("Could not decode {}: {}", path.display(), source);
        OcrError::DecodeFailed {
            path: path.to_path_buf(),
            source,
        }
    };

    let image = ImageReader::open(path)
        .map_err(|e| decode_failed(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_failed(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_failed)?;

    tracing::debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    Ok(image)
}

/// Load an image as single-channel 8-bit grayscale (BT.601 weights)
pub fn load_grayscale(path: &Path) -> Result<GrayImage, OcrError> {
    Ok(grayscale::to_luma(&load_image(path)?))
}
