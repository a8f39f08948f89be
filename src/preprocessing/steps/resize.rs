use crate::error::OcrError;
use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Scale both dimensions by `factor` with linear interpolation
/// Upscaling small text gives the OCR engine more pixels per glyph
pub fn apply(image: DynamicImage, factor: f32) -> Result<DynamicImage, OcrError> {
    let (width, height) = image.dimensions();

    let new_width = (width as f32 * factor).round() as u32;
    let new_height = (height as f32 * factor).round() as u32;

    if new_width == 0 || new_height == 0 {
        return Err(OcrError::PreprocessingError(format!(
            "Cannot resize {}x{} image by {}",
            width, height, factor
        )));
    }

    Ok(image.resize_exact(new_width, new_height, FilterType::Triangle))
}
