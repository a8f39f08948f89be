use crate::error::OcrError;
use image::{DynamicImage, GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::filter::separable_filter_equal;

use super::blur::gaussian_kernel;

const WHITE: Luma<u8> = Luma([255u8]);
const BLACK: Luma<u8> = Luma([0u8]);

/// Adaptive thresholding against a Gaussian-weighted local mean
///
/// A pixel turns white when it is brighter than `mean - c`, where `mean` is
/// taken over a `block_size x block_size` neighborhood. Handles uneven
/// lighting better than a single global level.
pub fn adaptive_gaussian(
    image: DynamicImage,
    block_size: u32,
    c: i32,
) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let binarized = adaptive_gaussian_threshold(&gray, block_size, c)?;
    Ok(DynamicImage::ImageLuma8(binarized))
}

/// Global binary thresholding at the level picked by Otsu's method
pub fn otsu(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let level = otsu_level(&gray);
    tracing::debug!("Otsu threshold level: {}", level);
    Ok(DynamicImage::ImageLuma8(binary_threshold(&gray, level)))
}

fn adaptive_gaussian_threshold(
    img: &GrayImage,
    block_size: u32,
    c: i32,
) -> Result<GrayImage, OcrError> {
    if block_size < 3 || block_size % 2 == 0 {
        return Err(OcrError::PreprocessingError(format!(
            "Adaptive threshold block size must be odd and at least 3, got {}",
            block_size
        )));
    }

    // Borders are replicated; each pass truncates back to 8 bits
    let kernel = gaussian_kernel(block_size)?;
    let means = separable_filter_equal(img, &kernel);

    Ok(GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let pixel = img.get_pixel(x, y).0[0] as i32;
        let mean = means.get_pixel(x, y).0[0] as i32;
        if pixel > mean - c {
            WHITE
        } else {
            BLACK
        }
    }))
}

fn binary_threshold(img: &GrayImage, level: u8) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        if img.get_pixel(x, y).0[0] > level {
            WHITE
        } else {
            BLACK
        }
    })
}
