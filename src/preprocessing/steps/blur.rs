use crate::error::OcrError;
use image::{DynamicImage, GrayImage, Luma};

/// Apply a Gaussian blur with a square `kernel_size` kernel
/// Sigma is derived from the kernel size
pub fn apply(image: DynamicImage, kernel_size: u32) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let blurred = gaussian_blur(&gray, kernel_size)?;
    Ok(DynamicImage::ImageLuma8(blurred))
}

/// Gaussian blur of a grayscale image, rounded back to 8 bits
///
/// Borders are reflected without repeating the edge pixel (`dcb|abcd|cba`).
pub fn gaussian_blur(img: &GrayImage, kernel_size: u32) -> Result<GrayImage, OcrError> {
    let kernel = gaussian_kernel(kernel_size)?;
    let smoothed = convolve_separable(img, &kernel);
    let (width, height) = img.dimensions();

    Ok(GrayImage::from_fn(width, height, |x, y| {
        let value = smoothed[(y * width + x) as usize];
        Luma([value.round().clamp(0.0, 255.0) as u8])
    }))
}

/// 1-D Gaussian kernel of odd length `size`, normalized to sum to 1
///
/// Small kernels use the fixed binomial weights; larger ones use
/// sigma = 0.3 * ((size - 1) * 0.5 - 1) + 0.8.
pub fn gaussian_kernel(size: u32) -> Result<Vec<f32>, OcrError> {
    if size == 0 || size % 2 == 0 {
        return Err(OcrError::PreprocessingError(format!(
            "Gaussian kernel size must be odd and positive, got {}",
            size
        )));
    }

    match size {
        1 => return Ok(vec![1.0]),
        3 => return Ok(vec![0.25, 0.5, 0.25]),
        5 => return Ok(vec![0.0625, 0.25, 0.375, 0.25, 0.0625]),
        7 => {
            return Ok(vec![
                0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
            ])
        }
        _ => {}
    }

    let sigma = 0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (size / 2) as f64;
    let raw: Vec<f64> = (0..size)
        .map(|i| {
            let x = i as f64 - center;
            (-(x * x) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = raw.iter().sum();

    Ok(raw.iter().map(|w| (w / sum) as f32).collect())
}

/// Convolve rows then columns with the same kernel, keeping full precision
///
/// Returns a row-major buffer of `width * height` values.
pub fn convolve_separable(img: &GrayImage, kernel: &[f32]) -> Vec<f32> {
    let (width, height) = img.dimensions();
    let (w, h) = (width as usize, height as usize);
    let radius = (kernel.len() / 2) as i64;
    let src: Vec<f32> = img.as_raw().iter().map(|&v| v as f32).collect();

    let mut horizontal = vec![0.0f32; w * h];
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        for x in 0..w {
            horizontal[y * w + x] = kernel
                .iter()
                .enumerate()
                .map(|(k, weight)| {
                    let sx = border_index(x as i64 + k as i64 - radius, w);
                    weight * row[sx]
                })
                .sum();
        }
    }

    let mut out = vec![0.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            out[y * w + x] = kernel
                .iter()
                .enumerate()
                .map(|(k, weight)| {
                    let sy = border_index(y as i64 + k as i64 - radius, h);
                    weight * horizontal[sy * w + x]
                })
                .sum();
        }
    }

    out
}

/// Reflect a possibly out-of-range coordinate back into `0..len`
fn border_index(i: i64, len: usize) -> usize {
    let len = len as i64;
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let mut i = i.rem_euclid(period);
    if i >= len {
        i = period - i;
    }
    i as usize
}
