use crate::error::OcrError;
use image::{DynamicImage, GrayImage, Luma};

/// BT.601 weights in 14-bit fixed point (0.299, 0.587, 0.114)
const RED_WEIGHT: u32 = 4899;
const GREEN_WEIGHT: u32 = 9617;
const BLUE_WEIGHT: u32 = 1868;
const WEIGHT_SHIFT: u32 = 14;

/// Reduce an image to a single 8-bit luma channel, dropping any alpha
/// Images that are already 8-bit grayscale pass through untouched
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    match image {
        DynamicImage::ImageLuma8(_) => Ok(image),
        other => Ok(DynamicImage::ImageLuma8(to_luma(&other))),
    }
}

/// Convert to 8-bit luma with BT.601 weights
///
/// `image`'s own `into_luma8` uses Rec. 709 weights, which makes pure red
/// and blue noticeably darker than scanners and most OCR tooling expect.
pub fn to_luma(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => image.to_luma8(),
        _ => {
            let rgb = image.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                Luma([bt601(r, g, b)])
            })
        }
    }
}

fn bt601(r: u8, g: u8, b: u8) -> u8 {
    let weighted =
        u32::from(r) * RED_WEIGHT + u32::from(g) * GREEN_WEIGHT + u32::from(b) * BLUE_WEIGHT;
    ((weighted + (1 << (WEIGHT_SHIFT - 1))) >> WEIGHT_SHIFT).min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_grayscale_converts_color() {
        let mut img = RgbImage::new(10, 10);
        img.put_pixel(0, 0, Rgb([255, 255, 255]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));

        let result = apply(DynamicImage::ImageRgb8(img)).unwrap();
        let gray = result.as_luma8().expect("expected an 8-bit luma image");

        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
        assert_eq!(gray.get_pixel(1, 0).0[0], 150);
        assert_eq!(gray.get_pixel(2, 0).0[0], 0);
    }

    #[test]
    fn test_grayscale_uses_bt601_weights() {
        let mut img = RgbImage::new(3, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 255]));
        img.put_pixel(2, 0, Rgb([200, 120, 40]));

        let result = apply(DynamicImage::ImageRgb8(img)).unwrap();
        let gray = result.to_luma8();

        assert_eq!(gray.get_pixel(0, 0).0[0], 76);
        assert_eq!(gray.get_pixel(1, 0).0[0], 29);
        // 0.299 * 200 + 0.587 * 120 + 0.114 * 40 = 135.0
        assert_eq!(gray.get_pixel(2, 0).0[0], 135);
    }

    #[test]
    fn test_grayscale_drops_alpha() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 0]));
        let result = apply(DynamicImage::ImageRgba8(img)).unwrap();
        assert!(result.as_luma8().is_some());
        assert_eq!(result.to_luma8().get_pixel(0, 0).0[0], 76);
    }

    #[test]
    fn test_grayscale_passes_luma_through() {
        let img = GrayImage::from_pixel(3, 7, Luma([42]));
        let result = apply(DynamicImage::ImageLuma8(img.clone())).unwrap();
        assert_eq!(result.to_luma8(), img);
    }
}
