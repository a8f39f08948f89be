use crate::error::OcrError;
use image::DynamicImage;
use serde::Serialize;
use std::time::Instant;

use super::steps;

/// Gaussian kernel used by the adaptive pipeline to suppress noise
const ADAPTIVE_BLUR_KERNEL: u32 = 5;
/// Neighborhood for the local mean
const ADAPTIVE_BLOCK_SIZE: u32 = 11;
/// Subtracted from the local mean
const ADAPTIVE_C: i32 = 2;

const OTSU_SCALE: f32 = 2.0;
const OTSU_BLUR_KERNEL: u32 = 3;

/// The fixed preprocessing pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Used by `preprocess`
    /// Steps: grayscale, blur 5x5, adaptive Gaussian threshold (11, 2)
    Adaptive,
    /// Used by `ocr_processor`
    /// Steps: grayscale, resize x2, blur 3x3, Otsu threshold
    Otsu,
}

impl Preset {
    /// Get the preset name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adaptive => "adaptive",
            Self::Otsu => "otsu",
        }
    }
}

/// Timing information for a single preprocessing step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of preprocessing including timing stats
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessingResult {
    /// Preprocessed image (not serialized)
    #[serde(skip)]
    pub image: DynamicImage,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Preset used
    pub preset: String,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Preprocessing pipeline that applies the steps of a preset in order
pub struct Pipeline {
    preset: Preset,
}

impl Pipeline {
    pub fn new(preset: Preset) -> Self {
        Self { preset }
    }

    /// Process an image according to the configured preset
    pub fn process(&self, image: DynamicImage) -> Result<PreprocessingResult, OcrError> {
        let start = Instant::now();
        let mut steps_timing = Vec::new();

        let mut img = self.run_step("grayscale", image, &mut steps_timing, steps::grayscale::apply)?;

        match self.preset {
            Preset::Adaptive => {
                img = self.run_step("blur", img, &mut steps_timing, |img| {
                    steps::blur::apply(img, ADAPTIVE_BLUR_KERNEL)
                })?;
                img = self.run_step("adaptive_threshold", img, &mut steps_timing, |img| {
                    steps::threshold::adaptive_gaussian(img, ADAPTIVE_BLOCK_SIZE, ADAPTIVE_C)
                })?;
            }
            Preset::Otsu => {
                img = self.run_step("resize", img, &mut steps_timing, |img| {
                    steps::resize::apply(img, OTSU_SCALE)
                })?;
                img = self.run_step("blur", img, &mut steps_timing, |img| {
                    steps::blur::apply(img, OTSU_BLUR_KERNEL)
                })?;
                img = self.run_step("otsu_threshold", img, &mut steps_timing, steps::threshold::otsu)?;
            }
        }

        let total_time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            "Preprocessing ({}) finished in {}ms, output {}x{}",
            self.preset.as_str(),
            total_time_ms,
            img.width(),
            img.height()
        );

        Ok(PreprocessingResult {
            image: img,
            total_time_ms,
            preset: self.preset.as_str().to_string(),
            steps: steps_timing,
        })
    }

    fn run_step<F>(
        &self,
        name: &str,
        img: DynamicImage,
        timings: &mut Vec<StepTiming>,
        step_fn: F,
    ) -> Result<DynamicImage, OcrError>
    where
        F: FnOnce(DynamicImage) -> Result<DynamicImage, OcrError>,
    {
        let step_start = Instant::now();
        let result = step_fn(img)?;
        let time_ms = step_start.elapsed().as_millis() as u64;
        tracing::debug!("Step {} took {}ms", name, time_ms);
        timings.push(StepTiming {
            name: name.to_string(),
            time_ms,
        });
        Ok(result)
    }
}
