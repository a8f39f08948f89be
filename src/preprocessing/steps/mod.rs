//! Individual preprocessing steps

pub mod blur;
pub mod grayscale;
pub mod resize;
pub mod threshold;
