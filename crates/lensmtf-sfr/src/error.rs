use lensmtf_image::{ImageError, ImageSize};

use crate::roi::Roi;

/// An error type for the sfr module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SfrError {
    /// The region of interest is empty after normalization.
    #[error("Invalid region of interest {roi}: {reason}")]
    InvalidRoi {
        /// The offending region, normalized.
        roi: Roi,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The region of interest reaches outside the frame.
    #[error("Region of interest {roi} is outside the frame ({size})")]
    RoiOutOfBounds {
        /// The offending region, normalized.
        roi: Roi,
        /// The size of the frame.
        size: ImageSize,
    },

    /// The prepared patch is too small for the dyadic inspection window.
    #[error("Patch of {0} is too small, at least 2x2 pixels are required")]
    PatchTooSmall(ImageSize),

    /// The patch has no edge contrast, so its spectrum cannot be normalized.
    #[error("Degenerate patch: no edge contrast to measure")]
    DegeneratePatch,

    /// The oversampling rate is 0 or too large to bin with.
    #[error("Oversampling rate must be in 1..=1024, got {0}")]
    InvalidOversamplingRate(usize),

    /// A region of interest could not be parsed from text.
    #[error("Cannot parse region of interest from {0:?}, expected x1,y1,x2,y2")]
    RoiParse(String),

    /// Error from the image layer.
    #[error(transparent)]
    Image(#[from] ImageError),
}

impl SfrError {
    /// Whether the error belongs to the invalid region-of-interest class, i.e.
    /// the region itself (not its content) makes the measurement impossible.
    pub fn is_invalid_roi(&self) -> bool {
        matches!(
            self,
            SfrError::InvalidRoi { .. }
                | SfrError::RoiOutOfBounds { .. }
                | SfrError::PatchTooSmall(_)
        )
    }
}
