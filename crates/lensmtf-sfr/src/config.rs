use serde::{Deserialize, Serialize};

use crate::error::SfrError;

/// Default number of sub-pixel bins per source pixel.
pub const DEFAULT_OVERSAMPLING_RATE: usize = 4;

/// Largest accepted oversampling rate; finer bins than this only add empty bins.
pub const MAX_OVERSAMPLING_RATE: usize = 1024;

/// Direction of the edge inside the region of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOrientation {
    /// The edge runs left to right; the crop is rotated 90 degrees
    /// counter-clockwise so that the transition lies along the rows.
    #[default]
    Horizontal,
    /// The edge runs top to bottom; the crop is scanned as-is.
    Vertical,
}

/// Settings of the slanted-edge estimator.
///
/// # Example
///
/// ```
/// use lensmtf_sfr::{EdgeOrientation, SfrConfig};
///
/// let config = SfrConfig::default()
///     .with_oversampling_rate(8)
///     .with_orientation(EdgeOrientation::Vertical);
///
/// assert_eq!(config.oversampling_rate, 8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SfrConfig {
    /// Number of sub-pixel bins per source pixel used to build the edge profile.
    pub oversampling_rate: usize,
    /// Direction of the edge inside the region of interest.
    pub orientation: EdgeOrientation,
}

impl Default for SfrConfig {
    fn default() -> Self {
        Self {
            oversampling_rate: DEFAULT_OVERSAMPLING_RATE,
            orientation: EdgeOrientation::default(),
        }
    }
}

impl SfrConfig {
    /// Set the oversampling rate.
    pub fn with_oversampling_rate(mut self, oversampling_rate: usize) -> Self {
        self.oversampling_rate = oversampling_rate;
        self
    }

    /// Set the edge orientation.
    pub fn with_orientation(mut self, orientation: EdgeOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Check that the settings can drive an estimation.
    pub fn validate(&self) -> Result<(), SfrError> {
        if self.oversampling_rate == 0 || self.oversampling_rate > MAX_OVERSAMPLING_RATE {
            return Err(SfrError::InvalidOversamplingRate(self.oversampling_rate));
        }
        Ok(())
    }
}
