use serde::{Deserialize, Serialize};

use crate::config::SfrConfig;
use crate::error::SfrError;
use crate::esf::{extract_esf, EdgeFit};
use crate::lsf::lsf_from_esf;
use crate::mtf::{frequency, mtf50_from_mtf, mtf_from_sfr};
use crate::patch::{Patch, PatchSource};
use crate::roi::Roi;
use crate::spectrum::sfr_from_lsf;

/// Result of one slanted-edge measurement.
///
/// Besides MTF50, the intermediate curves are kept for plotting and diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SfrReport {
    /// Fractional frequency at which the MTF first falls below 0.5, or 0 if it never does.
    pub mtf50: f64,
    /// The fitted edge line in patch coordinates.
    pub edge: EdgeFit,
    /// Edge spread function.
    pub esf: Vec<f64>,
    /// Line spread function.
    pub lsf: Vec<f64>,
    /// Spatial frequency response, normalized so that `sfr[0] == 1.0`.
    pub sfr: Vec<f64>,
    /// MTF curve.
    pub mtf: Vec<f64>,
}

impl SfrReport {
    /// Fractional frequency of every MTF sample, from 0 to 1.
    pub fn frequencies(&self) -> impl Iterator<Item = f64> + '_ {
        let len = self.mtf.len();
        (0..len).map(move |idx| frequency(idx, len))
    }

    /// Whether the MTF curve ever crossed 0.5.
    pub fn has_crossing(&self) -> bool {
        self.mtf50 > 0.0
    }
}

/// Slanted-edge SFR estimator.
///
/// The estimator holds only its settings; every call allocates its own
/// buffers, so one instance can be shared across threads.
///
/// # Example
///
/// ```
/// use lensmtf_image::{Image, ImageSize};
/// use lensmtf_sfr::{EdgeOrientation, Roi, SfrConfig, SfrEstimator};
///
/// // a dark-to-bright edge running top to bottom, leaning by 1 pixel every 8 rows
/// let (width, height) = (40, 32);
/// let data = (0..height)
///     .flat_map(|y| {
///         let edge = 20.0 + y as f64 / 8.0;
///         (0..width).map(move |x| 20.0 + 180.0 * (x as f64 + 0.5 - edge).clamp(0.0, 1.0))
///     })
///     .collect();
/// let frame = Image::<f64, 1>::new(ImageSize { width, height }, data).unwrap();
///
/// let config = SfrConfig::default().with_orientation(EdgeOrientation::Vertical);
/// let estimator = SfrEstimator::new(config).unwrap();
/// let report = estimator.estimate(&frame, Roi::new(0, 0, 40, 32)).unwrap();
///
/// assert!(report.mtf50 > 0.0 && report.mtf50 < 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SfrEstimator {
    config: SfrConfig,
}

impl SfrEstimator {
    /// Create an estimator.
    ///
    /// # Errors
    ///
    /// [`SfrError::InvalidOversamplingRate`] if the oversampling rate is 0 or
    /// above [`crate::MAX_OVERSAMPLING_RATE`].
    pub fn new(config: SfrConfig) -> Result<Self, SfrError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The settings of the estimator.
    pub fn config(&self) -> &SfrConfig {
        &self.config
    }

    /// Measure the edge inside `roi` of `frame`.
    ///
    /// # Arguments
    ///
    /// * `frame` - Grayscale or RGB8 frame.
    /// * `roi` - Region containing one slanted edge; corners may be in any order.
    ///
    /// # Errors
    ///
    /// * [`SfrError::InvalidRoi`], [`SfrError::RoiOutOfBounds`] or
    ///   [`SfrError::PatchTooSmall`] if the region cannot be measured.
    /// * [`SfrError::DegeneratePatch`] if the region shows no edge contrast.
    pub fn estimate<S>(&self, frame: &S, roi: Roi) -> Result<SfrReport, SfrError>
    where
        S: PatchSource + ?Sized,
    {
        let patch = frame.prepare_patch(roi, self.config.orientation)?;
        self.estimate_patch(&patch)
    }

    /// Measure a patch that is already cropped and oriented.
    pub fn estimate_patch(&self, patch: &Patch) -> Result<SfrReport, SfrError> {
        let rate = self.config.oversampling_rate;

        let esf = extract_esf(patch, rate)?;
        let lsf = lsf_from_esf(&esf.values);
        let sfr = sfr_from_lsf(&lsf)?;
        let mtf = mtf_from_sfr(&sfr, rate);
        let mtf50 = mtf50_from_mtf(&mtf);

        log::debug!(
            "patch {}x{}: mtf50={:.4} over {} mtf samples",
            patch.cols(),
            patch.rows(),
            mtf50,
            mtf.len()
        );

        Ok(SfrReport {
            mtf50,
            edge: esf.edge,
            esf: esf.values,
            lsf,
            sfr,
            mtf,
        })
    }
}

/// Compute the MTF50 of the edge inside `roi` with the default edge orientation.
///
/// # Arguments
///
/// * `frame` - Grayscale or RGB8 frame.
/// * `roi` - Region containing one slanted edge; corners may be in any order.
/// * `oversampling_rate` - Number of sub-pixel bins per source pixel, usually 4.
pub fn compute_mtf50<S>(frame: &S, roi: Roi, oversampling_rate: usize) -> Result<f64, SfrError>
where
    S: PatchSource + ?Sized,
{
    let config = SfrConfig::default().with_oversampling_rate(oversampling_rate);
    let report = SfrEstimator::new(config)?.estimate(frame, roi)?;
    Ok(report.mtf50)
}
