#![deny(missing_docs)]
//! Slanted-edge spatial frequency response (SFR) measurement.
//!
//! Given a region of a frame that contains one slightly tilted dark/light
//! edge, the estimator recovers the modulation transfer function (MTF) of the
//! imaging system along the edge normal and reports MTF50, the frequency at
//! which contrast falls to one half.
//!
//! The computation runs in four stages:
//!
//! - [`esf`]: per-row edge location, a least-squares edge line, and re-binning
//!   of every pixel by its distance to that line into an oversampled edge
//!   spread function (ESF).
//! - [`lsf`]: the line spread function (LSF), a centred difference of the ESF.
//! - [`spectrum`]: Hamming-windowed DFT magnitude of the LSF, normalized by DC.
//! - [`mtf`]: bin-width correction of the spectrum and the first 0.5 crossing.
//!
//! # Example
//!
//! ```
//! use lensmtf_image::{Image, ImageSize};
//! use lensmtf_sfr::{compute_mtf50, Roi};
//!
//! // a dark/bright edge running left to right, rising 1 pixel every 6 columns
//! let (width, height) = (48, 40);
//! let data = (0..height)
//!     .flat_map(|y| {
//!         (0..width).map(move |x| {
//!             let edge = 20.0 + x as f64 / 6.0;
//!             (255.0 * (y as f64 + 0.5 - edge).clamp(0.0, 1.0)) as u8
//!         })
//!     })
//!     .collect();
//! let frame = Image::<u8, 1>::new(ImageSize { width, height }, data).unwrap();
//!
//! let mtf50 = compute_mtf50(&frame, Roi::new(48, 40, 0, 0), 4).unwrap();
//! assert!(mtf50 > 0.0 && mtf50 < 1.0);
//! ```

mod batch;
mod config;
mod error;
mod estimator;
mod patch;
mod roi;
mod threshold;

pub mod esf;

/// line spread function derivation.
pub mod lsf;

/// MTF curve and MTF50 extraction.
pub mod mtf;

/// spectral transform of the line spread function.
pub mod spectrum;

pub use crate::batch::{measure_rois, MeasurementTable, RoiMeasurement, TableEntry, TableRow};
pub use crate::config::{
    EdgeOrientation, SfrConfig, DEFAULT_OVERSAMPLING_RATE, MAX_OVERSAMPLING_RATE,
};
pub use crate::error::SfrError;
pub use crate::estimator::{compute_mtf50, SfrEstimator, SfrReport};
pub use crate::patch::{Patch, PatchSource};
pub use crate::roi::Roi;
pub use crate::threshold::{Threshold, Verdict};
