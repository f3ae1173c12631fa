use serde::{Deserialize, Serialize};

use crate::error::SfrError;
use crate::estimator::SfrReport;

/// Outcome of comparing one measurement with a [`Threshold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// MTF50 reached the threshold.
    Pass,
    /// MTF50 stayed below the threshold.
    Fail,
    /// The measurement itself failed.
    Error,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// Minimum acceptable MTF50 for a region.
///
/// # Example
///
/// ```
/// use lensmtf_sfr::{Threshold, Verdict};
///
/// let threshold = Threshold::new(0.3);
/// assert_eq!(threshold.verdict(0.35), Verdict::Pass);
/// assert_eq!(threshold.verdict(0.25), Verdict::Fail);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Lowest MTF50 that passes.
    pub min_mtf50: f64,
}

impl Threshold {
    /// Create a threshold.
    pub fn new(min_mtf50: f64) -> Self {
        Self { min_mtf50 }
    }

    /// Compare an MTF50 value with the threshold; the threshold itself passes.
    pub fn verdict(&self, mtf50: f64) -> Verdict {
        if mtf50 >= self.min_mtf50 {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    /// Compare a measurement outcome with the threshold.
    pub fn verdict_for(&self, result: &Result<SfrReport, SfrError>) -> Verdict {
        match result {
            Ok(report) => self.verdict(report.mtf50),
            Err(_) => Verdict::Error,
        }
    }
}
