//! Measuring several regions of one frame, and collecting the results of
//! several captures (zoom positions, chart faces) into one table.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::SfrError;
use crate::estimator::{SfrEstimator, SfrReport};
use crate::patch::PatchSource;
use crate::roi::Roi;
use crate::threshold::{Threshold, Verdict};

/// Outcome of measuring one region of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiMeasurement {
    /// Position of the region in the input list.
    pub index: usize,
    /// The region as given by the caller.
    pub roi: Roi,
    /// The measurement, or why it failed.
    pub result: Result<SfrReport, SfrError>,
}

impl RoiMeasurement {
    /// The MTF50 of a successful measurement.
    pub fn mtf50(&self) -> Option<f64> {
        self.result.as_ref().ok().map(|r| r.mtf50)
    }
}

/// Measure every region of `frame` in parallel.
///
/// Regions are independent: a failing region is reported in its own entry and
/// does not stop the others. The output keeps the order of `rois`.
///
/// # Example
///
/// ```
/// use lensmtf_image::Image;
/// use lensmtf_sfr::{measure_rois, Roi, SfrEstimator};
///
/// let frame = Image::<u8, 1>::from_size_val([32, 32].into(), 128).unwrap();
/// let rois = [Roi::new(0, 0, 16, 16), Roi::new(0, 0, 64, 16)];
///
/// let measurements = measure_rois(&SfrEstimator::default(), &frame, &rois);
///
/// assert_eq!(measurements.len(), 2);
/// assert!(measurements.iter().all(|m| m.result.is_err()));
/// ```
pub fn measure_rois<S>(estimator: &SfrEstimator, frame: &S, rois: &[Roi]) -> Vec<RoiMeasurement>
where
    S: PatchSource + ?Sized,
{
    rois.par_iter()
        .enumerate()
        .map(|(index, &roi)| {
            let result = estimator.estimate(frame, roi);
            if let Err(err) = &result {
                log::warn!("roi #{} {}: {}", index + 1, roi, err);
            }
            RoiMeasurement { index, roi, result }
        })
        .collect()
}

/// One region of one table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableEntry {
    /// The measured region.
    pub roi: Roi,
    /// MTF50, if the measurement succeeded.
    pub mtf50: Option<f64>,
    /// Error message, if the measurement failed.
    pub error: Option<String>,
    /// Comparison with the table threshold, if one is set.
    pub verdict: Option<Verdict>,
}

/// The measurements of one capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Name of the capture, e.g. a zoom position or a chart face.
    pub label: String,
    /// One entry per region, in region order.
    pub entries: Vec<TableEntry>,
}

impl TableRow {
    /// Whether every region of the row passed; `None` without a threshold.
    pub fn passed(&self) -> Option<bool> {
        self.entries
            .iter()
            .map(|e| e.verdict.map(|v| v == Verdict::Pass))
            .collect::<Option<Vec<_>>>()
            .map(|v| v.into_iter().all(|p| p))
    }
}

/// Results of several captures, one labelled row each.
///
/// # Example
///
/// ```
/// use lensmtf_sfr::{MeasurementTable, Roi, RoiMeasurement, SfrError};
///
/// let mut table = MeasurementTable::default();
/// table.record(
///     "0°",
///     &[RoiMeasurement {
///         index: 0,
///         roi: Roi::new(0, 0, 8, 8),
///         result: Err(SfrError::DegeneratePatch),
///     }],
/// );
///
/// assert_eq!(table.lines(), vec!["0°: MTF1=ERR".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeasurementTable {
    threshold: Option<Threshold>,
    rows: Vec<TableRow>,
}

impl MeasurementTable {
    /// Create an empty table whose entries are judged against `threshold`.
    pub fn with_threshold(threshold: Threshold) -> Self {
        Self {
            threshold: Some(threshold),
            rows: Vec::new(),
        }
    }

    /// The rows of the table in insertion order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Store the measurements of one capture under `label`.
    ///
    /// Recording a label again replaces its previous row in place.
    pub fn record(&mut self, label: &str, measurements: &[RoiMeasurement]) {
        let entries = measurements
            .iter()
            .map(|m| TableEntry {
                roi: m.roi,
                mtf50: m.mtf50(),
                error: m.result.as_ref().err().map(|e| e.to_string()),
                verdict: self.threshold.map(|t| t.verdict_for(&m.result)),
            })
            .collect();

        let row = TableRow {
            label: label.to_string(),
            entries,
        };

        match self.rows.iter_mut().find(|r| r.label == label) {
            Some(existing) => *existing = row,
            None => self.rows.push(row),
        }
    }

    /// Remove every row.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Render each row as `label: MTF1=0.42 MTF2=ERR ...`, with the verdict
    /// appended to each value when a threshold is set.
    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                let cells = row
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| {
                        let value = match e.mtf50 {
                            Some(v) => format!("MTF{}={:.2}", i + 1, v),
                            None => format!("MTF{}=ERR", i + 1),
                        };
                        match e.verdict {
                            Some(verdict) if e.mtf50.is_some() => format!("{value} ({verdict})"),
                            _ => value,
                        }
                    })
                    .collect::<Vec<_>>();
                format!("{}: {}", row.label, cells.join(" "))
            })
            .collect()
    }
}
