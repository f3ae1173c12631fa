//! Edge spread function extraction.
//!
//! Each row of the patch contributes a whole-pixel estimate of where the edge
//! crosses it. A least-squares line through those estimates models the slant
//! of the edge, and every pixel is then re-binned by its signed distance to
//! that line into a profile sampled at `1 / oversampling_rate` pixel pitch.

use serde::{Deserialize, Serialize};

use crate::config::MAX_OVERSAMPLING_RATE;
use crate::error::SfrError;
use crate::patch::{ensure_patch_size, Patch};

/// The strongest transition found in one row of a patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowEdge {
    /// Column of the second pixel of the strongest transition.
    pub column: usize,
    /// Absolute intensity difference across the transition.
    pub strength: f64,
}

/// Straight-line model of the edge: `column = row * slope + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeFit {
    /// Change of the edge column per row.
    pub slope: f64,
    /// Edge column at row 0.
    pub intercept: f64,
}

impl EdgeFit {
    /// Column of the edge at `row`.
    pub fn column_at(&self, row: f64) -> f64 {
        row * self.slope + self.intercept
    }
}

/// An edge spread function together with the edge model it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Esf {
    /// Averaged intensity per sub-pixel bin, `window * oversampling_rate + 2` samples.
    pub values: Vec<f64>,
    /// Number of pixels that landed in each bin.
    pub hits: Vec<usize>,
    /// The fitted edge line.
    pub edge: EdgeFit,
    /// Width of the dyadic inspection window in pixels.
    pub window: usize,
}

/// Locate the strongest transition of every row.
///
/// The transition between columns `i - 1` and `i` is reported at `i`; ties
/// keep the lowest column and a flat row reports column 0 with zero strength.
///
/// # Example
///
/// ```
/// use lensmtf_image::Image;
/// use lensmtf_sfr::esf::locate_edges;
///
/// let patch = Image::<f64, 1>::new([4, 2].into(), vec![
///     0.0, 0.0, 9.0, 9.0,
///     0.0, 5.0, 5.0, 5.0,
/// ]).unwrap();
///
/// let edges = locate_edges(&patch);
/// assert_eq!(edges[0].column, 2);
/// assert_eq!(edges[1].column, 1);
/// ```
pub fn locate_edges(patch: &Patch) -> Vec<RowEdge> {
    patch
        .rows_iter()
        .map(|row| {
            row.windows(2).enumerate().fold(
                RowEdge {
                    column: 0,
                    strength: 0.0,
                },
                |best, (i, pair)| {
                    let diff = (pair[1] - pair[0]).abs();
                    if diff > best.strength {
                        RowEdge {
                            column: i + 1,
                            strength: diff,
                        }
                    } else {
                        best
                    }
                },
            )
        })
        .collect()
}

/// Fit `column = row * slope + intercept` by ordinary least squares.
///
/// Precondition: at least two rows.
pub fn fit_edge_line(edges: &[RowEdge]) -> EdgeFit {
    let n = edges.len() as f64;
    let mean_row = (n - 1.0) / 2.0;
    let mean_col = edges.iter().map(|e| e.column as f64).sum::<f64>() / n;

    let (sxy, sxx) = edges
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sxy, sxx), (row, e)| {
            let dr = row as f64 - mean_row;
            (sxy + dr * (e.column as f64 - mean_col), sxx + dr * dr)
        });

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };

    EdgeFit {
        slope,
        intercept: mean_col - slope * mean_row,
    }
}

/// Largest power of two not exceeding `row_length`, or 0 for an empty row.
pub fn inspection_window(row_length: usize) -> usize {
    match row_length {
        0 => 0,
        n => 1 << n.ilog2(),
    }
}

/// Build the edge spread function of a prepared patch.
///
/// # Arguments
///
/// * `patch` - Grayscale patch whose edge transition lies along the rows.
/// * `oversampling_rate` - Number of bins per source pixel.
///
/// # Errors
///
/// * [`SfrError::InvalidOversamplingRate`] if `oversampling_rate` is 0, above
///   [`MAX_OVERSAMPLING_RATE`], or the bin count does not fit in `usize`.
/// * [`SfrError::PatchTooSmall`] if the patch is narrower or shorter than 2 pixels.
/// * [`SfrError::DegeneratePatch`] if no row contains any intensity change.
pub fn extract_esf(patch: &Patch, oversampling_rate: usize) -> Result<Esf, SfrError> {
    if oversampling_rate == 0 || oversampling_rate > MAX_OVERSAMPLING_RATE {
        return Err(SfrError::InvalidOversamplingRate(oversampling_rate));
    }
    ensure_patch_size(patch)?;

    let window = inspection_window(patch.cols());
    if window / 2 == 0 {
        return Err(SfrError::PatchTooSmall(patch.size()));
    }

    let edges = locate_edges(patch);
    if edges.iter().all(|e| e.strength == 0.0) {
        return Err(SfrError::DegeneratePatch);
    }

    let edge = fit_edge_line(&edges);
    log::debug!(
        "edge fit: slope={:.5} intercept={:.3} window={}",
        edge.slope,
        edge.intercept,
        window
    );

    let rate = oversampling_rate as f64;
    let half_window = window as f64 / 2.0;
    let reach = half_window + 1.0 / rate;

    let num_bins = window
        .checked_mul(oversampling_rate)
        .and_then(|n| n.checked_add(2))
        .ok_or(SfrError::InvalidOversamplingRate(oversampling_rate))?;
    let mut sums = vec![0.0; num_bins];
    let mut hits = vec![0usize; num_bins];

    for (y, row) in patch.rows_iter().enumerate() {
        let edge_col = edge.column_at(y as f64);
        for (x, &px) in row.iter().enumerate() {
            let d = x as f64 - edge_col;
            if d.abs() > reach {
                continue;
            }
            // d + half_window >= -1 / rate, so the bin index is never negative
            let idx = ((d + half_window) * rate + 1.0) as usize;
            if idx < num_bins {
                sums[idx] += px;
                hits[idx] += 1;
            }
        }
    }

    let values = sums
        .iter()
        .zip(hits.iter())
        .map(|(&sum, &count)| if count == 0 { 0.0 } else { sum / count as f64 })
        .collect();

    Ok(Esf {
        values,
        hits,
        edge,
        window,
    })
}
