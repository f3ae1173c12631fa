use std::f64::consts::PI;

use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::SfrError;

/// Symmetric Hamming window of length `n`: `0.54 - 0.46 cos(2 pi i / (n - 1))`.
///
/// A window of length 1 is `[1.0]`.
pub fn hamming_window(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![1.0],
        n => {
            let denom = (n - 1) as f64;
            (0..n)
                .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / denom).cos())
                .collect()
        }
    }
}

/// Compute the spatial frequency response of a line spread function.
///
/// The LSF is multiplied by a Hamming window of its own length, transformed
/// with a discrete Fourier transform, and the magnitudes are normalized by the
/// DC term so that `SFR[0] == 1.0`.
///
/// # Errors
///
/// [`SfrError::DegeneratePatch`] if the LSF is empty, its DC term is not finite,
/// or the DC term vanishes relative to the windowed LSF magnitude.
///
/// # Example
///
/// ```
/// use lensmtf_sfr::spectrum::sfr_from_lsf;
///
/// let sfr = sfr_from_lsf(&[0.0, 1.0, 2.0, 1.0, 0.0]).unwrap();
/// assert_eq!(sfr.len(), 5);
/// assert_eq!(sfr[0], 1.0);
/// ```
pub fn sfr_from_lsf(lsf: &[f64]) -> Result<Vec<f64>, SfrError> {
    if lsf.is_empty() {
        return Err(SfrError::DegeneratePatch);
    }

    let mut buffer = lsf
        .iter()
        .zip(hamming_window(lsf.len()))
        .map(|(&v, w)| Complex::new(v * w, 0.0))
        .collect::<Vec<_>>();

    // DC is compared with the windowed LSF mass, not with an absolute level
    let mass = buffer.iter().map(|c| c.re.abs()).sum::<f64>();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);

    let dc = buffer[0].norm();
    log::debug!("sfr: {} samples, dc={:.6}", buffer.len(), dc);
    if !dc.is_finite() || dc <= f64::EPSILON * mass {
        return Err(SfrError::DegeneratePatch);
    }

    Ok(buffer.iter().map(|c| c.norm() / dc).collect())
}
