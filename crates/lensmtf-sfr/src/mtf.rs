use std::f64::consts::PI;

/// Contrast level whose first crossing defines MTF50.
pub const MTF50_LEVEL: f64 = 0.5;

/// Number of MTF samples kept from an SFR of `sfr_len` samples: the positive
/// half of the spectrum, limited to the band the oversampled profile resolves.
pub fn mtf_len(sfr_len: usize, oversampling_rate: usize) -> usize {
    if oversampling_rate == 0 {
        return 0;
    }
    sfr_len / oversampling_rate
}

/// Fractional frequency of MTF sample `idx` in a curve of `len` samples.
///
/// 0 at DC and 1 at the last sample.
pub fn frequency(idx: usize, len: usize) -> f64 {
    if len < 2 {
        return 0.0;
    }
    idx as f64 / (len - 1) as f64
}

/// Turn a spatial frequency response into an MTF curve.
///
/// Every sample past DC is multiplied by `x / sin(x)` with
/// `x = pi * freq * 2 / oversampling_rate`, undoing the attenuation of the
/// rectangular bins the edge profile was averaged into.
///
/// # Example
///
/// ```
/// use lensmtf_sfr::mtf::mtf_from_sfr;
///
/// let sfr = vec![1.0; 16];
/// let mtf = mtf_from_sfr(&sfr, 4);
///
/// assert_eq!(mtf.len(), 4);
/// assert_eq!(mtf[0], 1.0);
/// assert!(mtf[3] > 1.0);
/// ```
pub fn mtf_from_sfr(sfr: &[f64], oversampling_rate: usize) -> Vec<f64> {
    let len = mtf_len(sfr.len(), oversampling_rate);
    let rate = oversampling_rate as f64;

    sfr.iter()
        .take(len)
        .enumerate()
        .map(|(idx, &value)| {
            let freq = frequency(idx, len);
            if freq == 0.0 {
                value
            } else {
                let x = PI * freq * 2.0 / rate;
                value * x / x.sin()
            }
        })
        .collect()
}

/// Locate the first descending crossing of 0.5 in an MTF curve.
///
/// Scanning upward from index 1, the first `idx` with `mtf[idx] < 0.5` and
/// `mtf[idx - 1] >= 0.5` is interpolated linearly and returned as a
/// fractional frequency. Later crossings are ignored. A curve that never
/// crosses yields 0.
///
/// The interpolation fraction is measured from the sample below the level, so
/// a crossing in the last interval can return exactly 1.0 (e.g. for
/// `[1.0, 0.5, 0.25]`); every other result lies in `[0, 1)`.
///
/// # Example
///
/// ```
/// use lensmtf_sfr::mtf::mtf50_from_mtf;
///
/// let mtf = [1.0, 0.8, 0.6, 0.4, 0.2];
/// assert_eq!(mtf50_from_mtf(&mtf), 0.625);
/// ```
pub fn mtf50_from_mtf(mtf: &[f64]) -> f64 {
    if mtf.len() < 2 {
        return 0.0;
    }
    let last = (mtf.len() - 1) as f64;

    mtf.windows(2)
        .enumerate()
        .find(|(_, pair)| pair[1] < MTF50_LEVEL && pair[0] >= MTF50_LEVEL)
        .map(|(i, pair)| {
            let fraction = (MTF50_LEVEL - pair[1]) / (pair[0] - pair[1]);
            (i as f64 + fraction) / last
        })
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mtf_len() {
        assert_eq!(mtf_len(256, 4), 64);
        assert_eq!(mtf_len(257, 4), 64);
        assert_eq!(mtf_len(192, 3), 64);
        assert_eq!(mtf_len(10, 0), 0);
    }

    #[test]
    fn test_mtf_correction_factor() {
        let sfr = vec![0.5; 8];
        let mtf = mtf_from_sfr(&sfr, 2);

        assert_eq!(mtf.len(), 4);
        assert_eq!(mtf[0], 0.5);
        for (idx, &m) in mtf.iter().enumerate().skip(1) {
            let x = PI * (idx as f64 / 3.0) * 2.0 / 2.0;
            assert_abs_diff_eq!(m, 0.5 * x / x.sin(), epsilon = 1e-12);
            assert!(m > 0.5);
        }
    }

    #[test]
    fn test_mtf50_interpolates_first_crossing() {
        // crosses between 2 and 3, then rises above and crosses again
        let mtf = [1.0, 0.9, 0.6, 0.4, 0.7, 0.3, 0.1];
        let expected = (2.0 + (0.5 - 0.4) / (0.6 - 0.4)) / 6.0;
        assert_abs_diff_eq!(mtf50_from_mtf(&mtf), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_mtf50_fraction_taken_from_lower_sample() {
        // 0.5 itself is not below the level, so the crossing is between 1 and 2,
        // and the fraction is (0.5 - 0.25) / (0.5 - 0.25) past index 1
        let mtf = [1.0, 0.5, 0.25];
        assert_abs_diff_eq!(mtf50_from_mtf(&mtf), 1.0, epsilon = 1e-12);

        let mtf = [1.0, 0.9, 0.2, 0.1, 0.0];
        let expected = (1.0 + (0.5 - 0.2) / (0.9 - 0.2)) / 4.0;
        assert_abs_diff_eq!(mtf50_from_mtf(&mtf), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_mtf50_no_crossing() {
        assert_eq!(mtf50_from_mtf(&[1.0, 0.9, 0.8, 0.7]), 0.0);
        assert_eq!(mtf50_from_mtf(&[1.0]), 0.0);
        assert_eq!(mtf50_from_mtf(&[]), 0.0);
        // starting below the level never produces a descending crossing
        assert_eq!(mtf50_from_mtf(&[0.4, 0.3, 0.2]), 0.0);
    }
}
