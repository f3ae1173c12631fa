/// Derive the line spread function from an edge spread function.
///
/// `LSF[i] = (ESF[i + 2] - ESF[i]) / 2`, a centred difference over two bins,
/// so the output is two samples shorter than the input.
///
/// # Example
///
/// ```
/// use lensmtf_sfr::lsf::lsf_from_esf;
///
/// let lsf = lsf_from_esf(&[0.0, 0.0, 2.0, 6.0, 6.0]);
/// assert_eq!(lsf, vec![1.0, 3.0, 2.0]);
/// ```
pub fn lsf_from_esf(esf: &[f64]) -> Vec<f64> {
    esf.windows(3).map(|w| (w[2] - w[0]) / 2.0).collect()
}
