use super::Peak;

/// A peak rescaled for comparison
///
/// `weight = sqrt(intensity) / sqrt(total intensity)`, so the squared weights of a spectrum
/// with non-zero total intensity sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPeak {
    /// Mass-to-charge ratio, copied from the source peak
    pub mz: f64,
    /// Square-root scaled, unit-norm weight
    pub weight: f64,
}

/// Square-root normalize a peak list.
///
/// The output is parallel to `peaks` (same order, same length). When the total intensity is
/// zero every weight is zero instead of dividing by zero. Negative intensities are treated as
/// zero.
pub fn sqrt_normalize(peaks: &[Peak]) -> Vec<NormalizedPeak> {
    let total: f64 = peaks.iter().map(|p| p.intensity.max(0.0)).sum();
    if total <= 0.0 || !total.is_finite() {
        return peaks
            .iter()
            .map(|p| NormalizedPeak {
                mz: p.mz,
                weight: 0.0,
            })
            .collect();
    }

    let norm = total.sqrt();
    peaks
        .iter()
        .map(|p| NormalizedPeak {
            mz: p.mz,
            weight: p.intensity.max(0.0).sqrt() / norm,
        })
        .collect()
}
