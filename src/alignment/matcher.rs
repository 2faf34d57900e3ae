use std::collections::HashSet;

use crate::spectrum::NormalizedPeak;

/// Added to the peak tolerance so boundary matches do not flap on floating-point error
pub const TOLERANCE_EPSILON: f64 = 1e-6;

/// A proposed correspondence between peak `peak_a` of the first spectrum and peak `peak_b`
/// of the second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlignmentCandidate {
    /// Peak index in the first spectrum
    pub peak_a: usize,
    /// Peak index in the second spectrum
    pub peak_b: usize,
}

/// Find all peak pairs with `|mz_a - shift - mz_b| <= tolerance + TOLERANCE_EPSILON`.
///
/// `b` must be sorted by ascending m/z. Candidates are emitted by ascending `peak_a`, then
/// ascending `peak_b`.
pub fn find_matching_peaks(
    a: &[NormalizedPeak],
    b: &[NormalizedPeak],
    shift: f64,
    tolerance: f64,
) -> Vec<AlignmentCandidate> {
    let adjusted = tolerance + TOLERANCE_EPSILON;
    let mut candidates = Vec::new();

    for (i, peak) in a.iter().enumerate() {
        let target = peak.mz - shift;
        let low = target - adjusted;
        let high = target + adjusted;

        let left = b.partition_point(|p| p.mz < low);
        let right = b.partition_point(|p| p.mz <= high);

        candidates.extend((left..right).map(|j| AlignmentCandidate {
            peak_a: i,
            peak_b: j,
        }));
    }

    candidates
}

/// The mass shifts to try for a spectrum pair, in discovery order.
///
/// Always starts with the unshifted pass. The precursor shift `precursor_a - precursor_b` and
/// its charge-reduced variants `shift / k` for `k = 2..=max_charge` follow, each skipped when
/// its magnitude is within `tolerance` (it would duplicate the unshifted pass).
pub fn shift_passes(precursor_a: f64, precursor_b: f64, tolerance: f64, max_charge: u8) -> Vec<f64> {
    let shift = precursor_a - precursor_b;
    let mut passes = vec![0.0];

    for charge in 1..=max_charge.max(1) {
        let charge_shift = shift / f64::from(charge);
        if charge_shift.abs() > tolerance {
            passes.push(charge_shift);
        }
    }

    passes
}

/// Union of the candidates of every shift pass, duplicates removed, first discovery kept.
pub fn collect_candidates(
    a: &[NormalizedPeak],
    b: &[NormalizedPeak],
    shifts: &[f64],
    tolerance: f64,
) -> Vec<AlignmentCandidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for &shift in shifts {
        for candidate in find_matching_peaks(a, b, shift, tolerance) {
            if seen.insert(candidate) {
                candidates.push(candidate);
            }
        }
    }

    candidates
}
