use log::trace;

use super::matcher::{collect_candidates, shift_passes};
use crate::spectrum::{sqrt_normalize, NormalizedPeak, Spectrum};

/// An accepted peak correspondence and its contribution to the score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakMatch {
    /// Peak index in the first spectrum
    pub peak_a: usize,
    /// Peak index in the second spectrum
    pub peak_b: usize,
    /// `weight_a * weight_b`
    pub score: f64,
}

/// Result of aligning two spectra
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alignment {
    /// Sum of the accepted match scores, in `[0, 1]`
    pub score: f64,
    /// Accepted matches in acceptance order
    pub matches: Vec<PeakMatch>,
}

impl Alignment {
    /// Alignment with score 0 and no matches
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of matched peak pairs
    pub fn matched_peaks(&self) -> usize {
        self.matches.len()
    }
}

/// Align two spectra under a mass `tolerance`, considering precursor shifts for charge
/// states `1..=max_charge`.
///
/// Returns an empty alignment when either spectrum has no peaks or no precursor mass.
pub fn align(a: &Spectrum, b: &Spectrum, tolerance: f64, max_charge: u8) -> Alignment {
    let (Some(precursor_a), Some(precursor_b)) = (a.precursor_mz, b.precursor_mz) else {
        return Alignment::empty();
    };
    if a.is_empty() || b.is_empty() {
        return Alignment::empty();
    }

    let normalized_a = sqrt_normalize(a.peaks());
    let normalized_b = sqrt_normalize(b.peaks());
    align_normalized(
        &normalized_a,
        precursor_a,
        &normalized_b,
        precursor_b,
        tolerance,
        max_charge,
    )
}

/// Align two already-normalized peak lists.
///
/// Callers comparing one spectrum against many normalize it once and use this directly.
pub fn align_normalized(
    a: &[NormalizedPeak],
    precursor_a: f64,
    b: &[NormalizedPeak],
    precursor_b: f64,
    tolerance: f64,
    max_charge: u8,
) -> Alignment {
    if a.is_empty() || b.is_empty() {
        return Alignment::empty();
    }

    let shifts = shift_passes(precursor_a, precursor_b, tolerance, max_charge);
    let mut scored: Vec<PeakMatch> = collect_candidates(a, b, &shifts, tolerance)
        .into_iter()
        .map(|c| PeakMatch {
            peak_a: c.peak_a,
            peak_b: c.peak_b,
            score: a[c.peak_a].weight * b[c.peak_b].weight,
        })
        .collect();

    // Stable: equal scores keep discovery order
    scored.sort_by(|x, y| y.score.total_cmp(&x.score));

    let mut used_a = vec![false; a.len()];
    let mut used_b = vec![false; b.len()];
    let mut total = 0.0;
    let mut matches = Vec::new();

    for candidate in scored {
        if used_a[candidate.peak_a] || used_b[candidate.peak_b] {
            continue;
        }
        used_a[candidate.peak_a] = true;
        used_b[candidate.peak_b] = true;
        total += candidate.score;
        matches.push(candidate);
    }

    trace!(
        "Aligned {} x {} peaks over {} shift passes: {} matches, score {:.4}",
        a.len(),
        b.len(),
        shifts.len(),
        matches.len(),
        total
    );

    // One-to-one products of unit-norm weights are bounded by 1 (Cauchy-Schwarz)
    debug_assert!(
        total <= 1.0 + 1e-9,
        "alignment score {} exceeds 1; weights are not unit-norm",
        total
    );

    Alignment {
        score: total.clamp(0.0, 1.0),
        matches,
    }
}
