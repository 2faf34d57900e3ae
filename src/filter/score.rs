use serde::{Deserialize, Serialize};

use super::config::{FilterConfig, FilterMode};
use crate::spectrum::Peak;

/// Outcome of scoring one spectrum against the characteristic lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Classification {
    /// Criteria not met (code 0)
    Rejected,
    /// Ion criterion only (code 1)
    IonsOnly,
    /// Neutral-loss criterion only (code 2)
    LossesOnly,
    /// Both criteria (code 3)
    Both,
}

impl Classification {
    /// Numeric code written to reports
    pub fn code(self) -> u8 {
        match self {
            Classification::Rejected => 0,
            Classification::IonsOnly => 1,
            Classification::LossesOnly => 2,
            Classification::Both => 3,
        }
    }

    /// Whether the spectrum is kept
    pub fn passes(self) -> bool {
        self != Classification::Rejected
    }
}

impl From<Classification> for u8 {
    fn from(classification: Classification) -> Self {
        classification.code()
    }
}

impl TryFrom<u8> for Classification {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Classification::Rejected),
            1 => Ok(Classification::IonsOnly),
            2 => Ok(Classification::LossesOnly),
            3 => Ok(Classification::Both),
            other => Err(format!("unknown classification code {}", other)),
        }
    }
}

/// Per-spectrum filter scores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrumScore {
    /// Distinct characteristic ions found
    pub ion_score: usize,
    /// Distinct characteristic neutral losses found
    pub neutral_loss_score: usize,
    /// Resulting class
    pub classification: Classification,
}

/// Fragment m/z values whose min-max normalized intensity exceeds `floor`.
///
/// When every intensity is equal the normalized values are all zero.
pub fn significant_fragments(peaks: &[Peak], floor: f64) -> Vec<f64> {
    let Some(max) = peaks.iter().map(|p| p.intensity).reduce(f64::max) else {
        return Vec::new();
    };
    let min = peaks.iter().map(|p| p.intensity).fold(f64::INFINITY, f64::min);
    let range = max - min;

    peaks
        .iter()
        .filter(|p| {
            let normalized = if range > 0.0 {
                (p.intensity - min) / range
            } else {
                0.0
            };
            normalized > floor
        })
        .map(|p| p.mz)
        .collect()
}

/// Count the distinct characteristic ions present among `fragments`
pub fn ion_score(fragments: &[f64], ions: &[f64], tolerance: f64) -> usize {
    count_distinct(ions, |ion| {
        fragments.iter().any(|mz| (mz - ion).abs() < tolerance)
    })
}

/// Count the distinct characteristic losses matched by any ordered fragment difference
pub fn neutral_loss_score(fragments: &[f64], losses: &[f64], tolerance: f64) -> usize {
    count_distinct(losses, |loss| {
        fragments.iter().enumerate().any(|(i, a)| {
            fragments
                .iter()
                .enumerate()
                .any(|(j, b)| i != j && (a - b - loss).abs() < tolerance)
        })
    })
}

fn count_distinct(targets: &[f64], mut present: impl FnMut(f64) -> bool) -> usize {
    let mut counted: Vec<f64> = Vec::new();
    for &target in targets {
        if counted.contains(&target) {
            continue;
        }
        if present(target) {
            counted.push(target);
        }
    }
    counted.len()
}

/// Combine the two scores under the configured mode
pub fn classify(ion_score: usize, neutral_loss_score: usize, config: &FilterConfig) -> Classification {
    let ions = ion_score >= config.min_ion_matches;
    let losses = neutral_loss_score >= config.min_loss_matches;
    match (config.mode, ions, losses) {
        (_, true, true) => Classification::Both,
        (FilterMode::Any, true, false) => Classification::IonsOnly,
        (FilterMode::Any, false, true) => Classification::LossesOnly,
        _ => Classification::Rejected,
    }
}

/// Score one spectrum's peaks
pub fn score_peaks(peaks: &[Peak], config: &FilterConfig) -> SpectrumScore {
    let fragments = significant_fragments(peaks, config.min_normalized_intensity);
    let ion_score = ion_score(&fragments, &config.characteristic_ions, config.tolerance);
    let neutral_loss_score =
        neutral_loss_score(&fragments, &config.characteristic_losses, config.tolerance);
    SpectrumScore {
        ion_score,
        neutral_loss_score,
        classification: classify(ion_score, neutral_loss_score, config),
    }
}
