use log::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::record::{MatchRecord, SourceTag};
use crate::alignment::{align_normalized, Alignment};
use crate::config::{ConfigError, NetworkConfig};
use crate::spectrum::{sqrt_normalize, NormalizedPeak, Spectrum};

/// A spectrum with its normalized peaks, prepared once per job
struct Prepared<'a> {
    spectrum: &'a Spectrum,
    peaks: Vec<NormalizedPeak>,
    intensity_sum: f64,
}

impl<'a> Prepared<'a> {
    fn new(spectrum: &'a Spectrum) -> Self {
        Self {
            spectrum,
            peaks: sqrt_normalize(spectrum.peaks()),
            intensity_sum: spectrum.total_intensity(),
        }
    }
}

/// Compare every spectrum against every other and build the match table.
///
/// Records are grouped by base spectrum in input order; within a base they are sorted by
/// descending cosine score (ties keep input order) and truncated to `top_k`.
pub fn generate_all_matches(
    spectra: &[Spectrum],
    config: &NetworkConfig,
) -> Result<Vec<MatchRecord>, ConfigError> {
    config.validate()?;

    let prepared: Vec<Prepared<'_>> = spectra.iter().map(Prepared::new).collect();

    #[cfg(feature = "parallel")]
    let per_base: Vec<Vec<MatchRecord>> = (0..prepared.len())
        .into_par_iter()
        .map(|i| matches_for_base(i, &prepared, config))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let per_base: Vec<Vec<MatchRecord>> = (0..prepared.len())
        .map(|i| matches_for_base(i, &prepared, config))
        .collect();

    let table: Vec<MatchRecord> = per_base.into_iter().flatten().collect();
    let sentinels = table.iter().filter(|r| r.is_sentinel()).count();
    info!(
        "Generated {} match records for {} spectra ({} without neighbors)",
        table.len(),
        spectra.len(),
        sentinels
    );

    Ok(table)
}

fn matches_for_base(
    base_index: usize,
    prepared: &[Prepared<'_>],
    config: &NetworkConfig,
) -> Vec<MatchRecord> {
    let base = &prepared[base_index];
    let max_charge = config.effective_max_charge();
    let mut records = Vec::new();

    for (j, other) in prepared.iter().enumerate() {
        if j == base_index {
            continue;
        }

        let alignment = match (base.spectrum.precursor_mz, other.spectrum.precursor_mz) {
            (Some(base_mass), Some(other_mass)) => align_normalized(
                &base.peaks,
                base_mass,
                &other.peaks,
                other_mass,
                config.peak_tolerance,
                max_charge,
            ),
            _ => Alignment::empty(),
        };
        if alignment.score < config.cosine_threshold {
            continue;
        }

        records.push(MatchRecord {
            base_id: base.spectrum.id.clone(),
            neighbor_id: Some(other.spectrum.id.clone()),
            cosine_score: alignment.score,
            matched_peaks: alignment.matched_peaks(),
            mass_a: base.spectrum.precursor_mz,
            rt_a: base.spectrum.retention_time,
            mass_b: other.spectrum.precursor_mz,
            rt_b: Some(other.spectrum.retention_time),
            mass_delta: base
                .spectrum
                .precursor_mz
                .zip(other.spectrum.precursor_mz)
                .map(|(a, b)| (a - b).abs()),
            intensity_sum: other.intensity_sum,
            source: SourceTag::ClassicalMolecular,
            peak_matching_rate: None,
        });
    }

    if records.is_empty() {
        debug!(
            "Spectrum {} has no neighbor at cosine >= {}",
            base.spectrum.id, config.cosine_threshold
        );
        return vec![sentinel(base)];
    }

    records.sort_by(|a, b| b.cosine_score.total_cmp(&a.cosine_score));
    records.truncate(config.top_k);
    records
}

fn sentinel(base: &Prepared<'_>) -> MatchRecord {
    MatchRecord {
        base_id: base.spectrum.id.clone(),
        neighbor_id: None,
        cosine_score: 0.0,
        matched_peaks: 0,
        mass_a: base.spectrum.precursor_mz,
        rt_a: base.spectrum.retention_time,
        mass_b: None,
        rt_b: None,
        mass_delta: None,
        intensity_sum: base.intensity_sum,
        source: SourceTag::ClassicalMolecular,
        peak_matching_rate: None,
    }
}
