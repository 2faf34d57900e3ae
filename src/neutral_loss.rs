//! Neutral-loss and common-ion tables.
//!
//! Every spectrum is first rescaled so its base peak is 100, which keeps intensities
//! comparable between loud and quiet spectra. Losses are differences between fragment m/z
//! values. Values closer than a merge tolerance are treated as the same loss (or ion) by
//! sorting them and sweeping a tolerance window, so no floating-point value is ever used as
//! a hash key.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::export::ExportError;
use crate::spectrum::{Peak, Spectrum};

/// One fragment pair producing a loss
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossPair {
    /// m/z of the heavier fragment
    pub mz_high: f64,
    /// m/z of the lighter fragment
    pub mz_low: f64,
    /// Mean intensity of the two fragments, in percent of the base peak
    pub average_intensity: f64,
}

/// A merged neutral loss with every pair that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutralLoss {
    /// Loss mass; the smallest value of the merged group
    pub mass: f64,
    /// Contributing fragment pairs
    pub pairs: Vec<LossPair>,
    /// Sum of the pairs' average intensities
    pub total_intensity: f64,
    /// `total_intensity` in percent of the strongest loss of the same spectrum
    pub relative_intensity: f64,
}

/// A loss found in every table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonLoss {
    /// Loss mass
    pub mass: f64,
    /// Mean over tables of the loss's relative intensity
    pub average_intensity: f64,
}

/// A fragment ion found in every spectrum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonIon {
    /// Ion m/z; the smallest value of the merged group
    pub mz: f64,
    /// Mean over spectra of the ion's intensity in percent of the base peak
    pub average_intensity: f64,
}

/// Group `items` (already sorted by key) into runs whose keys lie within `tolerance` of the
/// run's first key.
fn merge_sorted<T>(items: Vec<(f64, T)>, tolerance: f64) -> Vec<(f64, Vec<T>)> {
    let mut groups: Vec<(f64, Vec<T>)> = Vec::new();
    for (key, item) in items {
        match groups.last_mut() {
            Some((anchor, members)) if key - *anchor < tolerance => members.push(item),
            _ => groups.push((key, vec![item])),
        }
    }
    groups
}

/// Merge keyed intensities from `sources` sources and keep the groups every source
/// contributes to. Each group reports its anchor key and the mean of the per-source sums.
fn shared_groups(
    mut entries: Vec<(f64, (usize, f64))>,
    sources: usize,
    tolerance: f64,
) -> Vec<(f64, f64)> {
    if sources == 0 {
        return Vec::new();
    }
    entries.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut shared: Vec<(f64, f64)> = merge_sorted(entries, tolerance)
        .into_iter()
        .filter_map(|(key, members)| {
            let mut per_source = vec![None::<f64>; sources];
            for (source, intensity) in members {
                *per_source[source].get_or_insert(0.0) += intensity;
            }
            let sums: Vec<f64> = per_source.into_iter().collect::<Option<_>>()?;
            Some((key, sums.iter().sum::<f64>() / sources as f64))
        })
        .collect();

    shared.sort_by(|a, b| b.1.total_cmp(&a.1));
    shared
}

/// Rescale intensities to percent of the most intense peak.
///
/// Peaks are returned unchanged when there is no positive, finite base peak.
pub fn scale_to_base_peak(peaks: &[Peak]) -> Vec<Peak> {
    let base = peaks.iter().map(|p| p.intensity).fold(0.0, f64::max);
    if !(base > 0.0 && base.is_finite()) {
        return peaks.to_vec();
    }
    peaks
        .iter()
        .map(|p| Peak::new(p.mz, p.intensity / base * 100.0))
        .collect()
}

/// Neutral losses among the `top_n` most intense peaks.
///
/// Intensities are scaled to the base peak first. Every ordered pair whose m/z difference
/// is at least `min_loss` contributes. The result is sorted by ascending mass.
pub fn neutral_losses(
    peaks: &[Peak],
    top_n: usize,
    min_loss: f64,
    merge_tolerance: f64,
) -> Vec<NeutralLoss> {
    let mut top = scale_to_base_peak(peaks);
    top.sort_by(|a, b| b.intensity.total_cmp(&a.intensity));
    top.truncate(top_n);

    let mut raw: Vec<(f64, LossPair)> = Vec::new();
    for (i, high) in top.iter().enumerate() {
        for (j, low) in top.iter().enumerate() {
            if i == j {
                continue;
            }
            let loss = high.mz - low.mz;
            if loss >= min_loss {
                raw.push((
                    loss,
                    LossPair {
                        mz_high: high.mz,
                        mz_low: low.mz,
                        average_intensity: (high.intensity + low.intensity) / 2.0,
                    },
                ));
            }
        }
    }
    raw.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut losses: Vec<NeutralLoss> = merge_sorted(raw, merge_tolerance)
        .into_iter()
        .map(|(mass, pairs)| NeutralLoss {
            mass,
            total_intensity: pairs.iter().map(|p| p.average_intensity).sum(),
            relative_intensity: 0.0,
            pairs,
        })
        .collect();

    let strongest = losses.iter().map(|l| l.total_intensity).fold(0.0, f64::max);
    if strongest > 0.0 {
        for loss in &mut losses {
            loss.relative_intensity = loss.total_intensity / strongest * 100.0;
        }
    }
    losses
}

/// Losses present in every table, most intense first
pub fn common_neutral_losses(tables: &[Vec<NeutralLoss>], merge_tolerance: f64) -> Vec<CommonLoss> {
    let entries = tables
        .iter()
        .enumerate()
        .flat_map(|(t, table)| table.iter().map(move |l| (l.mass, (t, l.relative_intensity))))
        .collect();

    shared_groups(entries, tables.len(), merge_tolerance)
        .into_iter()
        .map(|(mass, average_intensity)| CommonLoss {
            mass,
            average_intensity,
        })
        .collect()
}

/// Fragment ions present in every spectrum, most intense first.
///
/// These are candidates for the characteristic ions of a compound class.
pub fn common_ions(spectra: &[Spectrum], tolerance: f64) -> Vec<CommonIon> {
    let entries = spectra
        .iter()
        .enumerate()
        .flat_map(|(s, spectrum)| {
            scale_to_base_peak(spectrum.peaks())
                .into_iter()
                .map(move |p| (p.mz, (s, p.intensity)))
        })
        .collect();

    shared_groups(entries, spectra.len(), tolerance)
        .into_iter()
        .map(|(mz, average_intensity)| CommonIon {
            mz,
            average_intensity,
        })
        .collect()
}

fn write_csv<T: Serialize, W: Write>(rows: &[T], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write common losses as CSV
pub fn write_common_losses<W: Write>(losses: &[CommonLoss], writer: W) -> Result<(), ExportError> {
    write_csv(losses, writer)
}

/// Write common ions as CSV
pub fn write_common_ions<W: Write>(ions: &[CommonIon], writer: W) -> Result<(), ExportError> {
    write_csv(ions, writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peaks(values: &[(f64, f64)]) -> Vec<Peak> {
        values.iter().map(|&p| Peak::from(p)).collect()
    }

    #[test]
    fn test_losses_from_top_peaks() {
        let spectrum = peaks(&[(100.0, 50.0), (118.0, 100.0), (136.0, 30.0), (90.0, 1.0)]);
        let losses = neutral_losses(&spectrum, 3, 1.0, 1e-5);

        let masses: Vec<f64> = losses.iter().map(|l| l.mass).collect();
        assert_eq!(masses, vec![18.0, 36.0]);

        // 118-100 and 136-118 merge into one loss
        let water = &losses[0];
        assert_eq!(water.pairs.len(), 2);
        assert_eq!(water.total_intensity, 75.0 + 65.0);
        assert_eq!(water.relative_intensity, 100.0);
        assert!(losses[1].relative_intensity < 100.0);
    }

    #[test]
    fn test_min_loss_and_top_n() {
        let spectrum = peaks(&[(100.0, 10.0), (101.0, 20.0), (150.0, 30.0)]);
        assert!(neutral_losses(&spectrum, 0, 0.0, 0.01).is_empty());

        let losses = neutral_losses(&spectrum, 3, 10.0, 0.01);
        let masses: Vec<f64> = losses.iter().map(|l| l.mass).collect();
        assert_eq!(masses, vec![49.0, 50.0]);
    }

    #[test]
    fn test_merge_within_tolerance() {
        let spectrum = peaks(&[(100.0, 10.0), (118.0, 10.0), (200.0, 10.0), (218.005, 10.0)]);
        let losses = neutral_losses(&spectrum, 4, 17.0, 0.01);
        assert_eq!(losses[0].mass, 18.0);
        assert_eq!(losses[0].pairs.len(), 2);
    }

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn test_common_losses() {
        // Scaled: 100 -> 33.3, 118 -> 100, 144 -> 66.7; loss 26 is the strongest at 83.3
        let a = peaks(&[(100.0, 10.0), (118.0, 30.0), (144.0, 20.0)]);
        let a = neutral_losses(&a, 3, 1.0, 0.01);
        let b = neutral_losses(&peaks(&[(200.0, 40.0), (218.001, 40.0)]), 3, 1.0, 0.01);
        assert!(close(a[0].relative_intensity, 80.0));
        assert!(close(b[0].relative_intensity, 100.0));

        let common = common_neutral_losses(&[a, b], 0.01);
        assert_eq!(common.len(), 1);
        assert_eq!(common[0].mass, 18.0);
        assert!(close(common[0].average_intensity, 90.0));

        assert!(common_neutral_losses(&[], 0.01).is_empty());
    }

    #[test]
    fn test_loud_spectrum_does_not_dominate() {
        let loud = peaks(&[(100.0, 1e6), (118.0, 1e6), (150.0, 1e5)]);
        let quiet = peaks(&[(300.0, 0.1), (318.0, 0.01), (350.0, 0.1)]);

        // Both spectra land on the same 0-100 scale
        let loud_losses = neutral_losses(&loud, 10, 1.0, 0.01);
        let quiet_losses = neutral_losses(&quiet, 10, 1.0, 0.01);
        let relative = |table: &[NeutralLoss]| -> Vec<f64> {
            table.iter().map(|l| l.relative_intensity).collect()
        };
        let loud_relative = relative(&loud_losses);
        let quiet_relative = relative(&quiet_losses);
        assert!(close(loud_relative[0], 100.0) && close(loud_relative[1], 55.0));
        assert!(close(quiet_relative[0], 55.0) && close(quiet_relative[2], 100.0));

        let common = common_neutral_losses(&[loud_losses, quiet_losses], 0.01);
        assert_eq!(common.len(), 3);
        let average = |mass: f64| {
            common
                .iter()
                .find(|c| close(c.mass, mass))
                .map(|c| c.average_intensity)
                .unwrap()
        };
        assert!(close(average(18.0), 77.5));
        assert!(close(average(32.0), 55.0));
        assert!(close(average(50.0), 77.5));
        assert!(close(common[2].mass, 32.0));
    }

    #[test]
    fn test_scale_to_base_peak() {
        let scaled = scale_to_base_peak(&peaks(&[(100.0, 2e7), (150.0, 5e6)]));
        assert_eq!(scaled[0].intensity, 100.0);
        assert_eq!(scaled[1].intensity, 25.0);

        let silent = peaks(&[(100.0, 0.0)]);
        assert_eq!(scale_to_base_peak(&silent), silent);
        assert!(scale_to_base_peak(&[]).is_empty());
    }

    #[test]
    fn test_common_ions() {
        let first = peaks(&[(91.054, 5e5), (147.113, 1e6), (200.0, 2e5)]);
        let second = peaks(&[(91.0541, 3.0), (147.1131, 1.5), (250.0, 1.0)]);
        let spectra = vec![
            Spectrum::new("1", Some(300.0), first),
            Spectrum::new("2", Some(320.0), second),
        ];

        let ions = common_ions(&spectra, 0.001);
        let mzs: Vec<f64> = ions.iter().map(|i| i.mz).collect();
        // 50% and 100% of the base peak in swapped order average to 75 either way
        assert_eq!(ions.len(), 2);
        assert!(mzs.contains(&91.054) && mzs.contains(&147.113));
        assert!(ions.iter().all(|i| close(i.average_intensity, 75.0)));

        // Too tight a window finds nothing shared
        assert!(common_ions(&spectra, 1e-5).is_empty());
        assert!(common_ions(&[], 0.01).is_empty());

        let mut buffer = Vec::new();
        write_common_ions(&ions[..1], &mut buffer).unwrap();
        assert!(String::from_utf8(buffer).unwrap().starts_with("mz,averageIntensity\n"));
    }

    #[test]
    fn test_common_losses_csv() {
        let losses = vec![CommonLoss {
            mass: 18.0,
            average_intensity: 30.0,
        }];
        let mut buffer = Vec::new();
        write_common_losses(&losses, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "mass,averageIntensity\n18.0,30.0\n");
    }
}
