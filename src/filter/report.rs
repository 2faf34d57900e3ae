use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use super::config::FilterConfig;
use super::score::{score_peaks, Classification};
use crate::config::ConfigError;
use crate::export::ExportError;
use crate::spectrum::Spectrum;

/// Report row for one spectrum that passed the filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterReportRow {
    /// Feature identifier: the spectrum's title, else its id
    pub id: String,
    /// Precursor m/z
    pub precursor_mz: Option<f64>,
    /// Retention time in minutes
    pub retention_time_min: f64,
    /// Classification code
    pub classification: Classification,
}

/// Spectra kept by the filter and their report rows, in input order
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Passing spectra
    pub passed: Vec<Spectrum>,
    /// One row per passing spectrum
    pub report: Vec<FilterReportRow>,
}

/// Score every spectrum and keep those with a non-zero classification
pub fn filter_spectra(spectra: &[Spectrum], config: &FilterConfig) -> Result<FilterOutcome, ConfigError> {
    config.validate()?;

    let mut outcome = FilterOutcome::default();
    for spectrum in spectra {
        let score = score_peaks(spectrum.peaks(), config);
        if !score.classification.passes() {
            continue;
        }
        outcome.report.push(FilterReportRow {
            id: spectrum.feature_id().to_string(),
            precursor_mz: spectrum.precursor_mz,
            retention_time_min: spectrum.retention_time / 60.0,
            classification: score.classification,
        });
        outcome.passed.push(spectrum.clone());
    }

    info!(
        "Characteristic filter kept {} of {} spectra",
        outcome.passed.len(),
        spectra.len()
    );
    Ok(outcome)
}

/// Write report rows as CSV with a header row
pub fn write_filter_report<W: Write>(rows: &[FilterReportRow], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write report rows to a CSV file
pub fn write_filter_report_file<P: AsRef<Path>>(
    rows: &[FilterReportRow],
    path: P,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_filter_report(rows, BufWriter::new(file))
}
