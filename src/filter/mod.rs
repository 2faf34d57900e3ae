//! # Characteristic Filter
//!
//! Selects spectra carrying diagnostic fragment ions and/or diagnostic neutral losses
//! before networking.
//!
//! Intensities are min-max normalized per spectrum and only fragments above
//! [`FilterConfig::min_normalized_intensity`] take part. A spectrum is then scored by the
//! number of distinct characteristic ions and distinct characteristic neutral losses it
//! contains, and classified:
//!
//! | Code | `All` mode | `Any` mode |
//! |------|------------|------------|
//! | 3 | both thresholds met | both thresholds met |
//! | 1 | - | ion threshold only |
//! | 2 | - | neutral-loss threshold only |
//! | 0 | otherwise | otherwise |
//!
//! Spectra with a non-zero code pass.

mod config;
mod report;
mod score;


pub use config::{FilterConfig, FilterMode};
pub use report::{
    filter_spectra, write_filter_report, write_filter_report_file, FilterOutcome, FilterReportRow,
};
pub use score::{
    classify, ion_score, neutral_loss_score, score_peaks, significant_fragments, Classification,
    SpectrumScore,
};
