use anyhow::{Context, Result};
use log::info;
use std::io;
use std::path::PathBuf;

use specnet::mgf::MgfReader;
use specnet::neutral_loss::{common_neutral_losses, neutral_losses, write_common_losses};

/// Print the neutral losses present in every spectrum of an MGF file
pub fn run(input: PathBuf, top_n: usize, min_loss: f64, merge_tolerance: f64) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if !(merge_tolerance.is_finite() && merge_tolerance >= 0.0) {
        anyhow::bail!("Merge tolerance must be a finite value >= 0, got {}", merge_tolerance);
    }

    let spectra = MgfReader::open(&input)
        .and_then(|reader| reader.read_all())
        .with_context(|| format!("Failed to read spectra from {}", input.display()))?;

    let tables: Vec<_> = spectra
        .iter()
        .map(|s| neutral_losses(s.peaks(), top_n, min_loss, merge_tolerance))
        .collect();
    let common = common_neutral_losses(&tables, merge_tolerance);
    info!(
        "{} neutral losses shared by all {} spectra (top {} peaks each)",
        common.len(),
        spectra.len(),
        top_n
    );

    write_common_losses(&common, io::stdout().lock()).context("Failed to write losses")?;
    Ok(())
}
