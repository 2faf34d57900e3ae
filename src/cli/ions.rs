use anyhow::{Context, Result};
use log::info;
use std::io;
use std::path::PathBuf;

use specnet::mgf::MgfReader;
use specnet::neutral_loss::{common_ions, write_common_ions};

/// Print the fragment ions present in every spectrum of an MGF file
pub fn run(input: PathBuf, tolerance: f64) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if !(tolerance.is_finite() && tolerance >= 0.0) {
        anyhow::bail!("Tolerance must be a finite value >= 0, got {}", tolerance);
    }

    let spectra = MgfReader::open(&input)
        .and_then(|reader| reader.read_all())
        .with_context(|| format!("Failed to read spectra from {}", input.display()))?;

    let ions = common_ions(&spectra, tolerance);
    info!("{} ions shared by all {} spectra", ions.len(), spectra.len());

    write_common_ions(&ions, io::stdout().lock()).context("Failed to write ions")?;
    Ok(())
}
