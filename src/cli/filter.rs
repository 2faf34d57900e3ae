use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

use specnet::filter::{filter_spectra, write_filter_report_file};
use specnet::job::NetworkJob;
use specnet::mgf::{MgfReader, MgfWriter};

use super::network::print_summary;
use super::{Config, FilterArgs, NetworkArgs};

/// Run the characteristic filter, then network the spectra that pass
pub fn run(
    input: PathBuf,
    output: PathBuf,
    config_path: Option<PathBuf>,
    filter_args: FilterArgs,
    network_args: NetworkArgs,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let file_config = Config::load(config_path.as_deref())?;
    let network_config = network_args.resolve(&file_config.network);
    let filter_config = filter_args.resolve(&file_config.filter, network_config.peak_tolerance);

    info!("specnet - Characteristic Filter");
    info!("===============================");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());
    info!("Characteristic ions: {:?}", filter_config.characteristic_ions);
    info!("Characteristic losses: {:?}", filter_config.characteristic_losses);
    info!("Mode: {:?}", filter_config.mode);

    if filter_config.characteristic_ions.is_empty()
        && filter_config.characteristic_losses.is_empty()
    {
        warn!("No characteristic ions or losses given; the filter only applies match counts");
    }

    let spectra = MgfReader::open(&input)
        .and_then(|reader| reader.read_all())
        .with_context(|| format!("Failed to read spectra from {}", input.display()))?;
    let outcome = filter_spectra(&spectra, &filter_config).context("Invalid filter settings")?;

    fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let mgf_path = output.join("filtered_spectra.mgf");
    let mut writer = MgfWriter::create(&mgf_path)
        .with_context(|| format!("Failed to create {}", mgf_path.display()))?;
    writer.write_spectra(&outcome.passed)?;
    writer.finish()?;
    write_filter_report_file(&outcome.report, output.join("metadata.csv"))
        .context("Failed to write filter report")?;

    println!(
        "Kept {} of {} spectra -> {}",
        outcome.passed.len(),
        spectra.len(),
        mgf_path.display()
    );

    let mut job = NetworkJob::new(network_config, outcome.passed)?;
    let stats = job.run().context("Networking failed")?;
    job.write_outputs(&output)
        .with_context(|| format!("Failed to write results to {}", output.display()))?;

    print_summary("Filtered network complete", &stats, &output);
    Ok(())
}
