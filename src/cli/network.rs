use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use specnet::job::{
    JobStats, NetworkJob, MATCH_TABLE_FILE, NETWORK_GRAPHML_FILE, NETWORK_JSON_FILE,
};

use super::{Config, NetworkArgs};

/// Build a molecular network from an MGF file
pub fn run(
    input: PathBuf,
    output: PathBuf,
    config_path: Option<PathBuf>,
    args: NetworkArgs,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let file_config = Config::load(config_path.as_deref())?;
    let config = args.resolve(&file_config.network);

    info!("specnet - Molecular Networking");
    info!("==============================");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());
    info!("Peak tolerance: {} Da", config.peak_tolerance);
    info!("Cosine threshold: {}", config.cosine_threshold);
    info!("Top K: {}", config.top_k);
    info!("Max component size: {}", config.max_component_size);

    let mut job = NetworkJob::from_mgf(config, &input)
        .with_context(|| format!("Failed to load spectra from {}", input.display()))?;
    let stats = job.run().context("Networking failed")?;
    job.write_outputs(&output)
        .with_context(|| format!("Failed to write results to {}", output.display()))?;

    print_summary("Network complete", &stats, &output);
    Ok(())
}

/// Print the run summary and the files written
pub fn print_summary(title: &str, stats: &JobStats, output: &Path) {
    #[cfg(feature = "colorized_output")]
    {
        use console::style;
        println!("{}", style(title).bold().green());
        println!("{}", stats);
        println!("{}:", style("Files").bold());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", title);
        println!("{}", stats);
        println!("Files:");
    }

    for name in [MATCH_TABLE_FILE, NETWORK_JSON_FILE, NETWORK_GRAPHML_FILE] {
        println!("  {}", output.join(name).display());
    }
}
