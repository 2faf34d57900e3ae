//! # specnet
//!
//! A command-line tool for spectral alignment and molecular networking of MGF files.
//!
//! ## Usage
//!
//! ```bash
//! # Build a network with default parameters
//! specnet network spectra.mgf -o results/
//!
//! # Keep spectra carrying characteristic fragments, then network them
//! specnet filter spectra.mgf --ions 175.119 --losses 17.027 --mode any
//!
//! # Neutral losses shared by every spectrum
//! specnet losses spectra.mgf --top-n 20 > losses.csv
//!
//! # Fragment ions shared by every spectrum
//! specnet ions spectra.mgf -t 0.005 > ions.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity
    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
