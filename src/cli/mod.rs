use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use specnet::config::NetworkConfig;
use specnet::filter::{FilterConfig, FilterMode};

mod config;
mod filter;
mod ions;
mod losses;
mod network;

pub use config::Config;
use config::{FilterSection, NetworkSection};

/// Peak m/z tolerance in Da used when neither a flag nor the config file sets one
pub const DEFAULT_TOLERANCE: f64 = 0.02;
/// Default minimum alignment score for an edge
pub const DEFAULT_COSINE: f64 = 0.7;
/// Default neighbors kept per spectrum
pub const DEFAULT_TOP_K: usize = 10;
/// Default component size bound
pub const DEFAULT_COMPONENT_SIZE: usize = 5;
/// Default display mass cutoff
pub const DEFAULT_MASS_CUTOFF: f64 = 0.0;
/// Default fragment intensity floor for the characteristic filter
pub const DEFAULT_MIN_NORMALIZED_INTENSITY: f64 = 0.02;

/// specnet - Spectral Alignment and Molecular Networking
#[derive(Parser)]
#[command(name = "specnet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Criterion combination for the characteristic filter.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    /// Ion and neutral-loss thresholds must both be met
    All,
    /// Either threshold is enough
    Any,
}

impl From<ModeArg> for FilterMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::All => FilterMode::All,
            ModeArg::Any => FilterMode::Any,
        }
    }
}

/// Networking parameters shared by `network` and `filter`.
#[derive(Args, Debug, Clone, Default)]
pub struct NetworkArgs {
    /// Peak m/z tolerance in Da [default: 0.02]
    #[arg(short = 't', long)]
    tolerance: Option<f64>,

    /// Minimum cosine score for an edge [default: 0.7]
    #[arg(long)]
    cosine: Option<f64>,

    /// Neighbors kept per spectrum [default: 10]
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Largest connected component after pruning [default: 5]
    #[arg(long)]
    component_size: Option<usize>,

    /// Precursor m/z above which nodes are highlighted [default: 0]
    #[arg(long)]
    mass_cutoff: Option<f64>,

    /// Highest charge state tried for shifted matching [default: 1]
    #[arg(long)]
    max_charge: Option<u8>,
}

impl NetworkArgs {
    /// Merge flags over file values over defaults.
    pub fn resolve(&self, file: &NetworkSection) -> NetworkConfig {
        let mut config = NetworkConfig::new(
            self.tolerance.or(file.peak_tolerance).unwrap_or(DEFAULT_TOLERANCE),
            self.cosine.or(file.cosine_threshold).unwrap_or(DEFAULT_COSINE),
            self.top_k.or(file.top_k).unwrap_or(DEFAULT_TOP_K),
            self.component_size
                .or(file.max_component_size)
                .unwrap_or(DEFAULT_COMPONENT_SIZE),
        )
        .with_display_mass_cutoff(
            self.mass_cutoff
                .or(file.display_mass_cutoff)
                .unwrap_or(DEFAULT_MASS_CUTOFF),
        );
        config.max_charge = self.max_charge.or(file.max_charge);
        config
    }
}

/// Characteristic filter parameters.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Characteristic fragment ions (m/z)
    #[arg(long, num_args = 1.., value_name = "MZ")]
    ions: Vec<f64>,

    /// Characteristic neutral losses (Da)
    #[arg(long, num_args = 1.., value_name = "MASS")]
    losses: Vec<f64>,

    /// Required distinct ion matches [default: 0]
    #[arg(long)]
    min_ions: Option<usize>,

    /// Required distinct neutral-loss matches [default: 0]
    #[arg(long)]
    min_losses: Option<usize>,

    /// Fragment intensity floor after min-max normalization [default: 0.02]
    #[arg(long)]
    min_intensity: Option<f64>,

    /// How the ion and neutral-loss criteria combine [default: all]
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
}

impl FilterArgs {
    /// Merge flags over file values over defaults. Matching uses the network tolerance.
    pub fn resolve(&self, file: &FilterSection, tolerance: f64) -> FilterConfig {
        let pick = |flags: &Vec<f64>, file: &Option<Vec<f64>>| {
            if flags.is_empty() {
                file.clone().unwrap_or_default()
            } else {
                flags.clone()
            }
        };
        // Non-positive masses are ignored
        let positive = |values: Vec<f64>| -> Vec<f64> {
            values.into_iter().filter(|v| *v > 0.0).collect()
        };

        FilterConfig::new(
            positive(pick(&self.ions, &file.characteristic_ions)),
            positive(pick(&self.losses, &file.characteristic_losses)),
            tolerance,
            self.min_intensity
                .or(file.min_normalized_intensity)
                .unwrap_or(DEFAULT_MIN_NORMALIZED_INTENSITY),
        )
        .with_min_matches(
            self.min_ions.or(file.min_ion_matches).unwrap_or(0),
            self.min_losses.or(file.min_loss_matches).unwrap_or(0),
        )
        .with_mode(
            self.mode
                .map(FilterMode::from)
                .or(file.mode)
                .unwrap_or_default(),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build a molecular network from an MGF file
    Network {
        /// Input MGF file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory for matches.csv, network.json and network.graphml
        #[arg(short = 'o', long, value_name = "DIR", default_value = "specnet_output")]
        output: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        #[command(flatten)]
        network: NetworkArgs,
    },

    /// Keep spectra with characteristic ions or neutral losses, then network them
    Filter {
        /// Input MGF file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short = 'o', long, value_name = "DIR", default_value = "specnet_output")]
        output: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        network: NetworkArgs,
    },

    /// Print the neutral losses shared by every spectrum as CSV
    Losses {
        /// Input MGF file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Most intense peaks considered per spectrum
        #[arg(short = 'n', long, default_value = "30")]
        top_n: usize,

        /// Smallest neutral loss reported (Da)
        #[arg(long, default_value = "0")]
        min_loss: f64,

        /// Losses closer than this are merged (Da)
        #[arg(long, default_value = "0.00001")]
        merge_tolerance: f64,
    },

    /// Print the fragment ions shared by every spectrum as CSV
    ///
    /// The output is a starting point for the filter's `--ions`.
    Ions {
        /// Input MGF file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Ions closer than this are merged (Da)
        #[arg(short = 't', long, default_value = "0.00001")]
        tolerance: f64,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Network {
            input,
            output,
            config,
            network,
        } => network::run(input, output, config, network),
        Commands::Filter {
            input,
            output,
            config,
            filter,
            network,
        } => filter::run(input, output, config, filter, network),
        Commands::Losses {
            input,
            top_n,
            min_loss,
            merge_tolerance,
        } => losses::run(input, top_n, min_loss, merge_tolerance),
        Commands::Ions { input, tolerance } => ions::run(input, tolerance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags_or_file() {
        let config = NetworkArgs::default().resolve(&NetworkSection::default());
        assert_eq!(config.peak_tolerance, 0.02);
        assert_eq!(config.cosine_threshold, 0.7);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.max_component_size, 5);
        assert_eq!(config.display_mass_cutoff, Some(0.0));
        assert_eq!(config.max_charge, None);
    }

    #[test]
    fn test_ions_subcommand_parses() {
        let cli = Cli::try_parse_from(["specnet", "ions", "run.mgf", "-t", "0.001"]).unwrap();
        match cli.command {
            Commands::Ions { input, tolerance } => {
                assert_eq!(input, PathBuf::from("run.mgf"));
                assert_eq!(tolerance, 0.001);
            }
            _ => panic!("expected the ions subcommand"),
        }

        let cli = Cli::try_parse_from(["specnet", "ions", "run.mgf"]).unwrap();
        assert!(matches!(cli.command, Commands::Ions { tolerance, .. } if tolerance == 0.00001));
    }

    #[test]
    fn test_flags_override_file() {
        let file = Config::from_str("[network]\ntop_k = 3\ncosine_threshold = 0.9").unwrap();
        let args = NetworkArgs {
            cosine: Some(0.5),
            ..NetworkArgs::default()
        };
        let config = args.resolve(&file.network);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.cosine_threshold, 0.5);
    }

    #[test]
    fn test_filter_resolution() {
        let file = Config::from_str("[filter]\ncharacteristic_losses = [18.0, -1.0]\nmode = \"any\"")
            .unwrap();
        let args = FilterArgs {
            ions: vec![150.0],
            ..FilterArgs::default()
        };
        let config = args.resolve(&file.filter, 0.01);
        assert_eq!(config.characteristic_ions, vec![150.0]);
        assert_eq!(config.characteristic_losses, vec![18.0]);
        assert_eq!(config.mode, FilterMode::Any);
        assert_eq!(config.tolerance, 0.01);
        assert_eq!(config.min_normalized_intensity, 0.02);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "specnet", "-vv", "filter", "in.mgf", "--ions", "150.0", "175.1", "--mode", "any",
            "--cosine", "0.8",
        ])
        .unwrap();
        assert_eq!(cli.verbosity(), 2);
        assert!(matches!(cli.command, Commands::Filter { .. }));
    }
}
