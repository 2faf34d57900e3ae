//! TOML configuration file support for power users.
//!
//! Instead of passing many CLI flags, users can specify settings in a config file:
//!
//! ```toml
//! # specnet.toml
//! [network]
//! peak_tolerance = 0.01
//! cosine_threshold = 0.75
//! top_k = 15
//! max_component_size = 50
//!
//! [filter]
//! characteristic_ions = [175.119, 147.113]
//! characteristic_losses = [17.027, 46.005]
//! min_ion_matches = 1
//! mode = "any"
//! ```
//!
//! Explicit command-line flags always win over file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use specnet::filter::FilterMode;

/// Root configuration structure for specnet.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Networking settings.
    #[serde(default)]
    pub network: NetworkSection,

    /// Characteristic filter settings.
    #[serde(default)]
    pub filter: FilterSection,
}

/// Configuration for network construction.
#[derive(Debug, Default, Deserialize)]
pub struct NetworkSection {
    /// Peak m/z tolerance in Da.
    pub peak_tolerance: Option<f64>,

    /// Minimum alignment score for an edge.
    pub cosine_threshold: Option<f64>,

    /// Neighbors kept per spectrum.
    pub top_k: Option<usize>,

    /// Largest connected component after pruning.
    pub max_component_size: Option<usize>,

    /// Precursor m/z above which nodes are highlighted.
    pub display_mass_cutoff: Option<f64>,

    /// Highest charge state tried for shifted matching.
    pub max_charge: Option<u8>,
}

/// Configuration for the characteristic filter.
#[derive(Debug, Default, Deserialize)]
pub struct FilterSection {
    /// Diagnostic fragment ions.
    pub characteristic_ions: Option<Vec<f64>>,

    /// Diagnostic neutral losses.
    pub characteristic_losses: Option<Vec<f64>>,

    /// Required distinct ion matches.
    pub min_ion_matches: Option<usize>,

    /// Required distinct neutral-loss matches.
    pub min_loss_matches: Option<usize>,

    /// Fragment intensity floor after min-max normalization.
    pub min_normalized_intensity: Option<f64>,

    /// How the two criteria combine.
    pub mode: Option<FilterMode>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the file when a path is given, otherwise use an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [network]
            peak_tolerance = 0.01
            cosine_threshold = 0.75
            top_k = 15
            max_component_size = 50
            max_charge = 2

            [filter]
            characteristic_ions = [175.119, 147.113]
            characteristic_losses = [17.027]
            min_ion_matches = 1
            mode = "any"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.network.peak_tolerance, Some(0.01));
        assert_eq!(config.network.cosine_threshold, Some(0.75));
        assert_eq!(config.network.top_k, Some(15));
        assert_eq!(config.network.max_component_size, Some(50));
        assert_eq!(config.network.max_charge, Some(2));
        assert_eq!(config.network.display_mass_cutoff, None);
        assert_eq!(config.filter.characteristic_ions, Some(vec![175.119, 147.113]));
        assert_eq!(config.filter.min_ion_matches, Some(1));
        assert_eq!(config.filter.mode, Some(FilterMode::Any));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [network]
            top_k = 3
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.network.top_k, Some(3));
        assert_eq!(config.network.peak_tolerance, None);
        assert_eq!(config.filter.characteristic_ions, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.network.cosine_threshold, None);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_str("[network]\ntop_k = \"many\"").is_err());
    }
}
