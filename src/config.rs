//! Job configuration for spectral networking.
//!
//! Every value is supplied by the caller. The configuration is validated once at the job
//! boundary and the algorithms downstream take the validated values as given.

use serde::{Deserialize, Serialize};

/// Errors raised for an unusable configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Peak tolerance is negative or not a finite number
    #[error("Invalid peak tolerance: {0} (must be a finite value >= 0)")]
    InvalidTolerance(f64),

    /// Cosine threshold is outside `[0, 1]`
    #[error("Invalid cosine threshold: {0} (must be within [0, 1])")]
    InvalidThreshold(f64),

    /// Top-K neighbor count is zero
    #[error("Invalid top-K neighbor count: must be at least 1")]
    InvalidTopK,

    /// Component size bound is zero
    #[error("Invalid maximum component size: must be at least 1")]
    InvalidComponentSize,

    /// Maximum charge state is zero
    #[error("Invalid maximum charge: must be at least 1")]
    InvalidMaxCharge,

    /// Display mass cutoff is not a finite number
    #[error("Invalid display mass cutoff: {0}")]
    InvalidMassCutoff(f64),

    /// Normalized intensity floor is outside `[0, 1]`
    #[error("Invalid normalized intensity floor: {0} (must be within [0, 1])")]
    InvalidIntensityFloor(f64),
}

/// Parameters of one networking job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Peak m/z tolerance in Da
    pub peak_tolerance: f64,

    /// Minimum alignment score for a neighbor to be kept
    pub cosine_threshold: f64,

    /// Neighbors kept per base spectrum
    pub top_k: usize,

    /// Largest connected component allowed after pruning
    pub max_component_size: usize,

    /// Precursor m/z above which nodes get the highlight color
    #[serde(default)]
    pub display_mass_cutoff: Option<f64>,

    /// Highest charge state considered for shifted matching (1 when unset)
    #[serde(default)]
    pub max_charge: Option<u8>,
}

impl NetworkConfig {
    /// Create a configuration from the four required parameters
    pub fn new(
        peak_tolerance: f64,
        cosine_threshold: f64,
        top_k: usize,
        max_component_size: usize,
    ) -> Self {
        Self {
            peak_tolerance,
            cosine_threshold,
            top_k,
            max_component_size,
            display_mass_cutoff: None,
            max_charge: None,
        }
    }

    /// Set the display mass cutoff
    pub fn with_display_mass_cutoff(mut self, cutoff: f64) -> Self {
        self.display_mass_cutoff = Some(cutoff);
        self
    }

    /// Set the maximum charge state for shifted matching
    pub fn with_max_charge(mut self, max_charge: u8) -> Self {
        self.max_charge = Some(max_charge);
        self
    }

    /// Charge states `1..=n` considered by the peak matcher
    pub fn effective_max_charge(&self) -> u8 {
        self.max_charge.unwrap_or(1)
    }

    /// Check every parameter, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.peak_tolerance.is_finite() || self.peak_tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.peak_tolerance));
        }
        if !(0.0..=1.0).contains(&self.cosine_threshold) {
            return Err(ConfigError::InvalidThreshold(self.cosine_threshold));
        }
        if self.top_k == 0 {
            return Err(ConfigError::InvalidTopK);
        }
        if self.max_component_size == 0 {
            return Err(ConfigError::InvalidComponentSize);
        }
        if self.max_charge == Some(0) {
            return Err(ConfigError::InvalidMaxCharge);
        }
        if let Some(cutoff) = self.display_mass_cutoff {
            if !cutoff.is_finite() {
                return Err(ConfigError::InvalidMassCutoff(cutoff));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = NetworkConfig::new(0.02, 0.7, 10, 5)
            .with_display_mass_cutoff(0.0)
            .with_max_charge(2);
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.effective_max_charge(), 2);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            NetworkConfig::new(-0.1, 0.7, 10, 5).validate(),
            Err(ConfigError::InvalidTolerance(-0.1))
        );
        assert!(matches!(
            NetworkConfig::new(f64::NAN, 0.7, 10, 5).validate(),
            Err(ConfigError::InvalidTolerance(_))
        ));
        assert_eq!(
            NetworkConfig::new(0.02, 1.5, 10, 5).validate(),
            Err(ConfigError::InvalidThreshold(1.5))
        );
        assert_eq!(
            NetworkConfig::new(0.02, 0.7, 0, 5).validate(),
            Err(ConfigError::InvalidTopK)
        );
        assert_eq!(
            NetworkConfig::new(0.02, 0.7, 10, 0).validate(),
            Err(ConfigError::InvalidComponentSize)
        );
        assert_eq!(
            NetworkConfig::new(0.02, 0.7, 10, 5).with_max_charge(0).validate(),
            Err(ConfigError::InvalidMaxCharge)
        );
    }

    #[test]
    fn test_zero_tolerance_is_allowed() {
        assert!(NetworkConfig::new(0.0, 0.0, 1, 1).validate().is_ok());
    }

    #[test]
    fn test_deserialize_optional_fields() {
        let json = r#"{"peak_tolerance":0.02,"cosine_threshold":0.7,"top_k":10,"max_component_size":5}"#;
        let config: NetworkConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.display_mass_cutoff, None);
        assert_eq!(config.effective_max_charge(), 1);
    }
}
