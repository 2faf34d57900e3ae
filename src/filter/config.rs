use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// How the ion and neutral-loss criteria combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Both criteria must be met
    #[default]
    All,
    /// Either criterion is enough
    Any,
}

/// Characteristic ion / neutral-loss filter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Diagnostic fragment m/z values
    pub characteristic_ions: Vec<f64>,

    /// Diagnostic neutral-loss masses
    pub characteristic_losses: Vec<f64>,

    /// Distinct characteristic ions a spectrum must contain
    pub min_ion_matches: usize,

    /// Distinct characteristic losses a spectrum must contain
    pub min_loss_matches: usize,

    /// Absolute m/z tolerance in Da (strict `<`)
    pub tolerance: f64,

    /// Fragments at or below this min-max normalized intensity are ignored
    pub min_normalized_intensity: f64,

    /// Criterion combination
    #[serde(default)]
    pub mode: FilterMode,
}

impl FilterConfig {
    /// Create a filter over the given ions and losses.
    ///
    /// Both match counts start at zero, so a spectrum passes `All` mode until thresholds
    /// are raised.
    pub fn new(
        characteristic_ions: Vec<f64>,
        characteristic_losses: Vec<f64>,
        tolerance: f64,
        min_normalized_intensity: f64,
    ) -> Self {
        Self {
            characteristic_ions,
            characteristic_losses,
            min_ion_matches: 0,
            min_loss_matches: 0,
            tolerance,
            min_normalized_intensity,
            mode: FilterMode::All,
        }
    }

    /// Set the required match counts
    pub fn with_min_matches(mut self, ions: usize, losses: usize) -> Self {
        self.min_ion_matches = ions;
        self.min_loss_matches = losses;
        self
    }

    /// Set how the two criteria combine
    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check tolerance and intensity floor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if !(0.0..=1.0).contains(&self.min_normalized_intensity) {
            return Err(ConfigError::InvalidIntensityFloor(
                self.min_normalized_intensity,
            ));
        }
        Ok(())
    }
}
