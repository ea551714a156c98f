//! Planner configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::error::ValidationError;

/// Raw planner configuration as read from a YAML file. Absent values fall
/// back to defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfigRaw {
    /// utilization percentage that flags a resource as a warning bottleneck
    pub warning_utilization_pct: Option<f64>,
    /// utilization percentage that flags a resource as a critical bottleneck
    pub critical_utilization_pct: Option<f64>,
    /// contribution of one CPU core to the item sort weight
    pub cpu_weight: Option<f64>,
    /// contribution of one GB of memory to the item sort weight
    pub memory_weight: Option<f64>,
    /// placement algorithm, e.g. FirstFit or ThresholdFit[threshold=0.9]
    pub algorithm: Option<String>,
}

/// Represents planner configuration.
///
/// The severity thresholds and sort weights are deliberately configurable;
/// operational guidance on acceptable utilization bands varies between
/// environments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub warning_utilization_pct: f64,
    pub critical_utilization_pct: f64,
    pub cpu_weight: f64,
    pub memory_weight: f64,
    pub algorithm: String,
}

impl PlannerConfig {
    /// Creates planner config with default parameter values.
    pub fn new() -> Self {
        Self {
            warning_utilization_pct: 80.,
            critical_utilization_pct: 95.,
            cpu_weight: 1.,
            memory_weight: 0.5,
            algorithm: "FirstFit".to_string(),
        }
    }

    /// Creates planner config by reading parameter values from a YAML file
    /// (uses default values for absent parameters).
    pub fn from_file(file_name: &str) -> Result<Self, ValidationError> {
        let text = std::fs::read_to_string(file_name).map_err(|e| ValidationError::InvalidConfig {
            reason: format!("can't read file {}: {}", file_name, e),
        })?;
        let raw: PlannerConfigRaw = serde_yaml::from_str(&text).map_err(|e| ValidationError::InvalidConfig {
            reason: format!("can't parse YAML from file {}: {}", file_name, e),
        })?;
        Self::from_raw(raw)
    }

    /// Applies defaults to a raw config and validates the result.
    pub fn from_raw(raw: PlannerConfigRaw) -> Result<Self, ValidationError> {
        let default = PlannerConfig::new();
        let config = Self {
            warning_utilization_pct: raw.warning_utilization_pct.unwrap_or(default.warning_utilization_pct),
            critical_utilization_pct: raw.critical_utilization_pct.unwrap_or(default.critical_utilization_pct),
            cpu_weight: raw.cpu_weight.unwrap_or(default.cpu_weight),
            memory_weight: raw.memory_weight.unwrap_or(default.memory_weight),
            algorithm: raw.algorithm.unwrap_or(default.algorithm),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !self.warning_utilization_pct.is_finite() || self.warning_utilization_pct <= 0. {
            return Err(ValidationError::InvalidConfig {
                reason: format!(
                    "warning_utilization_pct must be a positive finite number, got {}",
                    self.warning_utilization_pct
                ),
            });
        }
        if !self.critical_utilization_pct.is_finite() || self.critical_utilization_pct < self.warning_utilization_pct {
            return Err(ValidationError::InvalidConfig {
                reason: format!(
                    "critical_utilization_pct must be >= warning_utilization_pct, got {} < {}",
                    self.critical_utilization_pct, self.warning_utilization_pct
                ),
            });
        }
        for (name, value) in [("cpu_weight", self.cpu_weight), ("memory_weight", self.memory_weight)] {
            if !value.is_finite() || value < 0. {
                return Err(ValidationError::InvalidConfig {
                    reason: format!("{} must be a finite non-negative number, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses config value string, which consists of two parts - name and options.
/// Example: ThresholdFit[threshold=0.9] parts are name ThresholdFit and
/// options string "threshold=0.9".
pub fn parse_config_value(config_str: &str) -> (String, Option<String>) {
    match config_str.split_once('[') {
        Some((l, r)) => (l.to_string(), Some(r.to_string().replace(']', ""))),
        None => (config_str.to_string(), None),
    }
}

/// Parses options string from config value, returns map with option names
/// and values.
pub fn parse_options(options_str: &str) -> HashMap<String, String> {
    let mut options = HashMap::new();
    for option_str in options_str.split(',') {
        if let Some((name, value)) = option_str.split_once('=') {
            options.insert(name.to_string(), value.to_string());
        }
    }
    options
}
