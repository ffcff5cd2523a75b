//! Configuration for synthesis and interpretation.
//!
//! Both structs deserialize with per-field defaults, so a JSON document only
//! needs to name the settings it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default register width in bits.
pub const DEFAULT_REGISTER_WIDTH: usize = 8;

/// Default bound on interpreter steps before a run is abandoned.
pub const DEFAULT_MAX_STEPS: usize = 100_000;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Register width must be at least 1 bit")]
    ZeroWidth,

    #[error("Step limit must be at least 1")]
    ZeroStepLimit,
}

/// Settings consumed by [`SynthContext`](crate::builder::SynthContext).
///
/// # Example
///
/// ```rust
/// use gatesynth::config::SynthConfig;
///
/// let config = SynthConfig::from_json(r#"{ "register_width": 4 }"#).unwrap();
/// assert_eq!(config.register_width, 4);
/// assert!(config.validate_on_finish);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Width used by [`SynthContext::register`](crate::builder::SynthContext::register)
    pub register_width: usize,

    /// Run graph validation when a program is frozen
    pub validate_on_finish: bool,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            register_width: DEFAULT_REGISTER_WIDTH,
            validate_on_finish: true,
        }
    }
}

impl SynthConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.register_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        Ok(config)
    }

    pub fn with_register_width(mut self, width: usize) -> Self {
        self.register_width = width;
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_on_finish = enabled;
        self
    }
}

/// Settings consumed by [`Machine`](crate::runtime::Machine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Steps allowed in a single `run` before it fails
    pub max_steps: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl MachineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.max_steps == 0 {
            return Err(ConfigError::ZeroStepLimit);
        }
        Ok(config)
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let synth = SynthConfig::default();
        let machine = MachineConfig::default();

        assert_eq!(synth.register_width, DEFAULT_REGISTER_WIDTH);
        assert!(synth.validate_on_finish);
        assert_eq!(machine.max_steps, DEFAULT_MAX_STEPS);
    }

    #[test]
    fn empty_json_yields_defaults() {
        assert_eq!(SynthConfig::from_json("{}").unwrap(), SynthConfig::default());
        assert_eq!(
            MachineConfig::from_json("{}").unwrap(),
            MachineConfig::default()
        );
    }

    #[test]
    fn partial_json_overrides_named_fields() {
        let config = SynthConfig::from_json(r#"{ "validate_on_finish": false }"#).unwrap();

        assert!(!config.validate_on_finish);
        assert_eq!(config.register_width, DEFAULT_REGISTER_WIDTH);
    }

    #[test]
    fn zero_values_are_rejected() {
        assert!(matches!(
            SynthConfig::from_json(r#"{ "register_width": 0 }"#),
            Err(ConfigError::ZeroWidth)
        ));
        assert!(matches!(
            MachineConfig::from_json(r#"{ "max_steps": 0 }"#),
            Err(ConfigError::ZeroStepLimit)
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            SynthConfig::from_json("{ register_width"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn fluent_setters_apply() {
        let config = SynthConfig::default()
            .with_register_width(16)
            .with_validation(false);

        assert_eq!(config.register_width, 16);
        assert!(!config.validate_on_finish);
        assert_eq!(MachineConfig::default().with_max_steps(5).max_steps, 5);
    }
}
