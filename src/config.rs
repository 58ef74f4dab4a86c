//! Panel configuration parameters
//!
//! All tunable parameters for the security service.  Values can be loaded
//! from JSON; out-of-range values are rejected, never clamped.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Classifier confidence (percent) used when none is configured.
pub const DEFAULT_CAT_CONFIDENCE: f32 = 50.0;

/// What to do when a sensor change names a sensor the store has never seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownSensorPolicy {
    /// Fail with `InvalidSensor` before touching any state.
    #[default]
    Reject,
    /// Add the sensor (inactive) and then apply the change.
    Register,
}

/// Core panel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Minimum classifier confidence (0-100%) for a frame to count as a cat
    pub cat_confidence_threshold: f32,
    /// Handling of sensor changes for sensors not registered in the store
    pub unknown_sensor_policy: UnknownSensorPolicy,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            cat_confidence_threshold: DEFAULT_CAT_CONFIDENCE,
            unknown_sensor_policy: UnknownSensorPolicy::Reject,
        }
    }
}

impl PanelConfig {
    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.cat_confidence_threshold) {
            return Err(ConfigError::ValidationFailed(
                "cat_confidence_threshold must be 0.0–100.0",
            ));
        }
        Ok(())
    }
}

/// Errors from loading a [`PanelConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema.
    Malformed(String),
    /// A field failed range validation.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(msg) => write!(f, "malformed config: {msg}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = PanelConfig::default();
        assert!((c.cat_confidence_threshold - 50.0).abs() < f32::EPSILON);
        assert_eq!(c.unknown_sensor_policy, UnknownSensorPolicy::Reject);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn serde_roundtrip() {
        let c = PanelConfig {
            cat_confidence_threshold: 72.5,
            unknown_sensor_policy: UnknownSensorPolicy::Register,
        };
        let json = serde_json::to_string(&c).unwrap();
        let c2 = PanelConfig::from_json(&json).unwrap();
        assert_eq!(c, c2);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c = PanelConfig::from_json(r#"{ "unknown_sensor_policy": "register" }"#).unwrap();
        assert!((c.cat_confidence_threshold - DEFAULT_CAT_CONFIDENCE).abs() < f32::EPSILON);
        assert_eq!(c.unknown_sensor_policy, UnknownSensorPolicy::Register);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = PanelConfig::from_json(r#"{ "cat_confidence_threshold": 150.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed(_)));
        let err = PanelConfig::from_json(r#"{ "cat_confidence_threshold": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed(_)));
    }

    #[test]
    fn garbage_is_malformed() {
        let err = PanelConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }
}
