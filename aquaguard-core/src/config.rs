//! Scoring configuration
//!
//! Three options control the anomaly scorer:
//!
//! | Key                   | Default | Meaning                              |
//! |-----------------------|---------|--------------------------------------|
//! | `lookback_hours`      | 24      | readings per window                  |
//! | `anomaly_threshold`   | 0.015   | drift above which ATTENTION is raised|
//! | `critical_multiplier` | 2.0     | threshold multiple for CRITICAL      |
//!
//! Missing keys take their defaults, so `{}` is a valid configuration file.
//!
//! ```rust
//! use aquaguard_core::ScorerConfig;
//!
//! let config = ScorerConfig::from_json_str(r#"{ "anomaly_threshold": 0.02 }"#).unwrap();
//! assert_eq!(config.lookback_hours, 24);
//! assert_eq!(config.critical_threshold(), 0.04);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_ANOMALY_THRESHOLD, DEFAULT_CRITICAL_MULTIPLIER, DEFAULT_LOOKBACK},
    errors::{MonitorError, MonitorResult},
};

/// Anomaly scorer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScorerConfig {
    /// Readings per window (hourly sampling, so hours)
    pub lookback_hours: usize,
    /// Drift score above which conditions need attention
    pub anomaly_threshold: f64,
    /// Multiple of the threshold above which the alert is critical
    pub critical_multiplier: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            lookback_hours: DEFAULT_LOOKBACK,
            anomaly_threshold: DEFAULT_ANOMALY_THRESHOLD,
            critical_multiplier: DEFAULT_CRITICAL_MULTIPLIER,
        }
    }
}

impl ScorerConfig {
    /// Set the window size
    pub fn with_lookback(mut self, lookback_hours: usize) -> Self {
        self.lookback_hours = lookback_hours;
        self
    }

    /// Set the attention threshold
    pub fn with_threshold(mut self, anomaly_threshold: f64) -> Self {
        self.anomaly_threshold = anomaly_threshold;
        self
    }

    /// Set the critical multiplier
    pub fn with_critical_multiplier(mut self, critical_multiplier: f64) -> Self {
        self.critical_multiplier = critical_multiplier;
        self
    }

    /// Score above which an alert is critical
    pub fn critical_threshold(&self) -> f64 {
        self.anomaly_threshold * self.critical_multiplier
    }

    /// Check every option is in its domain
    pub fn validate(&self) -> MonitorResult<()> {
        if self.lookback_hours == 0 {
            return Err(MonitorError::InvalidConfiguration {
                reason: "lookback_hours must be positive",
            });
        }
        if !self.anomaly_threshold.is_finite() || self.anomaly_threshold <= 0.0 {
            return Err(MonitorError::InvalidConfiguration {
                reason: "anomaly_threshold must be a positive number",
            });
        }
        // Below 1.0 the critical level would sit under the attention level
        if !self.critical_multiplier.is_finite() || self.critical_multiplier < 1.0 {
            return Err(MonitorError::InvalidConfiguration {
                reason: "critical_multiplier must be at least 1.0",
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    #[cfg(feature = "std")]
    pub fn from_json_str(json: &str) -> MonitorResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log_warn!("invalid scorer configuration: {}", e);
            MonitorError::ConfigIo { reason: "configuration is not valid JSON" }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    #[cfg(feature = "std")]
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> MonitorResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            log_warn!("cannot read scorer configuration {}: {}", path.display(), e);
            MonitorError::ConfigIo { reason: "configuration file could not be read" }
        })?;
        log_debug!("loading scorer configuration from {}", path.display());
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference() {
        let config = ScorerConfig::default();
        assert_eq!(config.lookback_hours, 24);
        assert_eq!(config.anomaly_threshold, 0.015);
        assert_eq!(config.critical_multiplier, 2.0);
        assert_eq!(config.critical_threshold(), 0.03);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_values_rejected() {
        let bad = [
            ScorerConfig::default().with_lookback(0),
            ScorerConfig::default().with_threshold(0.0),
            ScorerConfig::default().with_threshold(-0.1),
            ScorerConfig::default().with_threshold(f64::NAN),
            ScorerConfig::default().with_critical_multiplier(0.5),
            ScorerConfig::default().with_critical_multiplier(f64::INFINITY),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(MonitorError::InvalidConfiguration { .. })),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_json_uses_defaults() {
        assert_eq!(ScorerConfig::from_json_str("{}").unwrap(), ScorerConfig::default());
    }

    #[test]
    fn json_overrides() {
        let config = ScorerConfig::from_json_str(
            r#"{ "lookback_hours": 12, "anomaly_threshold": 0.05, "critical_multiplier": 3.0 }"#,
        )
        .unwrap();
        assert_eq!(config.lookback_hours, 12);
        assert_eq!(config.anomaly_threshold, 0.05);
        assert_eq!(config.critical_multiplier, 3.0);
    }

    #[test]
    fn json_validated_after_parse() {
        assert!(matches!(
            ScorerConfig::from_json_str(r#"{ "lookback_hours": 0 }"#),
            Err(MonitorError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            ScorerConfig::from_json_str("not json"),
            Err(MonitorError::ConfigIo { .. })
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "anomaly_threshold": 0.02 }}"#).unwrap();

        let config = ScorerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.anomaly_threshold, 0.02);
        assert_eq!(config.lookback_hours, 24);
    }

    #[test]
    fn missing_file_is_config_io() {
        let dir = tempfile::tempdir().unwrap();
        let result = ScorerConfig::from_json_file(dir.path().join("absent.json"));
        assert!(matches!(result, Err(MonitorError::ConfigIo { .. })));
    }
}
