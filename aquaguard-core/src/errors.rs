//! Error Types for Water-Quality Monitoring
//!
//! ## Design Philosophy
//!
//! Every failure the monitoring core can produce is a plain value:
//!
//! 1. **Copy Semantics**: Errors implement Copy so they can be returned from
//!    pure scoring functions and stored next to reports without cloning.
//!
//! 2. **Static Messages**: Reasons are `&'static str`. Detail that only matters
//!    for debugging (file paths, parser output) goes to the log instead.
//!
//! 3. **Distinct Outcomes**: "not enough data yet" and "no model loaded" are
//!    separate variants so the dashboard never mistakes them for a NORMAL
//!    report or a guessed diagnosis.
//!
//! ## Error Categories
//!
//! ### Data Availability
//! - `InsufficientData`: fewer readings than the requested window needs
//! - `InvalidValue`: a measurement is NaN or infinite
//!
//! ### Classifier Boundary
//! - `ModelUnavailable`: no parasite model has been loaded
//! - `InvalidProbabilities`: a model returned a distribution that breaks the contract
//!
//! ### Configuration
//! - `InvalidConfiguration`: non-positive lookback or threshold, inverted limits
//! - `ConfigIo`: configuration file missing or not valid JSON
//!
//! None of these is retried inside the core. Scoring is a pure function of its
//! input, so retrying without new readings cannot change the outcome.
//!
//! ```rust
//! use aquaguard_core::{MonitorError, ReadingStore, extract_windows};
//!
//! let store = ReadingStore::new();
//! match extract_windows(store.as_slice(), 24) {
//!     Err(MonitorError::InsufficientData { required, available }) => {
//!         assert_eq!((required, available), (24, 0));
//!         // wait for more readings
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror_no_std::Error;

use crate::reading::Parameter;

/// Result type for monitoring operations
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Monitoring errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MonitorError {
    /// Not enough readings for the requested window
    #[error("Insufficient data: need {required} readings, have {available}")]
    InsufficientData {
        /// Readings needed
        required: usize,
        /// Readings actually available
        available: usize,
    },

    /// Classifier not loaded or not configured
    #[error("Model unavailable: {reason}")]
    ModelUnavailable {
        /// Why no model could be used
        reason: &'static str,
    },

    /// Configuration value outside its allowed domain
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Which option is out of range
        reason: &'static str,
    },

    /// Measurement is not a finite number
    #[error("Invalid value for {parameter}: not a finite number")]
    InvalidValue {
        /// Offending parameter
        parameter: Parameter,
    },

    /// Classifier output is not a valid probability distribution
    #[error("Invalid class probabilities: {reason}")]
    InvalidProbabilities {
        /// Which constraint the output breaks
        reason: &'static str,
    },

    /// Configuration source could not be read or parsed
    #[error("Configuration could not be loaded: {reason}")]
    ConfigIo {
        /// Whether reading or parsing failed
        reason: &'static str,
    },
}

impl MonitorError {
    /// True when waiting for more readings could resolve the error
    pub fn is_recoverable_with_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_include_counts() {
        let err = MonitorError::InsufficientData { required: 24, available: 7 };
        assert_eq!(err.to_string(), "Insufficient data: need 24 readings, have 7");
    }

    #[test]
    fn invalid_value_names_parameter() {
        let err = MonitorError::InvalidValue { parameter: Parameter::Oxygen };
        assert_eq!(err.to_string(), "Invalid value for Oxygen: not a finite number");
    }

    #[test]
    fn only_insufficient_data_waits_for_readings() {
        assert!(MonitorError::InsufficientData { required: 1, available: 0 }.is_recoverable_with_data());
        assert!(!MonitorError::ModelUnavailable { reason: "x" }.is_recoverable_with_data());
        assert!(!MonitorError::InvalidConfiguration { reason: "x" }.is_recoverable_with_data());
    }
}
