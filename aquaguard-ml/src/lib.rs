//! Anomaly Scoring and Parasite Diagnosis for AquaGuard
//!
//! ## Overview
//!
//! This crate holds the two pieces of decision logic behind the pond
//! dashboard:
//!
//! 1. **Water-quality drift scoring** ([`AnomalyScorer`]): compares the last
//!    day of readings with the day before and grades the difference as
//!    NORMAL, ATTENTION or CRITICAL.
//! 2. **Parasite diagnosis contract** ([`Diagnoser`]): runs an injected
//!    image classifier and turns its output into a checked
//!    [`DiagnosisResult`] with treatment guidance.
//!
//! ## Drift Score
//!
//! ```text
//! readings ──► current / baseline windows ──► joint min-max scaling
//!          ──► per-feature means ──► mean squared difference ──► level
//! ```
//!
//! The score is a simplified stand-in for the reconstruction error of a
//! trained sequence model. It does not try to be statistically rigorous;
//! a one-day shift of a single parameter from one extreme of the range to
//! the other scores `0.25`, well past the default critical level of `0.03`.
//!
//! ## Usage
//!
//! ```rust
//! use aquaguard_core::{Parameter, Reading, ScorerConfig};
//! use aquaguard_ml::{AlertLevel, AnomalyScorer};
//!
//! let readings: Vec<Reading> = (0..48u64)
//!     .map(|h| {
//!         let oxygen = if h < 24 { 6.5 } else { 2.0 };
//!         Reading::new(h * 3_600_000, 7.0, 28.0, oxygen, 12.0)
//!     })
//!     .collect();
//!
//! let scorer = AnomalyScorer::new(ScorerConfig::default()).unwrap();
//! let report = scorer.score(&readings).unwrap();
//!
//! assert_eq!(report.alert_level(), AlertLevel::Critical);
//! assert_eq!(report.critical_parameter(), Parameter::Oxygen);
//! assert_eq!(report.current_values().get(Parameter::Oxygen), "2.00 mg/L");
//! ```
//!
//! ## Models
//!
//! No trained model ships with this crate. [`ParasiteModel`] is the seam a
//! real classifier plugs into; [`PlaceholderModel`] and [`FixedModel`] exist
//! for demos and tests and are never installed implicitly.
//!
//! ## Training Data
//!
//! [`build_training_sequences`] prepares labelled windows from the reading
//! history for training such a sequence model offline.

#![deny(unsafe_code)]

pub mod diagnosis;
pub mod placeholder;
pub mod scoring;
pub mod sequences;

pub use diagnosis::{
    recommendation_for, ClassProbabilities, Diagnoser, DiagnosisClass, DiagnosisResult,
    MicroscopySample, ParasiteModel, CLASS_COUNT, FALLBACK_RECOMMENDATION,
};
pub use placeholder::{flat_dirichlet, FixedModel, PlaceholderModel};
pub use scoring::{critical_parameter, drift_score, AlertLevel, AnomalyReport, AnomalyScorer, CurrentValues};
pub use sequences::{
    build_training_sequences, build_training_sequences_with, flattened_feature_names,
    TrainingSequence,
};
