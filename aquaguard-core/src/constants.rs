//! Default Parameters and Water-Quality Reference Values
//!
//! Values come from the farm's existing monitoring practice: hourly sampling,
//! a one-day comparison window and the reference lines drawn on the operator
//! dashboard.

// ===== WINDOWING =====

/// Readings per comparison window (hourly samples, one day).
pub const DEFAULT_LOOKBACK: usize = 24;

// ===== ANOMALY SCORING =====

/// Mean-squared drift above which conditions are flagged for attention.
///
/// Applied to means of min-max normalized features, so it is unitless.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 0.015;

/// Multiple of the threshold above which an alert becomes critical.
pub const DEFAULT_CRITICAL_MULTIPLIER: f64 = 2.0;

/// Step-to-step squared change that labels a training sequence anomalous.
pub const TRAINING_LABEL_THRESHOLD: f64 = 0.01;

// ===== CLASSIFIER CONTRACT =====

/// Allowed deviation of a class-probability sum from 1.0.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

// ===== WATER QUALITY LIMITS =====

/// Lower edge of the pH band tolerated by tropical farmed fish.
pub const PH_SAFE_MIN: f64 = 6.5;

/// Upper edge of the pH band.
pub const PH_SAFE_MAX: f64 = 8.5;

/// Dissolved oxygen below this (mg/L) stresses stock.
pub const OXYGEN_CRITICAL_MG_L: f64 = 4.0;

/// Milliseconds per hour, the nominal sampling interval.
pub const HOUR_MS: u64 = 3_600_000;
