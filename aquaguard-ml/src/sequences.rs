//! Training sequences for a sequence anomaly model
//!
//! Prepares labelled inputs for training a recurrent model on the reading
//! history. The whole series is normalized in one call, then every position
//! `i >= lookback` yields the `lookback` rows before it, labelled anomalous
//! when the step from row `i - 1` to row `i` is large:
//!
//! ```text
//! step_error(i) = mean((row[i] - row[i-1])²)      anomalous if > 0.01
//! ```
//!
//! Flattened column names follow `<param>_t-<k>`, oldest first.

use aquaguard_core::{
    constants::TRAINING_LABEL_THRESHOLD, normalize, FeatureRow, MonitorError, MonitorResult,
    Parameter, Reading,
};

use crate::scoring::drift_score;

/// One labelled input window
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSequence {
    /// Normalized rows preceding the target, oldest first
    pub window: Vec<FeatureRow>,
    /// Mean squared change between the target row and the one before it
    pub step_error: f64,
    /// `step_error` above the label threshold
    pub anomalous: bool,
}

impl TrainingSequence {
    /// Rows concatenated in time order, features in parameter order
    pub fn flatten(&self) -> Vec<f64> {
        self.window.iter().flat_map(|row| row.iter().copied()).collect()
    }
}

/// Column name key for one parameter
fn column_key(parameter: Parameter) -> &'static str {
    match parameter {
        Parameter::Ph => "ph",
        Parameter::Temperature => "temperature",
        Parameter::Oxygen => "oxygen",
        Parameter::Turbidity => "turbidity",
    }
}

/// Names for the columns of [`TrainingSequence::flatten`]
pub fn flattened_feature_names(lookback: usize) -> Vec<String> {
    (0..lookback)
        .flat_map(|t| {
            Parameter::ALL
                .into_iter()
                .map(move |p| format!("{}_t-{}", column_key(p), lookback - t))
        })
        .collect()
}

/// Build sequences with the default label threshold
pub fn build_training_sequences(readings: &[Reading], lookback: usize) -> MonitorResult<Vec<TrainingSequence>> {
    build_training_sequences_with(readings, lookback, TRAINING_LABEL_THRESHOLD)
}

/// Build sequences labelled against `label_threshold`
pub fn build_training_sequences_with(
    readings: &[Reading],
    lookback: usize,
    label_threshold: f64,
) -> MonitorResult<Vec<TrainingSequence>> {
    if lookback == 0 {
        return Err(MonitorError::InvalidConfiguration {
            reason: "lookback must be at least one reading",
        });
    }
    if !label_threshold.is_finite() || label_threshold < 0.0 {
        return Err(MonitorError::InvalidConfiguration {
            reason: "label threshold must be a non-negative number",
        });
    }
    let required = lookback + 1;
    if readings.len() < required {
        return Err(MonitorError::InsufficientData { required, available: readings.len() });
    }

    let rows = normalize(readings).rows;
    let sequences: Vec<TrainingSequence> = (lookback..rows.len())
        .map(|i| {
            let step_error = drift_score(&rows[i], &rows[i - 1]);
            TrainingSequence {
                window: rows[i - lookback..i].to_vec(),
                step_error,
                anomalous: step_error > label_threshold,
            }
        })
        .collect();

    log::debug!(
        "built {} training sequences ({} anomalous)",
        sequences.len(),
        sequences.iter().filter(|s| s.anomalous).count()
    );
    Ok(sequences)
}
