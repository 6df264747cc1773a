//! Summary statistics over a span of readings
//!
//! Backs the history view: count, mean, spread and extremes for each
//! parameter. Standard deviation is the population form.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    errors::{MonitorError, MonitorResult},
    reading::{Parameter, Reading, FEATURE_COUNT},
};

/// Statistics for one parameter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ParameterSummary {
    /// Number of readings
    pub count: usize,
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
}

/// Statistics for all four parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ReadingSummary {
    summaries: [ParameterSummary; FEATURE_COUNT],
}

impl ReadingSummary {
    /// Summarise `readings`; fails on empty input
    pub fn from_readings(readings: &[Reading]) -> MonitorResult<Self> {
        if readings.is_empty() {
            return Err(MonitorError::InsufficientData { required: 1, available: 0 });
        }
        Ok(Self {
            summaries: Parameter::ALL.map(|p| summarize(readings.iter().map(|r| r.value(p)))),
        })
    }

    /// Statistics for one parameter
    pub fn get(&self, parameter: Parameter) -> &ParameterSummary {
        &self.summaries[parameter.index()]
    }
}

fn summarize<I>(values: I) -> ParameterSummary
where
    I: Iterator<Item = f64> + Clone,
{
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.clone() {
        count += 1;
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }

    let mean = sum / count as f64;
    let variance = values.map(|v| (v - mean) * (v - mean)).sum::<f64>() / count as f64;

    ParameterSummary {
        count,
        mean,
        std_dev: libm::sqrt(variance),
        min,
        max,
    }
}
