//! Sensor readings and the four monitored water-quality parameters

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{MonitorError, MonitorResult};

/// Timestamp in milliseconds since epoch
pub type Timestamp = u64;

/// Number of monitored parameters per reading
pub const FEATURE_COUNT: usize = 4;

/// One row of normalized or raw features, in [`Parameter::ALL`] order
pub type FeatureRow = [f64; FEATURE_COUNT];

/// Monitored water-quality parameter
///
/// Declaration order is the priority order used to break ties when two
/// parameters drift by the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parameter {
    /// Acidity, unitless
    #[cfg_attr(feature = "serde", serde(rename = "pH"))]
    Ph,
    /// Water temperature, °C
    Temperature,
    /// Dissolved oxygen, mg/L
    Oxygen,
    /// Turbidity, NTU
    Turbidity,
}

impl Parameter {
    /// All parameters in priority order
    pub const ALL: [Parameter; FEATURE_COUNT] = [
        Parameter::Ph,
        Parameter::Temperature,
        Parameter::Oxygen,
        Parameter::Turbidity,
    ];

    /// Column index inside a [`FeatureRow`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name used on reports
    pub const fn name(self) -> &'static str {
        match self {
            Parameter::Ph => "pH",
            Parameter::Temperature => "Temperature",
            Parameter::Oxygen => "Oxygen",
            Parameter::Turbidity => "Turbidity",
        }
    }

    /// Format a raw value the way the operator dashboard shows it
    pub fn format_value(self, value: f64) -> String {
        match self {
            Parameter::Ph => format!("{value:.2}"),
            Parameter::Temperature => format!("{value:.1}°C"),
            Parameter::Oxygen => format!("{value:.2} mg/L"),
            Parameter::Turbidity => format!("{value:.1} NTU"),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Single multi-parameter sensor reading
///
/// Immutable once recorded. Readings sharing a timestamp are kept as-is;
/// deduplication is the feed's responsibility.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Sample time in milliseconds
    pub timestamp: Timestamp,
    /// pH
    pub ph: f64,
    /// Water temperature in °C
    pub temperature: f64,
    /// Dissolved oxygen in mg/L
    pub oxygen: f64,
    /// Turbidity in NTU
    pub turbidity: f64,
}

impl Reading {
    /// Create a reading
    pub const fn new(timestamp: Timestamp, ph: f64, temperature: f64, oxygen: f64, turbidity: f64) -> Self {
        Self { timestamp, ph, temperature, oxygen, turbidity }
    }

    /// Value of one parameter
    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Ph => self.ph,
            Parameter::Temperature => self.temperature,
            Parameter::Oxygen => self.oxygen,
            Parameter::Turbidity => self.turbidity,
        }
    }

    /// Project onto the four numeric features
    pub fn features(&self) -> FeatureRow {
        [self.ph, self.temperature, self.oxygen, self.turbidity]
    }

    /// Reject NaN or infinite measurements
    pub fn validate(&self) -> MonitorResult<()> {
        match Parameter::ALL.into_iter().find(|p| !self.value(*p).is_finite()) {
            Some(parameter) => Err(MonitorError::InvalidValue { parameter }),
            None => Ok(()),
        }
    }
}

/// Reading row with possibly missing measurements
///
/// Gaps are filled forward from the previous stored reading when appended
/// to a [`ReadingStore`](crate::store::ReadingStore).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartialReading {
    /// Sample time in milliseconds
    pub timestamp: Timestamp,
    /// pH, if measured
    pub ph: Option<f64>,
    /// Water temperature in °C, if measured
    pub temperature: Option<f64>,
    /// Dissolved oxygen in mg/L, if measured
    pub oxygen: Option<f64>,
    /// Turbidity in NTU, if measured
    pub turbidity: Option<f64>,
}

impl PartialReading {
    /// Complete the row using `previous` for every missing field
    pub fn fill_forward(&self, previous: Option<&Reading>) -> MonitorResult<Reading> {
        let pick = |own: Option<f64>, parameter: Parameter| -> MonitorResult<f64> {
            match (own, previous) {
                (Some(value), _) => Ok(value),
                (None, Some(prev)) => Ok(prev.value(parameter)),
                (None, None) => Err(MonitorError::InsufficientData { required: 1, available: 0 }),
            }
        };

        Ok(Reading {
            timestamp: self.timestamp,
            ph: pick(self.ph, Parameter::Ph)?,
            temperature: pick(self.temperature, Parameter::Temperature)?,
            oxygen: pick(self.oxygen, Parameter::Oxygen)?,
            turbidity: pick(self.turbidity, Parameter::Turbidity)?,
        })
    }
}

/// Change between the two most recent readings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReadingDelta {
    /// Elapsed time between the two readings in milliseconds
    pub elapsed_ms: u64,
    /// Per-parameter change, latest minus previous, in [`Parameter::ALL`] order
    pub change: FeatureRow,
}

impl ReadingDelta {
    /// Change between `previous` and `latest`
    pub fn between(previous: &Reading, latest: &Reading) -> Self {
        let prev = previous.features();
        let last = latest.features();
        Self {
            elapsed_ms: latest.timestamp.saturating_sub(previous.timestamp),
            change: core::array::from_fn(|i| last[i] - prev[i]),
        }
    }

    /// Change of one parameter
    pub fn of(&self, parameter: Parameter) -> f64 {
        self.change[parameter.index()]
    }
}
