//! Window drift scoring and alert grading
//!
//! The score is the mean squared difference between the per-feature means of
//! the current window and of the baseline window, after both have been
//! min-max normalized together:
//!
//! ```text
//! drift[f] = mean(current[:, f]) - mean(baseline[:, f])
//! score    = (drift[pH]² + drift[T]² + drift[O₂]² + drift[NTU]²) / 4
//! ```
//!
//! Grading:
//!
//! | Score                                  | Level     |
//! |----------------------------------------|-----------|
//! | `score <= threshold`                   | NORMAL    |
//! | `threshold < score <= multiplier * threshold` | ATTENTION |
//! | `score > multiplier * threshold`       | CRITICAL  |
//!
//! The scorer holds only its configuration. Every call is independent, so a
//! single scorer can be shared across threads.

use core::fmt;

use aquaguard_core::{
    column_means, extract_windows, normalize, FeatureRow, MonitorResult, Parameter, Reading,
    ReadingStore, ScorerConfig, SharedReadingStore, FEATURE_COUNT,
};
use serde::{ser::SerializeMap, Serialize, Serializer};

/// Graded alert level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    /// Drift within threshold
    Normal,
    /// Drift above threshold
    Attention,
    /// Drift above the critical multiple of the threshold
    Critical,
}

impl AlertLevel {
    /// Grade a score against the attention and critical thresholds
    pub fn classify(score: f64, threshold: f64, critical_threshold: f64) -> Self {
        if score > critical_threshold {
            AlertLevel::Critical
        } else if score > threshold {
            AlertLevel::Attention
        } else {
            AlertLevel::Normal
        }
    }

    /// Upper-case label shown on the dashboard
    pub const fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Normal => "NORMAL",
            AlertLevel::Attention => "ATTENTION",
            AlertLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Latest raw reading with its display strings
///
/// Serializes as a map from parameter name to display string.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentValues {
    reading: Reading,
    formatted: [String; FEATURE_COUNT],
}

impl CurrentValues {
    /// Format every parameter of `reading`
    pub fn from_reading(reading: &Reading) -> Self {
        Self {
            reading: *reading,
            formatted: Parameter::ALL.map(|p| p.format_value(reading.value(p))),
        }
    }

    /// Display string of one parameter
    pub fn get(&self, parameter: Parameter) -> &str {
        &self.formatted[parameter.index()]
    }

    /// Raw reading the strings were built from
    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    /// `(parameter, display string)` pairs in priority order
    pub fn iter(&self) -> impl Iterator<Item = (Parameter, &str)> + '_ {
        Parameter::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

impl Serialize for CurrentValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (parameter, value) in self.iter() {
            map.serialize_entry(parameter.name(), value)?;
        }
        map.end()
    }
}

/// Result of one scoring call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    score: f64,
    threshold: f64,
    alert_level: AlertLevel,
    critical_parameter: Parameter,
    current_values: CurrentValues,
    baseline_available: bool,
    drift: FeatureRow,
}

impl AnomalyReport {
    /// Mean squared drift, never negative
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Attention threshold the score was graded against
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Graded level
    pub fn alert_level(&self) -> AlertLevel {
        self.alert_level
    }

    /// Parameter with the largest absolute drift
    ///
    /// With no drift at all this is the first parameter in priority order.
    pub fn critical_parameter(&self) -> Parameter {
        self.critical_parameter
    }

    /// Most recent raw values
    pub fn current_values(&self) -> &CurrentValues {
        &self.current_values
    }

    /// False when there were fewer than two windows of readings and the
    /// current window was compared with itself
    pub fn baseline_available(&self) -> bool {
        self.baseline_available
    }

    /// Signed normalized drift of one parameter
    pub fn drift(&self, parameter: Parameter) -> f64 {
        self.drift[parameter.index()]
    }

    /// True when the score exceeds the threshold
    pub fn is_anomaly(&self) -> bool {
        self.score > self.threshold
    }
}

/// Mean of squared per-feature differences
pub fn drift_score(current_means: &FeatureRow, baseline_means: &FeatureRow) -> f64 {
    current_means
        .iter()
        .zip(baseline_means)
        .map(|(c, b)| (c - b) * (c - b))
        .sum::<f64>()
        / FEATURE_COUNT as f64
}

/// Parameter with the largest `|drift|`; earlier parameters win ties
pub fn critical_parameter(drift: &FeatureRow) -> Parameter {
    let mut best = Parameter::ALL[0];
    for parameter in Parameter::ALL.into_iter().skip(1) {
        if drift[parameter.index()].abs() > drift[best.index()].abs() {
            best = parameter;
        }
    }
    best
}

/// Windowed drift scorer
#[derive(Debug, Clone)]
pub struct AnomalyScorer {
    config: ScorerConfig,
}

impl AnomalyScorer {
    /// Create a scorer; fails on an invalid configuration
    pub fn new(config: ScorerConfig) -> MonitorResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Readings needed for a full current + baseline comparison
    pub fn span(&self) -> usize {
        self.config.lookback_hours.saturating_mul(2)
    }

    /// Score the tail of `readings`
    ///
    /// Fails with `InsufficientData` when fewer than `lookback_hours`
    /// readings are given.
    pub fn score(&self, readings: &[Reading]) -> MonitorResult<AnomalyReport> {
        let lookback = self.config.lookback_hours;
        let windows = extract_windows(readings, lookback)?;

        // One call over the union keeps both windows on the same scale
        let normalized = normalize(windows.combined);
        let split = normalized.rows.len() - lookback;
        let current_rows = &normalized.rows[split..];
        let baseline_rows = if windows.baseline.is_available() {
            &normalized.rows[..split]
        } else {
            current_rows
        };

        let current_means = column_means(current_rows);
        let baseline_means = column_means(baseline_rows);

        let drift: FeatureRow = core::array::from_fn(|i| current_means[i] - baseline_means[i]);

        let score = drift_score(&current_means, &baseline_means);
        let alert_level = AlertLevel::classify(
            score,
            self.config.anomaly_threshold,
            self.config.critical_threshold(),
        );
        let critical_parameter = critical_parameter(&drift);

        log::debug!(
            "drift score {:.4} over {} readings: {} ({})",
            score,
            windows.combined.len(),
            alert_level,
            critical_parameter
        );
        if alert_level == AlertLevel::Critical {
            log::warn!(
                "critical water-quality drift {:.4} > {:.4}, led by {}",
                score,
                self.config.critical_threshold(),
                critical_parameter
            );
        }

        Ok(AnomalyReport {
            score,
            threshold: self.config.anomaly_threshold,
            alert_level,
            critical_parameter,
            current_values: CurrentValues::from_reading(windows.latest()),
            baseline_available: windows.baseline.is_available(),
            drift,
        })
    }

    /// Score the most recent readings of a store
    pub fn score_store(&self, store: &ReadingStore) -> MonitorResult<AnomalyReport> {
        self.score(store.tail(self.span()))
    }

    /// Score a consistent snapshot of a shared store
    pub fn score_shared(&self, store: &SharedReadingStore) -> MonitorResult<AnomalyReport> {
        let snapshot = store.tail(self.span());
        self.score(&snapshot)
    }
}
