//! Call-local min-max normalization
//!
//! Rescales each of the four features to `[0, 1]` using the minimum and
//! maximum of exactly the rows passed in. Nothing is fitted or cached: two
//! calls over different slices produce scales that are not comparable with
//! each other, which is why the scorer normalizes current and baseline
//! windows together in a single call.
//!
//! A constant column has no range and maps to `0.0` on every row.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::reading::{FeatureRow, Reading, FEATURE_COUNT};

/// Per-feature range observed in one normalization call
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NormalizationParams {
    /// Minimum per feature
    pub min: FeatureRow,
    /// Maximum per feature
    pub max: FeatureRow,
}

impl NormalizationParams {
    /// Range of `rows`; all zeros for empty input
    pub fn fit(rows: &[FeatureRow]) -> Self {
        if rows.is_empty() {
            return Self { min: [0.0; FEATURE_COUNT], max: [0.0; FEATURE_COUNT] };
        }

        let mut min = [f64::INFINITY; FEATURE_COUNT];
        let mut max = [f64::NEG_INFINITY; FEATURE_COUNT];
        for row in rows {
            for (i, &value) in row.iter().enumerate() {
                min[i] = min[i].min(value);
                max[i] = max[i].max(value);
            }
        }
        Self { min, max }
    }

    /// True when feature `i` holds one value on every row
    pub fn is_constant(&self, feature: usize) -> bool {
        self.max[feature] == self.min[feature]
    }

    /// Rescale one row into `[0, 1]`
    pub fn apply(&self, row: &FeatureRow) -> FeatureRow {
        core::array::from_fn(|i| {
            let (min, max) = (self.min[i], self.max[i]);
            if max == min {
                return 0.0;
            }
            let range = max - min;
            if range.is_finite() {
                (row[i] - min) / range
            } else {
                // Range wider than f64::MAX: halve every term to stay finite
                (row[i] / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
            }
        })
    }
}

/// Rows rescaled to `[0, 1]` together with the range that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Normalized rows, same order as the input
    pub rows: Vec<FeatureRow>,
    /// Range computed from the input
    pub params: NormalizationParams,
}

/// Normalize feature rows using their own per-feature range
pub fn normalize_rows(rows: &[FeatureRow]) -> Normalized {
    let params = NormalizationParams::fit(rows);
    Normalized {
        rows: rows.iter().map(|row| params.apply(row)).collect(),
        params,
    }
}

/// Normalize readings projected onto their four features
pub fn normalize(readings: &[Reading]) -> Normalized {
    let rows: Vec<FeatureRow> = readings.iter().map(Reading::features).collect();
    normalize_rows(&rows)
}

/// Per-feature arithmetic mean; zeros for empty input
pub fn column_means(rows: &[FeatureRow]) -> FeatureRow {
    let mut sums = [0.0; FEATURE_COUNT];
    if rows.is_empty() {
        return sums;
    }
    for row in rows {
        for (sum, value) in sums.iter_mut().zip(row) {
            *sum += value;
        }
    }
    let n = rows.len() as f64;
    sums.map(|s| s / n)
}
