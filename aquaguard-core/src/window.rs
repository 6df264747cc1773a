//! Current/baseline window extraction
//!
//! The scorer compares the last `lookback` readings against the `lookback`
//! readings just before them:
//!
//! ```text
//!   ... │ baseline: [-2L, -L) │ current: [-L, end) │
//! ```
//!
//! With fewer than `2L` readings there is nothing to compare against. The
//! baseline is then reported as [`Baseline::Unavailable`] and scoring treats
//! it as equal to the current window, which yields zero drift.

use crate::{
    errors::{MonitorError, MonitorResult},
    reading::Reading,
};

/// Baseline window, or the reason there is none
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Baseline<'a> {
    /// The `lookback` readings preceding the current window
    Computed(&'a [Reading]),
    /// Fewer than `2 * lookback` readings exist
    Unavailable,
}

impl<'a> Baseline<'a> {
    /// True when a real baseline window was extracted
    pub fn is_available(&self) -> bool {
        matches!(self, Baseline::Computed(_))
    }

    /// Baseline readings, falling back to `current` when unavailable
    pub fn or_current(&self, current: &'a [Reading]) -> &'a [Reading] {
        match *self {
            Baseline::Computed(window) => window,
            Baseline::Unavailable => current,
        }
    }
}

/// Windows extracted from one slice of readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Windows<'a> {
    /// Last `lookback` readings
    pub current: &'a [Reading],
    /// Preceding `lookback` readings
    pub baseline: Baseline<'a>,
    /// Baseline followed by current, or current alone
    pub combined: &'a [Reading],
}

impl<'a> Windows<'a> {
    /// Window length
    pub fn lookback(&self) -> usize {
        self.current.len()
    }

    /// Most recent raw reading
    pub fn latest(&self) -> &'a Reading {
        // current is never empty: extract_windows rejects lookback == 0
        &self.current[self.current.len() - 1]
    }
}

/// Exactly the last `lookback` readings of `readings`
pub fn last_window(readings: &[Reading], lookback: usize) -> MonitorResult<&[Reading]> {
    if lookback == 0 {
        return Err(MonitorError::InvalidConfiguration {
            reason: "lookback must be at least one reading",
        });
    }
    if readings.len() < lookback {
        return Err(MonitorError::InsufficientData {
            required: lookback,
            available: readings.len(),
        });
    }
    Ok(&readings[readings.len() - lookback..])
}

/// Split `readings` into current and baseline windows
pub fn extract_windows(readings: &[Reading], lookback: usize) -> MonitorResult<Windows<'_>> {
    let current = last_window(readings, lookback)?;
    let n = readings.len();

    let (baseline, combined) = match lookback.checked_mul(2) {
        Some(span) if n >= span => {
            let combined = &readings[n - span..];
            (Baseline::Computed(&combined[..lookback]), combined)
        }
        _ => (Baseline::Unavailable, current),
    };

    Ok(Windows { current, baseline, combined })
}
