//! Core data path for AquaGuard water-quality monitoring
//!
//! Holds the chronological record of pond sensor readings and turns it into
//! the comparable windows the anomaly scorer works on.
//!
//! Data flow:
//! - [`ReadingStore`] appends timestamped pH / temperature / oxygen / turbidity rows
//! - [`extract_windows`] cuts the current and baseline windows off the tail
//! - [`normalize`] rescales a span to `[0, 1]` using that span's own range
//!
//! Everything here is a synchronous pure computation over immutable input.
//!
//! ```rust
//! use aquaguard_core::{Reading, ReadingStore, extract_windows, normalize};
//!
//! let mut store = ReadingStore::new();
//! for hour in 0..48u64 {
//!     let oxygen = if hour < 24 { 6.5 } else { 2.0 };
//!     store.push(Reading::new(hour * 3_600_000, 7.0, 28.0, oxygen, 12.0)).unwrap();
//! }
//!
//! let windows = extract_windows(store.as_slice(), 24).unwrap();
//! assert!(windows.baseline.is_available());
//!
//! let scaled = normalize(windows.combined);
//! assert_eq!(scaled.rows.len(), 48);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

// Logging shims: forward to `log` when enabled, otherwise only type-check
// the arguments.
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => { { let _ = format_args!($($arg)*); } };
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => { { let _ = format_args!($($arg)*); } };
}

pub mod config;
pub mod constants;
pub mod errors;
pub mod limits;
pub mod normalize;
pub mod reading;
pub mod stats;
pub mod store;
pub mod window;

// Public API
pub use config::ScorerConfig;
pub use errors::{MonitorError, MonitorResult};
pub use limits::{Bound, BoundSide, LimitViolation, WaterQualityLimits};
pub use normalize::{column_means, normalize, normalize_rows, NormalizationParams, Normalized};
pub use reading::{FeatureRow, Parameter, PartialReading, Reading, ReadingDelta, Timestamp, FEATURE_COUNT};
pub use stats::{ParameterSummary, ReadingSummary};
pub use store::{ReadingStore, SharedReadingStore};
pub use window::{extract_windows, last_window, Baseline, Windows};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
