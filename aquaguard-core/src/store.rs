//! Append-Only Reading Store
//!
//! ## Overview
//!
//! The store is the chronological record the anomaly scorer reads from. It
//! only ever grows at the tail:
//!
//! - insertion order is chronological order
//! - readings are never reordered, replaced or mutated in place
//! - a read of the last `n` readings is always a contiguous suffix
//!
//! ```text
//! ┌────┬────┬────┬─────┬──────┐
//! │ r0 │ r1 │ r2 │ ... │ rN-1 │  ← push() appends here
//! └────┴────┴────┴─────┴──────┘
//!                 └─ tail(3) ─┘
//! ```
//!
//! ## Sharing Between Threads
//!
//! [`ReadingStore`] itself is single-owner. When the sensor feed and the
//! dashboard run on different threads, wrap it in a [`SharedReadingStore`]:
//! appends are serialised behind a write lock and readers receive an owned
//! copy of the suffix they asked for, so a scoring call never observes a
//! half-applied append.
//!
//! ```rust
//! use aquaguard_core::{Reading, ReadingStore};
//!
//! let mut store = ReadingStore::new();
//! store.push(Reading::new(0, 7.0, 28.0, 6.5, 10.0)).unwrap();
//! store.push(Reading::new(3_600_000, 7.1, 28.2, 6.3, 11.0)).unwrap();
//!
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.tail(1)[0].oxygen, 6.3);
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use crate::{
    errors::MonitorResult,
    reading::{PartialReading, Reading, ReadingDelta},
};

/// Ordered, append-only sequence of readings
#[derive(Debug, Clone, Default)]
pub struct ReadingStore {
    readings: Vec<Reading>,
}

impl ReadingStore {
    /// Creates an empty store
    pub const fn new() -> Self {
        Self { readings: Vec::new() }
    }

    /// Creates an empty store with room for `capacity` readings
    pub fn with_capacity(capacity: usize) -> Self {
        Self { readings: Vec::with_capacity(capacity) }
    }

    /// Appends a reading after checking every measurement is finite
    pub fn push(&mut self, reading: Reading) -> MonitorResult<()> {
        if let Err(e) = reading.validate() {
            log_warn!("rejected reading at t={}: {}", reading.timestamp, e);
            return Err(e);
        }
        self.readings.push(reading);
        Ok(())
    }

    /// Appends a row with gaps, filling them from the latest reading
    pub fn push_partial(&mut self, partial: PartialReading) -> MonitorResult<Reading> {
        let reading = partial.fill_forward(self.last())?;
        self.push(reading)?;
        Ok(reading)
    }

    /// Appends every reading in order, stopping at the first invalid one
    pub fn extend<I>(&mut self, readings: I) -> MonitorResult<()>
    where
        I: IntoIterator<Item = Reading>,
    {
        for reading in readings {
            self.push(reading)?;
        }
        Ok(())
    }

    /// Number of stored readings
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// True when nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Most recent reading
    pub fn last(&self) -> Option<&Reading> {
        self.readings.last()
    }

    /// The last `n` readings, or all of them when fewer exist
    pub fn tail(&self, n: usize) -> &[Reading] {
        let start = self.readings.len().saturating_sub(n);
        &self.readings[start..]
    }

    /// All readings, oldest first
    pub fn as_slice(&self) -> &[Reading] {
        &self.readings
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.readings.iter()
    }

    /// Change between the last two readings
    pub fn latest_delta(&self) -> Option<ReadingDelta> {
        match self.readings.as_slice() {
            [.., previous, latest] => Some(ReadingDelta::between(previous, latest)),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a ReadingStore {
    type Item = &'a Reading;
    type IntoIter = std::slice::Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Thread-safe handle to a [`ReadingStore`]
///
/// Cloning the handle shares the same underlying store. A poisoned lock is
/// recovered: a panicking writer can only have failed before its push
/// completed, and readings already stored are never modified.
#[derive(Debug, Clone, Default)]
pub struct SharedReadingStore {
    inner: Arc<RwLock<ReadingStore>>,
}

impl SharedReadingStore {
    /// Creates an empty shared store
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing store
    pub fn from_store(store: ReadingStore) -> Self {
        Self { inner: Arc::new(RwLock::new(store)) }
    }

    /// Appends a reading
    pub fn push(&self, reading: Reading) -> MonitorResult<()> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner).push(reading)
    }

    /// Appends a row with gaps, filling them from the latest reading
    pub fn push_partial(&self, partial: PartialReading) -> MonitorResult<Reading> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push_partial(partial)
    }

    /// Number of stored readings
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Owned copy of the last `n` readings
    pub fn tail(&self, n: usize) -> Vec<Reading> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tail(n)
            .to_vec()
    }

    /// Change between the last two readings
    pub fn latest_delta(&self) -> Option<ReadingDelta> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).latest_delta()
    }
}
