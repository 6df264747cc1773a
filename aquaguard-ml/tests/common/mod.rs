//! Shared generators for integration tests
//!
//! Produces hourly pond readings around nominal tropical-pond conditions with
//! seeded noise, so scenarios are reproducible.

#![allow(dead_code)]

use aquaguard_core::{constants::HOUR_MS, Reading};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Nominal pond conditions
pub const NOMINAL_PH: f64 = 7.2;
pub const NOMINAL_TEMP_C: f64 = 28.0;
pub const NOMINAL_OXYGEN_MG_L: f64 = 6.5;
pub const NOMINAL_TURBIDITY_NTU: f64 = 15.0;

/// Hourly reading generator with optional per-parameter jitter
pub struct PondGenerator {
    rng: StdRng,
    hour: u64,
    pub ph: f64,
    pub temperature: f64,
    pub oxygen: f64,
    pub turbidity: f64,
    pub oxygen_jitter: f64,
    /// Amplitude of the daily photosynthesis cycle in mg/L
    pub oxygen_diurnal: f64,
}

impl PondGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            hour: 0,
            ph: NOMINAL_PH,
            temperature: NOMINAL_TEMP_C,
            oxygen: NOMINAL_OXYGEN_MG_L,
            turbidity: NOMINAL_TURBIDITY_NTU,
            oxygen_jitter: 0.0,
            oxygen_diurnal: 0.0,
        }
    }

    /// Next hourly reading
    pub fn next_reading(&mut self) -> Reading {
        let jitter = if self.oxygen_jitter > 0.0 {
            self.rng.gen_range(-self.oxygen_jitter..=self.oxygen_jitter)
        } else {
            0.0
        };
        let phase = 2.0 * std::f64::consts::PI * (self.hour % 24) as f64 / 24.0;
        let cycle = self.oxygen_diurnal * phase.sin();
        let reading = Reading::new(
            self.hour * HOUR_MS,
            self.ph,
            self.temperature,
            self.oxygen + cycle + jitter,
            self.turbidity,
        );
        self.hour += 1;
        reading
    }

    /// `n` consecutive readings at the current settings
    pub fn take(&mut self, n: usize) -> Vec<Reading> {
        (0..n).map(|_| self.next_reading()).collect()
    }
}

/// 24 h at 6.5 ± 0.1 mg/L oxygen followed by 24 h at 2.0 ± 0.1 mg/L
pub fn oxygen_crash(seed: u64) -> Vec<Reading> {
    let mut generator = PondGenerator::new(seed);
    generator.oxygen_jitter = 0.1;
    let mut readings = generator.take(24);
    generator.oxygen = 2.0;
    readings.extend(generator.take(24));
    readings
}

/// Shuffle with a seeded generator
pub fn shuffled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    use rand::seq::SliceRandom;
    let mut out = items.to_vec();
    out.shuffle(&mut StdRng::seed_from_u64(seed));
    out
}
