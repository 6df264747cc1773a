//! Stand-in parasite models
//!
//! Neither model looks at the image. [`PlaceholderModel`] draws a random
//! distribution so demos show varied output before a trained classifier is
//! available; [`FixedModel`] always answers the same and is meant for tests.
//! Both must be installed explicitly; a [`Diagnoser`](crate::Diagnoser)
//! never falls back to them.

use std::sync::{Mutex, PoisonError};

use aquaguard_core::MonitorResult;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::Exp1;

use crate::diagnosis::{MicroscopySample, ParasiteModel, CLASS_COUNT};

/// Draw from a flat Dirichlet(1, ..., 1)
///
/// Unit exponentials divided by their sum are uniform on the simplex.
pub fn flat_dirichlet<R: Rng + ?Sized>(rng: &mut R) -> [f64; CLASS_COUNT] {
    let draws: [f64; CLASS_COUNT] = core::array::from_fn(|_| rng.sample(Exp1));
    let total: f64 = draws.iter().sum();
    if total > 0.0 {
        draws.map(|d| d / total)
    } else {
        [1.0 / CLASS_COUNT as f64; CLASS_COUNT]
    }
}

/// Random classifier for demos; ignores the image
#[derive(Debug)]
pub struct PlaceholderModel {
    rng: Mutex<StdRng>,
}

impl PlaceholderModel {
    /// Placeholder drawing from a seeded generator
    pub fn new(seed: u64) -> Self {
        log::warn!("placeholder parasite model in use: diagnoses are random");
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl ParasiteModel for PlaceholderModel {
    fn predict(&self, _sample: &MicroscopySample) -> MonitorResult<[f64; CLASS_COUNT]> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(flat_dirichlet(&mut *rng))
    }

    fn name(&self) -> &str {
        "placeholder"
    }
}

/// Classifier that always returns the same distribution
#[derive(Debug, Clone, Copy)]
pub struct FixedModel {
    probabilities: [f64; CLASS_COUNT],
}

impl FixedModel {
    /// Always answer `probabilities`; checked when diagnosing
    pub const fn new(probabilities: [f64; CLASS_COUNT]) -> Self {
        Self { probabilities }
    }
}

impl ParasiteModel for FixedModel {
    fn predict(&self, _sample: &MicroscopySample) -> MonitorResult<[f64; CLASS_COUNT]> {
        Ok(self.probabilities)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
