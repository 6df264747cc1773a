//! Fixed water-quality limits
//!
//! Complements the drift score with absolute bounds an operator watches for
//! regardless of history:
//! - pH outside the band tolerated by farmed fish
//! - dissolved oxygen below the stress threshold
//!
//! Temperature and turbidity have no fixed bound by default; farms set them
//! per species with [`WaterQualityLimits::with_bound`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{OXYGEN_CRITICAL_MG_L, PH_SAFE_MAX, PH_SAFE_MIN},
    errors::{MonitorError, MonitorResult},
    reading::{Parameter, Reading, FEATURE_COUNT},
};

/// Allowed range for one parameter; either side may be open
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bound {
    /// Lowest allowed value
    pub min: Option<f64>,
    /// Highest allowed value
    pub max: Option<f64>,
}

impl Bound {
    /// No limit on either side
    pub const UNBOUNDED: Bound = Bound { min: None, max: None };

    /// Closed range `[min, max]`
    pub const fn range(min: f64, max: f64) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    /// Lower limit only
    pub const fn at_least(min: f64) -> Self {
        Self { min: Some(min), max: None }
    }

    /// Upper limit only
    pub const fn at_most(max: f64) -> Self {
        Self { min: None, max: Some(max) }
    }

    fn validate(&self) -> MonitorResult<()> {
        let finite = self.min.map_or(true, f64::is_finite) && self.max.map_or(true, f64::is_finite);
        if !finite {
            return Err(MonitorError::InvalidConfiguration { reason: "limit bounds must be finite" });
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min >= max {
                return Err(MonitorError::InvalidConfiguration { reason: "limit min must be below max" });
            }
        }
        Ok(())
    }

    fn breach(&self, value: f64) -> Option<BoundSide> {
        match (self.min, self.max) {
            (Some(min), _) if value < min => Some(BoundSide::Below(min)),
            (_, Some(max)) if value > max => Some(BoundSide::Above(max)),
            _ => None,
        }
    }
}

/// Which side of a bound was crossed, with the bound value
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundSide {
    /// Value fell under this minimum
    Below(f64),
    /// Value rose over this maximum
    Above(f64),
}

/// One parameter outside its limits
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LimitViolation {
    /// Parameter out of range
    pub parameter: Parameter,
    /// Measured value
    pub value: f64,
    /// Bound that was crossed
    pub bound: BoundSide,
}

/// Limits for all four parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaterQualityLimits {
    bounds: [Bound; FEATURE_COUNT],
}

impl Default for WaterQualityLimits {
    fn default() -> Self {
        let mut bounds = [Bound::UNBOUNDED; FEATURE_COUNT];
        bounds[Parameter::Ph.index()] = Bound::range(PH_SAFE_MIN, PH_SAFE_MAX);
        bounds[Parameter::Oxygen.index()] = Bound::at_least(OXYGEN_CRITICAL_MG_L);
        Self { bounds }
    }
}

impl WaterQualityLimits {
    /// No limits at all
    pub fn unbounded() -> Self {
        Self { bounds: [Bound::UNBOUNDED; FEATURE_COUNT] }
    }

    /// Replace the bound of one parameter
    pub fn with_bound(mut self, parameter: Parameter, bound: Bound) -> MonitorResult<Self> {
        bound.validate()?;
        self.bounds[parameter.index()] = bound;
        Ok(self)
    }

    /// Current bound of one parameter
    pub fn bound(&self, parameter: Parameter) -> Bound {
        self.bounds[parameter.index()]
    }

    /// Every parameter of `reading` outside its bound, in priority order
    pub fn check(&self, reading: &Reading) -> Vec<LimitViolation> {
        Parameter::ALL
            .into_iter()
            .filter_map(|parameter| {
                let value = reading.value(parameter);
                self.bound(parameter).breach(value).map(|bound| LimitViolation {
                    parameter,
                    value,
                    bound,
                })
            })
            .collect()
    }
}
