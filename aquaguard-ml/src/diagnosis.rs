//! Parasite diagnosis contract
//!
//! ## Overview
//!
//! Parasite identification from microscopy images is done by an external,
//! trained classifier. This module fixes what such a classifier must return
//! and turns its output into a [`DiagnosisResult`] the dashboard can show:
//!
//! ```text
//! MicroscopySample ──► ParasiteModel::predict ──► [p_healthy, p_ich, p_mono]
//!                                                        │ checked
//!                                                        ▼
//!                                   ClassProbabilities ──► DiagnosisResult
//!                                                        + recommendation
//! ```
//!
//! ## Supported Classes
//!
//! | Class              | Label              | Meaning                      |
//! |--------------------|--------------------|------------------------------|
//! | `Healthy`          | `healthy`          | no parasites found           |
//! | `Ichthyophthirius` | `ichthyophthirius` | white spot disease           |
//! | `Monogenean`       | `monogenean`       | gill/skin flukes             |
//!
//! ## Model Lifecycle
//!
//! A [`Diagnoser`] owns at most one model, installed and removed by the
//! caller. With no model loaded it fails with `ModelUnavailable`; it never
//! falls back to a guess.
//!
//! ```rust
//! use aquaguard_core::MonitorError;
//! use aquaguard_ml::{Diagnoser, DiagnosisClass, FixedModel, MicroscopySample};
//!
//! let mut diagnoser = Diagnoser::new();
//! let sample = MicroscopySample::new(vec![0u8; 16]);
//! assert!(matches!(diagnoser.diagnose(&sample), Err(MonitorError::ModelUnavailable { .. })));
//!
//! diagnoser.load(Box::new(FixedModel::new([0.1, 0.7, 0.2])));
//! let result = diagnoser.diagnose(&sample).unwrap();
//! assert_eq!(result.diagnosis_class, DiagnosisClass::Ichthyophthirius);
//! ```

use core::fmt;

use aquaguard_core::{constants::PROBABILITY_SUM_TOLERANCE, MonitorError, MonitorResult};
use serde::{ser::SerializeMap, Serialize, Serializer};

/// Number of supported diagnosis classes
pub const CLASS_COUNT: usize = 3;

/// Recommendation for any class outside the supported set
pub const FALLBACK_RECOMMENDATION: &str = "Consult a veterinary specialist.";

/// Diagnosis class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosisClass {
    /// No parasites found
    Healthy,
    /// Ichthyophthirius multifiliis, white spot disease
    Ichthyophthirius,
    /// Monogenean flukes
    Monogenean,
}

impl DiagnosisClass {
    /// All classes in model output order
    pub const ALL: [DiagnosisClass; CLASS_COUNT] = [
        DiagnosisClass::Healthy,
        DiagnosisClass::Ichthyophthirius,
        DiagnosisClass::Monogenean,
    ];

    /// Position in a model's probability vector
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical label
    pub const fn label(self) -> &'static str {
        match self {
            DiagnosisClass::Healthy => "healthy",
            DiagnosisClass::Ichthyophthirius => "ichthyophthirius",
            DiagnosisClass::Monogenean => "monogenean",
        }
    }

    /// Parse a label; also accepts the dataset folder names
    /// `saudavel`, `ictio` and `monogenoidea`
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "healthy" | "saudavel" => Some(DiagnosisClass::Healthy),
            "ichthyophthirius" | "ictio" => Some(DiagnosisClass::Ichthyophthirius),
            "monogenean" | "monogenoidea" => Some(DiagnosisClass::Monogenean),
            _ => None,
        }
    }

    /// Management guidance for this class
    pub const fn recommendation(self) -> &'static str {
        match self {
            DiagnosisClass::Healthy => {
                "Normal condition. Maintain current management practices."
            }
            DiagnosisClass::Ichthyophthirius => {
                "URGENT: Ichthyophthiriasis (white spot) detected. Start treatment with salt (3-5 g/L) or formalin. Improve water quality."
            }
            DiagnosisClass::Monogenean => {
                "Monogenean parasites detected. Treat with praziquantel or organophosphates. Check stocking density."
            }
        }
    }

    /// True for any class that needs treatment
    pub fn is_infection(self) -> bool {
        self != DiagnosisClass::Healthy
    }
}

impl fmt::Display for DiagnosisClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Recommendation for an arbitrary class label
///
/// Total over all strings: unknown labels get [`FALLBACK_RECOMMENDATION`].
pub fn recommendation_for(label: &str) -> &'static str {
    DiagnosisClass::from_label(label).map_or(FALLBACK_RECOMMENDATION, DiagnosisClass::recommendation)
}

/// Checked class-probability distribution
///
/// Serializes as a map from class label to probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities([f64; CLASS_COUNT]);

impl ClassProbabilities {
    /// Accept `values` if finite, non-negative and summing to 1 within 1e-6
    pub fn new(values: [f64; CLASS_COUNT]) -> MonitorResult<Self> {
        if values.iter().any(|p| !p.is_finite()) {
            return Err(MonitorError::InvalidProbabilities { reason: "probabilities must be finite" });
        }
        if values.iter().any(|p| *p < 0.0) {
            return Err(MonitorError::InvalidProbabilities { reason: "probabilities must be non-negative" });
        }
        let sum: f64 = values.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(MonitorError::InvalidProbabilities { reason: "probabilities must sum to 1" });
        }
        Ok(Self(values))
    }

    /// Probability of one class
    pub fn get(&self, class: DiagnosisClass) -> f64 {
        self.0[class.index()]
    }

    /// Raw values in class order
    pub fn as_array(&self) -> &[f64; CLASS_COUNT] {
        &self.0
    }

    /// `(class, probability)` pairs in class order
    pub fn iter(&self) -> impl Iterator<Item = (DiagnosisClass, f64)> + '_ {
        DiagnosisClass::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Most probable class; the earlier class wins ties
    pub fn most_likely(&self) -> (DiagnosisClass, f64) {
        let mut best = DiagnosisClass::ALL[0];
        for class in DiagnosisClass::ALL.into_iter().skip(1) {
            if self.get(class) > self.get(best) {
                best = class;
            }
        }
        (best, self.get(best))
    }
}

impl Serialize for ClassProbabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CLASS_COUNT))?;
        for (class, p) in self.iter() {
            map.serialize_entry(class.label(), &p)?;
        }
        map.end()
    }
}

/// Outcome of one classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisResult {
    /// Most probable class
    pub diagnosis_class: DiagnosisClass,
    /// Probability of the diagnosed class
    pub confidence: f64,
    /// Full distribution
    pub class_probabilities: ClassProbabilities,
    /// Guidance for the diagnosed class
    pub recommendation: &'static str,
}

impl DiagnosisResult {
    /// Build the result for a checked distribution
    pub fn from_probabilities(class_probabilities: ClassProbabilities) -> Self {
        let (diagnosis_class, confidence) = class_probabilities.most_likely();
        Self {
            diagnosis_class,
            confidence,
            class_probabilities,
            recommendation: diagnosis_class.recommendation(),
        }
    }
}

/// Opaque microscopy image handed to a classifier
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MicroscopySample {
    bytes: Vec<u8>,
    source: Option<String>,
}

impl MicroscopySample {
    /// Wrap encoded image bytes
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes, source: None }
    }

    /// Attach where the sample came from (file name, upload id)
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Encoded image bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Origin of the sample, if known
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// Interface a trained parasite classifier must implement
///
/// `predict` returns one probability per class in [`DiagnosisClass::ALL`]
/// order. Implementations wrapping a slow external service should enforce
/// their own timeout and report it as an error.
pub trait ParasiteModel: Send + Sync {
    /// Class probabilities for one sample
    fn predict(&self, sample: &MicroscopySample) -> MonitorResult<[f64; CLASS_COUNT]>;

    /// Human-readable model name for logs
    fn name(&self) -> &str {
        "parasite-model"
    }
}

/// Runs an injected parasite model and applies the result contract
#[derive(Default)]
pub struct Diagnoser {
    model: Option<Box<dyn ParasiteModel>>,
}

impl fmt::Debug for Diagnoser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnoser")
            .field("model", &self.model.as_ref().map(|m| m.name()))
            .finish()
    }
}

impl Diagnoser {
    /// Diagnoser with no model loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnoser with `model` loaded
    pub fn with_model(model: Box<dyn ParasiteModel>) -> Self {
        Self { model: Some(model) }
    }

    /// Install a model, returning the one it replaces
    pub fn load(&mut self, model: Box<dyn ParasiteModel>) -> Option<Box<dyn ParasiteModel>> {
        log::info!("loading parasite model {}", model.name());
        self.model.replace(model)
    }

    /// Remove the current model
    pub fn unload(&mut self) -> Option<Box<dyn ParasiteModel>> {
        let model = self.model.take();
        if let Some(m) = &model {
            log::info!("unloaded parasite model {}", m.name());
        }
        model
    }

    /// True when a model is installed
    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Classify one sample
    pub fn diagnose(&self, sample: &MicroscopySample) -> MonitorResult<DiagnosisResult> {
        let model = self.model.as_ref().ok_or(MonitorError::ModelUnavailable {
            reason: "no parasite model loaded",
        })?;

        let raw = model.predict(sample)?;
        let probabilities = ClassProbabilities::new(raw).map_err(|e| {
            log::warn!("model {} broke the probability contract: {:?}", model.name(), raw);
            e
        })?;

        let result = DiagnosisResult::from_probabilities(probabilities);
        log::debug!(
            "diagnosed {} ({:.2}%) for {}",
            result.diagnosis_class,
            result.confidence * 100.0,
            sample.source().unwrap_or("unnamed sample")
        );
        Ok(result)
    }
}
