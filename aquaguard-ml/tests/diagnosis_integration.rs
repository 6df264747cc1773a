//! Parasite diagnosis through the classifier contract

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use aquaguard_core::{MonitorError, MonitorResult};
use aquaguard_ml::{
    recommendation_for, Diagnoser, DiagnosisClass, FixedModel, MicroscopySample, ParasiteModel,
    PlaceholderModel, CLASS_COUNT, FALLBACK_RECOMMENDATION,
};

/// Model that counts calls and fails on empty images
struct CountingModel {
    calls: Arc<AtomicUsize>,
}

impl ParasiteModel for CountingModel {
    fn predict(&self, sample: &MicroscopySample) -> MonitorResult<[f64; CLASS_COUNT]> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if sample.as_bytes().is_empty() {
            return Err(MonitorError::ModelUnavailable { reason: "model rejected empty image" });
        }
        Ok([0.05, 0.05, 0.9])
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[test]
fn no_model_means_no_guess() {
    let diagnoser = Diagnoser::new();
    let sample = MicroscopySample::new(b"jpeg".to_vec()).with_source("ictio/amostra_001.jpg");
    assert!(matches!(
        diagnoser.diagnose(&sample),
        Err(MonitorError::ModelUnavailable { .. })
    ));
}

#[test]
fn model_errors_pass_through() {
    let calls = Arc::new(AtomicUsize::new(0));
    let diagnoser = Diagnoser::with_model(Box::new(CountingModel { calls: calls.clone() }));

    assert!(diagnoser.diagnose(&MicroscopySample::default()).is_err());
    let result = diagnoser.diagnose(&MicroscopySample::new(vec![1, 2, 3])).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(result.diagnosis_class, DiagnosisClass::Monogenean);
    assert_eq!(result.confidence, 0.9);
}

#[test]
fn every_placeholder_result_honours_contract() {
    let diagnoser = Diagnoser::with_model(Box::new(PlaceholderModel::new(2024)));
    let sample = MicroscopySample::new(vec![0; 64]);

    for _ in 0..500 {
        let result = diagnoser.diagnose(&sample).unwrap();
        let probabilities = result.class_probabilities;

        let sum: f64 = probabilities.as_array().iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(probabilities.iter().all(|(_, p)| p >= 0.0));
        assert!((0.0..=1.0).contains(&result.confidence));
        assert_eq!(result.confidence, probabilities.get(result.diagnosis_class));
        assert_eq!(result.recommendation, recommendation_for(result.diagnosis_class.label()));
        // Confidence is the maximum over classes
        assert!(probabilities.iter().all(|(_, p)| p <= result.confidence));
    }
}

#[test]
fn healthy_sample() {
    let diagnoser = Diagnoser::with_model(Box::new(FixedModel::new([0.8, 0.15, 0.05])));
    let result = diagnoser.diagnose(&MicroscopySample::new(vec![7])).unwrap();

    assert_eq!(result.diagnosis_class, DiagnosisClass::Healthy);
    assert!(!result.diagnosis_class.is_infection());
    assert_eq!(
        result.recommendation,
        "Normal condition. Maintain current management practices."
    );
}

#[test]
fn swapping_models_changes_diagnosis() {
    let mut diagnoser = Diagnoser::with_model(Box::new(FixedModel::new([0.8, 0.15, 0.05])));
    let sample = MicroscopySample::new(vec![7]);
    assert_eq!(diagnoser.diagnose(&sample).unwrap().diagnosis_class, DiagnosisClass::Healthy);

    let previous = diagnoser.load(Box::new(FixedModel::new([0.1, 0.85, 0.05])));
    assert_eq!(previous.map(|m| m.name().to_string()), Some("fixed".to_string()));

    let result = diagnoser.diagnose(&sample).unwrap();
    assert_eq!(result.diagnosis_class, DiagnosisClass::Ichthyophthirius);
    assert!(result.recommendation.contains("formalin"));
}

#[test]
fn result_serializes_for_dashboard() {
    let diagnoser = Diagnoser::with_model(Box::new(FixedModel::new([0.1, 0.2, 0.7])));
    let result = diagnoser.diagnose(&MicroscopySample::new(vec![1])).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["diagnosis_class"], "monogenean");
    assert_eq!(json["class_probabilities"]["healthy"], 0.1);
    assert_eq!(json["class_probabilities"]["ichthyophthirius"], 0.2);
    assert_eq!(json["class_probabilities"]["monogenean"], 0.7);
    assert!(json["recommendation"].as_str().unwrap().contains("praziquantel"));
}

#[test]
fn unknown_labels_get_fallback() {
    for label in ["trichodina", "saprolegnia", "HEALTHY?", "42"] {
        assert_eq!(recommendation_for(label), FALLBACK_RECOMMENDATION);
    }
}
