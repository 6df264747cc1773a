//! End-to-end scoring scenarios: store → windows → normalization → report

mod common;

use aquaguard_core::{MonitorError, Parameter, ReadingStore, ScorerConfig, SharedReadingStore};
use aquaguard_ml::{AlertLevel, AnomalyScorer};
use common::{oxygen_crash, shuffled, PondGenerator};

fn default_scorer() -> AnomalyScorer {
    AnomalyScorer::new(ScorerConfig::default()).unwrap()
}

#[test]
fn oxygen_crash_raises_alert_on_oxygen() {
    for seed in 0..10 {
        let readings = oxygen_crash(seed);
        let report = default_scorer().score(&readings).unwrap();

        assert!(report.score() > report.threshold(), "seed {seed}: {}", report.score());
        assert!(matches!(report.alert_level(), AlertLevel::Attention | AlertLevel::Critical));
        assert_eq!(report.critical_parameter(), Parameter::Oxygen);
        assert!(report.drift(Parameter::Oxygen) < 0.0);
        assert!(report.baseline_available());
        assert!(report.is_anomaly());
    }
}

#[test]
fn oxygen_crash_is_critical_at_default_threshold() {
    let report = default_scorer().score(&oxygen_crash(1)).unwrap();
    // Oxygen drifts by roughly 0.95 of its range: score ≈ 0.23
    assert!(report.score() > 0.2);
    assert_eq!(report.alert_level(), AlertLevel::Critical);
}

#[test]
fn stable_pond_is_normal() {
    let mut generator = PondGenerator::new(9);
    generator.oxygen_diurnal = 1.5;
    generator.oxygen_jitter = 0.02;
    let readings = generator.take(48);

    let report = default_scorer().score(&readings).unwrap();
    assert_eq!(report.alert_level(), AlertLevel::Normal);
    assert!(report.score() <= report.threshold());
}

#[test]
fn fewer_than_lookback_returns_no_report() {
    let readings = PondGenerator::new(0).take(10);
    let result = default_scorer().score(&readings);
    assert_eq!(result, Err(MonitorError::InsufficientData { required: 24, available: 10 }));
}

#[test]
fn exactly_lookback_scores_zero() {
    let readings = oxygen_crash(4)[..24].to_vec();
    let report = default_scorer().score(&readings).unwrap();

    assert!(!report.baseline_available());
    assert_eq!(report.score(), 0.0);
    assert_eq!(report.alert_level(), AlertLevel::Normal);
}

#[test]
fn score_ignores_row_order_within_windows() {
    let readings = oxygen_crash(2);
    let baseline = shuffled(&readings[..24], 11);
    let current = shuffled(&readings[24..], 12);

    let mut permuted = baseline;
    permuted.extend(current.iter().copied());
    // Latest reading shown on the report changes, the score must not
    let original = default_scorer().score(&readings).unwrap().score();
    let reordered = default_scorer().score(&permuted).unwrap().score();
    assert!((original - reordered).abs() < 1e-12);
}

#[test]
fn score_changes_with_values() {
    let readings = oxygen_crash(3);
    let mut altered = readings.clone();
    altered[30].turbidity = 60.0;

    let a = default_scorer().score(&readings).unwrap().score();
    let b = default_scorer().score(&altered).unwrap().score();
    assert_ne!(a, b);
}

#[test]
fn higher_threshold_downgrades_level() {
    let readings = oxygen_crash(5);
    let lenient = AnomalyScorer::new(
        ScorerConfig::default().with_threshold(0.1).with_critical_multiplier(3.0),
    )
    .unwrap();
    let report = lenient.score(&readings).unwrap();

    assert_eq!(report.threshold(), 0.1);
    assert_eq!(report.alert_level(), AlertLevel::Attention);
}

#[test]
fn custom_lookback() {
    let mut generator = PondGenerator::new(6);
    let mut readings = generator.take(6);
    generator.ph = 8.4;
    readings.extend(generator.take(6));

    let scorer = AnomalyScorer::new(ScorerConfig::default().with_lookback(6)).unwrap();
    let report = scorer.score(&readings).unwrap();
    assert_eq!(report.critical_parameter(), Parameter::Ph);
    assert_eq!(report.score(), 0.25);
}

#[test]
fn current_values_from_latest_raw_reading() {
    let readings = oxygen_crash(7);
    let latest = *readings.last().unwrap();
    let report = default_scorer().score(&readings).unwrap();

    let values = report.current_values();
    assert_eq!(values.reading(), &latest);
    assert_eq!(values.get(Parameter::Ph), "7.20");
    assert_eq!(values.get(Parameter::Temperature), "28.0°C");
    assert_eq!(values.get(Parameter::Oxygen), format!("{:.2} mg/L", latest.oxygen));
    assert_eq!(values.get(Parameter::Turbidity), "15.0 NTU");
    assert_eq!(values.iter().count(), 4);
}

#[test]
fn growing_store_transitions_from_insufficient_to_scored() {
    let scorer = default_scorer();
    let mut store = ReadingStore::new();
    let readings = oxygen_crash(8);

    for (i, reading) in readings.iter().enumerate() {
        store.push(*reading).unwrap();
        let result = scorer.score_store(&store);
        match i + 1 {
            n if n < 24 => assert!(matches!(result, Err(MonitorError::InsufficientData { .. }))),
            n if n < 48 => assert!(!result.unwrap().baseline_available()),
            _ => assert_eq!(result.unwrap().critical_parameter(), Parameter::Oxygen),
        }
    }
}

#[test]
fn shared_store_scored_while_feed_appends() {
    let shared = SharedReadingStore::new();
    let feed = {
        let store = shared.clone();
        std::thread::spawn(move || {
            for reading in oxygen_crash(10) {
                store.push(reading).unwrap();
            }
        })
    };

    let scorer = default_scorer();
    while shared.len() < 48 {
        // Any snapshot is a consistent suffix: either too short or scorable
        match scorer.score_shared(&shared) {
            Ok(report) => assert!(report.score() >= 0.0),
            Err(e) => assert!(e.is_recoverable_with_data()),
        }
    }
    feed.join().unwrap();

    let report = scorer.score_shared(&shared).unwrap();
    assert_eq!(report.critical_parameter(), Parameter::Oxygen);
}
