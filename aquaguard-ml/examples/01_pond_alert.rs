//! AquaGuard Pond Alert Example
//!
//! Feeds two days of hourly readings into a store, scores the last day
//! against the one before, checks the fixed limits and runs a parasite
//! diagnosis through the placeholder classifier.
//!
//! ## Scenario: Overnight Oxygen Crash
//!
//! Day one is healthy at ~6.5 mg/L dissolved oxygen. On day two an aerator
//! fails and oxygen sinks to ~2 mg/L while the other parameters hold.

use aquaguard_core::{
    constants::HOUR_MS, Parameter, Reading, ReadingStore, ReadingSummary, ScorerConfig,
    WaterQualityLimits,
};
use aquaguard_ml::{AlertLevel, AnomalyScorer, Diagnoser, MicroscopySample, PlaceholderModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = ReadingStore::with_capacity(48);
    for hour in 0..48u64 {
        let wobble = ((hour * 7) % 5) as f64 * 0.05 - 0.1;
        let oxygen = if hour < 24 { 6.5 + wobble } else { 2.0 + wobble };
        store.push(Reading::new(hour * HOUR_MS, 7.1, 28.4, oxygen, 14.0))?;
    }

    let scorer = AnomalyScorer::new(ScorerConfig::default())?;
    let report = scorer.score_store(&store)?;

    println!("=== WATER QUALITY ===");
    match report.alert_level() {
        AlertLevel::Critical => println!("CRITICAL: anomaly detected"),
        AlertLevel::Attention => println!("ATTENTION: anomalous conditions"),
        AlertLevel::Normal => println!("Conditions normal"),
    }
    println!("Score:              {:.4} (threshold {:.4})", report.score(), report.threshold());
    println!("Critical parameter: {}", report.critical_parameter());
    for (parameter, value) in report.current_values().iter() {
        println!("  {parameter:<12} {value}");
    }

    for violation in WaterQualityLimits::default().check(report.current_values().reading()) {
        println!("Limit breached: {} = {:.2} ({:?})", violation.parameter, violation.value, violation.bound);
    }

    let summary = ReadingSummary::from_readings(store.as_slice())?;
    let oxygen = summary.get(Parameter::Oxygen);
    println!(
        "Oxygen 48h: mean {:.2}, sd {:.2}, range {:.2}..{:.2}",
        oxygen.mean, oxygen.std_dev, oxygen.min, oxygen.max
    );

    println!("\n=== PARASITE DIAGNOSIS ===");
    let mut diagnoser = Diagnoser::new();
    let sample = MicroscopySample::new(vec![0u8; 256]).with_source("ictio/sample_001.jpg");
    if let Err(e) = diagnoser.diagnose(&sample) {
        println!("Before loading a model: {e}");
    }

    diagnoser.load(Box::new(PlaceholderModel::new(7)));
    let result = diagnoser.diagnose(&sample)?;
    println!("Diagnosis:  {} ({:.2}%)", result.diagnosis_class, result.confidence * 100.0);
    for (class, p) in result.class_probabilities.iter() {
        println!("  {class:<18} {:.2}%", p * 100.0);
    }
    println!("Recommendation: {}", result.recommendation);

    Ok(())
}
