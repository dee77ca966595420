use super::*;
use crate::trace::Trace;

fn trace(readings: &[f64]) -> Trace {
    Trace::from_readings(readings.to_vec()).unwrap()
}

const SCENARIO: [f64; 8] = [0.0, 2.0, 2.0, 2.0, 8.0, 8.0, 0.0, 2.0];

// ============================================================================
// Characterizer
// ============================================================================

#[test]
fn test_power_stats_excludes_zeros() {
    let stats = power_stats(&trace(&SCENARIO)).unwrap();

    assert_eq!(stats.count, 6);
    assert_eq!(stats.min, 2.0);
    assert_eq!(stats.max, 8.0);
    assert!((stats.avg - 26.0 / 6.0).abs() < 1e-12);
    assert!((stats.std - (73.0f64 / 9.0).sqrt()).abs() < 1e-12);
}

#[test]
fn test_characterize_scenario_has_single_gap() {
    // std ~= 2.848: one run of four samples ends at the first 8 W reading,
    // the trailing run is never closed
    let err = characterize(&trace(&SCENARIO)).unwrap_err();
    assert_eq!(err, AnalysisError::DegeneratePeriodicity { gaps: 1 });
    assert!(err.is_data_condition());
}

#[test]
fn test_characterize_all_zero_trace() {
    assert_eq!(
        characterize(&trace(&[0.0, 0.0, 0.0])).unwrap_err(),
        AnalysisError::EmptyTrace
    );
    assert_eq!(power_stats(&Trace::default()).unwrap_err(), AnalysisError::EmptyTrace);
}

#[test]
fn test_characterize_monotonic_trace_is_degenerate() {
    let err = characterize(&trace(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])).unwrap_err();
    assert!(matches!(err, AnalysisError::DegeneratePeriodicity { .. }));
}

#[test]
fn test_characterize_periodic_trace() {
    // Constant 5 W bursts: std is 0, so every idle sample is a gap sample.
    // Gaps are [2, 1, 3].
    let ch = characterize(&trace(&[0.0, 0.0, 5.0, 0.0, 5.0, 0.0, 0.0, 0.0, 5.0])).unwrap();

    assert_eq!(ch.min, 5.0);
    assert_eq!(ch.max, 5.0);
    assert_eq!(ch.avg, 5.0);
    assert_eq!(ch.std, 0.0);
    assert!((ch.gap_std - 1.5f64.sqrt()).abs() < 1e-12);
}

/// Three-sample 150 W bursts separated by 3.5 W idle stretches, closed by a final burst
fn bursts(idle_lengths: &[usize]) -> Trace {
    let mut readings = Vec::new();
    for &idle in idle_lengths {
        readings.extend([150.0; 3]);
        readings.extend(std::iter::repeat(3.5).take(idle));
    }
    readings.extend([150.0; 3]);
    Trace::from_readings(readings).unwrap()
}

#[test]
fn test_bursts_with_fixed_spacing_are_degenerate() {
    let err = characterize(&bursts(&[8, 8, 8])).unwrap_err();
    assert_eq!(err, AnalysisError::DegeneratePeriodicity { gaps: 3 });
}

#[test]
fn test_bursts_with_varying_spacing() {
    let ch = characterize(&bursts(&[6, 8, 10])).unwrap();
    assert!((ch.gap_std - 1.0 / (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
}

#[test]
fn test_characterize_is_idempotent() {
    let t = trace(&[0.0, 9.0, 0.0, 0.0, 9.0, 0.0, 9.0, 1.0, 0.0, 0.0, 0.0, 7.0]);
    assert_eq!(characterize(&t).unwrap(), characterize(&t).unwrap());
}

#[test]
fn test_metric_lookup() {
    let ch = characterize(&trace(&[0.0, 0.0, 5.0, 0.0, 5.0, 0.0, 0.0, 0.0, 5.0])).unwrap();

    assert_eq!(ch.get(Metric::Max), 5.0);
    assert_eq!("gap-std".parse::<Metric>().unwrap(), Metric::GapStd);
    assert_eq!("AVG".parse::<Metric>().unwrap(), Metric::Avg);
    assert!("median".parse::<Metric>().is_err());

    let names: Vec<&str> = ch.iter().map(|(m, _)| m.name()).collect();
    assert_eq!(names, vec!["min", "max", "avg", "std", "gap-std"]);

    let json = serde_json::to_value(ch).unwrap();
    assert!(json.get("gap-std").is_some());
}

// ============================================================================
// Periodicity state machine
// ============================================================================

#[test]
fn test_gap_tracker_transitions() {
    let mut tracker = GapTracker::new(1.0);
    assert_eq!(tracker.state(), GapState::AboveThreshold);

    tracker.observe(5.0);
    assert_eq!(tracker.state(), GapState::AboveThreshold);

    tracker.observe(0.5);
    tracker.observe(1.0);
    assert_eq!(tracker.state(), GapState::InGap(2));

    tracker.observe(3.0);
    assert_eq!(tracker.state(), GapState::AboveThreshold);
    assert_eq!(tracker.finish(), vec![2]);
}

#[test]
fn test_gap_lengths_adjacent_excursions_record_nothing() {
    let readings = [5.0, 5.0, 0.0, 0.0, 5.0, 5.0, 5.0, 0.0, 5.0, 0.0, 0.0];
    assert_eq!(gap_lengths(&readings, 1.0), vec![2, 1]);
}

#[test]
fn test_gap_lengths_never_crossing() {
    assert!(gap_lengths(&[0.0, 0.5, 1.0], 1.0).is_empty());
    assert_eq!(
        periodicity(&trace(&[0.0, 0.5, 1.0]), 1.0).unwrap_err(),
        AnalysisError::DegeneratePeriodicity { gaps: 0 }
    );
}

// ============================================================================
// Distribution estimator
// ============================================================================

#[test]
fn test_distribution_scenario() {
    let dist = estimate_distribution(&trace(&SCENARIO), &DistributionConfig::new(4, 8.0)).unwrap();

    assert_eq!(dist.bins(), &[0.0, 4.0 / 8.0, 0.0, 2.0 / 8.0]);
    assert!((dist.total_mass() - 6.0 / 8.0).abs() < 1e-12);
    assert_eq!(dist.mode(), Some((1, 0.5)));
}

#[test]
fn test_distribution_max_value_maps_to_last_bin() {
    let config = DistributionConfig::new(10, 100.0);
    assert_eq!(config.bin_index(100.0), 9);
    assert_eq!(config.bin_index(250.0), 9);
    assert_eq!(config.bin_index(-3.0), 0);
}

#[test]
fn test_distribution_rounds_half_to_even() {
    let config = DistributionConfig::new(10, 10.0);
    assert_eq!(config.bin_index(2.5), 2);
    assert_eq!(config.bin_index(3.5), 4);
    assert_eq!(config.bin_index(2.6), 3);
}

#[test]
fn test_distribution_small_non_zero_reading_counts() {
    let dist = estimate_distribution(&trace(&[0.0, 0.01]), &DistributionConfig::new(4, 8.0)).unwrap();
    assert_eq!(dist.bins(), &[0.5, 0.0, 0.0, 0.0]);
}

#[test]
fn test_distribution_invalid_parameters() {
    let t = trace(&[1.0]);
    for config in [
        DistributionConfig::new(0, 10.0),
        DistributionConfig::new(10, 0.0),
        DistributionConfig::new(10, -5.0),
        DistributionConfig::new(10, f64::NAN),
    ] {
        assert!(matches!(
            estimate_distribution(&t, &config),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }
}

#[test]
fn test_distribution_empty_trace() {
    let dist = estimate_distribution(&Trace::default(), &DistributionConfig::new(3, 1.0)).unwrap();
    assert_eq!(dist.bins(), &[0.0, 0.0, 0.0]);
    assert_eq!(dist.mode(), None);
}

#[test]
fn test_distribution_default_resolution() {
    let config = DistributionConfig::default();
    assert_eq!(config.bin_count, 1000);
    assert_eq!(config.max_value, 1000.0);
    assert_eq!(config.bin_width(), 1.0);
}

#[test]
fn test_power_axis() {
    let config = DistributionConfig::new(5, 8.0);
    assert_eq!(config.power_axis(), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    assert_eq!(DistributionConfig::new(1, 8.0).power_axis(), vec![0.0]);

    let dist = estimate_distribution(&trace(&[8.0]), &config).unwrap();
    let points: Vec<(f64, f64)> = dist.points().collect();
    assert_eq!(points.last(), Some(&(8.0, 1.0)));
}

// ============================================================================
// Summary
// ============================================================================

#[test]
fn test_summarize() {
    let summary = summarize(&trace(&[0.0, 1.0, 2.0, 3.0, 4.0])).unwrap();

    assert_eq!(summary.count, 4);
    assert_eq!(summary.mean, 2.5);
    assert!((summary.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    assert_eq!(summary.min, 1.0);
    assert_eq!(summary.q25, 1.75);
    assert_eq!(summary.median, 2.5);
    assert_eq!(summary.q75, 3.25);
    assert_eq!(summary.max, 4.0);

    let text = summary.to_string();
    assert!(text.starts_with("count"));
    assert!(text.contains("50%"));
}

#[test]
fn test_summarize_single_reading() {
    let summary = summarize(&trace(&[0.0, 7.0])).unwrap();
    assert_eq!(summary.count, 1);
    assert!(summary.std.is_nan());
    assert_eq!(summary.median, 7.0);
    assert_eq!(summarize(&trace(&[0.0])).unwrap_err(), AnalysisError::EmptyTrace);
}

// ============================================================================
// Load-change detection
// ============================================================================

#[test]
fn test_detect_load_changes() {
    let changes = detect_load_changes(
        &trace(&[100.0, 100.0, 0.0, 300.0, 100.0]),
        &LoadChangeConfig::default(),
    )
    .unwrap();

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].index, 3);
    assert_eq!(changes[0].timestamp, 3.0);
    assert_eq!(changes[0].watts, 300.0);
    assert!((changes[0].deviation_pct - 80.0).abs() < 1e-9);
}

#[test]
fn test_detect_load_changes_zero_threshold_flags_every_non_zero() {
    let changes = detect_load_changes(
        &trace(&[0.0, 1.0, 0.0, 1.0]),
        &LoadChangeConfig { threshold_pct: 0.0 },
    )
    .unwrap();
    let indices: Vec<usize> = changes.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![1, 3]);
}

#[test]
fn test_detect_load_changes_rejects_negative_threshold() {
    assert!(matches!(
        detect_load_changes(&trace(&[1.0]), &LoadChangeConfig { threshold_pct: -1.0 }),
        Err(AnalysisError::InvalidParameter(_))
    ));
}
