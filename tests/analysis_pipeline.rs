use gridstat::application::reporting::{AnalysisReporter, SummaryFile};
use gridstat::application::{analyzer, generator};
use gridstat::application::generator::GeneratorConfig;
use chrono::Duration;

#[test]
fn full_pipeline_produces_consistent_report() {
    let config = GeneratorConfig::default();
    let records = generator::generate(&config).unwrap();
    let report = analyzer::analyze(&records, 2.0).unwrap();

    assert_eq!(report.sample_count, 168);
    assert_eq!(report.period_start, config.start);
    assert_eq!(report.period_end, config.start + Duration::hours(167));

    let s = report.price_stats;
    assert!(s.min <= s.q1 && s.q1 <= s.median && s.median <= s.q3 && s.q3 <= s.max);
    assert!(s.std > 0.0);

    // Every reported spike is strictly above the threshold
    let threshold = report.spike_report.threshold;
    assert!((threshold - (s.mean + 2.0 * s.std)).abs() < 1e-9);
    for spike in &report.spike_report.spikes {
        assert!(spike.price > threshold);
    }
    // And no sample above the threshold was missed
    let above = records.iter().filter(|r| r.price > threshold).count();
    assert_eq!(above, report.spike_report.count());

    assert!((-1.0..=1.0).contains(&report.correlation));

    // A full week covers every hour bucket exactly 7 times
    assert_eq!(report.hourly.rows.len(), 24);
    assert!(report.hourly.peak_hour < 24);
    assert!(report.hourly.valley_hour < 24);

    let expected_volume: u64 = records.iter().map(|r| r.volume as u64).sum();
    assert_eq!(report.total_volume, expected_volume);
}

#[test]
fn artifacts_round_trip() {
    let config = GeneratorConfig::default();
    let records = generator::generate(&config).unwrap();
    let report = analyzer::analyze(&records, 2.0).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let reporter = AnalysisReporter::new(dir.path()).unwrap();
    let paths = reporter.write_artifacts(&records, &report).unwrap();

    // CSV: header + one row per sample, fields parse back
    let mut reader = csv::Reader::from_path(&paths.csv).unwrap();
    assert_eq!(
        reader.headers().unwrap(),
        &csv::StringRecord::from(vec!["timestamp", "price", "volume", "load", "hour"])
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 168);
    assert_eq!(&rows[0][0], "2024-01-01 00:00:00");
    let first_price: f64 = rows[0][1].parse().unwrap();
    assert!((first_price - records[0].price).abs() < 1e-9);
    let last_hour: u32 = rows[167][4].parse().unwrap();
    assert_eq!(last_hour, 23);

    // JSON: summary fields match the report
    let json = std::fs::read_to_string(&paths.json).unwrap();
    let summary: SummaryFile = serde_json::from_str(&json).unwrap();
    assert_eq!(summary.period.start, report.period_start);
    assert_eq!(summary.period.end, report.period_end);
    assert_eq!(summary.total_volume, report.total_volume);
    assert_eq!(summary.peak_hour, report.hourly.peak_hour);
    assert_eq!(summary.valley_hour, report.hourly.valley_hour);
    assert!((summary.price_statistics.mean - report.price_stats.mean).abs() < 0.005);
    assert!((summary.correlation - report.correlation).abs() < 0.0005);

    // Text: banner and headline figures present
    let text = std::fs::read_to_string(&paths.text).unwrap();
    assert!(text.contains("POWER MARKET ANALYSIS REPORT"));
    assert!(text.contains("Period: 2024-01-01 00:00:00 to 2024-01-07 23:00:00"));
    assert!(text.contains(&format!("Price spikes: {}", report.spike_report.count())));
    assert!(text.contains(&format!("Total volume: {} MWh", report.total_volume)));
}

#[test]
fn output_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("out").join("run-1");
    let reporter = AnalysisReporter::new(&nested).unwrap();

    let records = generator::generate(&GeneratorConfig {
        periods: 24,
        ..GeneratorConfig::default()
    })
    .unwrap();
    let report = analyzer::analyze(&records, 2.0).unwrap();
    let paths = reporter.write_artifacts(&records, &report).unwrap();

    assert!(paths.csv.exists());
    assert!(paths.json.exists());
    assert!(paths.text.exists());
}
