use crate::domain::stats::Stats;
use crate::domain::types::{AnalysisReport, MarketRecord};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CSV_FILENAME: &str = "power_analysis_results.csv";
pub const JSON_FILENAME: &str = "analysis_summary.json";
pub const TEXT_FILENAME: &str = "analysis_report.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the CSV artifact.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    timestamp: String,
    price: f64,
    volume: u32,
    load: f64,
    hour: u32,
}

impl From<&MarketRecord> for CsvRow {
    fn from(record: &MarketRecord) -> Self {
        Self {
            timestamp: record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            price: record.price,
            volume: record.volume,
            load: record.load,
            hour: record.hour(),
        }
    }
}

/// The JSON summary artifact.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryFile {
    pub analysis_time: DateTime<Utc>,
    pub period: PeriodSummary,
    pub price_statistics: PriceStatisticsSummary,
    pub correlation: f64,
    pub total_volume: u64,
    pub peak_hour: u32,
    pub valley_hour: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Price statistics rounded to 2 decimals for the summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct PriceStatisticsSummary {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
}

/// Paths of the three written artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub csv: PathBuf,
    pub json: PathBuf,
    pub text: PathBuf,
}

/// Writes the CSV table, JSON summary and text report, and prints the
/// console summary.
pub struct AnalysisReporter {
    output_dir: PathBuf,
}

impl AnalysisReporter {
    pub fn new(output_dir: &Path) -> Result<Self> {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir).with_context(|| {
                format!("Failed to create output directory {}", output_dir.display())
            })?;
        }
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Writes all three artifacts and returns their paths.
    pub fn write_artifacts(
        &self,
        records: &[MarketRecord],
        report: &AnalysisReport,
    ) -> Result<ArtifactPaths> {
        let paths = ArtifactPaths {
            csv: self.write_csv(records)?,
            json: self.write_json(report)?,
            text: self.write_text(report)?,
        };
        info!(
            "Wrote artifacts: {}, {}, {}",
            paths.csv.display(),
            paths.json.display(),
            paths.text.display()
        );
        Ok(paths)
    }

    /// Full series as CSV: timestamp, price, volume, load, hour.
    pub fn write_csv(&self, records: &[MarketRecord]) -> Result<PathBuf> {
        let path = self.output_dir.join(CSV_FILENAME);
        let file = fs::File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(file);
        for record in records {
            writer
                .serialize(CsvRow::from(record))
                .context("Failed to serialize CSV row")?;
        }
        writer.flush().context("Failed to flush CSV writer")?;

        Ok(path)
    }

    /// JSON summary with rounded statistics.
    pub fn write_json(&self, report: &AnalysisReport) -> Result<PathBuf> {
        let path = self.output_dir.join(JSON_FILENAME);
        let summary = Self::build_summary(report, Utc::now());
        let json =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Short human-readable text report.
    pub fn write_text(&self, report: &AnalysisReport) -> Result<PathBuf> {
        let path = self.output_dir.join(TEXT_FILENAME);
        fs::write(&path, Self::render_text(report, Utc::now()))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub(crate) fn build_summary(report: &AnalysisReport, analysis_time: DateTime<Utc>) -> SummaryFile {
        let s = report.price_stats;
        SummaryFile {
            analysis_time,
            period: PeriodSummary {
                start: report.period_start,
                end: report.period_end,
            },
            price_statistics: PriceStatisticsSummary {
                mean: Stats::round_dp(s.mean, 2),
                median: Stats::round_dp(s.median, 2),
                std: Stats::round_dp(s.std, 2),
                min: Stats::round_dp(s.min, 2),
                max: Stats::round_dp(s.max, 2),
                q1: Stats::round_dp(s.q1, 2),
                q3: Stats::round_dp(s.q3, 2),
            },
            correlation: Stats::round_dp(report.correlation, 3),
            total_volume: report.total_volume,
            peak_hour: report.hourly.peak_hour,
            valley_hour: report.hourly.valley_hour,
        }
    }

    pub(crate) fn render_text(report: &AnalysisReport, analysis_time: DateTime<Utc>) -> String {
        let volatility_pct = if report.price_stats.mean.abs() > f64::EPSILON {
            report.price_stats.std / report.price_stats.mean * 100.0
        } else {
            0.0
        };

        let mut out = String::new();
        out.push_str(&"=".repeat(60));
        out.push('\n');
        out.push_str("POWER MARKET ANALYSIS REPORT\n");
        out.push_str(&"=".repeat(60));
        out.push_str("\n\n");
        out.push_str(&format!("Analysis time: {}\n", analysis_time));
        out.push_str(&format!(
            "Period: {} to {}\n",
            report.period_start.format(TIMESTAMP_FORMAT),
            report.period_end.format(TIMESTAMP_FORMAT)
        ));
        out.push_str(&format!(
            "Mean price: {:.2} per MWh\n",
            report.price_stats.mean
        ));
        out.push_str(&format!("Price volatility: {:.1}%\n", volatility_pct));
        out.push_str(&format!("Price spikes: {}\n", report.spike_report.count()));
        out.push_str(&format!("Total volume: {} MWh\n", report.total_volume));
        out
    }

    /// Numbered console summary of the analysis.
    pub fn print_summary(&self, report: &AnalysisReport) {
        println!("{}", "=".repeat(60));
        println!("POWER MARKET ANALYSIS");
        println!("{}", "=".repeat(60));

        println!("\n1. Overview");
        println!(
            "   Period: {} to {}",
            report.period_start.format(TIMESTAMP_FORMAT),
            report.period_end.format(TIMESTAMP_FORMAT)
        );
        println!("   Samples: {} (hourly)", report.sample_count);

        println!("\n2. Price statistics");
        let s = report.price_stats;
        for (label, value) in [
            ("mean", s.mean),
            ("median", s.median),
            ("std", s.std),
            ("min", s.min),
            ("max", s.max),
            ("q1", s.q1),
            ("q3", s.q3),
        ] {
            println!("   {:<6}: {:>8.2} per MWh", label, value);
        }

        println!("\n3. Spike detection");
        println!("   Threshold: {:.2} per MWh", report.spike_report.threshold);
        println!("   Spikes found: {}", report.spike_report.count());
        for spike in report.spike_report.spikes.iter().take(3) {
            println!(
                "     {}: {:.2} per MWh",
                spike.timestamp.format(TIMESTAMP_FORMAT),
                spike.price
            );
        }

        println!("\n4. Load/price correlation");
        println!("   Coefficient: {:.3}", report.correlation);
        println!("   -> {}", report.correlation_strength);

        println!("\n5. Volume");
        println!("   Total: {} MWh", report.total_volume);
        println!("   Mean hourly: {:.0} MWh", report.mean_hourly_volume);

        println!("\n6. Hour-of-day profile");
        if let Some(peak) = report.hourly.averages_for(report.hourly.peak_hour) {
            println!(
                "   Peak price hour: {:02}:00 ({:.2} per MWh)",
                peak.hour, peak.price
            );
        }
        if let Some(valley) = report.hourly.averages_for(report.hourly.valley_hour) {
            println!(
                "   Valley price hour: {:02}:00 ({:.2} per MWh)",
                valley.hour, valley.price
            );
        }

        println!("\n{}", "=".repeat(60));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{
        CorrelationStrength, HourlyAverages, HourlyProfile, PriceStatistics, Spike, SpikeReport,
    };
    use chrono::TimeZone;

    fn fixture_report() -> AnalysisReport {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        AnalysisReport {
            period_start: start,
            period_end: Utc.with_ymd_and_hms(2024, 1, 7, 23, 0, 0).unwrap(),
            sample_count: 168,
            price_stats: PriceStatistics {
                mean: 351.23456,
                median: 348.9,
                std: 81.567,
                min: 101.0,
                max: 790.12,
                q1: 290.555,
                q3: 405.444,
            },
            spike_report: SpikeReport {
                threshold: 514.37,
                spikes: vec![Spike {
                    timestamp: Utc.with_ymd_and_hms(2024, 1, 3, 18, 0, 0).unwrap(),
                    price: 612.5,
                }],
            },
            correlation: 0.04567,
            correlation_strength: CorrelationStrength::Weak,
            total_volume: 570_000,
            mean_hourly_volume: 3392.86,
            hourly: HourlyProfile {
                rows: vec![HourlyAverages {
                    hour: 6,
                    price: 380.0,
                    volume: 3300.0,
                    load: 12100.0,
                }],
                peak_hour: 6,
                valley_hour: 6,
            },
        }
    }

    #[test]
    fn test_summary_rounds_statistics() {
        let report = fixture_report();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let summary = AnalysisReporter::build_summary(&report, now);

        assert!((summary.price_statistics.mean - 351.23).abs() < 1e-9);
        assert!((summary.price_statistics.q1 - 290.56).abs() < 1e-9);
        assert!((summary.correlation - 0.046).abs() < 1e-9);
        assert_eq!(summary.total_volume, 570_000);
        assert_eq!(summary.peak_hour, 6);
        assert_eq!(summary.analysis_time, now);
    }

    #[test]
    fn test_text_report_contents() {
        let report = fixture_report();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let text = AnalysisReporter::render_text(&report, now);

        assert!(text.starts_with(&"=".repeat(60)));
        assert!(text.contains("POWER MARKET ANALYSIS REPORT"));
        assert!(text.contains("Period: 2024-01-01 00:00:00 to 2024-01-07 23:00:00"));
        assert!(text.contains("Mean price: 351.23 per MWh"));
        // 81.567 / 351.23456 = 23.2%
        assert!(text.contains("Price volatility: 23.2%"));
        assert!(text.contains("Price spikes: 1"));
        assert!(text.contains("Total volume: 570000 MWh"));
    }
}
