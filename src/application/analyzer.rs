use crate::domain::correlation;
use crate::domain::errors::AnalysisError;
use crate::domain::hourly;
use crate::domain::spikes::SpikeDetector;
use crate::domain::stats::Stats;
use crate::domain::types::{AnalysisReport, CorrelationStrength, MarketRecord};
use crate::domain::validation::SeriesValidator;
use tracing::{debug, info};

/// Runs the full analysis pass over a series: validation, price
/// statistics, spike detection, price/load correlation, volume totals
/// and hour-of-day aggregation.
///
/// Pure with respect to IO; writers consume the returned report.
pub fn analyze(
    records: &[MarketRecord],
    spike_sigma: f64,
) -> Result<AnalysisReport, AnalysisError> {
    if records.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            need: 2,
            got: records.len(),
        });
    }

    let invalid = SeriesValidator::validate_series(records);
    if invalid > 0 {
        return Err(AnalysisError::CorruptSeries { invalid });
    }

    let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
    let loads: Vec<f64> = records.iter().map(|r| r.load).collect();

    let price_stats = Stats::describe(&prices)?;
    debug!(
        "Price stats: mean={:.2} std={:.2} min={:.2} max={:.2}",
        price_stats.mean, price_stats.std, price_stats.min, price_stats.max
    );

    let spike_report =
        SpikeDetector::new(spike_sigma).detect(records, price_stats.mean, price_stats.std);
    let coefficient = correlation::pearson(&prices, &loads);

    let total_volume: u64 = records.iter().map(|r| r.volume as u64).sum();
    let mean_hourly_volume = total_volume as f64 / records.len() as f64;

    let hourly = hourly::aggregate(records)?;

    info!(
        "Analyzed {} samples: {} spike(s) above {:.2}, correlation {:.3}",
        records.len(),
        spike_report.count(),
        spike_report.threshold,
        coefficient
    );

    Ok(AnalysisReport {
        period_start: records[0].timestamp,
        period_end: records[records.len() - 1].timestamp,
        sample_count: records.len(),
        price_stats,
        spike_report,
        correlation: coefficient,
        correlation_strength: CorrelationStrength::from_coefficient(coefficient),
        total_volume,
        mean_hourly_volume,
        hourly,
    })
}
