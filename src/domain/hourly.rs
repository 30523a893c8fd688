use crate::domain::errors::AnalysisError;
use crate::domain::stats::Stats;
use crate::domain::types::{HourlyAverages, HourlyProfile, MarketRecord};

const HOURS_PER_DAY: usize = 24;

/// Aggregates a series into hour-of-day buckets: mean price, volume and
/// load per bucket (rounded to 2 decimals), plus the peak and valley
/// price hours. Ties resolve to the earliest hour.
pub fn aggregate(records: &[MarketRecord]) -> Result<HourlyProfile, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::InsufficientData { need: 1, got: 0 });
    }

    #[derive(Default, Clone, Copy)]
    struct Bucket {
        price_sum: f64,
        volume_sum: f64,
        load_sum: f64,
        count: usize,
    }

    let mut buckets = [Bucket::default(); HOURS_PER_DAY];
    for record in records {
        let bucket = &mut buckets[record.hour() as usize];
        bucket.price_sum += record.price;
        bucket.volume_sum += record.volume as f64;
        bucket.load_sum += record.load;
        bucket.count += 1;
    }

    let rows: Vec<HourlyAverages> = buckets
        .iter()
        .enumerate()
        .filter(|(_, b)| b.count > 0)
        .map(|(hour, b)| {
            let n = b.count as f64;
            HourlyAverages {
                hour: hour as u32,
                price: Stats::round_dp(b.price_sum / n, 2),
                volume: Stats::round_dp(b.volume_sum / n, 2),
                load: Stats::round_dp(b.load_sum / n, 2),
            }
        })
        .collect();

    // Ascending scan keeps the earliest hour on ties
    let mut peak = rows[0];
    let mut valley = rows[0];
    for row in &rows[1..] {
        if row.price > peak.price {
            peak = *row;
        }
        if row.price < valley.price {
            valley = *row;
        }
    }

    Ok(HourlyProfile {
        rows,
        peak_hour: peak.hour,
        valley_hour: valley.hour,
    })
}
