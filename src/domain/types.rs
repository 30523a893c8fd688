use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One hourly sample of the synthetic market table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub timestamp: DateTime<Utc>,
    /// Clearing price per MWh.
    pub price: f64,
    /// Traded volume in MWh.
    pub volume: u32,
    /// System load in MW.
    pub load: f64,
}

impl MarketRecord {
    /// Hour-of-day bucket (0..24) this sample falls into.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }
}

/// Descriptive statistics over a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceStatistics {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
}

/// A price sample exceeding the spike threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Spike detection output: the threshold used and the samples above it,
/// in time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpikeReport {
    pub threshold: f64,
    pub spikes: Vec<Spike>,
}

impl SpikeReport {
    pub fn count(&self) -> usize {
        self.spikes.len()
    }
}

/// Qualitative reading of the price/load correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    StrongPositive,
    StrongNegative,
    Weak,
}

impl CorrelationStrength {
    /// Classifies a Pearson coefficient: > 0.5 strong positive,
    /// < -0.5 strong negative, weak otherwise.
    pub fn from_coefficient(r: f64) -> Self {
        if r > 0.5 {
            CorrelationStrength::StrongPositive
        } else if r < -0.5 {
            CorrelationStrength::StrongNegative
        } else {
            CorrelationStrength::Weak
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationStrength::StrongPositive => {
                write!(f, "strong positive: prices tend to rise with load")
            }
            CorrelationStrength::StrongNegative => {
                write!(f, "strong negative: prices tend to fall with load")
            }
            CorrelationStrength::Weak => {
                write!(f, "weak: no clear load/price relationship")
            }
        }
    }
}

/// Mean price/volume/load for one hour-of-day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyAverages {
    pub hour: u32,
    pub price: f64,
    pub volume: f64,
    pub load: f64,
}

/// Hour-of-day aggregation with the peak/valley price hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyProfile {
    pub rows: Vec<HourlyAverages>,
    pub peak_hour: u32,
    pub valley_hour: u32,
}

impl HourlyProfile {
    pub fn averages_for(&self, hour: u32) -> Option<&HourlyAverages> {
        self.rows.iter().find(|r| r.hour == hour)
    }
}

/// Full result of one analysis pass over a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub sample_count: usize,
    pub price_stats: PriceStatistics,
    pub spike_report: SpikeReport,
    pub correlation: f64,
    pub correlation_strength: CorrelationStrength,
    pub total_volume: u64,
    pub mean_hourly_volume: f64,
    pub hourly: HourlyProfile,
}
