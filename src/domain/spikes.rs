use crate::domain::types::{MarketRecord, Spike, SpikeReport};

/// Detects price spikes against a sigma-multiple threshold.
///
/// A spike is a sample whose price strictly exceeds
/// mean + `sigma_multiplier` * std.
#[derive(Debug, Clone)]
pub struct SpikeDetector {
    pub sigma_multiplier: f64,
}

impl Default for SpikeDetector {
    fn default() -> Self {
        Self {
            sigma_multiplier: 2.0,
        }
    }
}

impl SpikeDetector {
    pub fn new(sigma_multiplier: f64) -> Self {
        Self { sigma_multiplier }
    }

    pub fn detect(&self, records: &[MarketRecord], mean: f64, std: f64) -> SpikeReport {
        let threshold = mean + self.sigma_multiplier * std;
        let spikes = records
            .iter()
            .filter(|r| r.price > threshold)
            .map(|r| Spike {
                timestamp: r.timestamp,
                price: r.price,
            })
            .collect();

        SpikeReport { threshold, spikes }
    }
}
