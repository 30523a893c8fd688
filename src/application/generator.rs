use crate::domain::stats::Stats;
use crate::domain::types::MarketRecord;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::f64::consts::TAU;
use tracing::info;

/// Parameters for the synthetic hourly series.
///
/// Defaults produce one week of data starting 2024-01-01 00:00 UTC:
/// prices drawn from Normal(350, 80) clamped to [100, 800], volumes from
/// UniformInt[800, 6000), loads from Normal(12000, 3000).
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub start: DateTime<Utc>,
    pub periods: usize,
    pub price_mean: f64,
    pub price_std: f64,
    pub price_floor: f64,
    pub price_cap: f64,
    /// Relative amplitude of the diurnal sine applied to prices.
    pub diurnal_amplitude: f64,
    pub volume_min: u32,
    /// Exclusive upper bound.
    pub volume_max: u32,
    pub load_mean: f64,
    pub load_std: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            periods: 168,
            price_mean: 350.0,
            price_std: 80.0,
            price_floor: 100.0,
            price_cap: 800.0,
            diurnal_amplitude: 0.1,
            volume_min: 800,
            volume_max: 6000,
            load_mean: 12_000.0,
            load_std: 3_000.0,
        }
    }
}

/// Generates the seeded synthetic series.
///
/// The base price draw is clamped and rounded to 2 decimals first, then
/// multiplied by the diurnal factor `1 + amplitude * sin(2*pi*i/24)`, so
/// modulated prices may leave the clamp range by up to the amplitude.
/// Loads are rounded to 1 decimal. Identical config yields an identical
/// series.
pub fn generate(config: &GeneratorConfig) -> Result<Vec<MarketRecord>> {
    if config.periods == 0 {
        anyhow::bail!("periods must be at least 1");
    }
    if config.volume_min >= config.volume_max {
        anyhow::bail!(
            "volume range is empty: [{}, {})",
            config.volume_min,
            config.volume_max
        );
    }
    if config.price_floor >= config.price_cap {
        anyhow::bail!(
            "price clamp range is empty: [{}, {}]",
            config.price_floor,
            config.price_cap
        );
    }

    let price_dist = Normal::new(config.price_mean, config.price_std)
        .context("invalid price distribution parameters")?;
    let load_dist = Normal::new(config.load_mean, config.load_std)
        .context("invalid load distribution parameters")?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut records = Vec::with_capacity(config.periods);

    for i in 0..config.periods {
        let base_price = Stats::round_dp(
            price_dist
                .sample(&mut rng)
                .clamp(config.price_floor, config.price_cap),
            2,
        );
        let diurnal = 1.0 + config.diurnal_amplitude * (TAU * i as f64 / 24.0).sin();

        let volume = rng.random_range(config.volume_min..config.volume_max);
        let load = Stats::round_dp(load_dist.sample(&mut rng), 1);

        records.push(MarketRecord {
            timestamp: config.start + Duration::hours(i as i64),
            price: base_price * diurnal,
            volume,
            load,
        });
    }

    info!(
        "Generated {} hourly samples from {} (seed {})",
        records.len(),
        config.start,
        config.seed
    );

    Ok(records)
}
