use crate::application::generator::GeneratorConfig;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::env;
use std::path::PathBuf;

/// Runtime configuration, read from the environment with defaults
/// matching the standard one-week window.
#[derive(Debug, Clone)]
pub struct Config {
    pub seed: u64,
    pub periods: usize,
    pub start: DateTime<Utc>,
    pub spike_sigma: f64,
    pub output_dir: PathBuf,
    pub price_mean: f64,
    pub price_std: f64,
    pub price_floor: f64,
    pub price_cap: f64,
    pub diurnal_amplitude: f64,
    pub volume_min: u32,
    pub volume_max: u32,
    pub load_mean: f64,
    pub load_std: f64,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses a YYYY-MM-DD date into the UTC midnight starting the window.
pub fn parse_start_date(s: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("start date must be YYYY-MM-DD, got '{}'", s))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .context("invalid start-of-day timestamp")?;
    Ok(Utc.from_utc_datetime(&midnight))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let seed = env_or("GRIDSTAT_SEED", "42")
            .parse::<u64>()
            .context("GRIDSTAT_SEED must be a non-negative integer")?;
        let periods = env_or("GRIDSTAT_PERIODS", "168")
            .parse::<usize>()
            .context("GRIDSTAT_PERIODS must be a positive integer")?;
        let start = parse_start_date(&env_or("GRIDSTAT_START_DATE", "2024-01-01"))?;
        let spike_sigma = env_or("GRIDSTAT_SPIKE_SIGMA", "2.0")
            .parse::<f64>()
            .context("GRIDSTAT_SPIKE_SIGMA must be a number")?;
        let output_dir = PathBuf::from(env_or("GRIDSTAT_OUTPUT_DIR", "."));

        let price_mean = env_or("GRIDSTAT_PRICE_MEAN", "350.0")
            .parse::<f64>()
            .context("GRIDSTAT_PRICE_MEAN must be a number")?;
        let price_std = env_or("GRIDSTAT_PRICE_STD", "80.0")
            .parse::<f64>()
            .context("GRIDSTAT_PRICE_STD must be a number")?;
        let price_floor = env_or("GRIDSTAT_PRICE_FLOOR", "100.0")
            .parse::<f64>()
            .context("GRIDSTAT_PRICE_FLOOR must be a number")?;
        let price_cap = env_or("GRIDSTAT_PRICE_CAP", "800.0")
            .parse::<f64>()
            .context("GRIDSTAT_PRICE_CAP must be a number")?;
        let diurnal_amplitude = env_or("GRIDSTAT_DIURNAL_AMPLITUDE", "0.1")
            .parse::<f64>()
            .context("GRIDSTAT_DIURNAL_AMPLITUDE must be a number")?;
        let volume_min = env_or("GRIDSTAT_VOLUME_MIN", "800")
            .parse::<u32>()
            .context("GRIDSTAT_VOLUME_MIN must be a non-negative integer")?;
        let volume_max = env_or("GRIDSTAT_VOLUME_MAX", "6000")
            .parse::<u32>()
            .context("GRIDSTAT_VOLUME_MAX must be a non-negative integer")?;
        let load_mean = env_or("GRIDSTAT_LOAD_MEAN", "12000.0")
            .parse::<f64>()
            .context("GRIDSTAT_LOAD_MEAN must be a number")?;
        let load_std = env_or("GRIDSTAT_LOAD_STD", "3000.0")
            .parse::<f64>()
            .context("GRIDSTAT_LOAD_STD must be a number")?;

        let config = Self {
            seed,
            periods,
            start,
            spike_sigma,
            output_dir,
            price_mean,
            price_std,
            price_floor,
            price_cap,
            diurnal_amplitude,
            volume_min,
            volume_max,
            load_mean,
            load_std,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.periods == 0 {
            anyhow::bail!("GRIDSTAT_PERIODS must be at least 1");
        }
        if self.spike_sigma <= 0.0 {
            anyhow::bail!("GRIDSTAT_SPIKE_SIGMA must be positive");
        }
        if self.price_std < 0.0 || self.load_std < 0.0 {
            anyhow::bail!("distribution std deviations must be non-negative");
        }
        if self.price_floor >= self.price_cap {
            anyhow::bail!(
                "price clamp range is empty: [{}, {}]",
                self.price_floor,
                self.price_cap
            );
        }
        if self.volume_min >= self.volume_max {
            anyhow::bail!(
                "volume range is empty: [{}, {})",
                self.volume_min,
                self.volume_max
            );
        }
        Ok(())
    }

    /// Generator parameters derived from this configuration.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            seed: self.seed,
            start: self.start,
            periods: self.periods,
            price_mean: self.price_mean,
            price_std: self.price_std,
            price_floor: self.price_floor,
            price_cap: self.price_cap,
            diurnal_amplitude: self.diurnal_amplitude,
            volume_min: self.volume_min,
            volume_max: self.volume_max,
            load_mean: self.load_mean,
            load_std: self.load_std,
        }
    }
}
