use anyhow::Result;
use clap::Parser;
use gridstat::application::{analyzer, generator, reporting::AnalysisReporter};
use gridstat::config::{Config, parse_start_date};
use tracing::info;

/// Synthetic electricity market data analyzer: generates a seeded hourly
/// price/volume/load series, runs descriptive statistics, spike detection,
/// load correlation and hour-of-day aggregation, and writes CSV/JSON/text
/// artifacts.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// RNG seed for the synthetic series
    #[arg(long)]
    seed: Option<u64>,

    /// Number of hourly samples to generate
    #[arg(long)]
    periods: Option<usize>,

    /// Series start date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,

    /// Spike threshold in standard deviations above the mean
    #[arg(long)]
    spike_sigma: Option<f64>,

    /// Directory for the three output artifacts
    #[arg(short, long)]
    output_dir: Option<std::path::PathBuf>,

    /// Print the console summary without writing artifacts
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(periods) = cli.periods {
        config.periods = periods;
    }
    if let Some(ref start) = cli.start {
        config.start = parse_start_date(start)?;
    }
    if let Some(sigma) = cli.spike_sigma {
        config.spike_sigma = sigma;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    info!(
        "Analyzing {} hourly samples from {} (seed {})",
        config.periods, config.start, config.seed
    );

    let records = generator::generate(&config.generator_config())?;
    let report = analyzer::analyze(&records, config.spike_sigma)?;

    let reporter = AnalysisReporter::new(&config.output_dir)?;
    reporter.print_summary(&report);

    if cli.dry_run {
        info!("Dry run: skipping artifact writes");
    } else {
        let paths = reporter.write_artifacts(&records, &report)?;
        println!("\nArtifacts:");
        println!("  {}", paths.csv.display());
        println!("  {}", paths.json.display());
        println!("  {}", paths.text.display());
    }

    Ok(())
}
