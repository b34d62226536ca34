//! Incident chart toolkit CLI
//!
//! Prints palettes, renders chart configuration from local series files,
//! pulls the trend chart from a running dashboard server and exercises the
//! number/date formatters.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use incident_charts::builders::trend_chart;
use incident_charts::{
    format_date, format_number, palette_for, CategorySeries, ChartHandle, ChartKind,
    InMemoryChart, Period,
};
use incident_dashboard::{
    bind_controls, ControlRef, DashboardConfig, HeadlessControl, HeadlessNavigator,
    HttpDataSource,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "incident-charts")]
#[command(about = "Incident dashboard chart toolkit")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a category color palette
    Palette {
        /// Number of colors
        #[arg(allow_hyphen_values = true)]
        count: i64,
    },
    /// Render a chart configuration from a `{labels, data}` JSON file
    Render {
        /// Chart kind: sector, severity, trend, source, actor or monthly
        kind: ChartKind,

        #[arg(short, long)]
        input: PathBuf,
    },
    /// Fetch the trend chart for a period from the dashboard server
    Trend {
        /// Window in days; defaults to the configured default period
        #[arg(short, long)]
        days: Option<Period>,

        /// Dashboard configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Format a count with thousands separators
    FormatNumber {
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Format an ISO date for display
    FormatDate { value: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Palette { count } => {
            for color in palette_for(count)? {
                println!("{}", color);
            }
        }
        Commands::Render { kind, input } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let series: CategorySeries = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid series in {}", input.display()))?;
            info!("Rendering {} chart with {} categories", kind, series.len());
            println!("{}", kind.build(&series).to_json_string_pretty()?);
        }
        Commands::Trend { days, config } => {
            let config = DashboardConfig::load(config.as_deref())?;
            let period = match days {
                Some(period) => period,
                None => Period::new(config.default_period)?,
            };
            print_trend(&config, period).await?;
        }
        Commands::FormatNumber { value } => println!("{}", format_number(value)),
        Commands::FormatDate { value } => println!("{}", format_date(&value)?),
    }

    Ok(())
}

async fn print_trend(config: &DashboardConfig, period: Period) -> Result<()> {
    let bindings = config
        .period_set()?
        .into_iter()
        .map(|p| {
            let control: ControlRef = Arc::new(HeadlessControl::new(format!("{} days", p)));
            (Some(control), p)
        })
        .collect();

    let chart = Arc::new(Mutex::new(InMemoryChart::new(
        "trendChart",
        trend_chart(&CategorySeries::new()),
    )));
    let controller = bind_controls(
        bindings,
        None,
        chart.clone(),
        Arc::new(HttpDataSource::new(config)?),
        Arc::new(HeadlessNavigator::new()),
        config,
    );

    if !controller.period_buttons().iter().any(|b| b.period == period) {
        anyhow::bail!(
            "{} days is not a configured period ({:?})",
            period,
            config.periods
        );
    }

    controller
        .select_days(period)
        .await
        .with_context(|| format!("Failed to load trend from {}", config.base_url))?;

    let chart = chart
        .lock()
        .map_err(|_| anyhow::anyhow!("Trend chart lock poisoned"))?;
    println!("{}", chart.config().to_json_string_pretty()?);
    Ok(())
}
