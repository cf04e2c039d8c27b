//! Command implementations for the groundwater CLI.
//!
//! Offline subcommands work on an observation file (CSV or JSON); the
//! prediction subcommands talk to the prediction API and keep a local
//! history of its answers.

use clap::Subcommand;
use gw_data::lookup::DEFAULT_TOLERANCE;

pub mod config;
pub mod input;
pub mod predict;
pub mod stats;

pub use config::AppConfig;

#[derive(Subcommand)]
pub enum Command {
    /// Compute per-well trend, baseline, severity and forecast
    Stats {
        /// Observation file (.json, otherwise CSV with headers)
        #[arg(short = 'i', long)]
        input: String,

        /// Output path for the statistics JSON (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Number of yearly forecast points (overrides the config)
        #[arg(long)]
        forecast_years: Option<usize>,
    },

    /// Summarize every well and the whole monitoring network
    Summary {
        /// Observation file (.json, otherwise CSV with headers)
        #[arg(short = 'i', long)]
        input: String,

        /// Output path for the summary JSON (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Show the readings of wells around a position
    Details {
        /// Observation file (.json, otherwise CSV with headers)
        #[arg(short = 'i', long)]
        input: String,

        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Half-width of the search box in degrees
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,

        /// Output path for the details JSON (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Request a water level prediction and record it in the history
    Predict {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Date to predict, YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Prediction API base URL; repeat to give fallbacks in order
        #[arg(long = "endpoint")]
        endpoints: Vec<String>,
    },

    /// Show recent predictions, newest first
    History {
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,

        /// Remove every recorded prediction
        #[arg(long)]
        clear: bool,

        /// Output path for the history JSON (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Chart series of one well: readings followed by the forecast
    Series {
        /// Observation file (.json, otherwise CSV with headers)
        #[arg(short = 'i', long)]
        input: String,

        /// Well id, e.g. 12.9716_77.5946
        #[arg(long)]
        id: String,

        /// Output path for the series JSON (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Find the first healthy prediction endpoint
    Health {
        #[arg(long = "endpoint")]
        endpoints: Vec<String>,
    },
}

pub async fn run(command: Command, config: AppConfig) -> anyhow::Result<()> {
    let precision = config.stats.coordinate_precision;
    match command {
        Command::Stats {
            input,
            output,
            forecast_years,
        } => {
            let mut stats_config = config.stats;
            if let Some(years) = forecast_years {
                stats_config.forecast_years = years;
            }
            stats::run_stats(&input, output.as_deref(), &stats_config)
        }
        Command::Summary { input, output } => {
            stats::run_summary(&input, output.as_deref(), precision)
        }
        Command::Details {
            input,
            lat,
            lng,
            tolerance,
            output,
        } => stats::run_details(&input, lat, lng, tolerance, output.as_deref(), precision),
        Command::Predict {
            lat,
            lng,
            date,
            endpoints,
        } => predict::run_predict(&config, lat, lng, &date, endpoints).await,
        Command::History {
            limit,
            clear,
            output,
        } => predict::run_history(&config, limit, clear, output.as_deref()),
        Command::Series { input, id, output } => {
            stats::run_series(&input, &id, output.as_deref(), &config.stats)
        }
        Command::Health { endpoints } => predict::run_health(&config, endpoints).await,
    }
}
