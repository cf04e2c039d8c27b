//! GW CLI - Command line tool for groundwater well statistics and predictions.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gw-cli",
    version,
    about = "Groundwater well monitoring toolkit"
)]
struct Cli {
    /// TOML config file (defaults to $GW_CONFIG, then ./groundwater.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: gw_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = gw_cmd::AppConfig::load(cli.config.as_deref())?;
    gw_cmd::run(cli.command, config).await
}
