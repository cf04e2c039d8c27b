//! Offline commands over an observation file: statistics, summaries and
//! nearby-well details.

use crate::input::{load_wells, write_output};
use gw_data::{
    lookup::well_details,
    series::chart_series,
    summary::{severity_counts, summarize_wells, NetworkSummary, WellSummary},
};
use gw_wells::{
    config::StatsConfig,
    stats::{compute_all_stats, WellStats},
};
use log::{info, warn};
use serde::Serialize;

/// Compute statistics for every well in `input` and write them as JSON,
/// keyed by well id.
pub fn run_stats(input: &str, output: Option<&str>, config: &StatsConfig) -> anyhow::Result<()> {
    config.validate()?;
    let wells = load_wells(input, config.coordinate_precision)?;
    let stats = compute_all_stats(&wells, config);

    for (severity, count) in severity_counts(&stats) {
        info!("{}: {} wells", severity, count);
    }

    let body = serde_json::to_string_pretty(&stats)?;
    write_output(output, &body)
}

#[derive(Serialize)]
struct SummaryReport {
    network: NetworkSummary,
    wells: Vec<WellSummary>,
}

/// Write per-well summaries and network totals for `input` as JSON.
pub fn run_summary(input: &str, output: Option<&str>, precision: u32) -> anyhow::Result<()> {
    let wells = load_wells(input, precision)?;
    let report = SummaryReport {
        network: NetworkSummary::from_wells(&wells),
        wells: summarize_wells(&wells),
    };
    info!(
        "Summary: {} records, {} unique wells",
        report.network.total_records, report.network.unique_wells
    );
    let body = serde_json::to_string_pretty(&report)?;
    write_output(output, &body)
}

/// Write the merged readings of wells near `(lat, lng)` as JSON.
pub fn run_details(
    input: &str,
    lat: f64,
    lng: f64,
    tolerance: f64,
    output: Option<&str>,
    precision: u32,
) -> anyhow::Result<()> {
    let wells = load_wells(input, precision)?;
    let Some(details) = well_details(&wells, lat, lng, tolerance) else {
        warn!("No wells within {} of ({}, {})", tolerance, lat, lng);
        anyhow::bail!("no data found for location ({lat}, {lng})");
    };
    let body = serde_json::to_string_pretty(&details)?;
    write_output(output, &body)
}

/// Write the chart series of one well, forecast included, as JSON.
pub fn run_series(
    input: &str,
    id: &str,
    output: Option<&str>,
    config: &StatsConfig,
) -> anyhow::Result<()> {
    config.validate()?;
    let wells = load_wells(input, config.coordinate_precision)?;
    let Some(well) = wells.get(id) else {
        anyhow::bail!("no well with id {id}");
    };
    let Some(stats) = WellStats::compute(well, config) else {
        anyhow::bail!("well {id} has no readings");
    };
    let body = serde_json::to_string_pretty(&chart_series(&stats))?;
    write_output(output, &body)
}
