//! Reading observation files and writing command output.

use anyhow::Context;
use gw_wells::{
    observation::RawObservation,
    well::{group_observations_with_precision, Well},
};
use log::info;
use std::collections::BTreeMap;
use std::path::Path;

/// Read raw observations from a `.json` file or, for any other extension, a
/// CSV file with headers.
pub fn read_observations(path: &str) -> anyhow::Result<Vec<RawObservation>> {
    let body = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let rows = if is_json {
        RawObservation::from_json_str(&body)
    } else {
        RawObservation::from_csv_str(&body)
    }
    .with_context(|| format!("parsing {path}"))?;
    info!("Read {} rows from {}", rows.len(), path);
    Ok(rows)
}

/// Read a file and group its rows into wells.
pub fn load_wells(path: &str, precision: u32) -> anyhow::Result<BTreeMap<String, Well>> {
    let rows = read_observations(path)?;
    let wells = group_observations_with_precision(&rows, precision);
    info!("Grouped {} rows into {} wells", rows.len(), wells.len());
    Ok(wells)
}

/// Print `body` to stdout, or write it to `output` when given.
pub fn write_output(output: Option<&str>, body: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, body).with_context(|| format!("writing {path}"))?;
            info!("Output: {}", path);
        }
        None => println!("{body}"),
    }
    Ok(())
}
