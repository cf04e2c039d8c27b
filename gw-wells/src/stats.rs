use crate::{
    config::StatsConfig,
    decimal_year::date_to_decimal_year,
    observation::TimePoint,
    regression::{linear_regression, LinearFit},
    severity::{classify_severity, Severity},
    well::Well,
};
use gw_utils::dates::add_years;
use serde::Serialize;
use std::collections::BTreeMap;

/// Derived statistics for one well.
///
/// Always rebuilt from a [`Well`] in one go; never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellStats {
    pub id: String,
    pub lat: f64,
    pub long: f64,
    pub timeseries: Vec<TimePoint>,
    pub last_measurement: TimePoint,
    pub fit: Option<LinearFit>,
    pub ten_year_avg: Option<f64>,
    /// Percent change of the latest reading against the baseline average,
    /// `(avg - last) / avg * 100`.
    pub pct_drop: Option<f64>,
    pub severity: Severity,
    pub forecast: Vec<TimePoint>,
}

impl WellStats {
    /// Compute statistics for a well. `None` when the well has no readings.
    pub fn compute(well: &Well, config: &StatsConfig) -> Option<WellStats> {
        let timeseries = well.timeseries();
        let last_measurement = *timeseries.last()?;
        let fit = linear_regression(timeseries);
        let most_recent_year = date_to_decimal_year(&last_measurement.date);

        let ten_year_avg = baseline_average(
            timeseries,
            most_recent_year - config.baseline_years,
        );
        let pct_drop = ten_year_avg
            .filter(|avg| *avg != 0.0)
            .map(|avg| (avg - last_measurement.water_level) / avg * 100.0);
        let severity = classify_severity(fit.map(|f| f.slope), pct_drop, &config.severity);
        let forecast = fit
            .map(|fit| {
                forecast(
                    &fit,
                    &last_measurement,
                    most_recent_year,
                    config.forecast_years,
                )
            })
            .unwrap_or_default();

        Some(WellStats {
            id: well.id.clone(),
            lat: well.lat,
            long: well.long,
            timeseries: timeseries.to_vec(),
            last_measurement,
            fit,
            ten_year_avg,
            pct_drop,
            severity,
            forecast,
        })
    }
}

/// Compute statistics with the default configuration and a given forecast window.
pub fn compute_well_stats(well: &Well, forecast_years: usize) -> Option<WellStats> {
    WellStats::compute(well, &StatsConfig::with_forecast_years(forecast_years))
}

/// Compute statistics for every well of a grouping, dropping empty wells.
pub fn compute_all_stats(
    wells: &BTreeMap<String, Well>,
    config: &StatsConfig,
) -> BTreeMap<String, WellStats> {
    wells
        .iter()
        .filter_map(|(id, well)| WellStats::compute(well, config).map(|s| (id.clone(), s)))
        .collect()
}

/// Mean level of the readings at or after `cutoff_year`, if there are any.
fn baseline_average(timeseries: &[TimePoint], cutoff_year: f64) -> Option<f64> {
    let recent: Vec<f64> = timeseries
        .iter()
        .filter(|p| date_to_decimal_year(&p.date) >= cutoff_year)
        .map(|p| p.water_level)
        .collect();
    if recent.is_empty() {
        return None;
    }
    Some(recent.iter().sum::<f64>() / recent.len() as f64)
}

/// Project the fitted line one calendar year at a time past the last reading.
fn forecast(
    fit: &LinearFit,
    last: &TimePoint,
    most_recent_year: f64,
    years: usize,
) -> Vec<TimePoint> {
    (1..=years)
        .map_while(|i| {
            let date = add_years(&last.date, u32::try_from(i).ok()?)?;
            Some(TimePoint {
                date,
                water_level: fit.value_at(most_recent_year + i as f64),
            })
        })
        .collect()
}
