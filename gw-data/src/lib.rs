//! Data processing for grouped well observations.
//!
//! This crate turns grouped wells and computed statistics into the shapes
//! the map, dashboard and analytics views consume: per-well and
//! network-wide summaries, nearby-well lookups and chart series.

/// Min/max/mean aggregation for single wells and the whole network.
pub mod summary {
    use chrono::NaiveDateTime;
    use gw_utils::dates::format_date;
    use gw_wells::{severity::Severity, stats::WellStats, well::Well};
    use serde::Serialize;
    use std::collections::BTreeMap;

    /// Average, minimum and maximum of a set of water levels.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct SeriesStatistics {
        pub average: f64,
        pub minimum: f64,
        pub maximum: f64,
    }

    impl SeriesStatistics {
        /// `None` for an empty set of levels.
        pub fn from_levels(levels: impl IntoIterator<Item = f64>) -> Option<Self> {
            let mut count = 0usize;
            let mut sum = 0.0;
            let mut minimum = f64::INFINITY;
            let mut maximum = f64::NEG_INFINITY;
            for level in levels {
                count += 1;
                sum += level;
                minimum = minimum.min(level);
                maximum = maximum.max(level);
            }
            if count == 0 {
                return None;
            }
            Some(SeriesStatistics {
                average: sum / count as f64,
                minimum,
                maximum,
            })
        }
    }

    /// One marker on the wells map.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct WellSummary {
        pub id: String,
        pub lat: f64,
        pub long: f64,
        pub count: usize,
        #[serde(flatten)]
        pub statistics: SeriesStatistics,
        pub earliest: NaiveDateTime,
        pub latest: NaiveDateTime,
        /// "YYYY-MM-DD to YYYY-MM-DD"
        pub date_range: String,
    }

    impl WellSummary {
        /// `None` for a well without readings.
        pub fn from_well(well: &Well) -> Option<Self> {
            let series = well.timeseries();
            let statistics = SeriesStatistics::from_levels(series.iter().map(|p| p.water_level))?;
            let earliest = series.first()?.date;
            let latest = series.last()?.date;
            Some(WellSummary {
                id: well.id.clone(),
                lat: well.lat,
                long: well.long,
                count: series.len(),
                statistics,
                earliest,
                latest,
                date_range: format!(
                    "{} to {}",
                    format_date(&earliest.date()),
                    format_date(&latest.date())
                ),
            })
        }
    }

    /// Summaries of every non-empty well, in well id order.
    pub fn summarize_wells(wells: &BTreeMap<String, Well>) -> Vec<WellSummary> {
        wells.values().filter_map(WellSummary::from_well).collect()
    }

    /// Totals across the whole monitoring network.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct NetworkSummary {
        pub total_records: usize,
        pub unique_wells: usize,
        pub earliest: Option<NaiveDateTime>,
        pub latest: Option<NaiveDateTime>,
        /// Mean over all readings, not over per-well means.
        pub average: Option<f64>,
    }

    impl NetworkSummary {
        pub fn from_wells(wells: &BTreeMap<String, Well>) -> Self {
            let points = || wells.values().flat_map(|w| w.timeseries().iter());
            let total_records = points().count();
            let average = SeriesStatistics::from_levels(points().map(|p| p.water_level))
                .map(|s| s.average);
            NetworkSummary {
                total_records,
                unique_wells: wells.values().filter(|w| !w.is_empty()).count(),
                earliest: points().map(|p| p.date).min(),
                latest: points().map(|p| p.date).max(),
                average,
            }
        }
    }

    /// Number of wells in each severity tier; every tier is present.
    pub fn severity_counts(stats: &BTreeMap<String, WellStats>) -> BTreeMap<Severity, usize> {
        let mut counts: BTreeMap<Severity, usize> = [Severity::Ok, Severity::Warning, Severity::Critical]
            .into_iter()
            .map(|s| (s, 0))
            .collect();
        for well_stats in stats.values() {
            *counts.entry(well_stats.severity).or_default() += 1;
        }
        counts
    }

}

/// Finding wells around a map position.
pub mod lookup {
    use crate::summary::SeriesStatistics;
    use gw_wells::{observation::TimePoint, well::Well};
    use serde::Serialize;
    use std::collections::BTreeMap;

    /// Half-width, in degrees, of the box searched around a position (~100 m).
    pub const DEFAULT_TOLERANCE: f64 = 0.001;

    /// Wells whose position lies within `tolerance` degrees of `(lat, lng)`
    /// on both axes, nearest first.
    pub fn wells_near<'a>(
        wells: &'a BTreeMap<String, Well>,
        lat: f64,
        lng: f64,
        tolerance: f64,
    ) -> Vec<&'a Well> {
        let distance = |w: &Well| (w.lat - lat).powi(2) + (w.long - lng).powi(2);
        let mut found: Vec<&Well> = wells
            .values()
            .filter(|w| (w.lat - lat).abs() <= tolerance && (w.long - lng).abs() <= tolerance)
            .collect();
        found.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
        found
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Location {
        pub lat: f64,
        pub lng: f64,
    }

    /// Everything known around one map position.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct WellDetails {
        pub location: Location,
        pub well_ids: Vec<String>,
        pub count: usize,
        pub timeseries: Vec<TimePoint>,
        pub statistics: SeriesStatistics,
    }

    /// Merge the readings of every well near `(lat, lng)` into one
    /// date-sorted series. `None` when nothing is in range.
    pub fn well_details(
        wells: &BTreeMap<String, Well>,
        lat: f64,
        lng: f64,
        tolerance: f64,
    ) -> Option<WellDetails> {
        let nearby = wells_near(wells, lat, lng, tolerance);
        let mut timeseries: Vec<TimePoint> = nearby
            .iter()
            .flat_map(|w| w.timeseries().iter().copied())
            .collect();
        timeseries.sort_by(|a, b| a.date.cmp(&b.date));
        let statistics = SeriesStatistics::from_levels(timeseries.iter().map(|p| p.water_level))?;
        log::debug!(
            "{} wells and {} readings near ({}, {})",
            nearby.len(),
            timeseries.len(),
            lat,
            lng
        );
        Some(WellDetails {
            location: Location { lat, lng },
            well_ids: nearby.iter().map(|w| w.id.clone()).collect(),
            count: timeseries.len(),
            timeseries,
            statistics,
        })
    }

}

/// Line-chart series combining observed readings with the forecast.
pub mod series {
    use gw_utils::dates::format_date;
    use gw_wells::{observation::TimePoint, stats::WellStats};
    use serde::Serialize;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct SeriesPoint {
        /// "YYYY-MM-DD"
        pub date: String,
        pub value: f64,
        pub forecast: bool,
    }

    impl SeriesPoint {
        fn from_point(point: &TimePoint, forecast: bool) -> Self {
            SeriesPoint {
                date: format_date(&point.date.date()),
                value: point.water_level,
                forecast,
            }
        }
    }

    /// Observed points in date order followed by the forecast points.
    pub fn chart_series(stats: &WellStats) -> Vec<SeriesPoint> {
        stats
            .timeseries
            .iter()
            .map(|p| SeriesPoint::from_point(p, false))
            .chain(stats.forecast.iter().map(|p| SeriesPoint::from_point(p, true)))
            .collect()
    }

}
