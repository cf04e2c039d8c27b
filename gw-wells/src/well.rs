use crate::{
    coordinate::{make_well_id, round_coord, DEFAULT_PRECISION},
    observation::{RawObservation, TimePoint},
};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// A physical monitoring location and its reading history.
///
/// `id`, `lat` and `long` all come from the rounded coordinates. The time
/// series is private so that it can only grow through [`Well::insert`],
/// which keeps it sorted ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Well {
    pub id: String,
    pub lat: f64,
    pub long: f64,
    timeseries: Vec<TimePoint>,
}

impl Well {
    /// Create an empty well at the rounded position of `(lat, long)`.
    pub fn new(lat: f64, long: f64, precision: u32) -> Self {
        Well {
            id: make_well_id(lat, long, precision),
            lat: round_coord(lat, precision),
            long: round_coord(long, precision),
            timeseries: Vec::new(),
        }
    }

    /// Insert a reading, keeping the series sorted by date.
    ///
    /// A reading dated the same as existing ones goes after them, so equal
    /// dates keep their arrival order.
    pub fn insert(&mut self, point: TimePoint) {
        let index = self.timeseries.partition_point(|p| p.date <= point.date);
        self.timeseries.insert(index, point);
    }

    pub fn timeseries(&self) -> &[TimePoint] {
        &self.timeseries
    }

    pub fn len(&self) -> usize {
        self.timeseries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeseries.is_empty()
    }

    /// The most recent reading, if any.
    pub fn last_measurement(&self) -> Option<&TimePoint> {
        self.timeseries.last()
    }
}

/// Group raw rows into wells keyed by well id, at the default precision.
pub fn group_observations(rows: &[RawObservation]) -> BTreeMap<String, Well> {
    group_observations_with_precision(rows, DEFAULT_PRECISION)
}

/// Group raw rows into wells keyed by well id.
///
/// Rows with a missing field or an unparseable date are skipped. Readings
/// are appended in input order and each series is stable-sorted once at the
/// end, which gives the same result as inserting one by one.
pub fn group_observations_with_precision(
    rows: &[RawObservation],
    precision: u32,
) -> BTreeMap<String, Well> {
    let mut wells: BTreeMap<String, Well> = BTreeMap::new();
    let mut skipped = 0usize;
    for row in rows {
        let Some((date, lat, long, water_level)) = row.to_reading() else {
            skipped += 1;
            continue;
        };
        wells
            .entry(make_well_id(lat, long, precision))
            .or_insert_with(|| Well::new(lat, long, precision))
            .timeseries
            .push(TimePoint { date, water_level });
    }
    for well in wells.values_mut() {
        well.timeseries.sort_by(|a, b| a.date.cmp(&b.date));
    }
    debug!(
        "grouped {} rows into {} wells, skipped {} incomplete rows",
        rows.len() - skipped,
        wells.len(),
        skipped
    );
    wells
}
