use crate::error::Result;
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

/// A raw groundwater reading as delivered by the data source.
///
/// Every field is optional; rows missing any of them are dropped during
/// grouping. The date is kept as text and parsed at grouping time so that
/// an unparseable date is a silent skip rather than an input error.
///
/// Field aliases accept the column names of the national wells database
/// (`Date`, `LATITUDE`, `LONGITUDE`, `DTWL`). Numbers may arrive as JSON
/// numbers or numeric strings; anything else reads as missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(default, alias = "Date", deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(
        default,
        alias = "LATITUDE",
        alias = "latitude",
        deserialize_with = "lenient_f64"
    )]
    pub lat: Option<f64>,
    #[serde(
        default,
        alias = "LONGITUDE",
        alias = "longitude",
        alias = "lng",
        deserialize_with = "lenient_f64"
    )]
    pub long: Option<f64>,
    #[serde(
        default,
        rename = "waterLevel",
        alias = "DTWL",
        alias = "waterlevel",
        alias = "water_level",
        deserialize_with = "lenient_f64"
    )]
    pub water_level: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientValue {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientValue::deserialize(deserializer)? {
        LenientValue::Number(v) => Some(v),
        LenientValue::Text(s) => s.trim().parse().ok(),
        LenientValue::Other(_) => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientValue::deserialize(deserializer)? {
        LenientValue::Text(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// One cleaned reading in a well's time series.
///
/// `water_level` is depth to water level (DTWL): larger means deeper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub date: NaiveDateTime,
    pub water_level: f64,
}

/// CSV rows go through their own record type so that a blank or
/// non-numeric cell becomes a missing value instead of failing the file.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default, alias = "Date", deserialize_with = "csv::invalid_option")]
    date: Option<String>,
    #[serde(
        default,
        alias = "LATITUDE",
        alias = "latitude",
        deserialize_with = "csv::invalid_option"
    )]
    lat: Option<f64>,
    #[serde(
        default,
        alias = "LONGITUDE",
        alias = "longitude",
        alias = "lng",
        deserialize_with = "csv::invalid_option"
    )]
    long: Option<f64>,
    #[serde(
        default,
        rename = "waterLevel",
        alias = "DTWL",
        alias = "waterlevel",
        alias = "water_level",
        deserialize_with = "csv::invalid_option"
    )]
    water_level: Option<f64>,
}

impl From<CsvRow> for RawObservation {
    fn from(row: CsvRow) -> Self {
        RawObservation {
            date: row.date.filter(|d| !d.trim().is_empty()),
            lat: row.lat,
            long: row.long,
            water_level: row.water_level,
        }
    }
}

/// JSON input is either a bare array of rows or a wells API envelope
/// carrying the rows under `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonRows {
    Rows(Vec<RawObservation>),
    Envelope { data: Vec<RawObservation> },
}

impl RawObservation {
    pub fn new(date: &str, lat: f64, long: f64, water_level: f64) -> Self {
        RawObservation {
            date: Some(date.to_string()),
            lat: Some(lat),
            long: Some(long),
            water_level: Some(water_level),
        }
    }

    /// Parse a CSV body (with headers) into raw observations.
    ///
    /// Only structural CSV errors fail; bad cells become `None`.
    pub fn from_csv_str(body: &str) -> Result<Vec<RawObservation>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());
        let mut rows = Vec::new();
        for result in rdr.deserialize::<CsvRow>() {
            rows.push(result?.into());
        }
        Ok(rows)
    }

    /// Parse a JSON body into raw observations.
    pub fn from_json_str(body: &str) -> Result<Vec<RawObservation>> {
        let rows = match serde_json::from_str::<JsonRows>(body)? {
            JsonRows::Rows(rows) => rows,
            JsonRows::Envelope { data } => data,
        };
        Ok(rows)
    }

    /// Convert into `(timestamp, lat, long, water_level)` when every field is
    /// present, every number is finite and the date names a real calendar date.
    pub fn to_reading(&self) -> Option<(NaiveDateTime, f64, f64, f64)> {
        let date = gw_utils::dates::parse_timestamp(self.date.as_deref()?)?;
        let (lat, long, level) = (self.lat?, self.long?, self.water_level?);
        if !(lat.is_finite() && long.is_finite() && level.is_finite()) {
            return None;
        }
        Some((date, lat, long, level))
    }
}
