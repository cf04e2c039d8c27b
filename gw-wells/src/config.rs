//! Tunable parameters of the statistics engine.

use crate::{
    coordinate::DEFAULT_PRECISION,
    error::{Result, WellsError},
    severity::SeverityThresholds,
};
use serde::{Deserialize, Serialize};

/// Default number of yearly forecast points.
pub const DEFAULT_FORECAST_YEARS: usize = 5;

/// Default length, in years, of the baseline averaging window.
pub const DEFAULT_BASELINE_YEARS: f64 = 10.0;

/// Longest forecast, in years, that stays inside the supported calendar.
pub const MAX_FORECAST_YEARS: usize = 1000;

/// Largest coordinate precision that still survives `f64` scaling.
pub const MAX_PRECISION: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Number of yearly points projected past the last reading.
    pub forecast_years: usize,
    /// Window, counted back from the most recent reading, for the baseline average.
    pub baseline_years: f64,
    /// Decimal digits kept when bucketing coordinates into wells.
    pub coordinate_precision: u32,
    pub severity: SeverityThresholds,
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            forecast_years: DEFAULT_FORECAST_YEARS,
            baseline_years: DEFAULT_BASELINE_YEARS,
            coordinate_precision: DEFAULT_PRECISION,
            severity: SeverityThresholds::default(),
        }
    }
}

impl StatsConfig {
    /// Default configuration with a different forecast window.
    pub fn with_forecast_years(forecast_years: usize) -> Self {
        StatsConfig {
            forecast_years,
            ..StatsConfig::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.forecast_years > MAX_FORECAST_YEARS {
            return Err(WellsError::InvalidConfig(format!(
                "forecast_years must be at most {MAX_FORECAST_YEARS}, got {}",
                self.forecast_years
            )));
        }
        if !self.baseline_years.is_finite() || self.baseline_years < 0.0 {
            return Err(WellsError::InvalidConfig(format!(
                "baseline_years must be a non-negative number, got {}",
                self.baseline_years
            )));
        }
        if self.coordinate_precision > MAX_PRECISION {
            return Err(WellsError::InvalidConfig(format!(
                "coordinate_precision must be at most {MAX_PRECISION}, got {}",
                self.coordinate_precision
            )));
        }
        let s = &self.severity;
        let all_finite = [
            s.critical_pct_drop,
            s.critical_slope,
            s.warning_pct_drop,
            s.warning_slope,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(WellsError::InvalidConfig(
                "severity thresholds must be finite".to_string(),
            ));
        }
        if s.warning_pct_drop > s.critical_pct_drop {
            return Err(WellsError::InvalidConfig(format!(
                "warning_pct_drop ({}) exceeds critical_pct_drop ({})",
                s.warning_pct_drop, s.critical_pct_drop
            )));
        }
        if s.warning_slope < s.critical_slope {
            return Err(WellsError::InvalidConfig(format!(
                "warning_slope ({}) is below critical_slope ({})",
                s.warning_slope, s.critical_slope
            )));
        }
        Ok(())
    }
}
