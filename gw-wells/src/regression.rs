use crate::{decimal_year::date_to_decimal_year, observation::TimePoint};
use serde::{Deserialize, Serialize};

/// An ordinary least squares line through (decimal year, water level).
///
/// `slope` is in water-level units per year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the line at a decimal year.
    pub fn value_at(&self, decimal_year: f64) -> f64 {
        self.slope * decimal_year + self.intercept
    }
}

/// Fit a straight line to a time series, with dates as decimal years.
///
/// Returns `None` for fewer than two points. When every point shares the
/// same x the slope is 0 and the intercept is the mean level. Plain
/// two-moment OLS: no weighting, no outlier rejection.
pub fn linear_regression(points: &[TimePoint]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }
    let xy: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (date_to_decimal_year(&p.date), p.water_level))
        .collect();
    let n = xy.len() as f64;
    let x_mean = xy.iter().map(|(x, _)| x).sum::<f64>() / n;
    let y_mean = xy.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (covariance, variance) = xy.iter().fold((0.0, 0.0), |(cov, var), (x, y)| {
        let dx = x - x_mean;
        (cov + dx * (y - y_mean), var + dx * dx)
    });

    if variance == 0.0 {
        return Some(LinearFit {
            slope: 0.0,
            intercept: y_mean,
        });
    }
    let slope = covariance / variance;
    Some(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}
