//! Severity classification of a well's trend and decadal deviation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Percent drop at or above which a well is critical.
pub const CRITICAL_PCT_DROP: f64 = 20.0;
/// Trend slope (units per year) at or below which a well is critical.
pub const CRITICAL_SLOPE: f64 = -0.5;
/// Percent drop at or above which a well is at least a warning.
pub const WARNING_PCT_DROP: f64 = 10.0;
/// Trend slope (units per year) at or below which a well is at least a warning.
pub const WARNING_SLOPE: f64 = -0.1;

/// Severity tiers, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Ok => write!(f, "ok"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Tunable tier boundaries. Boundary values fall into the more severe tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityThresholds {
    pub critical_pct_drop: f64,
    pub critical_slope: f64,
    pub warning_pct_drop: f64,
    pub warning_slope: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        SeverityThresholds {
            critical_pct_drop: CRITICAL_PCT_DROP,
            critical_slope: CRITICAL_SLOPE,
            warning_pct_drop: WARNING_PCT_DROP,
            warning_slope: WARNING_SLOPE,
        }
    }
}

/// Classify a well from its trend slope and percent drop.
///
/// A missing slope counts as 0; a missing percent drop never triggers a tier.
pub fn classify_severity(
    slope: Option<f64>,
    pct_drop: Option<f64>,
    thresholds: &SeverityThresholds,
) -> Severity {
    let slope = slope.unwrap_or(0.0);
    let dropped_at_least = |limit: f64| pct_drop.is_some_and(|pct| pct >= limit);

    if dropped_at_least(thresholds.critical_pct_drop) || slope <= thresholds.critical_slope {
        Severity::Critical
    } else if dropped_at_least(thresholds.warning_pct_drop) || slope <= thresholds.warning_slope {
        Severity::Warning
    } else {
        Severity::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(slope: Option<f64>, pct_drop: Option<f64>) -> Severity {
        classify_severity(slope, pct_drop, &SeverityThresholds::default())
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Ok < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn test_absent_inputs_are_ok() {
        assert_eq!(classify(None, None), Severity::Ok);
        assert_eq!(classify(Some(0.0), Some(0.0)), Severity::Ok);
    }

    #[test]
    fn test_boundaries_favor_more_severe_tier() {
        assert_eq!(classify(None, Some(20.0)), Severity::Critical);
        assert_eq!(classify(Some(-0.5), None), Severity::Critical);
        assert_eq!(classify(None, Some(10.0)), Severity::Warning);
        assert_eq!(classify(Some(-0.1), None), Severity::Warning);
        assert_eq!(classify(Some(-0.099), Some(9.99)), Severity::Ok);
    }

    #[test]
    fn test_either_condition_triggers() {
        assert_eq!(classify(Some(1.0), Some(25.0)), Severity::Critical);
        assert_eq!(classify(Some(-2.0), Some(-50.0)), Severity::Critical);
        assert_eq!(classify(Some(-0.2), Some(0.0)), Severity::Warning);
        assert_eq!(classify(Some(0.3), Some(12.0)), Severity::Warning);
    }

    #[test]
    fn test_monotone_in_pct_drop() {
        for slope in [-1.0, -0.3, -0.1, 0.0, 0.4] {
            let mut previous = Severity::Ok;
            for step in -40..=60 {
                let severity = classify(Some(slope), Some(step as f64 * 0.5));
                assert!(severity >= previous, "slope {slope}, step {step}");
                previous = severity;
            }
        }
    }

    #[test]
    fn test_monotone_in_slope() {
        for pct in [-5.0, 0.0, 10.0, 15.0, 30.0] {
            let mut previous = Severity::Ok;
            for step in (-100..=40).rev() {
                let severity = classify(Some(step as f64 * 0.01), Some(pct));
                assert!(severity >= previous, "pct {pct}, step {step}");
                previous = severity;
            }
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = SeverityThresholds {
            critical_pct_drop: 5.0,
            critical_slope: -0.05,
            warning_pct_drop: 1.0,
            warning_slope: -0.01,
        };
        assert_eq!(classify_severity(Some(-0.06), None, &strict), Severity::Critical);
        assert_eq!(classify_severity(None, Some(2.0), &strict), Severity::Warning);
        assert_eq!(classify_severity(Some(0.0), Some(0.5), &strict), Severity::Ok);
    }

    #[test]
    fn test_display_and_serde_names() {
        assert_eq!(Severity::Critical.to_string(), "critical");
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
    }
}
