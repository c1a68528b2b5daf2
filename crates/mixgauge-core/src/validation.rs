//! # Validation
//!
//! Classifies physically implausible mixes. Validation never fails: it only
//! returns warnings, and the caller decides whether a blocking warning
//! suppresses the prediction.

use crate::input::RawMixInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Water/cement ratio above which a mix is flagged as unusual.
pub const MAX_WATER_CEMENT_RATIO: f64 = 1.0;

/// How a warning affects the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Displayed, prediction still runs.
    Advisory,
    /// Prediction is not attempted.
    Blocking,
}

/// Stable identifier of a warning, for clients that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    CementNotPositive,
    HighWaterCementRatio,
}

/// A validation finding about a mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub code: WarningCode,
    pub severity: Severity,
    pub message: String,
    /// The offending water/cement ratio, for [`WarningCode::HighWaterCementRatio`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
}

impl Warning {
    fn cement_not_positive() -> Self {
        Self {
            code: WarningCode::CementNotPositive,
            severity: Severity::Blocking,
            message: "Cement must be greater than zero".to_string(),
            ratio: None,
        }
    }

    fn high_water_cement_ratio(ratio: f64) -> Self {
        Self {
            code: WarningCode::HighWaterCementRatio,
            severity: Severity::Advisory,
            message: "Water-cement ratio unusually high".to_string(),
            ratio: Some(ratio),
        }
    }

    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Blocking
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ratio {
            Some(ratio) => write!(
                f,
                "{} ({:.2} > {:.1}). Check mix design!",
                self.message, ratio, MAX_WATER_CEMENT_RATIO
            ),
            None => f.write_str(&self.message),
        }
    }
}

/// Check a mix for implausible combinations.
///
/// - cement ≤ 0 is blocking;
/// - `water / max(cement, 1) > 1.0` is advisory.
///
/// Both checks are independent and may fire together.
#[must_use]
pub fn validate(raw: &RawMixInput) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if raw.cement <= 0.0 {
        warnings.push(Warning::cement_not_positive());
    }

    let ratio = raw.water / raw.cement.max(1.0);
    if ratio > MAX_WATER_CEMENT_RATIO {
        warnings.push(Warning::high_water_cement_ratio(ratio));
    }

    warnings
}

/// True if any warning prevents the prediction call.
#[must_use]
pub fn is_blocked(warnings: &[Warning]) -> bool {
    warnings.iter().any(Warning::is_blocking)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mix(cement: f64, water: f64) -> RawMixInput {
        RawMixInput::new(cement, 0.0, 0.0, water, 10.0, 970.0, 780.0, 28)
    }

    #[test]
    fn reference_mix_has_no_warnings() {
        assert!(validate(&mix(300.0, 180.0)).is_empty());
    }

    #[test]
    fn zero_cement_is_blocking() {
        let warnings = validate(&mix(0.0, 0.5));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::CementNotPositive);
        assert_eq!(warnings[0].message, "Cement must be greater than zero");
        assert!(is_blocked(&warnings));
    }

    #[test]
    fn high_ratio_is_advisory() {
        let warnings = validate(&mix(100.0, 150.0));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::HighWaterCementRatio);
        assert_eq!(warnings[0].severity, Severity::Advisory);
        assert_eq!(warnings[0].ratio, Some(1.5));
        assert!(!is_blocked(&warnings));
    }

    #[test]
    fn zero_cement_and_water_trigger_both() {
        // water / max(0, 1) = 180 > 1
        let warnings = validate(&mix(0.0, 180.0));
        let codes: Vec<_> = warnings.iter().map(|w| w.code).collect();
        assert_eq!(
            codes,
            vec![WarningCode::CementNotPositive, WarningCode::HighWaterCementRatio]
        );
        assert!(is_blocked(&warnings));
    }

    #[test]
    fn ratio_of_exactly_one_is_accepted() {
        assert!(validate(&mix(200.0, 200.0)).is_empty());
    }

    #[test]
    fn ratio_display_includes_value() {
        let warnings = validate(&mix(100.0, 150.0));
        assert_eq!(
            warnings[0].to_string(),
            "Water-cement ratio unusually high (1.50 > 1.0). Check mix design!"
        );
    }
}
