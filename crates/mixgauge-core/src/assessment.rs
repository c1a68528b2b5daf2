//! # Assessment
//!
//! One complete user action: collect → validate → derive → predict.
//!
//! The cycle keeps no state. Each call builds its own input and feature
//! record, calls the predictor at most once, and returns everything the
//! surface needs to display.

use crate::error::PredictionError;
use crate::features::{FeatureRecord, derive};
use crate::input::{Adjustment, MixForm, RawMixInput};
use crate::predictor::{Predictor, predict};
use crate::strength::Strength;
use crate::validation::{Warning, is_blocked, validate};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// What happened to the prediction request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The predictor returned a strength.
    Predicted(Strength),
    /// A blocking warning suppressed the call.
    Blocked,
    /// The call was attempted (or the predictor is unavailable) and failed.
    Failed(PredictionError),
}

impl Outcome {
    #[must_use]
    pub fn strength(&self) -> Option<Strength> {
        match self {
            Outcome::Predicted(strength) => Some(*strength),
            Outcome::Blocked | Outcome::Failed(_) => None,
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Predicted(strength) => {
                let mut s = serializer.serialize_struct("Outcome", 4)?;
                s.serialize_field("status", "predicted")?;
                s.serialize_field("strength_mpa", &strength.mpa)?;
                s.serialize_field("display", &strength.to_string())?;
                s.serialize_field("class", &strength.class())?;
                s.end()
            }
            Outcome::Blocked => {
                let mut s = serializer.serialize_struct("Outcome", 1)?;
                s.serialize_field("status", "blocked")?;
                s.end()
            }
            Outcome::Failed(err) => {
                let mut s = serializer.serialize_struct("Outcome", 3)?;
                s.serialize_field("status", "error")?;
                s.serialize_field("kind", err.kind())?;
                s.serialize_field("message", &err.to_string())?;
                s.end()
            }
        }
    }
}

/// Everything produced by one prediction trigger.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Assessment {
    pub input: RawMixInput,
    /// Values the collector had to change (empty when built from a raw input).
    pub adjustments: Vec<Adjustment>,
    pub features: FeatureRecord,
    pub warnings: Vec<Warning>,
    pub outcome: Outcome,
}

/// Assess a bounded mix against the given predictor.
///
/// The predictor is skipped when validation produces a blocking warning;
/// otherwise it is called exactly once.
pub fn assess<P>(raw: RawMixInput, predictor: &P) -> Assessment
where
    P: Predictor + ?Sized,
{
    let warnings = validate(&raw);
    let features = derive(&raw);

    let outcome = if is_blocked(&warnings) {
        Outcome::Blocked
    } else {
        match predict(&features, predictor) {
            Ok(mpa) => Outcome::Predicted(Strength::new(mpa)),
            Err(err) => Outcome::Failed(err),
        }
    };

    Assessment {
        input: raw,
        adjustments: Vec::new(),
        features,
        warnings,
        outcome,
    }
}

impl Assessment {
    /// Collect a submitted form and assess the result.
    pub fn from_form<P>(form: &MixForm, predictor: &P) -> Self
    where
        P: Predictor + ?Sized,
    {
        let mut assessment = assess(form.collect(), predictor);
        assessment.adjustments = form.adjustments();
        assessment
    }

    /// The single line shown in the output area.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.outcome {
            Outcome::Predicted(strength) => format!("Predicted Strength: {strength}"),
            Outcome::Blocked => {
                let reasons: Vec<&str> = self
                    .warnings
                    .iter()
                    .filter(|w| w.is_blocking())
                    .map(|w| w.message.as_str())
                    .collect();
                format!("Prediction blocked: {}", reasons.join("; "))
            }
            Outcome::Failed(err) => format!("Prediction failed: {err}"),
        }
    }

    /// Plain-text report for terminals.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("┌─────────────────────────────────────┐\n");
        output.push_str("│ FEATURES                            │\n");
        for (name, value) in self.features.iter() {
            output.push_str(&format!("│ {:<18} {:>16.4}\n", name, value));
        }

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ WARNINGS                            │\n");
        if self.adjustments.is_empty() && self.warnings.is_empty() {
            output.push_str("│ - (none)                            │\n");
        } else {
            for adjustment in &self.adjustments {
                output.push_str(&format!("│ - {}\n", adjustment));
            }
            for warning in &self.warnings {
                let tag = if warning.is_blocking() { "ERROR" } else { "WARN" };
                output.push_str(&format!("│ - [{}] {}\n", tag, warning));
            }
        }

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ RESULT                              │\n");
        output.push_str(&format!("│ {}\n", self.message()));
        if let Some(strength) = self.outcome.strength() {
            output.push_str(&format!("│ Strength class: {}\n", strength.class()));
        }
        output.push_str("└─────────────────────────────────────┘\n");

        output
    }
}

// =============================================================================
// TESTS
// =============================================================================
