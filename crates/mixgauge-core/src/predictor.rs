//! # Predictor Contract
//!
//! The strength model is an external collaborator seen through one
//! operation. Implementations must not mutate internal state while
//! predicting: a single instance is shared read-only across sessions.

use crate::error::PredictionError;
use crate::features::FeatureRecord;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// A pre-trained regressor from features to compressive strength (MPa).
pub trait Predictor: Send + Sync {
    /// Predict the strength for one feature record.
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictionError>;
}

impl<F> Predictor for F
where
    F: Fn(&FeatureRecord) -> Result<f64, PredictionError> + Send + Sync,
{
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictionError> {
        self(record)
    }
}

/// Call the predictor once, if the record is admissible.
///
/// The predictor is invoked only when `Cement > 0` and `FineAggregate > 0`;
/// otherwise [`PredictionError::InvalidMix`] is returned without calling it.
/// A panic inside the predictor is contained and reported as
/// [`PredictionError::Predictor`]. A non-finite or negative output is
/// reported as [`PredictionError::Malformed`].
pub fn predict<P>(record: &FeatureRecord, predictor: &P) -> Result<f64, PredictionError>
where
    P: Predictor + ?Sized,
{
    if record.cement <= 0.0 {
        return Err(PredictionError::InvalidMix(
            "cement must be greater than zero".to_string(),
        ));
    }
    if record.fine_aggregate <= 0.0 {
        return Err(PredictionError::InvalidMix(
            "fine aggregate must be greater than zero".to_string(),
        ));
    }

    let value = catch_unwind(AssertUnwindSafe(|| predictor.predict(record)))
        .map_err(|payload| PredictionError::Predictor(panic_message(payload.as_ref())))??;

    if !value.is_finite() {
        return Err(PredictionError::Malformed(format!(
            "expected a finite strength, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(PredictionError::Malformed(format!(
            "compressive strength cannot be negative, got {value:.2} MPa"
        )));
    }
    Ok(value)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "predictor panicked".to_string()
    }
}

// =============================================================================
// TESTS
// =============================================================================
