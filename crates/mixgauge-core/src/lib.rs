//! # MixGauge Core
//!
//! The deterministic pipeline between a concrete mix form and a pre-trained
//! compressive-strength regressor.
//!
//! ```text
//! MixForm ──collect──► RawMixInput ──validate──► Vec<Warning>
//!                            │
//!                            └──derive──► FeatureRecord ──predict──► Strength (MPa)
//!                                                            ▲
//!                                                   &dyn Predictor (ModelSlot)
//! ```
//!
//! The crate performs no I/O apart from reading the model artifact in
//! [`ModelArtifact::load`]. Every per-request value is a fresh `Copy` type;
//! the only shared object is the read-only predictor, passed explicitly.

pub mod assessment;
pub mod error;
pub mod features;
pub mod input;
pub mod model;
pub mod predictor;
pub mod strength;
pub mod validation;

pub use assessment::{Assessment, Outcome, assess};
pub use error::{ModelLoadError, PredictionError};
pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureRecord, derive};
pub use input::{Adjustment, FieldSpec, MixField, MixForm, RawMixInput};
pub use model::{LoadedModel, ModelArtifact, ModelKind, ModelSlot};
pub use predictor::{Predictor, predict};
pub use strength::{Strength, StrengthClass};
pub use validation::{Severity, Warning, WarningCode, is_blocked, validate};
