//! # Input Collector
//!
//! The eight bounded mix fields and the boundary that turns a user-submitted
//! form into a [`RawMixInput`].
//!
//! Out-of-range numbers never reach derivation: every value passes through
//! [`FieldSpec::resolve`], which substitutes the default for missing or
//! non-finite values, rounds integer fields and clamps into `[min, max]`.
//! A changed value is reported as an [`Adjustment`], never as an error.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// FIELD TABLE
// =============================================================================

/// One of the eight user-facing mix parameters, in model order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixField {
    Cement,
    BlastFurnaceSlag,
    FlyAsh,
    Water,
    Superplasticizer,
    CoarseAggregate,
    FineAggregate,
    Age,
}

impl MixField {
    /// All fields in form (and model) order.
    pub const ALL: [MixField; 8] = [
        MixField::Cement,
        MixField::BlastFurnaceSlag,
        MixField::FlyAsh,
        MixField::Water,
        MixField::Superplasticizer,
        MixField::CoarseAggregate,
        MixField::FineAggregate,
        MixField::Age,
    ];

    /// The declared bounds, default and step for this field.
    #[must_use]
    pub const fn spec(self) -> FieldSpec {
        match self {
            MixField::Cement => FieldSpec::mass(self, "cement", "Cement", 700.0, 300.0, 1.0),
            MixField::BlastFurnaceSlag => FieldSpec::mass(
                self,
                "blast_furnace_slag",
                "Blast Furnace Slag",
                400.0,
                0.0,
                1.0,
            ),
            MixField::FlyAsh => FieldSpec::mass(self, "fly_ash", "Fly Ash", 250.0, 0.0, 1.0),
            MixField::Water => FieldSpec::mass(self, "water", "Water", 300.0, 180.0, 1.0),
            MixField::Superplasticizer => FieldSpec::mass(
                self,
                "superplasticizer",
                "Superplasticizer",
                50.0,
                10.0,
                0.1,
            ),
            MixField::CoarseAggregate => FieldSpec::mass(
                self,
                "coarse_aggregate",
                "Coarse Aggregate",
                1200.0,
                970.0,
                1.0,
            ),
            MixField::FineAggregate => FieldSpec::mass(
                self,
                "fine_aggregate",
                "Fine Aggregate",
                1000.0,
                780.0,
                1.0,
            ),
            MixField::Age => FieldSpec {
                field: self,
                key: "age",
                label: "Age",
                unit: "days",
                min: 1.0,
                max: 365.0,
                default: 28.0,
                step: 1.0,
                integer: true,
            },
        }
    }

    /// Stable snake_case key used in forms, JSON and CLI flags.
    #[must_use]
    pub const fn key(self) -> &'static str {
        self.spec().key
    }

    /// Look up a field by its snake_case key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for MixField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().label)
    }
}

/// Declared bounds of a single input field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub field: MixField,
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
    /// Whole numbers only (age in days).
    pub integer: bool,
}

impl FieldSpec {
    const fn mass(
        field: MixField,
        key: &'static str,
        label: &'static str,
        max: f64,
        default: f64,
        step: f64,
    ) -> Self {
        Self {
            field,
            key,
            label,
            unit: "kg/m³",
            min: 0.0,
            max,
            default,
            step,
            integer: false,
        }
    }

    /// Resolve a submitted value into a bounded one.
    ///
    /// Returns the value to use and, if it differs from what was submitted,
    /// the reason it was changed. A missing value silently takes the default.
    #[must_use]
    pub fn resolve(&self, submitted: Option<f64>) -> (f64, Option<AdjustmentReason>) {
        let Some(raw) = submitted else {
            return (self.default, None);
        };
        if !raw.is_finite() {
            return (self.default, Some(AdjustmentReason::NotFinite));
        }

        let rounded = if self.integer { raw.round() } else { raw };
        let clamped = rounded.clamp(self.min, self.max);

        let reason = if clamped != rounded {
            Some(AdjustmentReason::Clamped)
        } else if rounded != raw {
            Some(AdjustmentReason::Rounded)
        } else {
            None
        };
        (clamped, reason)
    }

    /// Human-readable label with unit, e.g. `Cement (kg/m³)`.
    #[must_use]
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.label, self.unit)
    }
}

// =============================================================================
// ADJUSTMENTS (InputOutOfRange)
// =============================================================================

/// Why the collector changed a submitted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    /// Outside `[min, max]`; pulled to the nearest bound.
    Clamped,
    /// Fractional value for a whole-number field.
    Rounded,
    /// NaN or infinite; replaced by the default.
    NotFinite,
}

/// A submitted value the collector had to change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Adjustment {
    pub field: MixField,
    /// `None` when the submitted value had no JSON representation (NaN/∞).
    pub submitted: Option<f64>,
    pub applied: f64,
    pub reason: AdjustmentReason,
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = self.field.spec();
        match self.reason {
            AdjustmentReason::Clamped => write!(
                f,
                "{} limited to {} (allowed range {}..={} {})",
                spec.label, self.applied, spec.min, spec.max, spec.unit
            ),
            AdjustmentReason::Rounded => {
                write!(f, "{} rounded to {} {}", spec.label, self.applied, spec.unit)
            }
            AdjustmentReason::NotFinite => write!(
                f,
                "{} was not a number; using default {} {}",
                spec.label, self.applied, spec.unit
            ),
        }
    }
}

// =============================================================================
// RAW MIX INPUT
// =============================================================================

/// The eight bounded mix parameters of one user action.
///
/// Masses are kg/m³, age is whole days. Built fresh per action and never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawMixInput {
    pub cement: f64,
    pub blast_furnace_slag: f64,
    pub fly_ash: f64,
    pub water: f64,
    pub superplasticizer: f64,
    pub coarse_aggregate: f64,
    pub fine_aggregate: f64,
    pub age: u32,
}

impl RawMixInput {
    /// Create an input from the eight values in form order.
    #[must_use]
    pub const fn new(
        cement: f64,
        blast_furnace_slag: f64,
        fly_ash: f64,
        water: f64,
        superplasticizer: f64,
        coarse_aggregate: f64,
        fine_aggregate: f64,
        age: u32,
    ) -> Self {
        Self {
            cement,
            blast_furnace_slag,
            fly_ash,
            water,
            superplasticizer,
            coarse_aggregate,
            fine_aggregate,
            age,
        }
    }

    /// Value of a single field as `f64`.
    #[must_use]
    pub fn get(&self, field: MixField) -> f64 {
        match field {
            MixField::Cement => self.cement,
            MixField::BlastFurnaceSlag => self.blast_furnace_slag,
            MixField::FlyAsh => self.fly_ash,
            MixField::Water => self.water,
            MixField::Superplasticizer => self.superplasticizer,
            MixField::CoarseAggregate => self.coarse_aggregate,
            MixField::FineAggregate => self.fine_aggregate,
            MixField::Age => f64::from(self.age),
        }
    }

    /// True when the mix satisfies the preconditions of a prediction request.
    #[must_use]
    pub fn is_predictable(&self) -> bool {
        self.cement > 0.0 && self.fine_aggregate > 0.0
    }
}

impl Default for RawMixInput {
    /// The form defaults: a plain 300 kg cement mix at 28 days.
    fn default() -> Self {
        MixForm::default().collect()
    }
}

// =============================================================================
// MIX FORM
// =============================================================================

/// A form submission before the collector has applied bounds.
///
/// Every field is optional; missing fields take their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixForm {
    pub cement: Option<f64>,
    pub blast_furnace_slag: Option<f64>,
    pub fly_ash: Option<f64>,
    pub water: Option<f64>,
    pub superplasticizer: Option<f64>,
    pub coarse_aggregate: Option<f64>,
    pub fine_aggregate: Option<f64>,
    pub age: Option<f64>,
}

impl MixForm {
    /// The submitted (unbounded) value for a field.
    #[must_use]
    pub fn get(&self, field: MixField) -> Option<f64> {
        match field {
            MixField::Cement => self.cement,
            MixField::BlastFurnaceSlag => self.blast_furnace_slag,
            MixField::FlyAsh => self.fly_ash,
            MixField::Water => self.water,
            MixField::Superplasticizer => self.superplasticizer,
            MixField::CoarseAggregate => self.coarse_aggregate,
            MixField::FineAggregate => self.fine_aggregate,
            MixField::Age => self.age,
        }
    }

    /// Set the submitted value for a field.
    pub fn set(&mut self, field: MixField, value: Option<f64>) {
        let slot = match field {
            MixField::Cement => &mut self.cement,
            MixField::BlastFurnaceSlag => &mut self.blast_furnace_slag,
            MixField::FlyAsh => &mut self.fly_ash,
            MixField::Water => &mut self.water,
            MixField::Superplasticizer => &mut self.superplasticizer,
            MixField::CoarseAggregate => &mut self.coarse_aggregate,
            MixField::FineAggregate => &mut self.fine_aggregate,
            MixField::Age => &mut self.age,
        };
        *slot = value;
    }

    /// Builder-style [`MixForm::set`].
    #[must_use]
    pub fn with(mut self, field: MixField, value: f64) -> Self {
        self.set(field, Some(value));
        self
    }

    /// The bounded value of one field: default, rounded and clamped as needed.
    #[must_use]
    pub fn bounded(&self, field: MixField) -> f64 {
        field.spec().resolve(self.get(field)).0
    }

    /// Apply the field bounds and produce the input for derivation.
    #[must_use]
    pub fn collect(&self) -> RawMixInput {
        RawMixInput {
            cement: self.bounded(MixField::Cement),
            blast_furnace_slag: self.bounded(MixField::BlastFurnaceSlag),
            fly_ash: self.bounded(MixField::FlyAsh),
            water: self.bounded(MixField::Water),
            superplasticizer: self.bounded(MixField::Superplasticizer),
            coarse_aggregate: self.bounded(MixField::CoarseAggregate),
            fine_aggregate: self.bounded(MixField::FineAggregate),
            // Rounded and clamped to 1..=365 by the field spec.
            age: self.bounded(MixField::Age) as u32,
        }
    }

    /// The fields whose submitted value [`MixForm::collect`] changes.
    #[must_use]
    pub fn adjustments(&self) -> Vec<Adjustment> {
        MixField::ALL
            .into_iter()
            .filter_map(|field| {
                let submitted = self.get(field);
                let (applied, reason) = field.spec().resolve(submitted);
                reason.map(|reason| Adjustment {
                    field,
                    submitted: submitted.filter(|v| v.is_finite()),
                    applied,
                    reason,
                })
            })
            .collect()
    }
}

impl From<RawMixInput> for MixForm {
    fn from(raw: RawMixInput) -> Self {
        let mut form = MixForm::default();
        for field in MixField::ALL {
            form.set(field, Some(raw.get(field)));
        }
        form
    }
}

// =============================================================================
// TESTS
// =============================================================================
