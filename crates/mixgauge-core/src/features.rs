//! # Feature Derivation
//!
//! Maps a [`RawMixInput`] to the twelve named features the strength model
//! was trained on. Key names and order are part of the model contract and
//! must match the artifact's `feature_names` exactly.

use crate::input::RawMixInput;
use serde::{Deserialize, Serialize};

/// Number of model input features.
pub const FEATURE_COUNT: usize = 12;

/// Model feature names, in training order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Cement",
    "BlastFurnaceSlag",
    "FlyAsh",
    "Water",
    "Superplasticizer",
    "CoarseAggregate",
    "FineAggregate",
    "Age",
    "Water_Cement",
    "Coarse_Fine",
    "Age_Cement",
    "Age_log",
];

/// The model input for one mix.
///
/// Field order matches [`FEATURE_NAMES`]; serde uses the model's key names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(rename = "Cement")]
    pub cement: f64,
    #[serde(rename = "BlastFurnaceSlag")]
    pub blast_furnace_slag: f64,
    #[serde(rename = "FlyAsh")]
    pub fly_ash: f64,
    #[serde(rename = "Water")]
    pub water: f64,
    #[serde(rename = "Superplasticizer")]
    pub superplasticizer: f64,
    #[serde(rename = "CoarseAggregate")]
    pub coarse_aggregate: f64,
    #[serde(rename = "FineAggregate")]
    pub fine_aggregate: f64,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Water_Cement")]
    pub water_cement: f64,
    #[serde(rename = "Coarse_Fine")]
    pub coarse_fine: f64,
    #[serde(rename = "Age_Cement")]
    pub age_cement: f64,
    #[serde(rename = "Age_log")]
    pub age_log: f64,
}

impl FeatureRecord {
    /// The record as a dense vector in [`FEATURE_NAMES`] order.
    #[must_use]
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.cement,
            self.blast_furnace_slag,
            self.fly_ash,
            self.water,
            self.superplasticizer,
            self.coarse_aggregate,
            self.fine_aggregate,
            self.age,
            self.water_cement,
            self.coarse_fine,
            self.age_cement,
            self.age_log,
        ]
    }

    /// `(name, value)` pairs in model order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_vector())
    }

    /// Look up a feature by its model name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}

/// Ratio with a zero guard: `0` whenever the denominator is not positive.
fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Derive the twelve model features from a bounded mix.
///
/// Pure and total: a non-positive cement or fine aggregate yields `0` for the
/// ratios that divide by it.
#[must_use]
pub fn derive(raw: &RawMixInput) -> FeatureRecord {
    let age = f64::from(raw.age);
    FeatureRecord {
        cement: raw.cement,
        blast_furnace_slag: raw.blast_furnace_slag,
        fly_ash: raw.fly_ash,
        water: raw.water,
        superplasticizer: raw.superplasticizer,
        coarse_aggregate: raw.coarse_aggregate,
        fine_aggregate: raw.fine_aggregate,
        age,
        water_cement: guarded_ratio(raw.water, raw.cement),
        coarse_fine: guarded_ratio(raw.coarse_aggregate, raw.fine_aggregate),
        age_cement: guarded_ratio(age, raw.cement),
        age_log: age.ln_1p(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-4;

    fn reference_mix() -> RawMixInput {
        RawMixInput::new(300.0, 0.0, 0.0, 180.0, 10.0, 970.0, 780.0, 28)
    }

    #[test]
    fn reference_mix_features() {
        let record = derive(&reference_mix());

        assert_eq!(record.water_cement, 180.0 / 300.0);
        assert!((record.water_cement - 0.6).abs() < 1e-12);
        assert!((record.coarse_fine - 1.2436).abs() < EPS);
        assert!((record.age_cement - 0.0933).abs() < EPS);
        assert!((record.age_log - 3.3673).abs() < EPS);
        assert!((record.age_log - 29.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn raw_fields_are_copied_verbatim() {
        let raw = RawMixInput::new(212.5, 40.0, 60.0, 170.0, 6.2, 1010.0, 690.0, 56);
        let record = derive(&raw);

        assert_eq!(record.cement, 212.5);
        assert_eq!(record.blast_furnace_slag, 40.0);
        assert_eq!(record.fly_ash, 60.0);
        assert_eq!(record.water, 170.0);
        assert_eq!(record.superplasticizer, 6.2);
        assert_eq!(record.coarse_aggregate, 1010.0);
        assert_eq!(record.fine_aggregate, 690.0);
        assert_eq!(record.age, 56.0);
    }

    #[test]
    fn zero_cement_zeroes_cement_ratios() {
        let raw = RawMixInput::new(0.0, 0.0, 0.0, 180.0, 10.0, 970.0, 780.0, 28);
        let record = derive(&raw);

        assert_eq!(record.water_cement, 0.0);
        assert_eq!(record.age_cement, 0.0);
        assert!(record.coarse_fine > 0.0);
    }

    #[test]
    fn zero_fine_aggregate_zeroes_coarse_fine() {
        let raw = RawMixInput::new(300.0, 0.0, 0.0, 180.0, 10.0, 970.0, 0.0, 28);
        assert_eq!(derive(&raw).coarse_fine, 0.0);
    }

    #[test]
    fn vector_follows_feature_names() {
        let record = derive(&reference_mix());
        let vector = record.to_vector();

        assert_eq!(vector[0], record.cement);
        assert_eq!(vector[8], record.water_cement);
        assert_eq!(vector[11], record.age_log);
        assert_eq!(record.get("Coarse_Fine"), Some(record.coarse_fine));
        assert_eq!(record.get("Slump"), None);
    }

    #[test]
    fn serde_keys_match_model_names_in_order() {
        let keys: Vec<String> = serde_json::to_value(derive(&reference_mix()))
            .ok()
            .and_then(|json| json.as_object().map(|o| o.keys().cloned().collect()))
            .unwrap_or_default();
        assert_eq!(keys, FEATURE_NAMES);
    }

    #[test]
    fn derive_is_bit_identical_across_calls() {
        let raw = RawMixInput::new(123.4, 5.6, 7.8, 190.1, 2.3, 999.9, 654.3, 7);
        let a = derive(&raw).to_vector().map(f64::to_bits);
        let b = derive(&raw).to_vector().map(f64::to_bits);
        assert_eq!(a, b);
    }
}
