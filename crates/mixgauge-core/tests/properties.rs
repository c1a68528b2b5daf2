//! Property tests for the collector and feature derivation.

#![allow(clippy::unwrap_used, clippy::panic)]

use mixgauge_core::{
    FEATURE_NAMES, MixField, MixForm, RawMixInput, Severity, derive, is_blocked, validate,
};
use proptest::prelude::*;

/// Any mix the collector can produce.
fn bounded_mix() -> impl Strategy<Value = RawMixInput> {
    (
        0.0..=700.0f64,
        0.0..=400.0f64,
        0.0..=250.0f64,
        0.0..=300.0f64,
        0.0..=50.0f64,
        0.0..=1200.0f64,
        0.0..=1000.0f64,
        1u32..=365,
    )
        .prop_map(|(c, s, f, w, sp, ca, fa, age)| RawMixInput::new(c, s, f, w, sp, ca, fa, age))
}

/// Arbitrary (possibly absurd) form submissions.
fn any_form() -> impl Strategy<Value = MixForm> {
    proptest::collection::vec(proptest::option::of(any::<f64>()), 8).prop_map(|values| {
        let mut form = MixForm::default();
        for (field, value) in MixField::ALL.into_iter().zip(values) {
            form.set(field, value);
        }
        form
    })
}

proptest! {
    #[test]
    fn derive_is_total_and_finite(raw in bounded_mix()) {
        let record = derive(&raw);
        for (name, value) in record.iter() {
            prop_assert!(value.is_finite(), "{} = {}", name, value);
        }
        prop_assert_eq!(record.iter().count(), FEATURE_NAMES.len());
    }

    #[test]
    fn derive_is_deterministic(raw in bounded_mix()) {
        let a = derive(&raw).to_vector().map(f64::to_bits);
        let b = derive(&raw).to_vector().map(f64::to_bits);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn derived_ratios_follow_formulas(raw in bounded_mix()) {
        let record = derive(&raw);
        let age = f64::from(raw.age);

        if raw.cement > 0.0 {
            prop_assert_eq!(record.water_cement, raw.water / raw.cement);
            prop_assert_eq!(record.age_cement, age / raw.cement);
        } else {
            prop_assert_eq!(record.water_cement, 0.0);
            prop_assert_eq!(record.age_cement, 0.0);
        }
        if raw.fine_aggregate > 0.0 {
            prop_assert_eq!(record.coarse_fine, raw.coarse_aggregate / raw.fine_aggregate);
        } else {
            prop_assert_eq!(record.coarse_fine, 0.0);
        }
        prop_assert_eq!(record.age_log, age.ln_1p());
    }

    #[test]
    fn collector_output_respects_every_bound(form in any_form()) {
        let raw = form.collect();
        for field in MixField::ALL {
            let spec = field.spec();
            let value = raw.get(field);
            prop_assert!(value.is_finite());
            prop_assert!(value >= spec.min && value <= spec.max, "{} = {}", field, value);
        }
    }

    #[test]
    fn blocking_iff_cement_not_positive(raw in bounded_mix()) {
        let warnings = validate(&raw);
        prop_assert_eq!(is_blocked(&warnings), raw.cement <= 0.0);
        let advisory = warnings.iter().any(|w| w.severity == Severity::Advisory);
        prop_assert_eq!(advisory, raw.water / raw.cement.max(1.0) > 1.0);
    }
}
