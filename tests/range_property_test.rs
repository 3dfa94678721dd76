//! Property tests for the inclusive range keyword.

use addendum::{CustomKeyword, RangeKeyword, SchemaLoader};
use proptest::prelude::*;
use serde_json::{json, Value};
use stillwater::Validation;

proptest! {
    #[test]
    fn values_inside_bounds_pass(
        min in -1_000i64..1_000,
        span in 0i64..1_000,
        offset in 0i64..1_000,
    ) {
        let max = min + span;
        let value = min + offset % (span + 1);

        let result = RangeKeyword::new().check_value(&json!([min, max]), &json!(value));

        prop_assert!(result.is_ok());
    }

    #[test]
    fn values_outside_bounds_report_bounds(
        min in -1_000i64..1_000,
        span in 0i64..1_000,
        gap in 1i64..1_000,
        above in any::<bool>(),
    ) {
        let max = min + span;
        let value = if above { max + gap } else { min - gap };

        let error = RangeKeyword::new()
            .check_value(&json!([min, max]), &json!(value))
            .unwrap_err();

        let declared_min = json!(min);
        let declared_max = json!(max);
        prop_assert_eq!(error.details.len(), 2);
        prop_assert_eq!(error.details.get("min"), Some(&declared_min));
        prop_assert_eq!(error.details.get("max"), Some(&declared_max));
    }

    #[test]
    fn bounds_are_inclusive(min in -1_000i64..1_000, span in 0i64..1_000) {
        let max = min + span;
        let keyword = RangeKeyword::new();

        prop_assert!(keyword.check_value(&json!([min, max]), &json!(min)).is_ok());
        prop_assert!(keyword.check_value(&json!([min, max]), &json!(max)).is_ok());
    }

    #[test]
    fn fractions_below_f64_precision_still_count(
        min in 0i64..1_000,
        span in 0i64..1_000,
        zeros in 16usize..40,
    ) {
        let max = min + span;
        let keyword = RangeKeyword::new();
        let fraction = format!("{}1", "0".repeat(zeros));
        let past_max: Value = serde_json::from_str(&format!("{max}.{fraction}")).unwrap();
        let at_max: Value = serde_json::from_str(&format!("{max}.{}", "0".repeat(zeros))).unwrap();

        prop_assert!(keyword.check_value(&json!([min, max]), &past_max).is_err());
        prop_assert!(keyword.check_value(&json!([min, max]), &at_max).is_ok());
    }

    #[test]
    fn each_violated_property_counts_once(a in -50i64..50, b in -50i64..50) {
        let loader = SchemaLoader::new();
        loader.register(RangeKeyword::new()).unwrap();
        let schema = loader
            .compile(&json!({
                "properties": {
                    "a": {"range": [0, 10]},
                    "b": {"range": [0, 10]}
                }
            }))
            .unwrap();

        let expected = usize::from(!(0..=10).contains(&a)) + usize::from(!(0..=10).contains(&b));
        let actual = match schema.validate(&json!({"a": a, "b": b})) {
            Validation::Success(_) => 0,
            Validation::Failure(errors) => errors.len(),
        };

        prop_assert_eq!(actual, expected);
    }
}
