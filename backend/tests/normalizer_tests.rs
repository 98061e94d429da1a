//! Normalizer tests
//!
//! Covers both upstream payload shapes (array-of-objects and co-indexed
//! arrays), scalar coercion, entity decoding, and the shape-invariance
//! property.

use proptest::prelude::*;
use serde_json::{json, Value};
use weather_dashboard_backend::services::normalize::{
    coerce_number, coerce_text, decode_entities, normalize,
};

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn array_shape_keeps_dated_records_and_drops_the_rest() {
    let raw = json!([
        {"ForecastDate": "01/01/2026", "MaximumTemperature": 30},
        {"ForecastDate": "", "MaximumTemperature": 31},
        {"MaximumTemperature": 32},
        {"ForecastDate": "02/01/2026", "MaximumTemperature": 33}
    ]);

    let days = normalize(&raw);
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].forecast_date, "01/01/2026");
    assert_eq!(days[1].forecast_date, "02/01/2026");
    assert_eq!(days[1].max_temp_c, Some(33.0));
}

#[test]
fn co_indexed_shape_keeps_dated_records_and_drops_the_rest() {
    let raw = json!({
        "ForecastDate": ["01/01/2026", "", "03/01/2026"],
        "MaximumTemperature": [30, 31, 32]
    });

    let days = normalize(&raw);
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].forecast_date, "01/01/2026");
    assert_eq!(days[0].max_temp_c, Some(30.0));
    assert_eq!(days[1].forecast_date, "03/01/2026");
    assert_eq!(days[1].max_temp_c, Some(32.0));
}

#[test]
fn co_indexed_scalars_form_a_single_record() {
    let raw = json!({
        "ForecastDate": "01/01/2026",
        "MaximumTemperature": 30,
        "MinimumTemperature": "21.5"
    });

    let days = normalize(&raw);
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].forecast_date, "01/01/2026");
    assert_eq!(days[0].max_temp_c, Some(30.0));
    assert_eq!(days[0].min_temp_c, Some(21.5));
}

#[test]
fn lowercase_key_variants_are_accepted() {
    let raw = json!([
        {"forecastDate": "01/01/2026", "maximumTemperature": 30, "windSpeed": "12"}
    ]);

    let days = normalize(&raw);
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].max_temp_c, Some(30.0));
    assert_eq!(days[0].wind_speed_kmh, Some(12.0));
}

#[test]
fn all_wrapper_forms_resolve_to_the_same_scalar() {
    let wrapped = [
        json!("12.5"),
        json!({"#text": "12.5"}),
        json!({"text": "12.5"}),
        json!({"value": "12.5"}),
    ];

    for form in &wrapped {
        let raw = json!([{"ForecastDate": "01/01/2026", "MaximumTemperature": form}]);
        let days = normalize(&raw);
        assert_eq!(days[0].max_temp_c, Some(12.5), "failed for {}", form);
    }
}

#[test]
fn numeric_coercion_table() {
    let number = json!(12.5);
    let numeric_string = json!("12.5");
    let wrapped = json!({"#text": "3"});
    let junk = json!("abc");
    let object = json!({"other": 1});

    assert_eq!(coerce_number(Some(&number)), Some(12.5));
    assert_eq!(coerce_number(Some(&numeric_string)), Some(12.5));
    assert_eq!(coerce_number(Some(&wrapped)), Some(3.0));
    assert_eq!(coerce_number(Some(&junk)), None);
    assert_eq!(coerce_number(Some(&object)), None);
    assert_eq!(coerce_number(None), None);
}

#[test]
fn non_finite_numeric_strings_degrade_to_none() {
    assert_eq!(coerce_number(Some(&json!("NaN"))), None);
    assert_eq!(coerce_number(Some(&json!("inf"))), None);
}

#[test]
fn entity_decoding_covers_named_decimal_and_hex_forms() {
    assert_eq!(
        decode_entities("fog &amp; haze &lt;mild&gt; &quot;x&quot; &apos;y&apos;"),
        "fog & haze <mild> \"x\" 'y'"
    );
    assert_eq!(decode_entities("&#38;"), "&");
    assert_eq!(decode_entities("&#x26;"), "&");
    assert_eq!(decode_entities("no entities"), "no entities");
    // Unknown entities stay literal
    assert_eq!(decode_entities("&bogus; &"), "&bogus; &");
}

#[test]
fn text_fields_are_unwrapped_and_entity_decoded() {
    let raw = json!([{
        "ForecastDate": "01/01/2026",
        "DescriptionEnglish": {"#text": "Thundershowers &amp; gusty wind"}
    }]);

    let days = normalize(&raw);
    assert_eq!(
        days[0].description_english.as_deref(),
        Some("Thundershowers & gusty wind")
    );
}

#[test]
fn coerce_text_stringifies_numbers() {
    assert_eq!(coerce_text(Some(&json!(30))), Some("30".to_string()));
    assert_eq!(coerce_text(Some(&json!({"value": "ok"}))), Some("ok".to_string()));
    assert_eq!(coerce_text(Some(&json!([1, 2]))), None);
    assert_eq!(coerce_text(None), None);
}

#[test]
fn record_order_is_preserved() {
    let raw = json!([
        {"ForecastDate": "03/01/2026"},
        {"ForecastDate": "01/01/2026"},
        {"ForecastDate": "02/01/2026"}
    ]);

    let dates: Vec<_> = normalize(&raw)
        .into_iter()
        .map(|d| d.forecast_date)
        .collect();
    assert_eq!(dates, ["03/01/2026", "01/01/2026", "02/01/2026"]);
}

#[test]
fn unusable_input_shapes_yield_empty_not_errors() {
    assert!(normalize(&json!(null)).is_empty());
    assert!(normalize(&json!("text")).is_empty());
    assert!(normalize(&json!(42)).is_empty());
    assert!(normalize(&json!([])).is_empty());
    assert!(normalize(&json!([1, "two", null])).is_empty());
}

// ============================================================================
// Property-Based Tests
// ============================================================================

type Row = (String, Option<f64>, Option<f64>, Option<f64>);

fn row_strategy() -> impl Strategy<Value = Row> {
    (
        "[0-3][0-9]/[0-1][0-9]/20[2-3][0-9]",
        proptest::option::of(-10.0f64..45.0),
        proptest::option::of(-10.0f64..45.0),
        proptest::option::of(0.0f64..100.0),
    )
}

fn encode_as_array(rows: &[Row]) -> Value {
    Value::Array(
        rows.iter()
            .map(|(date, max, min, rain)| {
                json!({
                    "ForecastDate": date,
                    "MaximumTemperature": max,
                    "MinimumTemperature": min,
                    "PercentRainCover": rain,
                })
            })
            .collect(),
    )
}

fn encode_as_columns(rows: &[Row]) -> Value {
    json!({
        "ForecastDate": rows.iter().map(|r| json!(r.0)).collect::<Vec<_>>(),
        "MaximumTemperature": rows.iter().map(|r| json!(r.1)).collect::<Vec<_>>(),
        "MinimumTemperature": rows.iter().map(|r| json!(r.2)).collect::<Vec<_>>(),
        "PercentRainCover": rows.iter().map(|r| json!(r.3)).collect::<Vec<_>>(),
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Shape invariance: the same logical days encoded as an array of
    /// objects and as parallel co-indexed arrays normalize identically.
    #[test]
    fn prop_shape_invariance(rows in proptest::collection::vec(row_strategy(), 0..8)) {
        let from_array = normalize(&encode_as_array(&rows));
        let from_columns = normalize(&encode_as_columns(&rows));
        prop_assert_eq!(from_array, from_columns);
    }

    /// Every record carries a non-empty date and nothing else is dropped.
    #[test]
    fn prop_dated_records_are_preserved(rows in proptest::collection::vec(row_strategy(), 0..8)) {
        let days = normalize(&encode_as_array(&rows));
        prop_assert_eq!(days.len(), rows.len());
        for (day, row) in days.iter().zip(&rows) {
            prop_assert_eq!(&day.forecast_date, &row.0);
            prop_assert!(!day.forecast_date.is_empty());
        }
    }

    /// A single day encoded as bare scalars equals the one-element array
    /// encoding of the same day.
    #[test]
    fn prop_singleton_scalars_equal_one_element_arrays(row in row_strategy()) {
        let scalar_form = json!({
            "ForecastDate": row.0,
            "MaximumTemperature": row.1,
            "MinimumTemperature": row.2,
            "PercentRainCover": row.3,
        });
        let rows = vec![row];
        let from_scalars = normalize(&scalar_form);
        let from_array = normalize(&encode_as_array(&rows));
        prop_assert_eq!(from_scalars, from_array);
    }
}
