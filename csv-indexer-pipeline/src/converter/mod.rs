//! Converter module for the CSV indexer pipeline.
//!
//! Coerces raw CSV string values to the type declared in the field
//! mapping. Conversion failures are not errors: the raw value is passed
//! through unchanged, which is the documented policy for malformed
//! numeric strings.

use serde_json::{Map, Value};

use crate::extractor::CsvRow;
use csv_indexer_shared::{FieldMapping, FieldType};

/// Literal string recognized as an explicit null.
const NULL_LITERAL: &str = "null";

/// Convert a single value according to its declared field type.
///
/// String values with a recognized declared type are normalized
/// (comma becomes period) and parsed as a floating-point number; on
/// success the number is coerced to the declared target type, with
/// integer types truncated toward zero. A string that fails to parse
/// falls through silently. The literal string `"null"` becomes JSON
/// null regardless of declared type, and anything else is returned
/// unchanged. Non-string inputs are always returned unchanged, so the
/// conversion is idempotent.
pub fn convert_value(field_type: Option<FieldType>, value: Value) -> Value {
    let Value::String(raw) = value else {
        return value;
    };

    if let Some(field_type) = field_type {
        if let Ok(number) = raw.replace(',', ".").parse::<f64>() {
            if let Some(converted) = coerce(field_type, number) {
                return converted;
            }
        }
    }

    if raw == NULL_LITERAL {
        Value::Null
    } else {
        Value::String(raw)
    }
}

/// Convert every field of a row, preserving the raw value for fields
/// absent from the mapping.
pub fn convert_row(mapping: &FieldMapping, row: CsvRow) -> Map<String, Value> {
    let mut source = Map::with_capacity(row.fields.len());

    for (name, raw) in row.fields {
        let converted = convert_value(mapping.field_type(&name), Value::String(raw));
        source.insert(name, converted);
    }

    source
}

/// Coerce a parsed number to the declared target type.
///
/// Returns `None` when the number has no JSON representation (NaN or
/// infinity for a double field), in which case the caller falls back to
/// the passthrough path.
fn coerce(field_type: FieldType, number: f64) -> Option<Value> {
    if field_type.is_integer() {
        Some(Value::from(number.trunc() as i64))
    } else {
        serde_json::Number::from_f64(number).map(Value::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv_indexer_shared::FieldMapping;
    use serde_json::json;

    fn mapping() -> FieldMapping {
        FieldMapping::from_value(json!({
            "count": {"type": "integer"},
            "weight": {"type": "double"},
            "stamp": {"type": "date"},
            "name": {"type": "text"}
        }))
        .unwrap()
    }

    #[test]
    fn test_integer_truncates_toward_zero() {
        let value = convert_value(Some(FieldType::Integer), json!("3.9"));
        assert_eq!(value, json!(3));

        let value = convert_value(Some(FieldType::Integer), json!("-3.9"));
        assert_eq!(value, json!(-3));
    }

    #[test]
    fn test_comma_normalized_to_period() {
        let value = convert_value(Some(FieldType::Integer), json!("3,5"));
        assert_eq!(value, json!(3));

        let value = convert_value(Some(FieldType::Double), json!("3,5"));
        assert_eq!(value, json!(3.5));
    }

    #[test]
    fn test_double_preserves_fraction() {
        let value = convert_value(Some(FieldType::Double), json!("2.25"));
        assert_eq!(value, json!(2.25));
    }

    #[test]
    fn test_date_and_byte_and_long_are_integers() {
        assert_eq!(convert_value(Some(FieldType::Date), json!("1588291200")), json!(1588291200_i64));
        assert_eq!(convert_value(Some(FieldType::Byte), json!("7")), json!(7));
        assert_eq!(convert_value(Some(FieldType::Long), json!("900000")), json!(900000));
    }

    #[test]
    fn test_unparseable_numeric_falls_through_silently() {
        let value = convert_value(Some(FieldType::Integer), json!("not a number"));
        assert_eq!(value, json!("not a number"));
    }

    #[test]
    fn test_null_literal_becomes_null() {
        assert_eq!(convert_value(Some(FieldType::Integer), json!("null")), Value::Null);
        assert_eq!(convert_value(None, json!("null")), Value::Null);
    }

    #[test]
    fn test_unmapped_field_passes_through() {
        let value = convert_value(None, json!("42"));
        assert_eq!(value, json!("42"));
    }

    #[test]
    fn test_non_string_input_unchanged() {
        assert_eq!(convert_value(Some(FieldType::Integer), json!(3)), json!(3));
        assert_eq!(convert_value(Some(FieldType::Double), json!(2.5)), json!(2.5));
        assert_eq!(convert_value(None, Value::Null), Value::Null);
    }

    #[test]
    fn test_convert_row() {
        let row = CsvRow {
            fields: vec![
                ("count".to_string(), "3,5".to_string()),
                ("weight".to_string(), "70,2".to_string()),
                ("name".to_string(), "alice".to_string()),
                ("free".to_string(), "text".to_string()),
                ("stamp".to_string(), "null".to_string()),
            ],
        };

        let source = convert_row(&mapping(), row);

        assert_eq!(source["count"], json!(3));
        assert_eq!(source["weight"], json!(70.2));
        // "text" is not a recognized conversion type
        assert_eq!(source["name"], json!("alice"));
        assert_eq!(source["free"], json!("text"));
        assert_eq!(source["stamp"], Value::Null);
    }
}
