//! OTLP utility functions
//!
//! Conversions between the canonical v0.7 common records and the current
//! `opentelemetry-proto` ones:
//! - Attribute values and key/value lists (same shape on both sides)
//! - Labels (string-only) to and from attributes
//! - Text rendering of non-string attribute values

use std::collections::BTreeMap;

use opentelemetry_proto::tonic::common::v1 as current;

use crate::otlp::common::v1 as canonical;

// ============================================================================
// ATTRIBUTE VALUES
// ============================================================================

/// Convert a current `AnyValue` to its text representation
///
/// Arrays and maps render as JSON, bytes as lowercase hex.
pub fn any_value_to_string(value: &current::AnyValue) -> String {
    use current::any_value::Value;

    match &value.value {
        Some(Value::StringValue(s)) => s.clone(),
        Some(Value::BoolValue(b)) => b.to_string(),
        Some(Value::IntValue(i)) => i.to_string(),
        Some(Value::DoubleValue(d)) => d.to_string(),
        Some(Value::ArrayValue(arr)) => {
            let values: Vec<String> = arr.values.iter().map(any_value_to_string).collect();
            serde_json::to_string(&values).unwrap_or_default()
        }
        Some(Value::KvlistValue(kvlist)) => {
            let map: BTreeMap<&str, String> = kvlist
                .values
                .iter()
                .filter_map(|kv| {
                    kv.value
                        .as_ref()
                        .map(|v| (kv.key.as_str(), any_value_to_string(v)))
                })
                .collect();
            serde_json::to_string(&map).unwrap_or_default()
        }
        Some(Value::BytesValue(b)) => hex::encode(b),
        None => String::new(),
    }
}

/// Convert a canonical `AnyValue` to the current schema
pub fn any_value_to_current(value: &canonical::AnyValue) -> current::AnyValue {
    use canonical::any_value::Value as Src;
    use current::any_value::Value as Dst;

    let value = value.value.as_ref().map(|v| match v {
        Src::StringValue(s) => Dst::StringValue(s.clone()),
        Src::BoolValue(b) => Dst::BoolValue(*b),
        Src::IntValue(i) => Dst::IntValue(*i),
        Src::DoubleValue(d) => Dst::DoubleValue(*d),
        Src::ArrayValue(arr) => Dst::ArrayValue(current::ArrayValue {
            values: arr.values.iter().map(any_value_to_current).collect(),
        }),
        Src::KvlistValue(kvlist) => Dst::KvlistValue(current::KeyValueList {
            values: attributes_to_current(&kvlist.values),
        }),
        Src::BytesValue(b) => Dst::BytesValue(b.clone()),
    });
    current::AnyValue { value }
}

/// Convert a current `AnyValue` to the canonical schema
pub fn any_value_from_current(value: &current::AnyValue) -> canonical::AnyValue {
    use canonical::any_value::Value as Dst;
    use current::any_value::Value as Src;

    let value = value.value.as_ref().map(|v| match v {
        Src::StringValue(s) => Dst::StringValue(s.clone()),
        Src::BoolValue(b) => Dst::BoolValue(*b),
        Src::IntValue(i) => Dst::IntValue(*i),
        Src::DoubleValue(d) => Dst::DoubleValue(*d),
        Src::ArrayValue(arr) => Dst::ArrayValue(canonical::ArrayValue {
            values: arr.values.iter().map(any_value_from_current).collect(),
        }),
        Src::KvlistValue(kvlist) => Dst::KvlistValue(canonical::KeyValueList {
            values: attributes_from_current(&kvlist.values),
        }),
        Src::BytesValue(b) => Dst::BytesValue(b.clone()),
    });
    canonical::AnyValue { value }
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

pub fn attributes_to_current(attrs: &[canonical::KeyValue]) -> Vec<current::KeyValue> {
    attrs
        .iter()
        .map(|kv| current::KeyValue {
            key: kv.key.clone(),
            value: kv.value.as_ref().map(any_value_to_current),
        })
        .collect()
}

pub fn attributes_from_current(attrs: &[current::KeyValue]) -> Vec<canonical::KeyValue> {
    attrs
        .iter()
        .map(|kv| canonical::KeyValue {
            key: kv.key.clone(),
            value: kv.value.as_ref().map(any_value_from_current),
        })
        .collect()
}

// ============================================================================
// LABELS
// ============================================================================

/// Labels become string-valued attributes, order preserved
pub fn labels_to_attributes(labels: &[canonical::StringKeyValue]) -> Vec<current::KeyValue> {
    labels
        .iter()
        .map(|label| current::KeyValue {
            key: label.key.clone(),
            value: Some(current::AnyValue {
                value: Some(current::any_value::Value::StringValue(label.value.clone())),
            }),
        })
        .collect()
}

/// Attributes become labels; non-string values are rendered as text and
/// attributes without a value become empty labels
pub fn attributes_to_labels(attrs: &[current::KeyValue]) -> Vec<canonical::StringKeyValue> {
    attrs
        .iter()
        .map(|kv| canonical::StringKeyValue {
            key: kv.key.clone(),
            value: kv.value.as_ref().map(any_value_to_string).unwrap_or_default(),
        })
        .collect()
}
