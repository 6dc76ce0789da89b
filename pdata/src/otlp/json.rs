//! Serde adapters implementing the OTLP JSON mapping for the v0.7 messages.
//!
//! - 64-bit integers are written as decimal strings; numbers and strings are
//!   both accepted on input.
//! - Doubles are written as numbers, except NaN and the infinities which use
//!   the strings `"NaN"`, `"Infinity"` and `"-Infinity"`.
//! - Span and trace ids are lowercase hex, other bytes are base64.
//! - A oneof sits directly on its parent object, keyed by the variant name.
//!   Setting two variants of the same oneof is an error.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::common::v1::{ArrayValue, KeyValueList, any_value};
use super::metrics::v1::{
    DoubleGauge, DoubleHistogram, DoubleSum, DoubleSummary, IntGauge, IntHistogram, IntSum, metric,
};

// ============================================================================
// Integers
// ============================================================================

pub trait Integer: Sized + Copy + fmt::Display + FromStr + TryFrom<i64> + TryFrom<u64> {}

impl Integer for i64 {}
impl Integer for u64 {}

struct IntegerVisitor<T>(PhantomData<T>);

impl<T: Integer> Visitor<'_> for IntegerVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a 64-bit integer or a decimal string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        <T as TryFrom<i64>>::try_from(v)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        <T as TryFrom<u64>>::try_from(v)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        v.parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

struct Int64<T>(T);

impl<'de, T: Integer> Deserialize<'de> for Int64<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_any(IntegerVisitor(PhantomData))
            .map(Int64)
    }
}

/// `int64`, `uint64`, `fixed64` and `sfixed64` fields.
pub mod int64 {
    use super::*;

    pub fn serialize<T: Integer, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T: Integer, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
        Int64::deserialize(deserializer).map(|v| v.0)
    }
}

/// Repeated `uint64` and `fixed64` fields.
pub mod int64_vec {
    use super::*;

    pub fn serialize<S: Serializer>(values: &[u64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|v| v.to_string()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u64>, D::Error> {
        let values = Vec::<Int64<u64>>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|v| v.0).collect())
    }
}

// ============================================================================
// Doubles
// ============================================================================

struct Double(f64);

impl Serialize for Double {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value == f64::INFINITY {
            serializer.serialize_str("Infinity")
        } else if value == f64::NEG_INFINITY {
            serializer.serialize_str("-Infinity")
        } else {
            serializer.serialize_f64(value)
        }
    }
}

struct DoubleVisitor;

impl Visitor<'_> for DoubleVisitor {
    type Value = Double;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, \"NaN\", \"Infinity\" or \"-Infinity\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Double, E> {
        Ok(Double(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Double, E> {
        Ok(Double(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Double, E> {
        Ok(Double(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Double, E> {
        match v {
            "NaN" => Ok(Double(f64::NAN)),
            "Infinity" => Ok(Double(f64::INFINITY)),
            "-Infinity" => Ok(Double(f64::NEG_INFINITY)),
            _ => v
                .parse()
                .map(Double)
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Double {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DoubleVisitor)
    }
}

/// `double` fields.
pub mod double {
    use super::*;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        Double(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Double::deserialize(deserializer).map(|v| v.0)
    }
}

/// Repeated `double` fields.
pub mod double_vec {
    use super::*;

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|v| Double(*v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let values = Vec::<Double>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|v| v.0).collect())
    }
}

// ============================================================================
// Bytes
// ============================================================================

/// Span and trace ids.
pub mod hex_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(de::Error::custom)
    }
}

/// Any other `bytes` field.
pub mod base64_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s).map_err(de::Error::custom)
    }
}

struct Base64(Vec<u8>);

impl<'de> Deserialize<'de> for Base64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        base64_bytes::deserialize(deserializer).map(Base64)
    }
}

// ============================================================================
// Oneofs
// ============================================================================

fn at_most_one<T, E: de::Error>(
    oneof: &str,
    variants: impl IntoIterator<Item = Option<T>>,
) -> Result<Option<T>, E> {
    let mut present = variants.into_iter().flatten();
    let first = present.next();
    if present.next().is_some() {
        return Err(E::custom(format!("more than one {oneof} field is set")));
    }
    Ok(first)
}

/// Reads `AnyValue.value` from the keys of the enclosing object.
pub fn any_value<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<any_value::Value>, D::Error> {
    use any_value::Value;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Fields {
        string_value: Option<String>,
        bool_value: Option<bool>,
        int_value: Option<Int64<i64>>,
        double_value: Option<Double>,
        array_value: Option<ArrayValue>,
        kvlist_value: Option<KeyValueList>,
        bytes_value: Option<Base64>,
    }

    let f = Fields::deserialize(deserializer)?;
    at_most_one(
        "AnyValue",
        [
            f.string_value.map(Value::StringValue),
            f.bool_value.map(Value::BoolValue),
            f.int_value.map(|v| Value::IntValue(v.0)),
            f.double_value.map(|v| Value::DoubleValue(v.0)),
            f.array_value.map(Value::ArrayValue),
            f.kvlist_value.map(Value::KvlistValue),
            f.bytes_value.map(|v| Value::BytesValue(v.0)),
        ],
    )
}

/// Reads `Metric.data` from the keys of the enclosing object.
pub fn metric_data<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<metric::Data>, D::Error> {
    use metric::Data;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Fields {
        int_gauge: Option<IntGauge>,
        double_gauge: Option<DoubleGauge>,
        int_sum: Option<IntSum>,
        double_sum: Option<DoubleSum>,
        int_histogram: Option<IntHistogram>,
        double_histogram: Option<DoubleHistogram>,
        double_summary: Option<DoubleSummary>,
    }

    let f = Fields::deserialize(deserializer)?;
    at_most_one(
        "Metric data",
        [
            f.int_gauge.map(Data::IntGauge),
            f.double_gauge.map(Data::DoubleGauge),
            f.int_sum.map(Data::IntSum),
            f.double_sum.map(Data::DoubleSum),
            f.int_histogram.map(Data::IntHistogram),
            f.double_histogram.map(Data::DoubleHistogram),
            f.double_summary.map(Data::DoubleSummary),
        ],
    )
}

#[cfg(test)]
mod tests {
    use crate::otlp::common::v1::AnyValue;
    use crate::otlp::metrics::v1::{
        DoubleDataPoint, DoubleHistogramDataPoint, IntDataPoint, IntExemplar, Metric,
    };

    use super::*;

    #[test]
    fn test_ids_render_as_hex() {
        let exemplar = IntExemplar {
            span_id: vec![0xde, 0xad, 0xbe, 0xef],
            trace_id: vec![],
            ..Default::default()
        };
        let json = serde_json::to_value(&exemplar).unwrap();
        assert_eq!(json["spanId"], "deadbeef");
        assert_eq!(json["traceId"], "");
    }

    #[test]
    fn test_invalid_hex_is_rejected() {
        let result: Result<IntExemplar, _> = serde_json::from_str(r#"{"spanId": "xyz"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_int64_written_as_string_read_from_either() {
        let point = IntDataPoint {
            time_unix_nano: 1_600_000_000_000_000_001,
            value: -7,
            ..Default::default()
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["timeUnixNano"], "1600000000000000001");
        assert_eq!(json["value"], "-7");

        let quoted: IntDataPoint =
            serde_json::from_str(r#"{"timeUnixNano": "5", "value": "-3"}"#).unwrap();
        let bare: IntDataPoint = serde_json::from_str(r#"{"timeUnixNano": 5, "value": -3}"#).unwrap();
        assert_eq!(quoted, bare);
        assert_eq!(quoted.value, -3);
    }

    #[test]
    fn test_histogram_buckets_accept_mixed_encodings() {
        let point: DoubleHistogramDataPoint = serde_json::from_str(
            r#"{"count": "3", "bucketCounts": ["1", 2], "explicitBounds": [0.5, "Infinity"]}"#,
        )
        .unwrap();
        assert_eq!(point.count, 3);
        assert_eq!(point.bucket_counts, vec![1, 2]);
        assert_eq!(point.explicit_bounds, vec![0.5, f64::INFINITY]);

        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["bucketCounts"], serde_json::json!(["1", "2"]));
        assert_eq!(json["explicitBounds"], serde_json::json!([0.5, "Infinity"]));
    }

    #[test]
    fn test_negative_unsigned_is_rejected() {
        let result: Result<IntDataPoint, _> = serde_json::from_str(r#"{"timeUnixNano": -1}"#);
        assert!(result.is_err());
        let result: Result<IntDataPoint, _> = serde_json::from_str(r#"{"value": "ten"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_doubles_round_trip() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let point = DoubleDataPoint {
                value,
                ..Default::default()
            };
            let json = serde_json::to_string(&point).unwrap();
            let back: DoubleDataPoint = serde_json::from_str(&json).unwrap();
            assert_eq!(back.value.is_nan(), value.is_nan());
            if !value.is_nan() {
                assert_eq!(back.value, value);
            }
        }
        let json = serde_json::to_value(DoubleDataPoint {
            value: f64::NEG_INFINITY,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["value"], "-Infinity");
    }

    #[test]
    fn test_any_value_sits_on_parent_object() {
        let value = AnyValue {
            value: Some(any_value::Value::IntValue(42)),
        };
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"intValue":"42"}"#);

        let bytes = AnyValue {
            value: Some(any_value::Value::BytesValue(vec![0xff, 0x00])),
        };
        let json = serde_json::to_string(&bytes).unwrap();
        assert_eq!(json, r#"{"bytesValue":"/wA="}"#);
        assert_eq!(serde_json::from_str::<AnyValue>(&json).unwrap(), bytes);

        let empty: AnyValue = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.value, None);
    }

    #[test]
    fn test_two_oneof_variants_are_rejected() {
        let result: Result<AnyValue, _> =
            serde_json::from_str(r#"{"stringValue": "a", "boolValue": true}"#);
        assert!(result.is_err());

        let result: Result<Metric, _> =
            serde_json::from_str(r#"{"name": "x", "intSum": {}, "doubleSum": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_metric_data_is_an_error() {
        let result: Result<Metric, _> =
            serde_json::from_str(r#"{"name": "x", "intSum": {"dataPoints": [{"value": "oops"}]}}"#);
        assert!(result.is_err());
    }
}
