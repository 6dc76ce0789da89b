//! Views over the records shared by every signal: attribute maps, label
//! maps, resources and instrumentation libraries.

use crate::otlp::common::v1::{
    AnyValue, InstrumentationLibrary as OtlpLibrary, KeyValue, StringKeyValue, any_value,
};
use crate::otlp::resource::v1::Resource as OtlpResource;

pub(crate) static EMPTY_RESOURCE: OtlpResource = OtlpResource {
    attributes: Vec::new(),
    dropped_attributes_count: 0,
};

pub(crate) static EMPTY_LIBRARY: OtlpLibrary = OtlpLibrary {
    name: String::new(),
    version: String::new(),
};

// ============================================================================
// ATTRIBUTE VALUES
// ============================================================================

/// Borrowed view of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue<'a> {
    Empty,
    String(&'a str),
    Bool(bool),
    Int(i64),
    Double(f64),
    Array(&'a [AnyValue]),
    Map(AttributeMap<'a>),
    Bytes(&'a [u8]),
}

impl<'a> AttributeValue<'a> {
    pub fn from_any(value: &'a AnyValue) -> Self {
        match &value.value {
            Some(any_value::Value::StringValue(s)) => Self::String(s),
            Some(any_value::Value::BoolValue(b)) => Self::Bool(*b),
            Some(any_value::Value::IntValue(i)) => Self::Int(*i),
            Some(any_value::Value::DoubleValue(d)) => Self::Double(*d),
            Some(any_value::Value::ArrayValue(arr)) => Self::Array(&arr.values),
            Some(any_value::Value::KvlistValue(kvlist)) => {
                Self::Map(AttributeMap::new(&kvlist.values))
            }
            Some(any_value::Value::BytesValue(b)) => Self::Bytes(b),
            None => Self::Empty,
        }
    }

    /// Name of the value type, as used in log fields and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::String(_) => "string",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Bytes(_) => "bytes",
        }
    }
}

fn wrap_value(value: any_value::Value) -> AnyValue {
    AnyValue { value: Some(value) }
}

// ============================================================================
// ATTRIBUTE MAP
// ============================================================================

/// Ordered attribute map backed by a `KeyValue` sequence.
///
/// Lookups are linear; attribute sets are small and order is preserved on the
/// wire.
#[derive(Clone, Copy)]
pub struct AttributeMap<'a> {
    orig: &'a [KeyValue],
}

/// Exclusive view of an attribute map.
pub struct AttributeMapMut<'a> {
    orig: &'a mut Vec<KeyValue>,
}

impl<'a> AttributeMap<'a> {
    pub(crate) fn new(orig: &'a [KeyValue]) -> Self {
        Self { orig }
    }

    pub fn len(&self) -> usize {
        self.orig.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orig.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<AttributeValue<'a>> {
        self.orig
            .iter()
            .find(|kv| kv.key == key)
            .map(|kv| {
                kv.value
                    .as_ref()
                    .map_or(AttributeValue::Empty, AttributeValue::from_any)
            })
    }

    pub fn iter(self) -> impl Iterator<Item = (&'a str, AttributeValue<'a>)> + 'a {
        self.orig.iter().map(|kv| {
            let value = kv
                .value
                .as_ref()
                .map_or(AttributeValue::Empty, AttributeValue::from_any);
            (kv.key.as_str(), value)
        })
    }

    /// Replaces the contents of `dest` with a deep copy of this map.
    pub fn copy_to(&self, dest: &mut AttributeMapMut<'_>) {
        dest.orig.clear();
        dest.orig.extend_from_slice(self.orig);
    }
}

impl<'a> AttributeMapMut<'a> {
    pub(crate) fn new(orig: &'a mut Vec<KeyValue>) -> Self {
        Self { orig }
    }

    pub fn as_view(&self) -> AttributeMap<'_> {
        AttributeMap::new(self.orig)
    }

    pub fn len(&self) -> usize {
        self.orig.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orig.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<AttributeValue<'_>> {
        self.as_view().get(key)
    }

    /// Inserts `value` under `key`, replacing an existing entry in place.
    pub fn upsert(&mut self, key: &str, value: AnyValue) {
        match self.orig.iter_mut().find(|kv| kv.key == key) {
            Some(kv) => kv.value = Some(value),
            None => self.orig.push(KeyValue {
                key: key.to_string(),
                value: Some(value),
            }),
        }
    }

    pub fn upsert_string(&mut self, key: &str, value: impl Into<String>) {
        self.upsert(key, wrap_value(any_value::Value::StringValue(value.into())));
    }

    pub fn upsert_bool(&mut self, key: &str, value: bool) {
        self.upsert(key, wrap_value(any_value::Value::BoolValue(value)));
    }

    pub fn upsert_int(&mut self, key: &str, value: i64) {
        self.upsert(key, wrap_value(any_value::Value::IntValue(value)));
    }

    pub fn upsert_double(&mut self, key: &str, value: f64) {
        self.upsert(key, wrap_value(any_value::Value::DoubleValue(value)));
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.orig.len();
        self.orig.retain(|kv| kv.key != key);
        self.orig.len() != before
    }

    pub fn clear(&mut self) {
        self.orig.clear();
    }
}

impl PartialEq for AttributeMap<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.orig == other.orig
    }
}

impl std::fmt::Debug for AttributeMap<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// ============================================================================
// STRING MAP (labels)
// ============================================================================

/// Ordered string-to-string map backed by a `StringKeyValue` sequence.
/// Used for data point and exemplar labels.
#[derive(Clone, Copy)]
pub struct StringMap<'a> {
    orig: &'a [StringKeyValue],
}

/// Exclusive view of a label map.
pub struct StringMapMut<'a> {
    orig: &'a mut Vec<StringKeyValue>,
}

impl<'a> StringMap<'a> {
    pub(crate) fn new(orig: &'a [StringKeyValue]) -> Self {
        Self { orig }
    }

    pub fn len(&self) -> usize {
        self.orig.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orig.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.orig
            .iter()
            .find(|kv| kv.key == key)
            .map(|kv| kv.value.as_str())
    }

    pub fn iter(self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.orig
            .iter()
            .map(|kv| (kv.key.as_str(), kv.value.as_str()))
    }

    /// Replaces the contents of `dest` with a copy of this map.
    pub fn copy_to(&self, dest: &mut StringMapMut<'_>) {
        dest.orig.clear();
        dest.orig.extend_from_slice(self.orig);
    }
}

impl<'a> StringMapMut<'a> {
    pub(crate) fn new(orig: &'a mut Vec<StringKeyValue>) -> Self {
        Self { orig }
    }

    pub fn as_view(&self) -> StringMap<'_> {
        StringMap::new(self.orig)
    }

    pub fn len(&self) -> usize {
        self.orig.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orig.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.as_view().get(key)
    }

    /// Inserts `value` under `key`, replacing an existing entry in place.
    pub fn upsert(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.orig.iter_mut().find(|kv| kv.key == key) {
            Some(kv) => kv.value = value,
            None => self.orig.push(StringKeyValue {
                key: key.to_string(),
                value,
            }),
        }
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.orig.len();
        self.orig.retain(|kv| kv.key != key);
        self.orig.len() != before
    }

    pub fn clear(&mut self) {
        self.orig.clear();
    }
}

impl PartialEq for StringMap<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.orig == other.orig
    }
}

impl std::fmt::Debug for StringMap<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// ============================================================================
// RESOURCE / INSTRUMENTATION LIBRARY
// ============================================================================

pdata_view!(
    /// The entity producing telemetry, described by its attributes.
    Resource,
    ResourceMut,
    OtlpResource
);

pdata_accessors!(Resource, ResourceMut {
    copy dropped_attributes_count, set_dropped_attributes_count: u32;
    nested attributes, attributes_mut: AttributeMap, AttributeMapMut;
});

pdata_view!(
    /// Name and version of the library that produced a group of metrics.
    InstrumentationLibrary,
    InstrumentationLibraryMut,
    OtlpLibrary
);

pdata_accessors!(InstrumentationLibrary, InstrumentationLibraryMut {
    string name, set_name;
    string version, set_version;
});

pdata_leaf_copy!(
    Resource => ResourceMut,
    InstrumentationLibrary => InstrumentationLibraryMut,
);
