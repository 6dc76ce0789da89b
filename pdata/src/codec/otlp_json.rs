//! OTLP v0.7 JSON.
//!
//! Field names are lowerCamelCase and missing fields take their defaults. The
//! metric data oneof sits on the metric object itself (`{"name": "x",
//! "intSum": {...}}`). 64-bit integers are decimal strings, non-finite doubles
//! are `"NaN"`, `"Infinity"` or `"-Infinity"`, span and trace ids are hex.

use super::IdentityTranslator;
use crate::error::BoxError;
use crate::marshal::{Marshaler, MetricsDecoder, MetricsEncoder, Unmarshaler};
use crate::otlp::collector::metrics::v1::ExportMetricsServiceRequest;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder {
    pretty: bool,
}

impl JsonEncoder {
    /// Indented, multi-line output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl MetricsEncoder for JsonEncoder {
    type Model = ExportMetricsServiceRequest;

    fn encode_metrics(&self, model: &ExportMetricsServiceRequest) -> Result<Vec<u8>, BoxError> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(model)?
        } else {
            serde_json::to_vec(model)?
        };
        Ok(bytes)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl MetricsDecoder for JsonDecoder {
    type Model = ExportMetricsServiceRequest;

    fn decode_metrics(&self, bytes: &[u8]) -> Result<ExportMetricsServiceRequest, BoxError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

pub fn marshaler() -> Marshaler<JsonEncoder, IdentityTranslator> {
    Marshaler::new(JsonEncoder::default(), IdentityTranslator)
}

pub fn pretty_marshaler() -> Marshaler<JsonEncoder, IdentityTranslator> {
    Marshaler::new(JsonEncoder::pretty(), IdentityTranslator)
}

pub fn unmarshaler() -> Unmarshaler<JsonDecoder, IdentityTranslator> {
    Unmarshaler::new(JsonDecoder, IdentityTranslator)
}
