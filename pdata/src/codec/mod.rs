//! Built-in wire formats
//!
//! Each submodule implements the codec traits from [`crate::marshal`] for one
//! format. [`Format`] picks one by name and hands back boxed pipelines.

pub mod otlp_json;
pub mod otlp_proto;
pub mod otlp_v1;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::BoxError;
use crate::marshal::{FromMetricsTranslator, MetricsMarshaler, MetricsUnmarshaler, ToMetricsTranslator};
use crate::metrics::Metrics;
use crate::otlp::collector::metrics::v1::ExportMetricsServiceRequest;

/// Translator for formats whose model is the canonical request itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl ToMetricsTranslator for IdentityTranslator {
    type Model = ExportMetricsServiceRequest;

    fn to_metrics(&self, model: ExportMetricsServiceRequest) -> Result<Metrics, BoxError> {
        Ok(Metrics::from_otlp(model))
    }
}

impl FromMetricsTranslator for IdentityTranslator {
    type Model = ExportMetricsServiceRequest;

    fn from_metrics<'a>(
        &self,
        metrics: &'a Metrics,
    ) -> Result<Cow<'a, ExportMetricsServiceRequest>, BoxError> {
        Ok(Cow::Borrowed(metrics.as_otlp()))
    }
}

// ============================================================================
// Format selection
// ============================================================================

/// Wire formats known to this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// OTLP v0.7 protobuf, the canonical encoding
    #[default]
    Proto,
    /// OTLP v0.7 JSON
    Json,
    /// Current OTLP protobuf (`ScopeMetrics`, `NumberDataPoint`)
    OtlpV1,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown format \"{0}\", expected one of: proto, json, otlp-v1")]
pub struct UnknownFormat(pub String);

impl Format {
    pub const ALL: [Format; 3] = [Self::Proto, Self::Json, Self::OtlpV1];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proto => "proto",
            Self::Json => "json",
            Self::OtlpV1 => "otlp-v1",
        }
    }

    pub fn marshaler(&self) -> Box<dyn MetricsMarshaler + Send + Sync> {
        match self {
            Self::Proto => Box::new(otlp_proto::marshaler()),
            Self::Json => Box::new(otlp_json::marshaler()),
            Self::OtlpV1 => Box::new(otlp_v1::marshaler()),
        }
    }

    pub fn unmarshaler(&self) -> Box<dyn MetricsUnmarshaler + Send + Sync> {
        match self {
            Self::Proto => Box::new(otlp_proto::unmarshaler()),
            Self::Json => Box::new(otlp_json::unmarshaler()),
            Self::OtlpV1 => Box::new(otlp_v1::unmarshaler()),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "proto" | "protobuf" => Ok(Self::Proto),
            "json" => Ok(Self::Json),
            "otlp-v1" | "otlpv1" => Ok(Self::OtlpV1),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}
