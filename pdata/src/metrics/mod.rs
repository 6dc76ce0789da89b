//! Canonical in-memory metrics.
//!
//! `Metrics` owns a single OTLP `ExportMetricsServiceRequest`; every other
//! type in this module is a borrowed view into it. Shared views (`Metric`,
//! `IntSum`, ...) come from `&Metrics`, exclusive views (`MetricMut`,
//! `IntSumMut`, ...) from `&mut Metrics`, so a view can never observe a
//! sequence being reallocated underneath it.

mod generated;
mod metric;
mod types;

pub use generated::*;
pub use metric::{Metric, MetricMut};
pub use types::{AggregationTemporality, MetricDataType};

use prost::Message;

use crate::error::PdataError;
use crate::otlp::collector::metrics::v1::ExportMetricsServiceRequest;

/// Root of the metrics tree.
#[derive(Debug, Default, PartialEq)]
pub struct Metrics {
    orig: ExportMetricsServiceRequest,
}

impl Metrics {
    /// Empty metrics with no resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of an already-parsed OTLP request without copying.
    pub fn from_otlp(orig: ExportMetricsServiceRequest) -> Self {
        Self { orig }
    }

    /// Gives up the tree as an OTLP request without copying.
    pub fn into_otlp(self) -> ExportMetricsServiceRequest {
        self.orig
    }

    pub fn as_otlp(&self) -> &ExportMetricsServiceRequest {
        &self.orig
    }

    /// Parses the OTLP protobuf encoding of an `ExportMetricsServiceRequest`.
    pub fn from_otlp_proto_bytes(bytes: &[u8]) -> Result<Self, PdataError> {
        let orig = ExportMetricsServiceRequest::decode(bytes)?;
        tracing::trace!(bytes = bytes.len(), "decoded OTLP metrics");
        Ok(Self { orig })
    }

    /// Serializes the tree as an OTLP protobuf `ExportMetricsServiceRequest`.
    pub fn to_otlp_proto_bytes(&self) -> Result<Vec<u8>, PdataError> {
        let mut buf = Vec::with_capacity(self.orig.encoded_len());
        self.orig.encode(&mut buf)?;
        Ok(buf)
    }

    /// Length of the protobuf encoding, computed without serializing.
    pub fn otlp_proto_size(&self) -> usize {
        self.orig.encoded_len()
    }

    pub fn resource_metrics(&self) -> ResourceMetricsSlice<'_> {
        ResourceMetricsSlice::new(&self.orig.resource_metrics)
    }

    pub fn resource_metrics_mut(&mut self) -> ResourceMetricsSliceMut<'_> {
        ResourceMetricsSliceMut::new(&mut self.orig.resource_metrics)
    }

    pub fn resource_metrics_count(&self) -> usize {
        self.orig.resource_metrics.len()
    }

    /// Every metric under every resource and instrumentation library.
    pub fn metrics(&self) -> impl Iterator<Item = Metric<'_>> + '_ {
        self.resource_metrics()
            .iter()
            .flat_map(|rm| rm.instrumentation_library_metrics().iter())
            .flat_map(|ilm| ilm.metrics().iter())
    }

    pub fn metric_count(&self) -> usize {
        self.resource_metrics()
            .iter()
            .flat_map(|rm| rm.instrumentation_library_metrics().iter())
            .map(|ilm| ilm.metrics().len())
            .sum()
    }

    /// Returns `(metrics, data_points)`. A metric without data contributes no
    /// points.
    pub fn metric_and_data_point_count(&self) -> (usize, usize) {
        self.metrics().fold((0, 0), |(metrics, points), metric| {
            (metrics + 1, points + metric.data_point_count())
        })
    }
}

impl Clone for Metrics {
    fn clone(&self) -> Self {
        let mut cloned = Self::new();
        self.resource_metrics()
            .copy_to(&mut cloned.resource_metrics_mut());
        cloned
    }
}

impl From<ExportMetricsServiceRequest> for Metrics {
    fn from(orig: ExportMetricsServiceRequest) -> Self {
        Self::from_otlp(orig)
    }
}
