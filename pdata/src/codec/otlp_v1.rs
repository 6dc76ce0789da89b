//! Current OTLP metrics protobuf (`opentelemetry-proto`).
//!
//! The current schema folds integer and double variants into one shape per
//! kind, so the translation is lossy in a few places:
//! - `IntHistogram` is lowered to `Histogram` with a floating-point sum.
//! - A gauge or sum is lifted to its integer variant only when it has points
//!   and every point carries an integer value.
//! - Point attributes become labels; non-string values are rendered as text.
//! - Exponential histograms have no canonical counterpart and are rejected.

use std::borrow::Cow;

use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest as V1Request;
use opentelemetry_proto::tonic::common::v1::InstrumentationScope;
use opentelemetry_proto::tonic::metrics::v1;
use opentelemetry_proto::tonic::resource::v1::Resource as V1Resource;
use prost::Message;
use thiserror::Error;

use crate::error::BoxError;
use crate::marshal::{
    FromMetricsTranslator, Marshaler, MetricsDecoder, MetricsEncoder, ToMetricsTranslator,
    Unmarshaler,
};
use crate::metrics::Metrics;
use crate::otlp::collector::metrics::v1::ExportMetricsServiceRequest;
use crate::otlp::common::v1::InstrumentationLibrary;
use crate::otlp::metrics::v1 as otlp;
use crate::otlp::resource::v1::Resource;
use crate::utils::otlp::{
    attributes_from_current, attributes_to_current, attributes_to_labels, labels_to_attributes,
};

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("unsupported metric type {kind} for metric \"{name}\"")]
    UnsupportedMetricType { kind: &'static str, name: String },
}

// ============================================================================
// Codec
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct V1Encoder;

impl MetricsEncoder for V1Encoder {
    type Model = V1Request;

    fn encode_metrics(&self, model: &V1Request) -> Result<Vec<u8>, BoxError> {
        Ok(model.encode_to_vec())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct V1Decoder;

impl MetricsDecoder for V1Decoder {
    type Model = V1Request;

    fn decode_metrics(&self, bytes: &[u8]) -> Result<V1Request, BoxError> {
        Ok(V1Request::decode(bytes)?)
    }
}

/// Maps between the current schema and canonical metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct V1Translator;

impl FromMetricsTranslator for V1Translator {
    type Model = V1Request;

    fn from_metrics<'a>(&self, metrics: &'a Metrics) -> Result<Cow<'a, V1Request>, BoxError> {
        Ok(Cow::Owned(lower_request(metrics.as_otlp())))
    }
}

impl ToMetricsTranslator for V1Translator {
    type Model = V1Request;

    fn to_metrics(&self, model: V1Request) -> Result<Metrics, BoxError> {
        Ok(Metrics::from_otlp(lift_request(&model)?))
    }
}

pub fn marshaler() -> Marshaler<V1Encoder, V1Translator> {
    Marshaler::new(V1Encoder, V1Translator)
}

pub fn unmarshaler() -> Unmarshaler<V1Decoder, V1Translator> {
    Unmarshaler::new(V1Decoder, V1Translator)
}

// ============================================================================
// Canonical -> current
// ============================================================================

fn lower_request(request: &ExportMetricsServiceRequest) -> V1Request {
    V1Request {
        resource_metrics: request
            .resource_metrics
            .iter()
            .map(lower_resource_metrics)
            .collect(),
    }
}

fn lower_resource_metrics(rm: &otlp::ResourceMetrics) -> v1::ResourceMetrics {
    v1::ResourceMetrics {
        resource: rm.resource.as_ref().map(|r| V1Resource {
            attributes: attributes_to_current(&r.attributes),
            dropped_attributes_count: r.dropped_attributes_count,
            ..Default::default()
        }),
        scope_metrics: rm
            .instrumentation_library_metrics
            .iter()
            .map(|ilm| v1::ScopeMetrics {
                scope: ilm
                    .instrumentation_library
                    .as_ref()
                    .map(|lib| InstrumentationScope {
                        name: lib.name.clone(),
                        version: lib.version.clone(),
                        ..Default::default()
                    }),
                metrics: ilm.metrics.iter().map(lower_metric).collect(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

fn lower_metric(metric: &otlp::Metric) -> v1::Metric {
    use otlp::metric::Data;
    use v1::metric::Data as V1Data;

    let data = metric.data.as_ref().map(|data| match data {
        Data::IntGauge(g) => V1Data::Gauge(v1::Gauge {
            data_points: g.data_points.iter().map(lower_int_point).collect(),
        }),
        Data::DoubleGauge(g) => V1Data::Gauge(v1::Gauge {
            data_points: g.data_points.iter().map(lower_double_point).collect(),
        }),
        Data::IntSum(s) => V1Data::Sum(v1::Sum {
            data_points: s.data_points.iter().map(lower_int_point).collect(),
            aggregation_temporality: s.aggregation_temporality,
            is_monotonic: s.is_monotonic,
        }),
        Data::DoubleSum(s) => V1Data::Sum(v1::Sum {
            data_points: s.data_points.iter().map(lower_double_point).collect(),
            aggregation_temporality: s.aggregation_temporality,
            is_monotonic: s.is_monotonic,
        }),
        Data::IntHistogram(h) => V1Data::Histogram(v1::Histogram {
            data_points: h.data_points.iter().map(lower_int_histogram_point).collect(),
            aggregation_temporality: h.aggregation_temporality,
        }),
        Data::DoubleHistogram(h) => V1Data::Histogram(v1::Histogram {
            data_points: h.data_points.iter().map(lower_histogram_point).collect(),
            aggregation_temporality: h.aggregation_temporality,
        }),
        Data::DoubleSummary(s) => V1Data::Summary(v1::Summary {
            data_points: s.data_points.iter().map(lower_summary_point).collect(),
        }),
    });

    v1::Metric {
        name: metric.name.clone(),
        description: metric.description.clone(),
        unit: metric.unit.clone(),
        data,
        ..Default::default()
    }
}

fn lower_int_point(p: &otlp::IntDataPoint) -> v1::NumberDataPoint {
    v1::NumberDataPoint {
        attributes: labels_to_attributes(&p.labels),
        start_time_unix_nano: p.start_time_unix_nano,
        time_unix_nano: p.time_unix_nano,
        exemplars: p.exemplars.iter().map(lower_int_exemplar).collect(),
        value: Some(v1::number_data_point::Value::AsInt(p.value)),
        ..Default::default()
    }
}

fn lower_double_point(p: &otlp::DoubleDataPoint) -> v1::NumberDataPoint {
    v1::NumberDataPoint {
        attributes: labels_to_attributes(&p.labels),
        start_time_unix_nano: p.start_time_unix_nano,
        time_unix_nano: p.time_unix_nano,
        exemplars: p.exemplars.iter().map(lower_double_exemplar).collect(),
        value: Some(v1::number_data_point::Value::AsDouble(p.value)),
        ..Default::default()
    }
}

fn lower_int_histogram_point(p: &otlp::IntHistogramDataPoint) -> v1::HistogramDataPoint {
    v1::HistogramDataPoint {
        attributes: labels_to_attributes(&p.labels),
        start_time_unix_nano: p.start_time_unix_nano,
        time_unix_nano: p.time_unix_nano,
        count: p.count,
        sum: Some(p.sum as f64),
        bucket_counts: p.bucket_counts.clone(),
        explicit_bounds: p.explicit_bounds.clone(),
        exemplars: p.exemplars.iter().map(lower_int_exemplar).collect(),
        ..Default::default()
    }
}

fn lower_histogram_point(p: &otlp::DoubleHistogramDataPoint) -> v1::HistogramDataPoint {
    v1::HistogramDataPoint {
        attributes: labels_to_attributes(&p.labels),
        start_time_unix_nano: p.start_time_unix_nano,
        time_unix_nano: p.time_unix_nano,
        count: p.count,
        sum: Some(p.sum),
        bucket_counts: p.bucket_counts.clone(),
        explicit_bounds: p.explicit_bounds.clone(),
        exemplars: p.exemplars.iter().map(lower_double_exemplar).collect(),
        ..Default::default()
    }
}

fn lower_summary_point(p: &otlp::DoubleSummaryDataPoint) -> v1::SummaryDataPoint {
    v1::SummaryDataPoint {
        attributes: labels_to_attributes(&p.labels),
        start_time_unix_nano: p.start_time_unix_nano,
        time_unix_nano: p.time_unix_nano,
        count: p.count,
        sum: p.sum,
        quantile_values: p
            .quantile_values
            .iter()
            .map(|q| v1::summary_data_point::ValueAtQuantile {
                quantile: q.quantile,
                value: q.value,
            })
            .collect(),
        ..Default::default()
    }
}

fn lower_int_exemplar(e: &otlp::IntExemplar) -> v1::Exemplar {
    v1::Exemplar {
        filtered_attributes: labels_to_attributes(&e.filtered_labels),
        time_unix_nano: e.time_unix_nano,
        span_id: e.span_id.clone(),
        trace_id: e.trace_id.clone(),
        value: Some(v1::exemplar::Value::AsInt(e.value)),
        ..Default::default()
    }
}

fn lower_double_exemplar(e: &otlp::DoubleExemplar) -> v1::Exemplar {
    v1::Exemplar {
        filtered_attributes: labels_to_attributes(&e.filtered_labels),
        time_unix_nano: e.time_unix_nano,
        span_id: e.span_id.clone(),
        trace_id: e.trace_id.clone(),
        value: Some(v1::exemplar::Value::AsDouble(e.value)),
        ..Default::default()
    }
}

// ============================================================================
// Current -> canonical
// ============================================================================

fn lift_request(request: &V1Request) -> Result<ExportMetricsServiceRequest, TranslateError> {
    let resource_metrics = request
        .resource_metrics
        .iter()
        .map(lift_resource_metrics)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ExportMetricsServiceRequest { resource_metrics })
}

fn lift_resource_metrics(
    rm: &v1::ResourceMetrics,
) -> Result<otlp::ResourceMetrics, TranslateError> {
    let mut instrumentation_library_metrics = Vec::with_capacity(rm.scope_metrics.len());
    for sm in &rm.scope_metrics {
        let metrics = sm
            .metrics
            .iter()
            .map(lift_metric)
            .collect::<Result<Vec<_>, _>>()?;
        instrumentation_library_metrics.push(otlp::InstrumentationLibraryMetrics {
            instrumentation_library: sm.scope.as_ref().map(|scope| InstrumentationLibrary {
                name: scope.name.clone(),
                version: scope.version.clone(),
            }),
            metrics,
        });
    }

    Ok(otlp::ResourceMetrics {
        resource: rm.resource.as_ref().map(|r| Resource {
            attributes: attributes_from_current(&r.attributes),
            dropped_attributes_count: r.dropped_attributes_count,
        }),
        instrumentation_library_metrics,
    })
}

fn lift_metric(metric: &v1::Metric) -> Result<otlp::Metric, TranslateError> {
    use otlp::metric::Data;
    use v1::metric::Data as V1Data;

    let data = match &metric.data {
        None => None,
        Some(V1Data::Gauge(g)) => Some(if all_int(&g.data_points) {
            Data::IntGauge(otlp::IntGauge {
                data_points: g.data_points.iter().map(lift_int_point).collect(),
            })
        } else {
            Data::DoubleGauge(otlp::DoubleGauge {
                data_points: g.data_points.iter().map(lift_double_point).collect(),
            })
        }),
        Some(V1Data::Sum(s)) => Some(if all_int(&s.data_points) {
            Data::IntSum(otlp::IntSum {
                data_points: s.data_points.iter().map(lift_int_point).collect(),
                aggregation_temporality: s.aggregation_temporality,
                is_monotonic: s.is_monotonic,
            })
        } else {
            Data::DoubleSum(otlp::DoubleSum {
                data_points: s.data_points.iter().map(lift_double_point).collect(),
                aggregation_temporality: s.aggregation_temporality,
                is_monotonic: s.is_monotonic,
            })
        }),
        Some(V1Data::Histogram(h)) => Some(Data::DoubleHistogram(otlp::DoubleHistogram {
            data_points: h.data_points.iter().map(lift_histogram_point).collect(),
            aggregation_temporality: h.aggregation_temporality,
        })),
        Some(V1Data::Summary(s)) => Some(Data::DoubleSummary(otlp::DoubleSummary {
            data_points: s.data_points.iter().map(lift_summary_point).collect(),
        })),
        Some(V1Data::ExponentialHistogram(_)) => {
            return Err(TranslateError::UnsupportedMetricType {
                kind: "ExponentialHistogram",
                name: metric.name.clone(),
            });
        }
    };

    Ok(otlp::Metric {
        name: metric.name.clone(),
        description: metric.description.clone(),
        unit: metric.unit.clone(),
        data,
    })
}

fn all_int(points: &[v1::NumberDataPoint]) -> bool {
    !points.is_empty()
        && points
            .iter()
            .all(|p| matches!(p.value, Some(v1::number_data_point::Value::AsInt(_))))
}

fn number_as_f64(value: Option<&v1::number_data_point::Value>) -> f64 {
    match value {
        Some(v1::number_data_point::Value::AsDouble(d)) => *d,
        Some(v1::number_data_point::Value::AsInt(i)) => *i as f64,
        None => 0.0,
    }
}

fn lift_int_point(p: &v1::NumberDataPoint) -> otlp::IntDataPoint {
    let value = match p.value {
        Some(v1::number_data_point::Value::AsInt(i)) => i,
        _ => 0,
    };
    otlp::IntDataPoint {
        labels: attributes_to_labels(&p.attributes),
        start_time_unix_nano: p.start_time_unix_nano,
        time_unix_nano: p.time_unix_nano,
        value,
        exemplars: p.exemplars.iter().map(lift_int_exemplar).collect(),
    }
}

fn lift_double_point(p: &v1::NumberDataPoint) -> otlp::DoubleDataPoint {
    otlp::DoubleDataPoint {
        labels: attributes_to_labels(&p.attributes),
        start_time_unix_nano: p.start_time_unix_nano,
        time_unix_nano: p.time_unix_nano,
        value: number_as_f64(p.value.as_ref()),
        exemplars: p.exemplars.iter().map(lift_double_exemplar).collect(),
    }
}

fn lift_histogram_point(p: &v1::HistogramDataPoint) -> otlp::DoubleHistogramDataPoint {
    otlp::DoubleHistogramDataPoint {
        labels: attributes_to_labels(&p.attributes),
        start_time_unix_nano: p.start_time_unix_nano,
        time_unix_nano: p.time_unix_nano,
        count: p.count,
        sum: p.sum.unwrap_or(0.0),
        bucket_counts: p.bucket_counts.clone(),
        explicit_bounds: p.explicit_bounds.clone(),
        exemplars: p.exemplars.iter().map(lift_double_exemplar).collect(),
    }
}

fn lift_summary_point(p: &v1::SummaryDataPoint) -> otlp::DoubleSummaryDataPoint {
    otlp::DoubleSummaryDataPoint {
        labels: attributes_to_labels(&p.attributes),
        start_time_unix_nano: p.start_time_unix_nano,
        time_unix_nano: p.time_unix_nano,
        count: p.count,
        sum: p.sum,
        quantile_values: p
            .quantile_values
            .iter()
            .map(|q| otlp::double_summary_data_point::ValueAtQuantile {
                quantile: q.quantile,
                value: q.value,
            })
            .collect(),
    }
}

fn lift_int_exemplar(e: &v1::Exemplar) -> otlp::IntExemplar {
    let value = match e.value {
        Some(v1::exemplar::Value::AsInt(i)) => i,
        Some(v1::exemplar::Value::AsDouble(d)) => d as i64,
        None => 0,
    };
    otlp::IntExemplar {
        filtered_labels: attributes_to_labels(&e.filtered_attributes),
        time_unix_nano: e.time_unix_nano,
        value,
        span_id: e.span_id.clone(),
        trace_id: e.trace_id.clone(),
    }
}

fn lift_double_exemplar(e: &v1::Exemplar) -> otlp::DoubleExemplar {
    let value = match e.value {
        Some(v1::exemplar::Value::AsDouble(d)) => d,
        Some(v1::exemplar::Value::AsInt(i)) => i as f64,
        None => 0.0,
    };
    otlp::DoubleExemplar {
        filtered_labels: attributes_to_labels(&e.filtered_attributes),
        time_unix_nano: e.time_unix_nano,
        value,
        span_id: e.span_id.clone(),
        trace_id: e.trace_id.clone(),
    }
}
