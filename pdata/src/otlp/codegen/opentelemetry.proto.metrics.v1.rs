/// A collection of InstrumentationLibraryMetrics from a Resource.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceMetrics {
    /// The resource for the metrics in this message.
    /// If this field is not set then no resource info is known.
    #[prost(message, optional, tag="1")]
    pub resource: ::core::option::Option<super::super::resource::v1::Resource>,
    /// A list of metrics that originate from a resource.
    #[prost(message, repeated, tag="2")]
    pub instrumentation_library_metrics: ::prost::alloc::vec::Vec<InstrumentationLibraryMetrics>,
}
/// A collection of Metrics produced by an InstrumentationLibrary.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstrumentationLibraryMetrics {
    /// The instrumentation library information for the metrics in this message.
    /// Semantically when InstrumentationLibrary isn't set, it is equivalent with
    /// an empty instrumentation library name (unknown).
    #[prost(message, optional, tag="1")]
    pub instrumentation_library: ::core::option::Option<super::super::common::v1::InstrumentationLibrary>,
    /// A list of metrics that originate from an instrumentation library.
    #[prost(message, repeated, tag="2")]
    pub metrics: ::prost::alloc::vec::Vec<Metric>,
}
/// Defines a Metric which has one or more timeseries.
///
/// - Metric is composed of a metadata and data.
/// - Metadata part contains a name, description, unit.
/// - Data is one of the possible types (Gauge, Sum, Histogram, etc.).
/// - DataPoint contains timestamps, labels, and one of the possible value type
///   fields.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metric {
    /// name of the metric, including its DNS name prefix. It must be unique.
    #[prost(string, tag="1")]
    pub name: ::prost::alloc::string::String,
    /// description of the metric, which can be used in documentation.
    #[prost(string, tag="2")]
    pub description: ::prost::alloc::string::String,
    /// unit in which the metric value is reported. Follows the format
    /// described by <http://unitsofmeasure.org/ucum.html.>
    #[prost(string, tag="3")]
    pub unit: ::prost::alloc::string::String,
    /// Data determines the aggregation type (if any) of the metric, what is the
    /// reported value type for the data points, as well as the relatationship to
    /// the time interval over which they are reported.
    #[prost(oneof="metric::Data", tags="4, 5, 6, 7, 8, 9, 11")]
    #[serde(flatten, deserialize_with = "crate::otlp::json::metric_data")]
    pub data: ::core::option::Option<metric::Data>,
}
/// Nested message and enum types in `Metric`.
pub mod metric {
    /// Data determines the aggregation type (if any) of the metric, what is the
    /// reported value type for the data points, as well as the relatationship to
    /// the time interval over which they are reported.
    #[derive(Clone, PartialEq, ::prost::Oneof, ::serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    pub enum Data {
        #[prost(message, tag="4")]
        IntGauge(super::IntGauge),
        #[prost(message, tag="5")]
        DoubleGauge(super::DoubleGauge),
        #[prost(message, tag="6")]
        IntSum(super::IntSum),
        #[prost(message, tag="7")]
        DoubleSum(super::DoubleSum),
        #[prost(message, tag="8")]
        IntHistogram(super::IntHistogram),
        #[prost(message, tag="9")]
        DoubleHistogram(super::DoubleHistogram),
        #[prost(message, tag="11")]
        DoubleSummary(super::DoubleSummary),
    }
}
/// Gauge represents the type of a int scalar metric that always exports the
/// "current value" for every data point. It should be used for an "unknown"
/// aggregation.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntGauge {
    #[prost(message, repeated, tag="1")]
    pub data_points: ::prost::alloc::vec::Vec<IntDataPoint>,
}
/// Gauge represents the type of a double scalar metric that always exports the
/// "current value" for every data point. It should be used for an "unknown"
/// aggregation.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoubleGauge {
    #[prost(message, repeated, tag="1")]
    pub data_points: ::prost::alloc::vec::Vec<DoubleDataPoint>,
}
/// Sum represents the type of a numeric int scalar metric that is calculated as
/// a sum of all reported measurements over a time interval.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntSum {
    #[prost(message, repeated, tag="1")]
    pub data_points: ::prost::alloc::vec::Vec<IntDataPoint>,
    /// aggregation_temporality describes if the aggregator reports delta changes
    /// since last report time, or cumulative changes since a fixed start time.
    #[prost(enumeration="AggregationTemporality", tag="2")]
    pub aggregation_temporality: i32,
    /// If "true" means that the sum is monotonic.
    #[prost(bool, tag="3")]
    pub is_monotonic: bool,
}
/// Sum represents the type of a numeric double scalar metric that is calculated
/// as a sum of all reported measurements over a time interval.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoubleSum {
    #[prost(message, repeated, tag="1")]
    pub data_points: ::prost::alloc::vec::Vec<DoubleDataPoint>,
    /// aggregation_temporality describes if the aggregator reports delta changes
    /// since last report time, or cumulative changes since a fixed start time.
    #[prost(enumeration="AggregationTemporality", tag="2")]
    pub aggregation_temporality: i32,
    /// If "true" means that the sum is monotonic.
    #[prost(bool, tag="3")]
    pub is_monotonic: bool,
}
/// Represents the type of a metric that is calculated by aggregating as a
/// Histogram of all reported int measurements over a time interval.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntHistogram {
    #[prost(message, repeated, tag="1")]
    pub data_points: ::prost::alloc::vec::Vec<IntHistogramDataPoint>,
    /// aggregation_temporality describes if the aggregator reports delta changes
    /// since last report time, or cumulative changes since a fixed start time.
    #[prost(enumeration="AggregationTemporality", tag="2")]
    pub aggregation_temporality: i32,
}
/// Represents the type of a metric that is calculated by aggregating as a
/// Histogram of all reported double measurements over a time interval.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoubleHistogram {
    #[prost(message, repeated, tag="1")]
    pub data_points: ::prost::alloc::vec::Vec<DoubleHistogramDataPoint>,
    /// aggregation_temporality describes if the aggregator reports delta changes
    /// since last report time, or cumulative changes since a fixed start time.
    #[prost(enumeration="AggregationTemporality", tag="2")]
    pub aggregation_temporality: i32,
}
/// DoubleSummary metric data are used to convey quantile summaries,
/// a Prometheus (see: <https://prometheus.io/docs/concepts/metric_types/#summary>)
/// and OpenMetrics (see: <https://github.com/OpenObservability/OpenMetrics/blob/4dbf6075567ab43296eed941037c12951faafb92/protos/prometheus.proto#L45>)
/// data type. These data points cannot always be merged in a meaningful way.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoubleSummary {
    #[prost(message, repeated, tag="1")]
    pub data_points: ::prost::alloc::vec::Vec<DoubleSummaryDataPoint>,
}
/// IntDataPoint is a single data point in a timeseries that describes the
/// time-varying values of a int64 metric.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntDataPoint {
    /// The set of labels that uniquely identify this timeseries.
    #[prost(message, repeated, tag="1")]
    pub labels: ::prost::alloc::vec::Vec<super::super::common::v1::StringKeyValue>,
    /// start_time_unix_nano is the last time when the aggregation value was reset
    /// to "zero". For some metric types this is ignored, see data types for more
    /// details.
    #[prost(fixed64, tag="2")]
    #[serde(with = "crate::otlp::json::int64")]
    pub start_time_unix_nano: u64,
    /// time_unix_nano is the moment when this aggregation value was reported.
    #[prost(fixed64, tag="3")]
    #[serde(with = "crate::otlp::json::int64")]
    pub time_unix_nano: u64,
    /// value itself.
    #[prost(sfixed64, tag="4")]
    #[serde(with = "crate::otlp::json::int64")]
    pub value: i64,
    /// (Optional) List of exemplars collected from
    /// measurements that were used to form the data point
    #[prost(message, repeated, tag="5")]
    pub exemplars: ::prost::alloc::vec::Vec<IntExemplar>,
}
/// DoubleDataPoint is a single data point in a timeseries that describes the
/// time-varying value of a double metric.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoubleDataPoint {
    /// The set of labels that uniquely identify this timeseries.
    #[prost(message, repeated, tag="1")]
    pub labels: ::prost::alloc::vec::Vec<super::super::common::v1::StringKeyValue>,
    /// start_time_unix_nano is the last time when the aggregation value was reset
    /// to "zero". For some metric types this is ignored, see data types for more
    /// details.
    #[prost(fixed64, tag="2")]
    #[serde(with = "crate::otlp::json::int64")]
    pub start_time_unix_nano: u64,
    /// time_unix_nano is the moment when this aggregation value was reported.
    #[prost(fixed64, tag="3")]
    #[serde(with = "crate::otlp::json::int64")]
    pub time_unix_nano: u64,
    /// value itself.
    #[prost(double, tag="4")]
    #[serde(with = "crate::otlp::json::double")]
    pub value: f64,
    /// (Optional) List of exemplars collected from
    /// measurements that were used to form the data point
    #[prost(message, repeated, tag="5")]
    pub exemplars: ::prost::alloc::vec::Vec<DoubleExemplar>,
}
/// IntHistogramDataPoint is a single data point in a timeseries that describes
/// the time-varying values of a Histogram of int values. A Histogram contains
/// summary statistics for a population of values, it may optionally contain
/// the distribution of those values across a set of buckets.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntHistogramDataPoint {
    /// The set of labels that uniquely identify this timeseries.
    #[prost(message, repeated, tag="1")]
    pub labels: ::prost::alloc::vec::Vec<super::super::common::v1::StringKeyValue>,
    #[prost(fixed64, tag="2")]
    #[serde(with = "crate::otlp::json::int64")]
    pub start_time_unix_nano: u64,
    #[prost(fixed64, tag="3")]
    #[serde(with = "crate::otlp::json::int64")]
    pub time_unix_nano: u64,
    /// count is the number of values in the population. Must be non-negative. This
    /// value must be equal to the sum of the "count" fields in buckets if a
    /// histogram is provided.
    #[prost(fixed64, tag="4")]
    #[serde(with = "crate::otlp::json::int64")]
    pub count: u64,
    /// sum of the values in the population. If count is zero then this field
    /// must be zero.
    #[prost(sfixed64, tag="5")]
    #[serde(with = "crate::otlp::json::int64")]
    pub sum: i64,
    /// bucket_counts is an optional field contains the count values of histogram
    /// for each bucket.
    ///
    /// The number of elements in bucket_counts array must be by one greater than
    /// the number of elements in explicit_bounds array.
    #[prost(fixed64, repeated, tag="6")]
    #[serde(with = "crate::otlp::json::int64_vec")]
    pub bucket_counts: ::prost::alloc::vec::Vec<u64>,
    /// explicit_bounds specifies buckets with explicitly defined bounds for values.
    #[prost(double, repeated, tag="7")]
    #[serde(with = "crate::otlp::json::double_vec")]
    pub explicit_bounds: ::prost::alloc::vec::Vec<f64>,
    /// (Optional) List of exemplars collected from
    /// measurements that were used to form the data point
    #[prost(message, repeated, tag="8")]
    pub exemplars: ::prost::alloc::vec::Vec<IntExemplar>,
}
/// HistogramDataPoint is a single data point in a timeseries that describes the
/// time-varying values of a Histogram of double values. A Histogram contains
/// summary statistics for a population of values, it may optionally contain the
/// distribution of those values across a set of buckets.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoubleHistogramDataPoint {
    /// The set of labels that uniquely identify this timeseries.
    #[prost(message, repeated, tag="1")]
    pub labels: ::prost::alloc::vec::Vec<super::super::common::v1::StringKeyValue>,
    #[prost(fixed64, tag="2")]
    #[serde(with = "crate::otlp::json::int64")]
    pub start_time_unix_nano: u64,
    #[prost(fixed64, tag="3")]
    #[serde(with = "crate::otlp::json::int64")]
    pub time_unix_nano: u64,
    /// count is the number of values in the population. Must be non-negative. This
    /// value must be equal to the sum of the "count" fields in buckets if a
    /// histogram is provided.
    #[prost(fixed64, tag="4")]
    #[serde(with = "crate::otlp::json::int64")]
    pub count: u64,
    /// sum of the values in the population. If count is zero then this field
    /// must be zero.
    #[prost(double, tag="5")]
    #[serde(with = "crate::otlp::json::double")]
    pub sum: f64,
    /// bucket_counts is an optional field contains the count values of histogram
    /// for each bucket.
    #[prost(fixed64, repeated, tag="6")]
    #[serde(with = "crate::otlp::json::int64_vec")]
    pub bucket_counts: ::prost::alloc::vec::Vec<u64>,
    /// explicit_bounds specifies buckets with explicitly defined bounds for values.
    #[prost(double, repeated, tag="7")]
    #[serde(with = "crate::otlp::json::double_vec")]
    pub explicit_bounds: ::prost::alloc::vec::Vec<f64>,
    /// (Optional) List of exemplars collected from
    /// measurements that were used to form the data point
    #[prost(message, repeated, tag="8")]
    pub exemplars: ::prost::alloc::vec::Vec<DoubleExemplar>,
}
/// DoubleSummaryDataPoint is a single data point in a timeseries that describes the
/// time-varying values of a Summary metric.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoubleSummaryDataPoint {
    /// The set of labels that uniquely identify this timeseries.
    #[prost(message, repeated, tag="1")]
    pub labels: ::prost::alloc::vec::Vec<super::super::common::v1::StringKeyValue>,
    #[prost(fixed64, tag="2")]
    #[serde(with = "crate::otlp::json::int64")]
    pub start_time_unix_nano: u64,
    #[prost(fixed64, tag="3")]
    #[serde(with = "crate::otlp::json::int64")]
    pub time_unix_nano: u64,
    /// count is the number of values in the population. Must be non-negative.
    #[prost(fixed64, tag="4")]
    #[serde(with = "crate::otlp::json::int64")]
    pub count: u64,
    /// sum of the values in the population. If count is zero then this field
    /// must be zero.
    #[prost(double, tag="5")]
    #[serde(with = "crate::otlp::json::double")]
    pub sum: f64,
    /// (Optional) list of values at different quantiles of the distribution calculated
    /// from the current snapshot. The quantiles must be strictly increasing.
    #[prost(message, repeated, tag="6")]
    pub quantile_values: ::prost::alloc::vec::Vec<double_summary_data_point::ValueAtQuantile>,
}
/// Nested message and enum types in `DoubleSummaryDataPoint`.
pub mod double_summary_data_point {
    /// Represents the value at a given quantile of a distribution.
    #[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct ValueAtQuantile {
        /// The quantile of a distribution. Must be in the interval
        /// [0.0, 1.0].
        #[prost(double, tag="1")]
        #[serde(with = "crate::otlp::json::double")]
        pub quantile: f64,
        /// The value at the given quantile of a distribution.
        #[prost(double, tag="2")]
        #[serde(with = "crate::otlp::json::double")]
        pub value: f64,
    }
}
/// A representation of an exemplar, which is a sample input int measurement.
/// Exemplars also hold information about the environment when the measurement
/// was recorded, for example the span and trace ID of the active span when the
/// exemplar was recorded.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntExemplar {
    /// The set of labels that were filtered out by the aggregator, but recorded
    /// alongside the original measurement. Only labels that were filtered out
    /// by the aggregator should be included
    #[prost(message, repeated, tag="1")]
    pub filtered_labels: ::prost::alloc::vec::Vec<super::super::common::v1::StringKeyValue>,
    /// time_unix_nano is the exact time when this exemplar was recorded
    #[prost(fixed64, tag="2")]
    #[serde(with = "crate::otlp::json::int64")]
    pub time_unix_nano: u64,
    /// Numerical int value of the measurement that was recorded.
    #[prost(sfixed64, tag="3")]
    #[serde(with = "crate::otlp::json::int64")]
    pub value: i64,
    /// (Optional) Span ID of the exemplar trace.
    /// span_id may be missing if the measurement is not recorded inside a trace
    /// or if the trace is not sampled.
    #[prost(bytes="vec", tag="4")]
    #[serde(with = "crate::otlp::json::hex_bytes")]
    pub span_id: ::prost::alloc::vec::Vec<u8>,
    /// (Optional) Trace ID of the exemplar trace.
    /// trace_id may be missing if the measurement is not recorded inside a trace
    /// or if the trace is not sampled.
    #[prost(bytes="vec", tag="5")]
    #[serde(with = "crate::otlp::json::hex_bytes")]
    pub trace_id: ::prost::alloc::vec::Vec<u8>,
}
/// A representation of an exemplar, which is a sample input double measurement.
/// Exemplars also hold information about the environment when the measurement
/// was recorded, for example the span and trace ID of the active span when the
/// exemplar was recorded.
#[derive(Clone, PartialEq, ::prost::Message, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoubleExemplar {
    /// The set of labels that were filtered out by the aggregator, but recorded
    /// alongside the original measurement. Only labels that were filtered out
    /// by the aggregator should be included
    #[prost(message, repeated, tag="1")]
    pub filtered_labels: ::prost::alloc::vec::Vec<super::super::common::v1::StringKeyValue>,
    /// time_unix_nano is the exact time when this exemplar was recorded
    #[prost(fixed64, tag="2")]
    #[serde(with = "crate::otlp::json::int64")]
    pub time_unix_nano: u64,
    /// Numerical double value of the measurement that was recorded.
    #[prost(double, tag="3")]
    #[serde(with = "crate::otlp::json::double")]
    pub value: f64,
    /// (Optional) Span ID of the exemplar trace.
    #[prost(bytes="vec", tag="4")]
    #[serde(with = "crate::otlp::json::hex_bytes")]
    pub span_id: ::prost::alloc::vec::Vec<u8>,
    /// (Optional) Trace ID of the exemplar trace.
    #[prost(bytes="vec", tag="5")]
    #[serde(with = "crate::otlp::json::hex_bytes")]
    pub trace_id: ::prost::alloc::vec::Vec<u8>,
}
/// AggregationTemporality defines how a metric aggregator reports aggregated
/// values. It describes how those values relate to the time interval over
/// which they are aggregated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum AggregationTemporality {
    /// UNSPECIFIED is the default AggregationTemporality, it MUST not be used.
    Unspecified = 0,
    /// DELTA is an AggregationTemporality for a metric aggregator which reports
    /// changes since last report time.
    Delta = 1,
    /// CUMULATIVE is an AggregationTemporality for a metric aggregator which
    /// reports changes since a fixed start time.
    Cumulative = 2,
}
