//! Canonical in-memory OTLP metrics.
//!
//! [`Metrics`] owns a metrics tree and hands out borrowed views over each
//! level of it. Wire formats plug in through the traits in [`marshal`]; the
//! formats shipped with the crate live in [`codec`].
//!
//! ```
//! use pdata::{AggregationTemporality, MetricDataType, Metrics};
//!
//! let mut md = Metrics::new();
//! let mut resources = md.resource_metrics_mut();
//! let mut rm = resources.append_empty();
//! let mut libraries = rm.instrumentation_library_metrics_mut();
//! let mut ilm = libraries.append_empty();
//! let mut metrics = ilm.metrics_mut();
//! let mut metric = metrics.append_empty();
//! metric.set_name("requests");
//! metric.set_data_type(MetricDataType::IntSum);
//! let mut sum = metric.int_sum_mut();
//! sum.set_aggregation_temporality(AggregationTemporality::Cumulative);
//! sum.data_points_mut().append_empty().set_value(1);
//!
//! assert_eq!(md.metric_and_data_point_count(), (1, 1));
//! let bytes = md.to_otlp_proto_bytes().unwrap();
//! assert_eq!(Metrics::from_otlp_proto_bytes(&bytes).unwrap(), md);
//! ```

#[macro_use]
mod macros;

pub mod codec;
pub mod common;
pub mod error;
pub mod marshal;
pub mod metrics;
pub mod otlp;
pub mod utils;

pub use codec::Format;
pub use common::{
    AttributeMap, AttributeMapMut, AttributeValue, InstrumentationLibrary,
    InstrumentationLibraryMut, Resource, ResourceMut, StringMap, StringMapMut,
};
pub use error::{BoxError, PdataError};
pub use marshal::{
    FromMetricsTranslator, Marshaler, MetricsDecoder, MetricsEncoder, MetricsMarshaler,
    MetricsUnmarshaler, ToMetricsTranslator, Unmarshaler,
};
pub use metrics::{AggregationTemporality, MetricDataType, Metrics};
