use std::collections::BTreeMap;
use std::fmt;

use pdata::{Format, Metrics};
use serde::Serialize;

/// Summary of a decoded payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub format: Format,
    pub input_bytes: usize,
    pub resources: usize,
    pub metrics: usize,
    pub data_points: usize,
    /// Size of the canonical protobuf encoding
    pub otlp_proto_size: usize,
    /// Metric count per data type, omitting types with no metrics
    pub data_types: BTreeMap<&'static str, usize>,
}

impl InspectReport {
    pub fn new(format: Format, input_bytes: usize, md: &Metrics) -> Self {
        let (metrics, data_points) = md.metric_and_data_point_count();
        let mut data_types = BTreeMap::new();
        for metric in md.metrics() {
            *data_types.entry(metric.data_type().as_str()).or_insert(0) += 1;
        }
        Self {
            format,
            input_bytes,
            resources: md.resource_metrics_count(),
            metrics,
            data_points,
            otlp_proto_size: md.otlp_proto_size(),
            data_types,
        }
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "format:          {}", self.format)?;
        writeln!(f, "input bytes:     {}", self.input_bytes)?;
        writeln!(f, "resources:       {}", self.resources)?;
        writeln!(f, "metrics:         {}", self.metrics)?;
        writeln!(f, "data points:     {}", self.data_points)?;
        write!(f, "otlp proto size: {}", self.otlp_proto_size)?;
        for (data_type, count) in &self.data_types {
            write!(f, "\n  {data_type}: {count}")?;
        }
        Ok(())
    }
}
