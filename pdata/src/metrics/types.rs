//! Discriminants for metric shapes and aggregation temporality

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which metric shape is currently stored in a `Metric`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MetricDataType {
    #[default]
    None,
    IntGauge,
    DoubleGauge,
    IntSum,
    DoubleSum,
    IntHistogram,
    Histogram,
    Summary,
}

impl MetricDataType {
    pub const ALL: [MetricDataType; 8] = [
        Self::None,
        Self::IntGauge,
        Self::DoubleGauge,
        Self::IntSum,
        Self::DoubleSum,
        Self::IntHistogram,
        Self::Histogram,
        Self::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::IntGauge => "IntGauge",
            Self::DoubleGauge => "DoubleGauge",
            Self::IntSum => "IntSum",
            Self::DoubleSum => "DoubleSum",
            Self::IntHistogram => "IntHistogram",
            Self::Histogram => "Histogram",
            Self::Summary => "Summary",
        }
    }
}

impl fmt::Display for MetricDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How reported values relate to the interval they were aggregated over.
///
/// `Unspecified` must not appear in a valid payload, but rejecting it is left
/// to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationTemporality {
    #[default]
    Unspecified,
    /// Values are changes since the last report.
    Delta,
    /// Values are changes since a fixed start time.
    Cumulative,
}

impl AggregationTemporality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "AGGREGATION_TEMPORALITY_UNSPECIFIED",
            Self::Delta => "AGGREGATION_TEMPORALITY_DELTA",
            Self::Cumulative => "AGGREGATION_TEMPORALITY_CUMULATIVE",
        }
    }

    /// Maps a wire value; unknown values read as `Unspecified`.
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => Self::Delta,
            2 => Self::Cumulative,
            _ => Self::Unspecified,
        }
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Unspecified => 0,
            Self::Delta => 1,
            Self::Cumulative => 2,
        }
    }
}

impl fmt::Display for AggregationTemporality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_data_type_display() {
        assert_eq!(MetricDataType::None.to_string(), "None");
        assert_eq!(MetricDataType::IntGauge.to_string(), "IntGauge");
        assert_eq!(MetricDataType::DoubleGauge.to_string(), "DoubleGauge");
        assert_eq!(MetricDataType::IntSum.to_string(), "IntSum");
        assert_eq!(MetricDataType::DoubleSum.to_string(), "DoubleSum");
        assert_eq!(MetricDataType::IntHistogram.to_string(), "IntHistogram");
        assert_eq!(MetricDataType::Histogram.to_string(), "Histogram");
        assert_eq!(MetricDataType::Summary.to_string(), "Summary");
    }

    #[test]
    fn test_aggregation_temporality_as_str() {
        assert_eq!(
            AggregationTemporality::Unspecified.as_str(),
            "AGGREGATION_TEMPORALITY_UNSPECIFIED"
        );
        assert_eq!(
            AggregationTemporality::Delta.as_str(),
            "AGGREGATION_TEMPORALITY_DELTA"
        );
        assert_eq!(
            AggregationTemporality::Cumulative.as_str(),
            "AGGREGATION_TEMPORALITY_CUMULATIVE"
        );
    }

    #[test]
    fn test_aggregation_temporality_from_i32() {
        assert_eq!(
            AggregationTemporality::from_i32(0),
            AggregationTemporality::Unspecified
        );
        assert_eq!(
            AggregationTemporality::from_i32(1),
            AggregationTemporality::Delta
        );
        assert_eq!(
            AggregationTemporality::from_i32(2),
            AggregationTemporality::Cumulative
        );
        assert_eq!(
            AggregationTemporality::from_i32(99),
            AggregationTemporality::Unspecified
        );
    }

    #[test]
    fn test_aggregation_temporality_wire_values_match_proto() {
        use crate::otlp::metrics::v1::AggregationTemporality as Proto;

        assert_eq!(AggregationTemporality::Unspecified.as_i32(), Proto::Unspecified as i32);
        assert_eq!(AggregationTemporality::Delta.as_i32(), Proto::Delta as i32);
        assert_eq!(AggregationTemporality::Cumulative.as_i32(), Proto::Cumulative as i32);
    }
}
