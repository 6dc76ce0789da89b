//! Views over every record level below `Metrics`.
//!
//! `Metric` itself lives in `metric.rs`, which owns the variant switch.

use super::metric::{Metric, MetricMut};
use super::types::AggregationTemporality;
use crate::common::{
    EMPTY_LIBRARY, EMPTY_RESOURCE, InstrumentationLibrary, InstrumentationLibraryMut, Resource,
    ResourceMut, StringMap, StringMapMut,
};
use crate::otlp::metrics::v1 as otlp;

// ============================================================================
// Resource level
// ============================================================================

pdata_slice!(
    /// Sequence of per-resource metric groups.
    ResourceMetricsSlice,
    ResourceMetricsSliceMut,
    ResourceMetrics,
    ResourceMetricsMut,
    otlp::ResourceMetrics
);

pdata_view!(
    /// Metrics reported by a single resource.
    ResourceMetrics,
    ResourceMetricsMut,
    otlp::ResourceMetrics
);

pdata_accessors!(ResourceMetrics, ResourceMetricsMut {
    nested instrumentation_library_metrics, instrumentation_library_metrics_mut:
        InstrumentationLibraryMetricsSlice, InstrumentationLibraryMetricsSliceMut;
});

impl<'a> ResourceMetrics<'a> {
    /// Resource description; an absent resource reads as empty.
    pub fn resource(&self) -> Resource<'a> {
        Resource::new(self.orig.resource.as_ref().unwrap_or(&EMPTY_RESOURCE))
    }

    pub fn copy_to(&self, dest: &mut ResourceMetricsMut<'_>) {
        dest.orig.resource.clone_from(&self.orig.resource);
        self.instrumentation_library_metrics()
            .copy_to(&mut dest.instrumentation_library_metrics_mut());
    }
}

impl ResourceMetricsMut<'_> {
    pub fn resource(&self) -> Resource<'_> {
        self.as_view().resource()
    }

    /// Exclusive view over the resource, creating an empty one if absent.
    pub fn resource_mut(&mut self) -> ResourceMut<'_> {
        ResourceMut::new(self.orig.resource.get_or_insert_with(Default::default))
    }
}

// ============================================================================
// Instrumentation library level
// ============================================================================

pdata_slice!(
    InstrumentationLibraryMetricsSlice,
    InstrumentationLibraryMetricsSliceMut,
    InstrumentationLibraryMetrics,
    InstrumentationLibraryMetricsMut,
    otlp::InstrumentationLibraryMetrics
);

pdata_view!(
    /// Metrics produced by one instrumentation library.
    InstrumentationLibraryMetrics,
    InstrumentationLibraryMetricsMut,
    otlp::InstrumentationLibraryMetrics
);

pdata_accessors!(InstrumentationLibraryMetrics, InstrumentationLibraryMetricsMut {
    nested metrics, metrics_mut: MetricSlice, MetricSliceMut;
});

impl<'a> InstrumentationLibraryMetrics<'a> {
    pub fn instrumentation_library(&self) -> InstrumentationLibrary<'a> {
        InstrumentationLibrary::new(
            self.orig
                .instrumentation_library
                .as_ref()
                .unwrap_or(&EMPTY_LIBRARY),
        )
    }

    pub fn copy_to(&self, dest: &mut InstrumentationLibraryMetricsMut<'_>) {
        dest.orig
            .instrumentation_library
            .clone_from(&self.orig.instrumentation_library);
        self.metrics().copy_to(&mut dest.metrics_mut());
    }
}

impl InstrumentationLibraryMetricsMut<'_> {
    pub fn instrumentation_library(&self) -> InstrumentationLibrary<'_> {
        self.as_view().instrumentation_library()
    }

    pub fn instrumentation_library_mut(&mut self) -> InstrumentationLibraryMut<'_> {
        InstrumentationLibraryMut::new(
            self.orig
                .instrumentation_library
                .get_or_insert_with(Default::default),
        )
    }
}

pdata_slice!(MetricSlice, MetricSliceMut, Metric, MetricMut, otlp::Metric);

// ============================================================================
// Metric variants
// ============================================================================

/// `aggregation_temporality` getters and setter over the raw wire value.
macro_rules! temporality_accessors {
    ($($view:ident => $view_mut:ident),* $(,)?) => {
        $(
            impl $view<'_> {
                pub fn aggregation_temporality(&self) -> AggregationTemporality {
                    AggregationTemporality::from_i32(self.orig.aggregation_temporality)
                }
            }

            impl $view_mut<'_> {
                pub fn aggregation_temporality(&self) -> AggregationTemporality {
                    self.as_view().aggregation_temporality()
                }

                pub fn set_aggregation_temporality(&mut self, value: AggregationTemporality) {
                    self.orig.aggregation_temporality = value.as_i32();
                }
            }
        )*
    };
}

pdata_view!(IntGauge, IntGaugeMut, otlp::IntGauge);
pdata_accessors!(IntGauge, IntGaugeMut {
    nested data_points, data_points_mut: IntDataPointSlice, IntDataPointSliceMut;
});

pdata_view!(DoubleGauge, DoubleGaugeMut, otlp::DoubleGauge);
pdata_accessors!(DoubleGauge, DoubleGaugeMut {
    nested data_points, data_points_mut: DoubleDataPointSlice, DoubleDataPointSliceMut;
});

pdata_view!(IntSum, IntSumMut, otlp::IntSum);
pdata_accessors!(IntSum, IntSumMut {
    copy is_monotonic, set_is_monotonic: bool;
    nested data_points, data_points_mut: IntDataPointSlice, IntDataPointSliceMut;
});

pdata_view!(DoubleSum, DoubleSumMut, otlp::DoubleSum);
pdata_accessors!(DoubleSum, DoubleSumMut {
    copy is_monotonic, set_is_monotonic: bool;
    nested data_points, data_points_mut: DoubleDataPointSlice, DoubleDataPointSliceMut;
});

pdata_view!(IntHistogram, IntHistogramMut, otlp::IntHistogram);
pdata_accessors!(IntHistogram, IntHistogramMut {
    nested data_points, data_points_mut: IntHistogramDataPointSlice, IntHistogramDataPointSliceMut;
});

pdata_view!(
    /// Histogram of floating-point observations.
    Histogram,
    HistogramMut,
    otlp::DoubleHistogram
);
pdata_accessors!(Histogram, HistogramMut {
    nested data_points, data_points_mut: HistogramDataPointSlice, HistogramDataPointSliceMut;
});

pdata_view!(
    /// Quantile summary of floating-point observations.
    Summary,
    SummaryMut,
    otlp::DoubleSummary
);
pdata_accessors!(Summary, SummaryMut {
    nested data_points, data_points_mut: SummaryDataPointSlice, SummaryDataPointSliceMut;
});

temporality_accessors!(
    IntSum => IntSumMut,
    DoubleSum => DoubleSumMut,
    IntHistogram => IntHistogramMut,
    Histogram => HistogramMut,
);

pdata_leaf_copy!(
    IntGauge => IntGaugeMut,
    DoubleGauge => DoubleGaugeMut,
    IntSum => IntSumMut,
    DoubleSum => DoubleSumMut,
    IntHistogram => IntHistogramMut,
    Histogram => HistogramMut,
    Summary => SummaryMut,
);

// ============================================================================
// Data points
// ============================================================================

pdata_slice!(
    IntDataPointSlice,
    IntDataPointSliceMut,
    IntDataPoint,
    IntDataPointMut,
    otlp::IntDataPoint
);
pdata_view!(IntDataPoint, IntDataPointMut, otlp::IntDataPoint);
pdata_accessors!(IntDataPoint, IntDataPointMut {
    copy start_time_unix_nano, set_start_time_unix_nano: u64;
    copy time_unix_nano, set_time_unix_nano: u64;
    copy value, set_value: i64;
    nested labels, labels_mut: StringMap, StringMapMut;
    nested exemplars, exemplars_mut: IntExemplarSlice, IntExemplarSliceMut;
});

pdata_slice!(
    DoubleDataPointSlice,
    DoubleDataPointSliceMut,
    DoubleDataPoint,
    DoubleDataPointMut,
    otlp::DoubleDataPoint
);
pdata_view!(DoubleDataPoint, DoubleDataPointMut, otlp::DoubleDataPoint);
pdata_accessors!(DoubleDataPoint, DoubleDataPointMut {
    copy start_time_unix_nano, set_start_time_unix_nano: u64;
    copy time_unix_nano, set_time_unix_nano: u64;
    copy value, set_value: f64;
    nested labels, labels_mut: StringMap, StringMapMut;
    nested exemplars, exemplars_mut: DoubleExemplarSlice, DoubleExemplarSliceMut;
});

pdata_slice!(
    IntHistogramDataPointSlice,
    IntHistogramDataPointSliceMut,
    IntHistogramDataPoint,
    IntHistogramDataPointMut,
    otlp::IntHistogramDataPoint
);
pdata_view!(
    /// Bucketed integer observations. `bucket_counts` has one more entry than
    /// `explicit_bounds` when both are set.
    IntHistogramDataPoint,
    IntHistogramDataPointMut,
    otlp::IntHistogramDataPoint
);
pdata_accessors!(IntHistogramDataPoint, IntHistogramDataPointMut {
    copy start_time_unix_nano, set_start_time_unix_nano: u64;
    copy time_unix_nano, set_time_unix_nano: u64;
    copy count, set_count: u64;
    copy sum, set_sum: i64;
    slice bucket_counts, set_bucket_counts: u64;
    slice explicit_bounds, set_explicit_bounds: f64;
    nested labels, labels_mut: StringMap, StringMapMut;
    nested exemplars, exemplars_mut: IntExemplarSlice, IntExemplarSliceMut;
});

pdata_slice!(
    HistogramDataPointSlice,
    HistogramDataPointSliceMut,
    HistogramDataPoint,
    HistogramDataPointMut,
    otlp::DoubleHistogramDataPoint
);
pdata_view!(
    HistogramDataPoint,
    HistogramDataPointMut,
    otlp::DoubleHistogramDataPoint
);
pdata_accessors!(HistogramDataPoint, HistogramDataPointMut {
    copy start_time_unix_nano, set_start_time_unix_nano: u64;
    copy time_unix_nano, set_time_unix_nano: u64;
    copy count, set_count: u64;
    copy sum, set_sum: f64;
    slice bucket_counts, set_bucket_counts: u64;
    slice explicit_bounds, set_explicit_bounds: f64;
    nested labels, labels_mut: StringMap, StringMapMut;
    nested exemplars, exemplars_mut: DoubleExemplarSlice, DoubleExemplarSliceMut;
});

pdata_slice!(
    SummaryDataPointSlice,
    SummaryDataPointSliceMut,
    SummaryDataPoint,
    SummaryDataPointMut,
    otlp::DoubleSummaryDataPoint
);
pdata_view!(
    SummaryDataPoint,
    SummaryDataPointMut,
    otlp::DoubleSummaryDataPoint
);
pdata_accessors!(SummaryDataPoint, SummaryDataPointMut {
    copy start_time_unix_nano, set_start_time_unix_nano: u64;
    copy time_unix_nano, set_time_unix_nano: u64;
    copy count, set_count: u64;
    copy sum, set_sum: f64;
    nested labels, labels_mut: StringMap, StringMapMut;
    nested quantile_values, quantile_values_mut: ValueAtQuantileSlice, ValueAtQuantileSliceMut;
});

pdata_slice!(
    ValueAtQuantileSlice,
    ValueAtQuantileSliceMut,
    ValueAtQuantile,
    ValueAtQuantileMut,
    otlp::double_summary_data_point::ValueAtQuantile
);
pdata_view!(
    ValueAtQuantile,
    ValueAtQuantileMut,
    otlp::double_summary_data_point::ValueAtQuantile
);
pdata_accessors!(ValueAtQuantile, ValueAtQuantileMut {
    copy quantile, set_quantile: f64;
    copy value, set_value: f64;
});

// ============================================================================
// Exemplars
// ============================================================================

pdata_slice!(
    IntExemplarSlice,
    IntExemplarSliceMut,
    IntExemplar,
    IntExemplarMut,
    otlp::IntExemplar
);
pdata_view!(IntExemplar, IntExemplarMut, otlp::IntExemplar);
pdata_accessors!(IntExemplar, IntExemplarMut {
    copy time_unix_nano, set_time_unix_nano: u64;
    copy value, set_value: i64;
    slice span_id, set_span_id: u8;
    slice trace_id, set_trace_id: u8;
    nested filtered_labels, filtered_labels_mut: StringMap, StringMapMut;
});

pdata_slice!(
    DoubleExemplarSlice,
    DoubleExemplarSliceMut,
    DoubleExemplar,
    DoubleExemplarMut,
    otlp::DoubleExemplar
);
pdata_view!(DoubleExemplar, DoubleExemplarMut, otlp::DoubleExemplar);
pdata_accessors!(DoubleExemplar, DoubleExemplarMut {
    copy time_unix_nano, set_time_unix_nano: u64;
    copy value, set_value: f64;
    slice span_id, set_span_id: u8;
    slice trace_id, set_trace_id: u8;
    nested filtered_labels, filtered_labels_mut: StringMap, StringMapMut;
});

pdata_leaf_copy!(
    IntDataPoint => IntDataPointMut,
    DoubleDataPoint => DoubleDataPointMut,
    IntHistogramDataPoint => IntHistogramDataPointMut,
    HistogramDataPoint => HistogramDataPointMut,
    SummaryDataPoint => SummaryDataPointMut,
    ValueAtQuantile => ValueAtQuantileMut,
    IntExemplar => IntExemplarMut,
    DoubleExemplar => DoubleExemplarMut,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_resource_reads_as_empty() {
        let orig = otlp::ResourceMetrics::default();
        let rm = ResourceMetrics::new(&orig);
        assert!(rm.resource().attributes().is_empty());
        assert_eq!(rm.resource().dropped_attributes_count(), 0);
    }

    #[test]
    fn test_resource_mut_creates_resource() {
        let mut orig = otlp::ResourceMetrics::default();
        let mut rm = ResourceMetricsMut::new(&mut orig);
        rm.resource_mut().attributes_mut().upsert_string("host.name", "web-1");
        assert!(orig.resource.is_some());
    }

    #[test]
    fn test_copy_preserves_absent_resource() {
        let src = otlp::ResourceMetrics {
            instrumentation_library_metrics: vec![Default::default()],
            ..Default::default()
        };
        let mut dst = otlp::ResourceMetrics {
            resource: Some(Default::default()),
            ..Default::default()
        };
        ResourceMetrics::new(&src).copy_to(&mut ResourceMetricsMut::new(&mut dst));
        assert_eq!(src, dst);
    }

    #[test]
    fn test_slice_append_and_remove_if() {
        let mut orig = Vec::new();
        let mut points = IntDataPointSliceMut::new(&mut orig);
        for value in 0..5 {
            points.append_empty().set_value(value);
        }
        points.remove_if(|point| point.value() % 2 == 1);
        let values: Vec<i64> = points.iter().map(|point| point.value()).collect();
        assert_eq!(values, vec![0, 2, 4]);
    }

    #[test]
    fn test_slice_resize_truncates_and_grows() {
        let mut orig = vec![otlp::DoubleDataPoint::default(); 3];
        let mut points = DoubleDataPointSliceMut::new(&mut orig);
        points.resize(1);
        assert_eq!(points.len(), 1);
        points.resize(4);
        assert_eq!(points.len(), 4);
        assert_eq!(points.at(3).value(), 0.0);
    }

    #[test]
    #[should_panic(expected = "IntDataPointSlice::at: index 2 out of range for length 2")]
    fn test_slice_at_out_of_range_panics() {
        let orig = vec![otlp::IntDataPoint::default(); 2];
        IntDataPointSlice::new(&orig).at(2);
    }

    #[test]
    fn test_temporality_round_trips_through_wire_value() {
        let mut orig = otlp::IntSum::default();
        let mut sum = IntSumMut::new(&mut orig);
        assert_eq!(sum.aggregation_temporality(), AggregationTemporality::Unspecified);
        sum.set_aggregation_temporality(AggregationTemporality::Cumulative);
        sum.set_is_monotonic(true);
        assert_eq!(orig.aggregation_temporality, 2);
        assert!(orig.is_monotonic);
    }

    #[test]
    fn test_histogram_point_bounds() {
        let mut orig = otlp::DoubleHistogramDataPoint::default();
        let mut point = HistogramDataPointMut::new(&mut orig);
        point.set_explicit_bounds(vec![1.0, 5.0]);
        point.set_bucket_counts(vec![1, 2, 3]);
        point.set_count(6);
        point.set_sum(12.5);
        let view = point.as_view();
        assert_eq!(view.bucket_counts().len(), view.explicit_bounds().len() + 1);
        assert_eq!(view.count(), 6);
    }

    #[test]
    fn test_exemplar_copy_is_deep() {
        let mut src = otlp::IntExemplar {
            value: 7,
            span_id: vec![1; 8],
            trace_id: vec![2; 16],
            ..Default::default()
        };
        IntExemplarMut::new(&mut src)
            .filtered_labels_mut()
            .upsert("k", "v");

        let mut dst = otlp::IntExemplar::default();
        IntExemplar::new(&src).copy_to(&mut IntExemplarMut::new(&mut dst));
        IntExemplarMut::new(&mut src).filtered_labels_mut().upsert("k", "changed");

        assert_eq!(IntExemplar::new(&dst).filtered_labels().get("k"), Some("v"));
        assert_eq!(dst.trace_id, vec![2; 16]);
    }
}
