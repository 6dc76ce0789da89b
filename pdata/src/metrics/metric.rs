//! The `Metric` view and its tagged variant

use super::generated::{
    DoubleGauge, DoubleGaugeMut, DoubleSum, DoubleSumMut, Histogram, HistogramMut, IntGauge,
    IntGaugeMut, IntHistogram, IntHistogramMut, IntSum, IntSumMut, Summary, SummaryMut,
};
use super::types::MetricDataType;
use crate::otlp::metrics::v1 as otlp;
use crate::otlp::metrics::v1::metric::Data;

pdata_view!(
    /// One named metric carrying at most one data variant.
    Metric,
    MetricMut,
    otlp::Metric
);

pdata_accessors!(Metric, MetricMut {
    string name, set_name;
    string description, set_description;
    string unit, set_unit;
});

fn data_type_of(data: Option<&Data>) -> MetricDataType {
    match data {
        None => MetricDataType::None,
        Some(Data::IntGauge(_)) => MetricDataType::IntGauge,
        Some(Data::DoubleGauge(_)) => MetricDataType::DoubleGauge,
        Some(Data::IntSum(_)) => MetricDataType::IntSum,
        Some(Data::DoubleSum(_)) => MetricDataType::DoubleSum,
        Some(Data::IntHistogram(_)) => MetricDataType::IntHistogram,
        Some(Data::DoubleHistogram(_)) => MetricDataType::Histogram,
        Some(Data::DoubleSummary(_)) => MetricDataType::Summary,
    }
}

fn wrong_variant(accessor: &str, requested: MetricDataType, actual: MetricDataType) -> ! {
    panic!("Metric::{accessor}: requested {requested} but metric holds {actual}")
}

/// Typed accessors for one variant. Asking for a variant the metric does not
/// hold is a caller bug and panics.
macro_rules! variant_accessors {
    ($(
        $getter:ident, $getter_mut:ident: $kind:ident => $data:ident, $view:ident, $view_mut:ident;
    )*) => {
        impl<'a> Metric<'a> {
            $(
                /// # Panics
                ///
                #[doc = concat!("Panics unless `data_type()` is `", stringify!($kind), "`.")]
                pub fn $getter(&self) -> $view<'a> {
                    match &self.orig.data {
                        Some(Data::$data(inner)) => $view::new(inner),
                        _ => wrong_variant(
                            stringify!($getter),
                            MetricDataType::$kind,
                            self.data_type(),
                        ),
                    }
                }
            )*
        }

        impl MetricMut<'_> {
            $(
                pub fn $getter(&self) -> $view<'_> {
                    self.as_view().$getter()
                }

                /// # Panics
                ///
                #[doc = concat!("Panics unless `data_type()` is `", stringify!($kind), "`.")]
                pub fn $getter_mut(&mut self) -> $view_mut<'_> {
                    let actual = self.data_type();
                    match &mut self.orig.data {
                        Some(Data::$data(inner)) => $view_mut::new(inner),
                        _ => wrong_variant(stringify!($getter_mut), MetricDataType::$kind, actual),
                    }
                }
            )*
        }
    };
}

variant_accessors! {
    int_gauge, int_gauge_mut: IntGauge => IntGauge, IntGauge, IntGaugeMut;
    double_gauge, double_gauge_mut: DoubleGauge => DoubleGauge, DoubleGauge, DoubleGaugeMut;
    int_sum, int_sum_mut: IntSum => IntSum, IntSum, IntSumMut;
    double_sum, double_sum_mut: DoubleSum => DoubleSum, DoubleSum, DoubleSumMut;
    int_histogram, int_histogram_mut: IntHistogram => IntHistogram, IntHistogram, IntHistogramMut;
    histogram, histogram_mut: Histogram => DoubleHistogram, Histogram, HistogramMut;
    summary, summary_mut: Summary => DoubleSummary, Summary, SummaryMut;
}

impl Metric<'_> {
    pub fn data_type(&self) -> MetricDataType {
        data_type_of(self.orig.data.as_ref())
    }

    /// Number of data points held by the current variant.
    pub fn data_point_count(&self) -> usize {
        match &self.orig.data {
            None => 0,
            Some(Data::IntGauge(d)) => d.data_points.len(),
            Some(Data::DoubleGauge(d)) => d.data_points.len(),
            Some(Data::IntSum(d)) => d.data_points.len(),
            Some(Data::DoubleSum(d)) => d.data_points.len(),
            Some(Data::IntHistogram(d)) => d.data_points.len(),
            Some(Data::DoubleHistogram(d)) => d.data_points.len(),
            Some(Data::DoubleSummary(d)) => d.data_points.len(),
        }
    }

    /// Replaces `dest` with a deep copy of this metric, variant included.
    pub fn copy_to(&self, dest: &mut MetricMut<'_>) {
        dest.set_name(self.name());
        dest.set_description(self.description());
        dest.set_unit(self.unit());
        copy_data(*self, dest);
    }
}

impl MetricMut<'_> {
    pub fn data_type(&self) -> MetricDataType {
        self.as_view().data_type()
    }

    pub fn data_point_count(&self) -> usize {
        self.as_view().data_point_count()
    }

    /// Discards the current variant and installs an empty one of `kind`.
    ///
    /// Passing `MetricDataType::None` leaves the metric without data.
    pub fn set_data_type(&mut self, kind: MetricDataType) {
        self.orig.data = match kind {
            MetricDataType::None => None,
            MetricDataType::IntGauge => Some(Data::IntGauge(Default::default())),
            MetricDataType::DoubleGauge => Some(Data::DoubleGauge(Default::default())),
            MetricDataType::IntSum => Some(Data::IntSum(Default::default())),
            MetricDataType::DoubleSum => Some(Data::DoubleSum(Default::default())),
            MetricDataType::IntHistogram => Some(Data::IntHistogram(Default::default())),
            MetricDataType::Histogram => Some(Data::DoubleHistogram(Default::default())),
            MetricDataType::Summary => Some(Data::DoubleSummary(Default::default())),
        };
    }
}

fn copy_data(src: Metric<'_>, dest: &mut MetricMut<'_>) {
    let kind = src.data_type();
    dest.set_data_type(kind);
    match kind {
        MetricDataType::None => {}
        MetricDataType::IntGauge => src.int_gauge().copy_to(&mut dest.int_gauge_mut()),
        MetricDataType::DoubleGauge => src.double_gauge().copy_to(&mut dest.double_gauge_mut()),
        MetricDataType::IntSum => src.int_sum().copy_to(&mut dest.int_sum_mut()),
        MetricDataType::DoubleSum => src.double_sum().copy_to(&mut dest.double_sum_mut()),
        MetricDataType::IntHistogram => {
            src.int_histogram().copy_to(&mut dest.int_histogram_mut())
        }
        MetricDataType::Histogram => src.histogram().copy_to(&mut dest.histogram_mut()),
        MetricDataType::Summary => src.summary().copy_to(&mut dest.summary_mut()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::AggregationTemporality;

    #[test]
    fn test_new_metric_has_no_data() {
        let orig = otlp::Metric::default();
        let metric = Metric::new(&orig);
        assert_eq!(metric.data_type(), MetricDataType::None);
        assert_eq!(metric.data_point_count(), 0);
    }

    #[test]
    fn test_set_data_type_round_trips_every_kind() {
        let mut orig = otlp::Metric::default();
        let mut metric = MetricMut::new(&mut orig);
        for kind in MetricDataType::ALL {
            metric.set_data_type(kind);
            assert_eq!(metric.data_type(), kind);
        }
    }

    #[test]
    fn test_set_data_type_discards_previous_variant() {
        let mut orig = otlp::Metric::default();
        let mut metric = MetricMut::new(&mut orig);
        metric.set_data_type(MetricDataType::IntGauge);
        metric.int_gauge_mut().data_points_mut().append_empty().set_value(3);
        assert_eq!(metric.data_point_count(), 1);

        metric.set_data_type(MetricDataType::IntGauge);
        assert_eq!(metric.data_point_count(), 0);

        metric.set_data_type(MetricDataType::None);
        assert!(orig.data.is_none());
    }

    #[test]
    #[should_panic(expected = "Metric::double_sum: requested DoubleSum but metric holds IntGauge")]
    fn test_wrong_variant_accessor_panics() {
        let mut orig = otlp::Metric::default();
        MetricMut::new(&mut orig).set_data_type(MetricDataType::IntGauge);
        Metric::new(&orig).double_sum();
    }

    #[test]
    #[should_panic(expected = "Metric::summary_mut: requested Summary but metric holds None")]
    fn test_wrong_variant_mut_accessor_panics() {
        let mut orig = otlp::Metric::default();
        MetricMut::new(&mut orig).summary_mut();
    }

    #[test]
    fn test_exactly_one_accessor_matches_each_kind() {
        let accessors: [(MetricDataType, fn(Metric<'_>)); 7] = [
            (MetricDataType::IntGauge, |m| {
                m.int_gauge();
            }),
            (MetricDataType::DoubleGauge, |m| {
                m.double_gauge();
            }),
            (MetricDataType::IntSum, |m| {
                m.int_sum();
            }),
            (MetricDataType::DoubleSum, |m| {
                m.double_sum();
            }),
            (MetricDataType::IntHistogram, |m| {
                m.int_histogram();
            }),
            (MetricDataType::Histogram, |m| {
                m.histogram();
            }),
            (MetricDataType::Summary, |m| {
                m.summary();
            }),
        ];

        for kind in MetricDataType::ALL {
            let mut orig = otlp::Metric::default();
            MetricMut::new(&mut orig).set_data_type(kind);
            let metric = Metric::new(&orig);

            let matched: Vec<MetricDataType> = accessors
                .iter()
                .filter(|(_, access)| std::panic::catch_unwind(|| access(metric)).is_ok())
                .map(|(accessor_kind, _)| *accessor_kind)
                .collect();

            if kind == MetricDataType::None {
                assert!(matched.is_empty(), "{kind}: {matched:?}");
            } else {
                assert_eq!(matched, vec![kind]);
            }
        }
    }

    #[test]
    #[should_panic(expected = "Metric::int_sum: requested IntSum but metric holds DoubleGauge")]
    fn test_retyped_metric_rejects_old_accessor() {
        let mut orig = otlp::Metric::default();
        let mut metric = MetricMut::new(&mut orig);
        metric.set_data_type(MetricDataType::IntSum);
        metric.int_sum_mut().data_points_mut().append_empty().set_value(1);

        metric.set_data_type(MetricDataType::DoubleGauge);
        assert_eq!(metric.data_point_count(), 0);
        metric.int_sum();
    }

    #[test]
    fn test_copy_to_is_deep() {
        let mut src = otlp::Metric::default();
        let mut metric = MetricMut::new(&mut src);
        metric.set_name("http.requests");
        metric.set_unit("1");
        metric.set_data_type(MetricDataType::DoubleSum);
        {
            let mut sum = metric.double_sum_mut();
            sum.set_aggregation_temporality(AggregationTemporality::Delta);
            sum.set_is_monotonic(true);
            let mut points = sum.data_points_mut();
            let mut point = points.append_empty();
            point.set_value(1.5);
            point.labels_mut().upsert("route", "/");
        }

        let mut dst = otlp::Metric {
            name: "stale".to_string(),
            data: Some(Data::IntGauge(Default::default())),
            ..Default::default()
        };
        Metric::new(&src).copy_to(&mut MetricMut::new(&mut dst));
        assert_eq!(src, dst);

        MetricMut::new(&mut src)
            .double_sum_mut()
            .data_points_mut()
            .at_mut(0)
            .set_value(9.0);
        assert_eq!(Metric::new(&dst).double_sum().data_points().at(0).value(), 1.5);
    }

    #[test]
    fn test_copy_to_clears_data_when_source_has_none() {
        let src = otlp::Metric {
            name: "empty".to_string(),
            ..Default::default()
        };
        let mut dst = otlp::Metric {
            data: Some(Data::DoubleSummary(Default::default())),
            ..Default::default()
        };
        Metric::new(&src).copy_to(&mut MetricMut::new(&mut dst));
        assert_eq!(src, dst);
    }
}
