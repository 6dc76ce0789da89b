use pdata::codec::{otlp_json, otlp_proto, otlp_v1};
use pdata::metrics::MetricMut;
use pdata::{
    AggregationTemporality, Format, MetricDataType, Metrics, MetricsMarshaler, MetricsUnmarshaler,
    PdataError,
};

fn fill_int_sum(metric: &mut MetricMut<'_>, points: usize) {
    metric.set_data_type(MetricDataType::IntSum);
    let mut sum = metric.int_sum_mut();
    sum.set_aggregation_temporality(AggregationTemporality::Cumulative);
    sum.set_is_monotonic(true);
    let mut data_points = sum.data_points_mut();
    for i in 0..points {
        let mut point = data_points.append_empty();
        point.set_start_time_unix_nano(1_600_000_000_000_000_000);
        point.set_time_unix_nano(1_600_000_000_000_000_000 + i as u64 * 1_000_000_000);
        point.set_value(i as i64 * 10);
        point.labels_mut().upsert("host", "db-1");
    }
}

/// One resource, one library, one cumulative IntSum with three points.
fn scenario() -> Metrics {
    let mut md = Metrics::new();
    let mut rms = md.resource_metrics_mut();
    let mut rm = rms.append_empty();
    let mut resource = rm.resource_mut();
    let mut attrs = resource.attributes_mut();
    attrs.upsert_string("service.name", "inventory");
    attrs.upsert_bool("debug", false);
    let mut ilms = rm.instrumentation_library_metrics_mut();
    let mut ilm = ilms.append_empty();
    ilm.instrumentation_library_mut().set_name("io.example.db");
    let mut metrics = ilm.metrics_mut();
    let mut metric = metrics.append_empty();
    metric.set_name("db.queries");
    metric.set_description("Queries executed");
    metric.set_unit("1");
    fill_int_sum(&mut metric, 3);
    md
}

#[test]
fn test_scenario_counts_and_proto_round_trip() {
    let md = scenario();
    assert_eq!(md.metric_count(), 1);
    assert_eq!(md.metric_and_data_point_count(), (1, 3));

    let bytes = md.to_otlp_proto_bytes().unwrap();
    let decoded = Metrics::from_otlp_proto_bytes(&bytes).unwrap();
    assert_eq!(decoded, md);

    let rm = decoded.resource_metrics().at(0);
    assert!(matches!(
        rm.resource().attributes().get("service.name"),
        Some(pdata::AttributeValue::String("inventory"))
    ));
    let ilm = rm.instrumentation_library_metrics().at(0);
    assert_eq!(ilm.instrumentation_library().name(), "io.example.db");
    let metric = ilm.metrics().at(0);
    assert_eq!(metric.description(), "Queries executed");
    let sum = metric.int_sum();
    assert!(sum.is_monotonic());
    assert_eq!(sum.aggregation_temporality(), AggregationTemporality::Cumulative);
    assert_eq!(sum.data_points().at(2).value(), 20);
    assert_eq!(sum.data_points().at(1).labels().get("host"), Some("db-1"));
}

#[test]
fn test_scenario_through_every_format() {
    let md = scenario();

    let bytes = otlp_proto::marshaler().marshal(&md).unwrap();
    assert_eq!(otlp_proto::unmarshaler().unmarshal(&bytes).unwrap(), md);

    let bytes = otlp_json::marshaler().marshal(&md).unwrap();
    assert_eq!(otlp_json::unmarshaler().unmarshal(&bytes).unwrap(), md);

    let bytes = otlp_v1::marshaler().marshal(&md).unwrap();
    assert_eq!(otlp_v1::unmarshaler().unmarshal(&bytes).unwrap(), md);
}

#[test]
fn test_convert_between_formats() {
    let md = scenario();
    let json = Format::Json.marshaler().marshal(&md).unwrap();
    let from_json = Format::Json.unmarshaler().unmarshal(&json).unwrap();
    let current = Format::OtlpV1.marshaler().marshal(&from_json).unwrap();
    let from_current = Format::OtlpV1.unmarshaler().unmarshal(&current).unwrap();
    assert_eq!(from_current, md);
}

#[test]
fn test_clone_then_mutate_leaves_source() {
    let md = scenario();
    let mut copy = md.clone();
    {
        let mut rms = copy.resource_metrics_mut();
        let mut rm = rms.at_mut(0);
        rm.resource_mut().attributes_mut().upsert_string("service.name", "other");
        let mut ilms = rm.instrumentation_library_metrics_mut();
        let mut ilm = ilms.at_mut(0);
        let mut metrics = ilm.metrics_mut();
        fill_int_sum(&mut metrics.append_empty(), 5);
    }

    assert_eq!(md.metric_and_data_point_count(), (1, 3));
    assert_eq!(copy.metric_and_data_point_count(), (2, 8));
    assert!(matches!(
        md.resource_metrics().at(0).resource().attributes().get("service.name"),
        Some(pdata::AttributeValue::String("inventory"))
    ));
}

#[test]
fn test_many_resources_count() {
    let mut md = Metrics::new();
    let mut rms = md.resource_metrics_mut();
    for _ in 0..4 {
        let mut rm = rms.append_empty();
        let mut ilms = rm.instrumentation_library_metrics_mut();
        for _ in 0..3 {
            let mut ilm = ilms.append_empty();
            let mut metrics = ilm.metrics_mut();
            for kind in [MetricDataType::None, MetricDataType::IntSum] {
                let mut metric = metrics.append_empty();
                if kind == MetricDataType::IntSum {
                    fill_int_sum(&mut metric, 2);
                }
            }
        }
    }
    assert_eq!(md.metric_count(), 4 * 3 * 2);
    assert_eq!(md.metric_and_data_point_count(), (24, 24));
}

#[test]
fn test_garbage_bytes_are_rejected() {
    let err = Metrics::from_otlp_proto_bytes(b"\xff\xff\xff\xff").unwrap_err();
    assert!(matches!(err, PdataError::Decode(_)));

    let err = Format::Proto.unmarshaler().unmarshal(b"\xff\xff\xff\xff").unwrap_err();
    assert!(matches!(err, PdataError::Unmarshal(_)));
}
