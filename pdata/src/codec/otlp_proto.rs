//! OTLP v0.7 protobuf through the generic pipeline.
//!
//! Produces the same bytes as `Metrics::to_otlp_proto_bytes`.

use prost::Message;

use super::IdentityTranslator;
use crate::error::BoxError;
use crate::marshal::{Marshaler, MetricsDecoder, MetricsEncoder, Unmarshaler};
use crate::otlp::collector::metrics::v1::ExportMetricsServiceRequest;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProtoEncoder;

impl MetricsEncoder for ProtoEncoder {
    type Model = ExportMetricsServiceRequest;

    fn encode_metrics(&self, model: &ExportMetricsServiceRequest) -> Result<Vec<u8>, BoxError> {
        Ok(model.encode_to_vec())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProtoDecoder;

impl MetricsDecoder for ProtoDecoder {
    type Model = ExportMetricsServiceRequest;

    fn decode_metrics(&self, bytes: &[u8]) -> Result<ExportMetricsServiceRequest, BoxError> {
        Ok(ExportMetricsServiceRequest::decode(bytes)?)
    }
}

pub fn marshaler() -> Marshaler<ProtoEncoder, IdentityTranslator> {
    Marshaler::new(ProtoEncoder, IdentityTranslator)
}

pub fn unmarshaler() -> Unmarshaler<ProtoDecoder, IdentityTranslator> {
    Unmarshaler::new(ProtoDecoder, IdentityTranslator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdataError;
    use crate::marshal::{MetricsMarshaler, MetricsUnmarshaler};
    use crate::metrics::{Metrics, MetricDataType};

    #[test]
    fn test_pipeline_matches_direct_encoding() {
        let mut md = Metrics::new();
        md.resource_metrics_mut()
            .append_empty()
            .instrumentation_library_metrics_mut()
            .append_empty()
            .metrics_mut()
            .append_empty()
            .set_data_type(MetricDataType::Histogram);

        let bytes = marshaler().marshal(&md).unwrap();
        assert_eq!(bytes, md.to_otlp_proto_bytes().unwrap());
        assert_eq!(unmarshaler().unmarshal(&bytes).unwrap(), md);
    }

    #[test]
    fn test_truncated_input_is_unmarshal_error() {
        let err = unmarshaler().unmarshal(&[0x0a, 0x05, 0x01]).unwrap_err();
        assert!(matches!(err, PdataError::Unmarshal(_)));
    }
}
