//! Error type for the marshaling layer
//!
//! Every variant names the pipeline stage that failed and carries the error
//! reported by that stage as its source.

use thiserror::Error;

/// Error produced by a codec or translator implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Recoverable failure while converting metrics from or to bytes.
///
/// Precondition violations (mismatched variant accessors, out-of-range
/// indexes) are not represented here; they panic.
#[derive(Error, Debug)]
pub enum PdataError {
    /// The canonical protobuf payload could not be parsed
    #[error("decoding OTLP protobuf failed: {0}")]
    Decode(#[from] prost::DecodeError),

    /// The canonical protobuf payload could not be serialized
    #[error("encoding OTLP protobuf failed: {0}")]
    Encode(#[from] prost::EncodeError),

    /// A `MetricsDecoder` rejected the input bytes
    #[error("unmarshal failed: {0}")]
    Unmarshal(#[source] BoxError),

    /// A `MetricsEncoder` could not serialize the protocol model
    #[error("marshal failed: {0}")]
    Marshal(#[source] BoxError),

    /// A `ToMetricsTranslator` could not build canonical metrics
    #[error("converting model to pdata failed: {0}")]
    ToMetrics(#[source] BoxError),

    /// A `FromMetricsTranslator` could not build the protocol model
    #[error("converting pdata to model failed: {0}")]
    FromMetrics(#[source] BoxError),
}

impl PdataError {
    /// Short name of the stage that failed, used as a structured log field
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Decode(_) | Self::Unmarshal(_) => "decode",
            Self::Encode(_) | Self::Marshal(_) => "encode",
            Self::ToMetrics(_) => "to_metrics",
            Self::FromMetrics(_) => "from_metrics",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_unmarshal_error_display() {
        let err = PdataError::Unmarshal("unexpected end of input".into());
        assert_eq!(err.to_string(), "unmarshal failed: unexpected end of input");
    }

    #[test]
    fn test_marshal_error_display() {
        let err = PdataError::Marshal("buffer full".into());
        assert_eq!(err.to_string(), "marshal failed: buffer full");
    }

    #[test]
    fn test_translator_error_display() {
        let err = PdataError::ToMetrics("unknown metric".into());
        assert_eq!(
            err.to_string(),
            "converting model to pdata failed: unknown metric"
        );

        let err = PdataError::FromMetrics("unknown metric".into());
        assert_eq!(
            err.to_string(),
            "converting pdata to model failed: unknown metric"
        );
    }

    #[test]
    fn test_source_is_preserved() {
        let err = PdataError::Marshal("buffer full".into());
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "buffer full");
    }

    #[test]
    fn test_stage() {
        assert_eq!(PdataError::Unmarshal("x".into()).stage(), "decode");
        assert_eq!(PdataError::Marshal("x".into()).stage(), "encode");
        assert_eq!(PdataError::ToMetrics("x".into()).stage(), "to_metrics");
        assert_eq!(PdataError::FromMetrics("x".into()).stage(), "from_metrics");
    }
}
