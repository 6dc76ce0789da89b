//! Codec boundary between canonical metrics and external wire formats
//!
//! A wire format plugs in by implementing four narrow traits:
//! `MetricsDecoder` and `MetricsEncoder` move between bytes and the format's
//! own model, while `ToMetricsTranslator` and `FromMetricsTranslator` move
//! between that model and `Metrics`. `Marshaler` and `Unmarshaler` compose a
//! codec with a translator into a two-stage pipeline.

use std::borrow::Cow;

use crate::error::{BoxError, PdataError};
use crate::metrics::Metrics;

// ============================================================================
// Codec traits
// ============================================================================

/// Parses raw bytes into a protocol-native model.
pub trait MetricsDecoder {
    type Model;

    fn decode_metrics(&self, bytes: &[u8]) -> Result<Self::Model, BoxError>;
}

/// Serializes a protocol-native model into raw bytes.
pub trait MetricsEncoder {
    type Model;

    fn encode_metrics(&self, model: &Self::Model) -> Result<Vec<u8>, BoxError>;
}

/// Lifts a protocol-native model into canonical metrics.
pub trait ToMetricsTranslator {
    type Model;

    fn to_metrics(&self, model: Self::Model) -> Result<Metrics, BoxError>;
}

/// Lowers canonical metrics into a protocol-native model. A format whose model
/// is the canonical tree itself returns it borrowed.
pub trait FromMetricsTranslator {
    type Model: Clone;

    fn from_metrics<'a>(&self, metrics: &'a Metrics) -> Result<Cow<'a, Self::Model>, BoxError>;
}

// ============================================================================
// Pipelines
// ============================================================================

/// Turns canonical metrics into bytes of some wire format.
pub trait MetricsMarshaler {
    fn marshal(&self, metrics: &Metrics) -> Result<Vec<u8>, PdataError>;
}

/// Turns bytes of some wire format into canonical metrics.
pub trait MetricsUnmarshaler {
    fn unmarshal(&self, bytes: &[u8]) -> Result<Metrics, PdataError>;
}

/// Translate, then encode. Stops at the first failing stage.
#[derive(Debug, Clone, Default)]
pub struct Marshaler<E, T> {
    encoder: E,
    translator: T,
}

impl<E, T> Marshaler<E, T> {
    pub fn new(encoder: E, translator: T) -> Self {
        Self {
            encoder,
            translator,
        }
    }
}

impl<E, T> MetricsMarshaler for Marshaler<E, T>
where
    E: MetricsEncoder,
    E::Model: Clone,
    T: FromMetricsTranslator<Model = E::Model>,
{
    fn marshal(&self, metrics: &Metrics) -> Result<Vec<u8>, PdataError> {
        let model = self.translator.from_metrics(metrics).map_err(|e| {
            tracing::debug!(error = %e, "Translating metrics to model failed");
            PdataError::FromMetrics(e)
        })?;
        let bytes = self.encoder.encode_metrics(&model).map_err(|e| {
            tracing::debug!(error = %e, "Encoding metrics failed");
            PdataError::Marshal(e)
        })?;
        tracing::trace!(bytes = bytes.len(), "Marshaled metrics");
        Ok(bytes)
    }
}

/// Decode, then translate. Stops at the first failing stage.
#[derive(Debug, Clone, Default)]
pub struct Unmarshaler<D, T> {
    decoder: D,
    translator: T,
}

impl<D, T> Unmarshaler<D, T> {
    pub fn new(decoder: D, translator: T) -> Self {
        Self {
            decoder,
            translator,
        }
    }
}

impl<D, T> MetricsUnmarshaler for Unmarshaler<D, T>
where
    D: MetricsDecoder,
    T: ToMetricsTranslator<Model = D::Model>,
{
    fn unmarshal(&self, bytes: &[u8]) -> Result<Metrics, PdataError> {
        let model = self.decoder.decode_metrics(bytes).map_err(|e| {
            tracing::debug!(bytes = bytes.len(), error = %e, "Decoding metrics failed");
            PdataError::Unmarshal(e)
        })?;
        let metrics = self.translator.to_metrics(model).map_err(|e| {
            tracing::debug!(error = %e, "Translating model to metrics failed");
            PdataError::ToMetrics(e)
        })?;
        tracing::trace!(
            resources = metrics.resource_metrics_count(),
            "Unmarshaled metrics"
        );
        Ok(metrics)
    }
}

impl<T: MetricsMarshaler + ?Sized> MetricsMarshaler for Box<T> {
    fn marshal(&self, metrics: &Metrics) -> Result<Vec<u8>, PdataError> {
        (**self).marshal(metrics)
    }
}

impl<T: MetricsUnmarshaler + ?Sized> MetricsUnmarshaler for Box<T> {
    fn unmarshal(&self, bytes: &[u8]) -> Result<Metrics, PdataError> {
        (**self).unmarshal(bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::metrics::MetricDataType;

    /// Model that is just the metric names, one per line.
    #[derive(Clone)]
    struct Names(Vec<String>);

    #[derive(Default, Clone)]
    struct Calls(Rc<Cell<usize>>);

    impl Calls {
        fn hit(&self) {
            self.0.set(self.0.get() + 1);
        }

        fn count(&self) -> usize {
            self.0.get()
        }
    }

    struct LinesCodec {
        calls: Calls,
    }

    impl MetricsEncoder for LinesCodec {
        type Model = Names;

        fn encode_metrics(&self, model: &Names) -> Result<Vec<u8>, BoxError> {
            self.calls.hit();
            Ok(model.0.join("\n").into_bytes())
        }
    }

    impl MetricsDecoder for LinesCodec {
        type Model = Names;

        fn decode_metrics(&self, bytes: &[u8]) -> Result<Names, BoxError> {
            self.calls.hit();
            let text = std::str::from_utf8(bytes)?;
            Ok(Names(text.lines().map(str::to_string).collect()))
        }
    }

    struct NamesTranslator {
        fail: bool,
        calls: Calls,
    }

    impl FromMetricsTranslator for NamesTranslator {
        type Model = Names;

        fn from_metrics<'a>(&self, metrics: &'a Metrics) -> Result<Cow<'a, Names>, BoxError> {
            self.calls.hit();
            if self.fail {
                return Err("no names".into());
            }
            let names = metrics.metrics().map(|m| m.name().to_string()).collect();
            Ok(Cow::Owned(Names(names)))
        }
    }

    impl ToMetricsTranslator for NamesTranslator {
        type Model = Names;

        fn to_metrics(&self, model: Names) -> Result<Metrics, BoxError> {
            self.calls.hit();
            if self.fail {
                return Err("no metrics".into());
            }
            let mut md = Metrics::new();
            let mut rms = md.resource_metrics_mut();
            let mut rm = rms.append_empty();
            let mut ilms = rm.instrumentation_library_metrics_mut();
            let mut ilm = ilms.append_empty();
            let mut metrics = ilm.metrics_mut();
            for name in model.0 {
                let mut metric = metrics.append_empty();
                metric.set_name(name);
                metric.set_data_type(MetricDataType::DoubleGauge);
            }
            Ok(md)
        }
    }

    fn pipeline(fail: bool) -> (Calls, Calls, NamesTranslator, LinesCodec) {
        let codec_calls = Calls::default();
        let translator_calls = Calls::default();
        let translator = NamesTranslator {
            fail,
            calls: translator_calls.clone(),
        };
        let codec = LinesCodec {
            calls: codec_calls.clone(),
        };
        (codec_calls, translator_calls, translator, codec)
    }

    #[test]
    fn test_round_trip_through_custom_format() {
        let (_, _, translator, codec) = pipeline(false);
        let unmarshaler = Unmarshaler::new(codec, translator);
        let md = unmarshaler.unmarshal(b"cpu\nmemory").unwrap();
        assert_eq!(md.metric_count(), 2);

        let (_, _, translator, codec) = pipeline(false);
        let bytes = Marshaler::new(codec, translator).marshal(&md).unwrap();
        assert_eq!(bytes, b"cpu\nmemory");
    }

    #[test]
    fn test_marshal_translator_failure_skips_encoder() {
        let (codec_calls, translator_calls, translator, codec) = pipeline(true);
        let marshaler = Marshaler::new(codec, translator);

        let err = marshaler.marshal(&Metrics::new()).unwrap_err();
        assert!(matches!(err, PdataError::FromMetrics(_)));
        assert_eq!(err.to_string(), "converting pdata to model failed: no names");
        assert_eq!(translator_calls.count(), 1);
        assert_eq!(codec_calls.count(), 0);
    }

    #[test]
    fn test_unmarshal_decoder_failure_skips_translator() {
        let (codec_calls, translator_calls, translator, codec) = pipeline(false);
        let unmarshaler = Unmarshaler::new(codec, translator);

        let err = unmarshaler.unmarshal(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, PdataError::Unmarshal(_)));
        assert!(err.to_string().starts_with("unmarshal failed: "));
        assert_eq!(codec_calls.count(), 1);
        assert_eq!(translator_calls.count(), 0);
    }

    #[test]
    fn test_unmarshal_translator_failure_is_wrapped() {
        let (_, _, translator, codec) = pipeline(true);
        let unmarshaler = Unmarshaler::new(codec, translator);

        let err = unmarshaler.unmarshal(b"cpu").unwrap_err();
        assert!(matches!(err, PdataError::ToMetrics(_)));
        assert_eq!(err.to_string(), "converting model to pdata failed: no metrics");
    }

    #[test]
    fn test_boxed_pipelines_are_usable_as_trait_objects() {
        let (_, _, translator, codec) = pipeline(false);
        let unmarshaler: Box<dyn MetricsUnmarshaler> =
            Box::new(Unmarshaler::new(codec, translator));
        let md = unmarshaler.unmarshal(b"cpu").unwrap();
        assert_eq!(md.metric_and_data_point_count(), (1, 0));
    }
}
