//! OTLP v0.7 metrics messages that back the canonical record tree.
//!
//! The files under `codegen/` have the shape `prost-build` emits for the
//! upstream `.proto` definitions, with serde derives added so the same tree can
//! be rendered as OTLP JSON. Nothing outside this crate's view layer should
//! need to touch these types directly.

pub mod collector {
    pub mod metrics {
        #[allow(clippy::all)]
        pub mod v1 {
            include!("codegen/opentelemetry.proto.collector.metrics.v1.rs");
        }
    }
}

pub mod common {
    /// `common.proto` at v0.7. `AnyValue.bytes_value` (tag 7) is from a later
    /// revision of the schema; v0.7 producers never set it.
    #[allow(clippy::all)]
    pub mod v1 {
        include!("codegen/opentelemetry.proto.common.v1.rs");
    }
}

pub mod metrics {
    #[allow(clippy::all)]
    pub mod v1 {
        include!("codegen/opentelemetry.proto.metrics.v1.rs");
    }
}

pub mod resource {
    #[allow(clippy::all)]
    pub mod v1 {
        include!("codegen/opentelemetry.proto.resource.v1.rs");
    }
}

pub(crate) mod json;
