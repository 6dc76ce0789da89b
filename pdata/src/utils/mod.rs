//! Utility functions shared by the codecs

pub mod otlp;
