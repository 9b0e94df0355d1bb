pub mod metrics;
pub mod recovery;
pub mod security_headers;
pub mod tracing;
