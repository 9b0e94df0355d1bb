pub mod content;
pub mod health;
pub mod metrics;
pub mod root;

pub use content::{random_joke, random_pickup};
pub use health::{health_check, readiness_check};
pub use metrics::metrics;
pub use root::{docs, index};
