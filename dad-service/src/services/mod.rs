pub mod content;
pub mod database;
pub mod metrics;
pub mod store;

pub use content::ContentService;
pub use database::MongoDb;
pub use metrics::{get_metrics, init_metrics, record_selection};
pub use store::{ContentStore, MockContentStore};
