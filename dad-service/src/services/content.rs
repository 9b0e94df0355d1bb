use crate::models::{Category, Content};
use crate::services::metrics::record_selection;
use crate::services::store::ContentStore;
use service_core::error::AppError;
use std::sync::Arc;

/// Random selection for the HTTP surface. Turns an empty category into
/// `NotFound` and passes store failures through as `DatabaseError`.
#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    pub async fn random(&self, category: Category) -> Result<Content, AppError> {
        match self.store.select_random(category.as_str()).await {
            Ok(Some(content)) => {
                record_selection(category, "found");
                Ok(content)
            }
            Ok(None) => {
                tracing::warn!(category = %category, "No content stored for category");
                record_selection(category, "empty");
                Err(AppError::NotFound(anyhow::anyhow!(
                    "No {} content available",
                    category
                )))
            }
            Err(e) => {
                tracing::error!(category = %category, error = %e, "Content selection failed");
                record_selection(category, "error");
                Err(e)
            }
        }
    }

    /// Run the selection query once per category. Only a store failure is an
    /// error; an empty category is logged and allowed.
    pub async fn check_categories(&self) -> Result<(), AppError> {
        for category in Category::ALL {
            match self.store.select_random(category.as_str()).await? {
                Some(_) => tracing::info!(category = %category, "Category query succeeded"),
                None => tracing::warn!(category = %category, "Category has no content yet"),
            }
        }
        Ok(())
    }
}
