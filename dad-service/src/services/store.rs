use crate::models::{content::CATEGORY_FIELD, Content};
use async_trait::async_trait;
use mongodb::bson::Document;
use rand::seq::SliceRandom;
use service_core::error::AppError;
use std::sync::Mutex;

/// Read-only access to the content collection.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// One document whose `type` equals `category`, picked uniformly at random,
    /// or `None` when the category is empty.
    async fn select_random(&self, category: &str) -> Result<Option<Content>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// In-memory store for tests.
pub struct MockContentStore {
    documents: Vec<Document>,
    available: bool,
    queries: Mutex<Vec<String>>,
}

impl Default for MockContentStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MockContentStore {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            available: true,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// A store whose every call fails as if the server were unreachable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    /// Categories requested so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    fn ensure_available(&self) -> Result<(), AppError> {
        if self.available {
            Ok(())
        } else {
            Err(AppError::DatabaseError(anyhow::anyhow!(
                "Mock content store is unavailable"
            )))
        }
    }

    fn pick(&self, category: &str) -> Option<Content> {
        let matching: Vec<&Document> = self
            .documents
            .iter()
            .filter(|d| d.get_str(CATEGORY_FIELD).ok() == Some(category))
            .collect();

        matching
            .choose(&mut rand::thread_rng())
            .map(|d| Content::new((*d).clone()))
    }
}

#[async_trait]
impl ContentStore for MockContentStore {
    async fn select_random(&self, category: &str) -> Result<Option<Content>, AppError> {
        self.queries
            .lock()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Mock store mutex poisoned: {}", e)))?
            .push(category.to_string());

        self.ensure_available()?;
        Ok(self.pick(category))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.ensure_available()
    }
}
