use crate::config::MongoConfig;
use crate::models::Content;
use crate::services::store::ContentStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

pub const APP_NAME: &str = "Dad API";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoDb {
    /// Build the client and ping the server. A store that cannot be reached
    /// here is a startup failure.
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        tracing::info!(database = %config.database, "Connecting to MongoDB");

        let mut options = ClientOptions::parse(config.uri()).await.map_err(|e| {
            tracing::error!("Invalid MongoDB connection string: {}", e);
            AppError::ConfigError(anyhow::anyhow!("Invalid MONGO connection string: {}", e))
        })?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(config.timeout());
        options.connect_timeout = Some(config.timeout());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(&config.database);

        let store = Self {
            client,
            db,
            collection: config.collection.clone(),
        };
        store.health_check().await?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Successfully connected to MongoDB database"
        );
        Ok(store)
    }

    /// Index `type` so the `$match` stage never scans the collection.
    ///
    /// Failure is logged and tolerated: the service only needs read access.
    pub async fn initialize_indexes(&self) {
        let type_index = IndexModel::builder()
            .keys(doc! { "type": 1 })
            .options(IndexOptions::builder().name("type_idx".to_string()).build())
            .build();

        match self.contents().create_index(type_index, None).await {
            Ok(_) => tracing::info!(collection = %self.collection, "Ensured index on type"),
            Err(e) => tracing::warn!(
                collection = %self.collection,
                "Could not create index on type, continuing without it: {}",
                e
            ),
        }
    }

    pub fn contents(&self) -> Collection<Document> {
        self.db.collection(&self.collection)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

/// `$match` on the category, then let the server draw one document.
pub fn random_pipeline(category: &str) -> Vec<Document> {
    vec![
        doc! { "$match": { "type": category } },
        doc! { "$sample": { "size": 1 } },
    ]
}

#[async_trait]
impl ContentStore for MongoDb {
    async fn select_random(&self, category: &str) -> Result<Option<Content>, AppError> {
        let mut cursor = self
            .contents()
            .aggregate(random_pipeline(category), None)
            .await
            .map_err(|e| {
                tracing::error!(category = %category, "Random selection query failed: {}", e);
                AppError::from(e)
            })?;

        let document = cursor.try_next().await.map_err(|e| {
            tracing::error!(category = %category, "Failed to read selection cursor: {}", e);
            AppError::from(e)
        })?;

        Ok(document.map(Content::new))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
