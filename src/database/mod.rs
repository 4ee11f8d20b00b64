use crate::config::{Config, Environment};
use crate::models::{DeleteAck, InsertAck, UpdateAck};
use crate::utils::AppError;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Database};
use std::error::Error;
use std::time::Duration;

#[cfg(test)]
pub mod memory;

/// The three collections the service reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Bills,
    PaidBills,
    Users,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Bills => "bills",
            Collection::PaidBills => "paid_bills",
            Collection::Users => "users",
        }
    }
}

/// Single-operation access to schemaless documents. Filters are equality
/// matches on top-level fields; updates are `$set` merges.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(
        &self,
        collection: Collection,
        filter: Document,
        limit: Option<i64>,
    ) -> Result<Vec<Document>, AppError>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, AppError>;

    async fn insert_one(&self, collection: Collection, document: Document)
        -> Result<InsertAck, AppError>;

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        set: Document,
    ) -> Result<UpdateAck, AppError>;

    async fn delete_one(&self, collection: Collection, filter: Document)
        -> Result<DeleteAck, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(config: &Config) -> Result<Self, Box<dyn Error>> {
        let mut client_options = ClientOptions::parse(config.mongodb_url.as_str()).await?;

        client_options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        if config.environment == Environment::Production {
            client_options.max_pool_size = Some(20);
            client_options.min_pool_size = Some(2);
            client_options.max_idle_time = Some(Duration::from_secs(300));
        }

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database_name);

        let mongodb = Self { client, db };

        // Fail fast on a bad URL or unreachable cluster
        mongodb.ping().await?;

        log::info!("✅ Connected to MongoDB database: {}", config.database_name);

        Ok(mongodb)
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.db.collection(collection.name())
    }

    /// Closes pooled connections. Call once after the HTTP server has stopped.
    pub async fn shutdown(self) {
        log::info!("🔌 Closing MongoDB connections...");
        self.client.shutdown().await;
        log::info!("✅ MongoDB connections closed");
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn find(
        &self,
        collection: Collection,
        filter: Document,
        limit: Option<i64>,
    ) -> Result<Vec<Document>, AppError> {
        let handle = self.collection(collection);
        let mut action = handle.find(filter);
        if let Some(limit) = limit {
            action = action.limit(limit);
        }

        let cursor = action.await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertAck, AppError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(result.into())
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        set: Document,
    ) -> Result<UpdateAck, AppError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": set })
            .await?;
        Ok(result.into())
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<DeleteAck, AppError> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(result.into())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
