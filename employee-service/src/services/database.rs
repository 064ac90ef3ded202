use crate::config::MongoConfig;
use crate::models::{Employee, EMPLOYEES_COLLECTION};
use mongodb::{
    bson::doc, options::ClientOptions, Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;
use std::time::Duration;

#[derive(Clone)]
pub struct EmployeeDb {
    client: MongoClient,
    db: Database,
}

impl EmployeeDb {
    /// Connect and verify the server answers a `ping` within the configured
    /// timeout. Callers treat an error here as fatal.
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        tracing::info!(database = %config.database, "Connecting to MongoDB");
        let timeout = config.connect_timeout();

        let db = Self::lazy(&config.uri, &config.database, timeout)
            .await
            .map_err(|e| {
                tracing::error!("Invalid MongoDB connection settings: {}", e);
                e
            })?;

        match tokio::time::timeout(timeout, db.health_check()).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::error!(
                    timeout_secs = timeout.as_secs(),
                    "Timed out connecting to MongoDB"
                );
                return Err(AppError::DatabaseError(anyhow::anyhow!(
                    "timed out after {}s connecting to MongoDB",
                    timeout.as_secs()
                )));
            }
        }

        tracing::info!(database = %config.database, "Successfully connected to MongoDB database");
        Ok(db)
    }

    /// Build a client without contacting the server. The driver connects on
    /// first use.
    pub async fn lazy(uri: &str, database: &str, timeout: Duration) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = MongoClient::with_options(options)?;
        let db = client.database(database);
        Ok(Self { client, db })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
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

    pub fn employees(&self) -> Collection<Employee> {
        self.db.collection(EMPLOYEES_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
