// supersync-core/src/ports/registry.rs

// What the sync needs from the BI side: list, create and update database
// records. Superset implements it over REST; tests plug in an in-memory fake.

use crate::error::SupersyncError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A database record as returned by the remote registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteDatabase {
    pub id: i64,
    pub database_name: String,

    // The list endpoint may omit it depending on permissions
    #[serde(default)]
    pub sqlalchemy_uri: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Payload of a create call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDatabase {
    pub database_name: String,
    pub sqlalchemy_uri: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_managed_externally: bool,
}

/// Payload of an update call. Only the name is ever refreshed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseUpdate {
    pub database_name: String,
}

#[async_trait]
pub trait DatabaseRegistry: Send + Sync {
    async fn get_databases(&self) -> Result<Vec<RemoteDatabase>, SupersyncError>;

    async fn create_database(&self, database: NewDatabase)
    -> Result<RemoteDatabase, SupersyncError>;

    async fn update_database(
        &self,
        database_id: i64,
        update: DatabaseUpdate,
    ) -> Result<RemoteDatabase, SupersyncError>;
}
