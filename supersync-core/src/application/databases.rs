// supersync-core/src/application/databases.rs

use tracing::{debug, instrument};

use crate::error::SupersyncError;
use crate::ports::registry::{DatabaseRegistry, RemoteDatabase};

/// Every database known to the registry, ordered by id.
#[instrument(skip(registry))]
pub async fn list_databases(
    registry: &dyn DatabaseRegistry,
) -> Result<Vec<RemoteDatabase>, SupersyncError> {
    let mut databases = registry.get_databases().await?;
    databases.sort_by_key(|db| db.id);
    debug!(count = databases.len(), "Listed databases");
    Ok(databases)
}
