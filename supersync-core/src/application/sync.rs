// supersync-core/src/application/sync.rs

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::ports::UriBuilder;
use crate::domain::profile::database_name;
use crate::error::SupersyncError;
use crate::infrastructure::config::load_profiles;
use crate::infrastructure::uri::mask_password;
use crate::ports::registry::{DatabaseRegistry, DatabaseUpdate, NewDatabase, RemoteDatabase};

/// Appended to `external_url_prefix` so the link lands on the dbt docs overview.
pub const EXTERNAL_URL_SUFFIX: &str = "#!/overview";

#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub profiles_path: PathBuf,
    pub project_name: String,
    pub target_name: String,
    /// Create the database when it doesn't exist yet (otherwise fail).
    pub import_db: bool,
    /// Mark the created database as managed externally (read-only in the UI).
    pub disallow_edits: bool,
    /// dbt docs URL; empty means no `external_url`.
    pub external_url_prefix: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Created(RemoteDatabase),
    Updated(RemoteDatabase),
}

impl SyncOutcome {
    pub fn database(&self) -> &RemoteDatabase {
        match self {
            Self::Created(db) | Self::Updated(db) => db,
        }
    }
}

/// Database name and SQLAlchemy URI of one project/target pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConnection {
    pub database_name: String,
    pub sqlalchemy_uri: String,
}

/// Reads the profiles file and derives the name/URI pair for `project.target`.
pub fn resolve_connection(
    uri_builder: &dyn UriBuilder,
    profiles_path: &Path,
    project_name: &str,
    target_name: &str,
) -> Result<ResolvedConnection, SupersyncError> {
    let profiles = load_profiles(profiles_path)?;
    let output = profiles.output(project_name, target_name)?;

    Ok(ResolvedConnection {
        database_name: database_name(project_name, target_name),
        sqlalchemy_uri: uri_builder.build(output)?,
    })
}

/// Creates or updates the remote database matching a dbt project/target.
///
/// A remote record matches when both its name and its URI equal the derived
/// ones. Exactly one mutation call is issued, none if anything fails before.
#[instrument(
    skip(registry, uri_builder, request),
    fields(project = %request.project_name, target = %request.target_name)
)]
pub async fn sync_database(
    registry: &dyn DatabaseRegistry,
    uri_builder: &dyn UriBuilder,
    request: &SyncRequest,
) -> Result<SyncOutcome, SupersyncError> {
    let connection = resolve_connection(
        uri_builder,
        &request.profiles_path,
        &request.project_name,
        &request.target_name,
    )?;
    debug!(
        name = %connection.database_name,
        uri = %mask_password(&connection.sqlalchemy_uri),
        "Resolved connection"
    );

    let databases = registry.get_databases().await?;
    let mut matches: Vec<RemoteDatabase> = databases
        .into_iter()
        .filter(|db| {
            db.database_name == connection.database_name
                && db.sqlalchemy_uri == connection.sqlalchemy_uri
        })
        .collect();

    if matches.len() > 1 {
        return Err(DomainError::AmbiguousMatch.into());
    }

    if let Some(database) = matches.pop() {
        info!(id = database.id, "Database already registered, refreshing");
        let updated = registry
            .update_database(
                database.id,
                DatabaseUpdate {
                    database_name: connection.database_name,
                },
            )
            .await?;
        return Ok(SyncOutcome::Updated(updated));
    }

    if !request.import_db {
        return Err(DomainError::DatabaseNotFound {
            database_name: connection.database_name,
        }
        .into());
    }

    let external_url = (!request.external_url_prefix.is_empty())
        .then(|| format!("{}{}", request.external_url_prefix, EXTERNAL_URL_SUFFIX));

    info!(name = %connection.database_name, "Importing database");
    let created = registry
        .create_database(NewDatabase {
            database_name: connection.database_name,
            sqlalchemy_uri: connection.sqlalchemy_uri,
            external_url,
            is_managed_externally: request.disallow_edits,
        })
        .await?;

    Ok(SyncOutcome::Created(created))
}
