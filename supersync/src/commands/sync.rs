// supersync/src/commands/sync.rs
//
// USE CASE: Create or update the Superset database of a dbt target.

use supersync_core::application::{SyncOutcome, SyncRequest, resolve_connection, sync_database};
use supersync_core::infrastructure::config::resolve_profiles_path;
use supersync_core::infrastructure::uri::SqlAlchemyUriBuilder;

use crate::cli::{SupersetArgs, TargetArgs};

pub async fn execute(
    superset: SupersetArgs,
    target: TargetArgs,
    import_db: bool,
    disallow_edits: bool,
    external_url_prefix: String,
) -> anyhow::Result<()> {
    let profiles_path = resolve_profiles_path(target.profiles)?;
    println!("⚙️  Using profiles from {}", profiles_path.display());

    // A bad project or target must not depend on Superset being reachable
    let connection = match resolve_connection(
        &SqlAlchemyUriBuilder,
        &profiles_path,
        &target.project,
        &target.target,
    ) {
        Ok(connection) => connection,
        Err(e) => {
            eprintln!("❌ Sync failed: {}", e);
            std::process::exit(1);
        }
    };
    println!("🔗 Target resolved to database '{}'", connection.database_name);

    let client = super::connect(&superset).await?;

    let request = SyncRequest {
        profiles_path,
        project_name: target.project,
        target_name: target.target,
        import_db,
        disallow_edits,
        external_url_prefix,
    };

    match sync_database(&client, &SqlAlchemyUriBuilder, &request).await {
        Ok(SyncOutcome::Created(db)) => {
            println!("✨ Database '{}' created (id {})", db.database_name, db.id);
        }
        Ok(SyncOutcome::Updated(db)) => {
            println!("✅ Database '{}' updated (id {})", db.database_name, db.id);
        }
        Err(e) => {
            eprintln!("❌ Sync failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
