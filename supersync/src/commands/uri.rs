// supersync/src/commands/uri.rs
//
// USE CASE: Show the SQLAlchemy URI a sync would register, without calling Superset.

use supersync_core::application::resolve_connection;
use supersync_core::infrastructure::config::resolve_profiles_path;
use supersync_core::infrastructure::uri::{SqlAlchemyUriBuilder, mask_password};

use crate::cli::TargetArgs;

pub fn execute(target: TargetArgs, show_password: bool) -> anyhow::Result<()> {
    let profiles_path = resolve_profiles_path(target.profiles)?;
    let connection = resolve_connection(
        &SqlAlchemyUriBuilder,
        &profiles_path,
        &target.project,
        &target.target,
    )?;

    let uri = if show_password {
        connection.sqlalchemy_uri
    } else {
        mask_password(&connection.sqlalchemy_uri)
    };

    println!("{}  {}", connection.database_name, uri);
    Ok(())
}
