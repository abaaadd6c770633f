// supersync/src/commands/databases.rs
//
// USE CASE: List the databases registered in Superset.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use supersync_core::application::list_databases;
use supersync_core::infrastructure::uri::mask_password;
use supersync_core::ports::registry::RemoteDatabase;

use crate::cli::SupersetArgs;

pub async fn execute(superset: SupersetArgs) -> anyhow::Result<()> {
    let client = super::connect(&superset).await?;
    let databases = list_databases(&client).await?;

    if databases.is_empty() {
        println!("📭 No database registered in {}", client.base_url());
        return Ok(());
    }

    println!("{}", render_table(&databases));
    println!("📊 {} database(s)", databases.len());
    Ok(())
}

fn render_table(databases: &[RemoteDatabase]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "SQLAlchemy URI"]);

    for db in databases {
        table.add_row(vec![
            db.id.to_string(),
            db.database_name.clone(),
            mask_password(&db.sqlalchemy_uri),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_masks_passwords() {
        let databases = vec![RemoteDatabase {
            id: 1,
            database_name: "my_project_dev".to_string(),
            sqlalchemy_uri: "postgresql+psycopg2://alice:s3cret@db:5432/analytics".to_string(),
            extra: Default::default(),
        }];

        let rendered = render_table(&databases).to_string();
        assert!(rendered.contains("my_project_dev"));
        assert!(!rendered.contains("s3cret"));
    }
}
