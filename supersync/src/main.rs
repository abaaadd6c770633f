// supersync/src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug supersync sync ... to see the details
    // Logs go to stderr so `supersync uri` output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: SYNC DATABASE ---
        Commands::Sync {
            superset,
            target,
            import_db,
            disallow_edits,
            external_url_prefix,
        } => {
            commands::sync::execute(
                superset,
                target,
                import_db,
                disallow_edits,
                external_url_prefix,
            )
            .await
        }

        // --- USE CASE: LIST DATABASES ---
        Commands::Databases { superset } => commands::databases::execute(superset).await,

        // --- USE CASE: SHOW URI ---
        Commands::Uri {
            target,
            show_password,
        } => commands::uri::execute(target, show_password),
    }
}
