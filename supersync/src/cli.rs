// supersync/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use supersync_core::infrastructure::superset::auth::DEFAULT_PROVIDER;

#[derive(Parser)]
#[command(name = "supersync")]
#[command(about = "Sync dbt profiles into the Superset database registry", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where Superset lives and how to log in.
#[derive(Args, Debug, Clone)]
pub struct SupersetArgs {
    /// Base URL of the Superset instance
    #[arg(long, env = "SUPERSET_URL")]
    pub url: String,

    #[arg(long, env = "SUPERSET_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "SUPERSET_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// JWT to use instead of a username/password login
    #[arg(long, env = "SUPERSET_JWT_TOKEN", hide_env_values = true)]
    pub jwt_token: Option<String>,

    /// Login provider sent with username/password (db | ldap)
    #[arg(long, default_value = DEFAULT_PROVIDER)]
    pub auth_provider: String,
}

/// Which output block of profiles.yml to use.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// dbt project name (top-level key of profiles.yml)
    #[arg(long)]
    pub project: String,

    /// Target name inside the project's outputs (ex: "dev")
    #[arg(long)]
    pub target: String,

    /// Path to profiles.yml (default: $DBT_PROFILES_DIR or ~/.dbt)
    #[arg(long, env = "SUPERSYNC_PROFILES")]
    pub profiles: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔄 Creates or updates the Superset database of a dbt target
    Sync {
        #[command(flatten)]
        superset: SupersetArgs,

        #[command(flatten)]
        target: TargetArgs,

        /// Create the database if it doesn't exist yet
        #[arg(long)]
        import_db: bool,

        /// Mark created databases as managed externally (no edits in the UI)
        #[arg(long)]
        disallow_edits: bool,

        /// dbt docs URL attached to created databases
        #[arg(long, default_value = "")]
        external_url_prefix: String,
    },

    /// 📋 Lists the databases registered in Superset
    Databases {
        #[command(flatten)]
        superset: SupersetArgs,
    },

    /// 🔗 Prints the SQLAlchemy URI derived from a dbt target
    Uri {
        #[command(flatten)]
        target: TargetArgs,

        /// Print the password instead of masking it
        #[arg(long)]
        show_password: bool,
    },
}
