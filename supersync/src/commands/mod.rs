// supersync/src/commands/mod.rs

pub mod databases;
pub mod sync;
pub mod uri;

use anyhow::{Context, bail};
use supersync_core::infrastructure::superset::{SupersetAuth, SupersetClient, SupersetClientConfig};

use crate::cli::SupersetArgs;

impl SupersetArgs {
    /// JWT wins over username/password when both are given.
    pub fn auth(&self) -> anyhow::Result<SupersetAuth> {
        if let Some(token) = &self.jwt_token {
            return Ok(SupersetAuth::jwt(token.clone()));
        }
        match &self.username {
            Some(username) => Ok(SupersetAuth::UsernamePassword {
                username: username.clone(),
                password: self.password.clone(),
                provider: self.auth_provider.clone(),
            }),
            None => bail!(
                "No Superset credentials: set SUPERSET_JWT_TOKEN or SUPERSET_USERNAME/SUPERSET_PASSWORD"
            ),
        }
    }
}

/// Logs in and returns a ready-to-use client.
pub async fn connect(args: &SupersetArgs) -> anyhow::Result<SupersetClient> {
    let auth = args.auth()?;
    tracing::debug!(url = %args.url, ?auth, "Connecting to Superset");
    SupersetClient::connect(SupersetClientConfig::new(&args.url), auth)
        .await
        .with_context(|| format!("Failed to connect to Superset at {}", args.url))
}
