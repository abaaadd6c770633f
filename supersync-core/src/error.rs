// supersync-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum SupersyncError {
    // --- DOMAIN ERRORS (lookup, reconciliation rules) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, parsing, HTTP) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl SupersyncError {
    /// True when the sync aborted because the database is missing remotely
    /// and importing was not allowed.
    pub fn is_database_not_found(&self) -> bool {
        matches!(self, Self::Domain(DomainError::DatabaseNotFound { .. }))
    }
}

// Shortcut so `?` works directly on std IO calls
impl From<std::io::Error> for SupersyncError {
    fn from(err: std::io::Error) -> Self {
        SupersyncError::Infrastructure(InfrastructureError::Io(err))
    }
}
