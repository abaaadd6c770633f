// supersync-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Project {project} not found in {path}")]
    #[diagnostic(
        code(supersync::domain::project_not_found),
        help("Check the top-level keys of your profiles.yml.")
    )]
    ProjectNotFound { project: String, path: String },

    #[error("Target {target} not found in the outputs of {path}")]
    #[diagnostic(
        code(supersync::domain::target_not_found),
        help("Check the `outputs:` block of the project.")
    )]
    TargetNotFound { target: String, path: String },

    #[error("More than one database with the same SQLAlchemy URI and name found")]
    #[diagnostic(
        code(supersync::domain::ambiguous_match),
        help("Database names are unique in Superset; remove the duplicate entry.")
    )]
    AmbiguousMatch,

    #[error("Database {database_name} not found")]
    #[diagnostic(
        code(supersync::domain::database_not_found),
        help("Pass --import-db to create it.")
    )]
    DatabaseNotFound { database_name: String },

    #[error("Connection type '{0}' is not supported")]
    #[diagnostic(code(supersync::domain::unsupported_connection))]
    UnsupportedConnection(String),

    #[error("Missing parameter '{parameter}' for a {connection_type} connection")]
    #[diagnostic(code(supersync::domain::missing_parameter))]
    MissingParameter {
        connection_type: String,
        parameter: String,
    },

    #[error("Invalid connection parameters: {0}")]
    #[diagnostic(code(supersync::domain::invalid_connection))]
    InvalidConnection(String),
}
