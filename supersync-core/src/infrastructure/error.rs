// supersync-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(supersync::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(supersync::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Profiles file not found at '{0}'")]
    #[diagnostic(
        code(supersync::infra::profiles_missing),
        help("Pass --profiles or set DBT_PROFILES_DIR.")
    )]
    ProfilesNotFound(String),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(supersync::infra::template),
        help("Check the {{ env_var(...) }} calls in profiles.yml.")
    )]
    TemplateError(#[from] minijinja::Error),

    // --- HTTP ---
    #[error("HTTP Error: {0}")]
    #[diagnostic(code(supersync::infra::http))]
    Http(#[from] reqwest::Error),

    #[error("Unexpected API payload: {0}")]
    #[diagnostic(code(supersync::infra::json))]
    Json(#[from] serde_json::Error),

    #[error("Invalid Superset URL: {0}")]
    #[diagnostic(code(supersync::infra::url))]
    InvalidUrl(#[from] url::ParseError),

    #[error("Superset API returned {status}: {body}")]
    #[diagnostic(code(supersync::infra::api))]
    Api { status: u16, body: String },

    #[error("Authentication Error: {0}")]
    #[diagnostic(
        code(supersync::infra::auth),
        help("Check SUPERSET_USERNAME/SUPERSET_PASSWORD or SUPERSET_JWT_TOKEN.")
    )]
    Auth(String),
}
