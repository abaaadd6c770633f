// supersync-core/src/infrastructure/mod.rs

pub mod config;
pub mod error;
pub mod superset;
pub mod template;
pub mod uri;
