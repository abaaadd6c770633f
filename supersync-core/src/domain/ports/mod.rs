// src/domain/ports/mod.rs

pub mod uri;

pub use uri::UriBuilder;
