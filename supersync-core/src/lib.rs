// supersync-core/src/lib.rs

// 1. Documentation is optional for now
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contract of the remote database registry (Superset, mocks...)
pub mod ports;

// 2. Domain
// Profile document, URI builder port, domain errors.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// profiles.yml loading, Jinja rendering, SQLAlchemy URIs, Superset REST client.
pub mod infrastructure;

// 4. Application (Use Cases)
// sync_database, list_databases.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use supersync_core::SupersyncError;
pub use error::SupersyncError;
