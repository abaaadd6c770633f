// supersync-core/src/application/mod.rs

pub mod databases;
pub mod sync;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write:
// `use supersync_core::application::{sync_database, list_databases};`
// without knowing the file layout.

pub use databases::list_databases;
pub use sync::{
    EXTERNAL_URL_SUFFIX, ResolvedConnection, SyncOutcome, SyncRequest, resolve_connection,
    sync_database,
};
