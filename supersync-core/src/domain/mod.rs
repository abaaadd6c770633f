pub mod error;
pub mod ports;
pub mod profile;

// Handy re-exports to keep imports short elsewhere
pub use error::DomainError;
pub use profile::{ProfileDocument, ProfileOutput, ProjectProfile};
