pub mod auth;
pub mod client;

pub use auth::SupersetAuth;
pub use client::{SupersetClient, SupersetClientConfig};
