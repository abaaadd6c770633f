pub mod profiles;

pub use profiles::{PROFILES_FILE_NAME, load_profiles, resolve_profiles_path};
