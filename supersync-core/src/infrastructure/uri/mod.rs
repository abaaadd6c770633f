pub mod sqlalchemy;

pub use sqlalchemy::{SqlAlchemyUriBuilder, mask_password};
