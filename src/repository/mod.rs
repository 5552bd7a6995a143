//! Database repository layer

pub mod post_repo;
pub mod user_repo;

pub use post_repo::*;
pub use user_repo::*;
