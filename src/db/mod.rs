pub mod connection;
pub mod schema;
pub mod task_repo;

pub use connection::*;
