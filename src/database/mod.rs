pub mod manager;
pub mod models;
pub mod query_builder;
pub mod sql;

pub use manager::{DatabaseError, DatabaseManager};
pub use query_builder::SqlResult;
pub use sql::{sql_for_partial_update, PartialUpdate, SqlError, SqlValue, UpdateField};
