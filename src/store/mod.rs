//! Persistence — the `ProfileStore` trait and its libSQL backend.

pub mod libsql_backend;
pub mod traits;

pub use libsql_backend::LibSqlBackend;
pub use traits::ProfileStore;
