//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and request bodies
//! - `schema.rs`: SQL DDL for initializing the database (SQLite and Postgres)
//! - `storage.rs`: the pool-backed store the repository talks to

pub mod models;
pub mod schema;
pub mod storage;

pub use models::{Employee, EmployeePayload};
pub use schema::{POSTGRES_INIT, SQLITE_INIT};
pub use storage::{EmployeesStorage, StorePool};
