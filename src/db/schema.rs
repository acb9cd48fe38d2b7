//! SQL DDL for the employee table, one variant per dialect.

use crate::config::Dialect;

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT, assigned by the store on insert
/// - `salary` stored as REAL, no range constraint
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    position TEXT NOT NULL,
    salary REAL NOT NULL
);
"#;

/// Postgres equivalent; `BIGSERIAL` keeps ids decodable as `i64`.
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    position TEXT NOT NULL,
    salary DOUBLE PRECISION NOT NULL
);
"#;

pub fn init_script(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Sqlite => SQLITE_INIT,
        Dialect::Postgres => POSTGRES_INIT,
    }
}
