use crate::config::{DatabaseConfig, Dialect};
use crate::db::models::Employee;
use crate::db::schema::init_script;
use crate::error::RegistryError;
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;

pub type StorePool = AnyPool;

/// Raw access to the `employees` table. Carries no locking of its own.
///
/// Queries use `$N` placeholders, which both the SQLite and Postgres drivers accept.
#[derive(Clone)]
pub struct EmployeesStorage {
    pool: StorePool,
    dialect: Dialect,
}

impl EmployeesStorage {
    pub fn new(pool: StorePool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    /// Open a pool for the configured store and ensure the table exists.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, RegistryError> {
        sqlx::any::install_default_drivers();
        let dialect = cfg.dialect()?;
        let url = cfg.connection_url()?;

        // Every connection to `:memory:` is its own database, so pin the pool to one.
        let pool_opts = if cfg.is_in_memory() {
            AnyPoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            AnyPoolOptions::new()
        };
        let pool = pool_opts.connect(&url).await?;

        let storage = Self::new(pool, dialect);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &StorePool {
        &self.pool
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), RegistryError> {
        for stmt in init_script(self.dialect).split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a row and return the id the store generated for it.
    pub async fn insert(&self, employee: &Employee) -> Result<i64, RegistryError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO employees (name, position, salary) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&employee.name)
        .bind(&employee.position)
        .bind(employee.salary)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, RegistryError> {
        let row = sqlx::query_as::<_, Employee>(
            "SELECT id, name, position, salary FROM employees WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace every column of the row keyed by `employee.id`. Returns rows affected.
    pub async fn save(&self, employee: &Employee) -> Result<u64, RegistryError> {
        let result = sqlx::query(
            "UPDATE employees SET name = $1, position = $2, salary = $3 WHERE id = $4",
        )
        .bind(&employee.name)
        .bind(&employee.position)
        .bind(employee.salary)
        .bind(employee.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Returns rows affected; zero means no row had this id.
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, RegistryError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Up to `limit` rows after skipping `offset`, in id order.
    pub async fn range(&self, offset: i64, limit: i64) -> Result<Vec<Employee>, RegistryError> {
        let rows = sqlx::query_as::<_, Employee>(
            "SELECT id, name, position, salary FROM employees ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
