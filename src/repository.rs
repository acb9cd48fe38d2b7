//! Repository: the only path to the `employees` table.
//!
//! Every store call runs while holding one process-wide lock, so at most one store
//! operation executes at a time. [`EmployeeRepository::lock`] lets a caller keep the
//! lock across several calls; the convenience methods take it for exactly one.

use crate::db::{Employee, EmployeesStorage};
use crate::error::RegistryError;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{Span, error, info, warn};

pub struct EmployeeRepository {
    storage: EmployeesStorage,
    lock: Mutex<()>,
    span: Span,
}

/// Exclusive access to the store for as long as this value lives.
pub struct LockedEmployees<'a> {
    storage: &'a EmployeesStorage,
    span: &'a Span,
    _guard: MutexGuard<'a, ()>,
}

impl EmployeeRepository {
    pub fn new(storage: EmployeesStorage, span: Span) -> Self {
        Self {
            storage,
            lock: Mutex::new(()),
            span,
        }
    }

    pub async fn lock(&self) -> LockedEmployees<'_> {
        LockedEmployees {
            storage: &self.storage,
            span: &self.span,
            _guard: self.lock.lock().await,
        }
    }

    pub async fn create(&self, employee: Employee) -> Employee {
        self.lock().await.create(employee).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Employee, RegistryError> {
        self.lock().await.get_by_id(id).await
    }

    pub async fn update(&self, employee: &Employee) -> Result<(), RegistryError> {
        self.lock().await.update(employee).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), RegistryError> {
        self.lock().await.delete(id).await
    }

    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Employee>, RegistryError> {
        self.lock().await.list(offset, limit).await
    }
}

impl LockedEmployees<'_> {
    /// Insert a new row. A store failure is logged and swallowed: the caller gets the
    /// employee back unchanged, with `id` still 0.
    pub async fn create(&self, mut employee: Employee) -> Employee {
        match self.storage.insert(&employee).await {
            Ok(id) => {
                employee.id = id;
                info!(parent: self.span, id, name = %employee.name, "employee created");
            }
            Err(e) => {
                error!(
                    parent: self.span,
                    error = %e,
                    name = %employee.name,
                    "error creating employee"
                );
            }
        }
        employee
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Employee, RegistryError> {
        match self.storage.find_by_id(id).await {
            Ok(Some(employee)) => {
                info!(parent: self.span, id, "retrieved employee");
                Ok(employee)
            }
            Ok(None) => {
                warn!(parent: self.span, id, "employee not found");
                Err(RegistryError::NotFound(id))
            }
            Err(e) => {
                error!(parent: self.span, id, error = %e, "error retrieving employee");
                Err(e)
            }
        }
    }

    /// Persist all fields of an existing employee.
    pub async fn update(&self, employee: &Employee) -> Result<(), RegistryError> {
        match self.storage.save(employee).await {
            Ok(0) => {
                warn!(parent: self.span, id = employee.id, "employee to update not found");
                Err(RegistryError::NotFound(employee.id))
            }
            Ok(_) => {
                info!(parent: self.span, id = employee.id, "employee updated");
                Ok(())
            }
            Err(e) => {
                error!(parent: self.span, id = employee.id, error = %e, "error updating employee");
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), RegistryError> {
        match self.storage.delete_by_id(id).await {
            Ok(0) => {
                warn!(parent: self.span, id, "employee to delete not found");
                Err(RegistryError::NotFound(id))
            }
            Ok(_) => {
                info!(parent: self.span, id, "employee deleted");
                Ok(())
            }
            Err(e) => {
                error!(parent: self.span, id, error = %e, "error deleting employee");
                Err(e)
            }
        }
    }

    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Employee>, RegistryError> {
        self.storage
            .range(offset, limit)
            .await
            .inspect(|rows| {
                info!(parent: self.span, offset, limit, count = rows.len(), "listed employees");
            })
            .inspect_err(|e| {
                error!(parent: self.span, offset, limit, error = %e, "error listing employees");
            })
    }
}
