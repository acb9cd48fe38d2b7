use crate::db::{Employee, EmployeePayload};
use crate::error::RegistryError;
use crate::repository::EmployeeRepository;
use std::sync::Arc;
use tracing::{Span, debug};

/// Business rules over the repository; knows nothing about HTTP or SQL.
#[derive(Clone)]
pub struct EmployeeService {
    repository: Arc<EmployeeRepository>,
    span: Span,
}

impl EmployeeService {
    pub fn new(repository: Arc<EmployeeRepository>, span: Span) -> Self {
        Self { repository, span }
    }

    /// Create never fails from the caller's point of view. If the store rejected the
    /// insert the returned employee still carries `id == 0`.
    pub async fn create_employee(
        &self,
        name: impl Into<String>,
        position: impl Into<String>,
        salary: f64,
    ) -> Employee {
        let employee = Employee::new(name, position, salary);
        debug!(parent: &self.span, name = %employee.name, "creating employee");
        self.repository.create(employee).await
    }

    pub async fn get_employee_by_id(&self, id: i64) -> Result<Employee, RegistryError> {
        self.repository.get_by_id(id).await
    }

    /// Overwrite name/position/salary of the current record, keeping `id`.
    pub async fn update_employee(
        &self,
        id: i64,
        payload: EmployeePayload,
    ) -> Result<Employee, RegistryError> {
        self.modify_employee(id, |employee| employee.apply(payload)).await
    }

    /// Fetch, apply `change`, save. The repository lock is held for the whole
    /// sequence so concurrent modifications of one id cannot interleave.
    pub async fn modify_employee<F>(&self, id: i64, change: F) -> Result<Employee, RegistryError>
    where
        F: FnOnce(&mut Employee),
    {
        let locked = self.repository.lock().await;
        let mut employee = locked.get_by_id(id).await?;
        change(&mut employee);
        employee.id = id;
        debug!(parent: &self.span, id, "merged change into current record");
        locked.update(&employee).await?;
        Ok(employee)
    }

    pub async fn delete_employee(&self, id: i64) -> Result<(), RegistryError> {
        self.repository.delete(id).await
    }

    /// `page` is 1-based. Bounds are the caller's job; out-of-range arithmetic saturates.
    pub async fn list_employees(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<Vec<Employee>, RegistryError> {
        let offset = page_offset(page, limit);
        debug!(parent: &self.span, page, limit, offset, "listing employees");
        self.repository.list(offset, limit).await
    }
}

fn page_offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit)
}
