use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub salary: f64,
}

impl Employee {
    /// A not-yet-persisted employee; the store assigns `id` on insert.
    pub fn new(name: impl Into<String>, position: impl Into<String>, salary: f64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            position: position.into(),
            salary,
        }
    }

    /// Replace every mutable field, keeping `id`.
    pub fn apply(&mut self, payload: EmployeePayload) {
        self.name = payload.name;
        self.position = payload.position;
        self.salary = payload.salary;
    }
}

/// Body of create and update requests. All three fields are required; a client `id` is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EmployeePayload {
    pub name: String,
    pub position: String,
    pub salary: f64,
}
