use crate::db::EmployeesStorage;
use crate::handlers::employees::{
    create_employee, delete_employee, get_employee, list_employees, update_employee,
};
use crate::repository::EmployeeRepository;
use crate::service::EmployeeService;
use axum::{Router, routing::get};
use std::sync::Arc;
use tracing::{Span, info_span};

/// Handler state: the service plus the span every controller event is emitted under.
#[derive(Clone)]
pub struct RegistryState {
    pub service: Arc<EmployeeService>,
    pub span: Span,
}

impl RegistryState {
    pub fn new(service: EmployeeService, span: Span) -> Self {
        Self {
            service: Arc::new(service),
            span,
        }
    }
}

pub fn registry_router(state: RegistryState) -> Router {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .with_state(state)
}

/// Wire repository -> service -> handlers over an already connected store.
pub fn registry_app(storage: EmployeesStorage) -> Router {
    let repository = Arc::new(EmployeeRepository::new(storage, info_span!("repository")));
    let service = EmployeeService::new(repository, info_span!("service"));
    registry_router(RegistryState::new(service, info_span!("controller")))
}
