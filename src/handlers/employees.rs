use crate::db::{Employee, EmployeePayload};
use crate::middleware::Pagination;
use crate::{RegistryError, router::RegistryState};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::{Span, error, info};

const DELETED_MESSAGE: &str = "Successfully deleted the employee";

/// POST /employees
pub async fn create_employee(
    State(state): State<RegistryState>,
    body: Result<Json<EmployeePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), RegistryError> {
    let Json(payload) = decode_body(&state.span, body)?;
    let employee = state
        .service
        .create_employee(payload.name, payload.position, payload.salary)
        .await;
    info!(parent: &state.span, id = employee.id, "created employee");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// GET /employees/{id}
pub async fn get_employee(
    State(state): State<RegistryState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Employee>, Response> {
    let id = parse_id(&state.span, &raw_id).map_err(IntoResponse::into_response)?;
    match state.service.get_employee_by_id(id).await {
        Ok(employee) => {
            info!(parent: &state.span, id, "retrieved employee");
            Ok(Json(employee))
        }
        Err(e) => {
            error!(parent: &state.span, id, error = %e, "error retrieving employee");
            Err(e.into_response_with(StatusCode::NOT_FOUND))
        }
    }
}

/// PUT /employees/{id}
pub async fn update_employee(
    State(state): State<RegistryState>,
    Path(raw_id): Path<String>,
    body: Result<Json<EmployeePayload>, JsonRejection>,
) -> Result<Json<Employee>, Response> {
    let id = parse_id(&state.span, &raw_id).map_err(IntoResponse::into_response)?;
    let Json(payload) =
        decode_body(&state.span, body).map_err(IntoResponse::into_response)?;
    match state.service.update_employee(id, payload).await {
        Ok(employee) => {
            info!(parent: &state.span, id, "updated employee");
            Ok(Json(employee))
        }
        Err(e) => {
            error!(parent: &state.span, id, error = %e, "error updating employee");
            Err(e.into_response_with(StatusCode::NOT_FOUND))
        }
    }
}

/// DELETE /employees/{id}. Every failure, including a malformed id, is reported as 404.
pub async fn delete_employee(
    State(state): State<RegistryState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, Response> {
    let id = parse_id(&state.span, &raw_id)
        .map_err(|e| e.into_response_with(StatusCode::NOT_FOUND))?;
    match state.service.delete_employee(id).await {
        Ok(()) => {
            info!(parent: &state.span, id, "deleted employee");
            Ok(Json(json!({ "data": DELETED_MESSAGE })))
        }
        Err(e) => {
            error!(parent: &state.span, id, error = %e, "error deleting employee");
            Err(e.into_response_with(StatusCode::NOT_FOUND))
        }
    }
}

/// GET /employees?page=&limit=
pub async fn list_employees(
    State(state): State<RegistryState>,
    pagination: Pagination,
) -> Result<Json<Vec<Employee>>, RegistryError> {
    let employees = state
        .service
        .list_employees(pagination.page, pagination.limit)
        .await
        .inspect_err(|e| {
            error!(parent: &state.span, error = %e, "error listing employees");
        })?;
    info!(
        parent: &state.span,
        page = pagination.page,
        limit = pagination.limit,
        count = employees.len(),
        "listed employees"
    );
    Ok(Json(employees))
}

fn parse_id(span: &Span, raw: &str) -> Result<i64, RegistryError> {
    raw.parse::<i64>().map_err(|e| {
        error!(parent: span, raw_id = raw, error = %e, "invalid ID");
        RegistryError::Validation("invalid ID".to_string())
    })
}

fn decode_body(
    span: &Span,
    body: Result<Json<EmployeePayload>, JsonRejection>,
) -> Result<Json<EmployeePayload>, RegistryError> {
    body.map_err(|rejection| {
        let message = rejection.body_text();
        error!(parent: span, error = %message, "error decoding request body");
        RegistryError::Validation(message)
    })
}
