//! CRUD handlers for `/employee`.
//!
//! Each handler issues one store operation and maps its outcome to a status.
//! A client disconnect drops the handler future, and with it the in-flight
//! driver call.

use crate::models::{Employee, EmployeeRequest, EmployeeResponse};
use crate::services::record_operation;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use service_core::error::AppError;

/// Body returned after a successful delete.
pub const DELETED_MESSAGE: &str = "record deleted...";

fn parse_body(body: &[u8]) -> Result<EmployeeRequest, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(anyhow::Error::new(e)))
}

pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let cursor = state.db.employees().find(doc! {}, None).await.map_err(|e| {
        tracing::error!("Failed to query employees: {}", e);
        record_operation("list", "error");
        AppError::from(e)
    })?;

    // A decode failure part way through ends the request here; nothing
    // collected so far is sent.
    let employees: Vec<Employee> = cursor.try_collect().await.map_err(|e| {
        tracing::error!("Failed to read employees cursor: {}", e);
        record_operation("list", "error");
        AppError::from(e)
    })?;

    record_operation("list", "ok");
    tracing::debug!(count = employees.len(), "Listed employees");

    let employees: Vec<EmployeeResponse> =
        employees.into_iter().map(EmployeeResponse::from).collect();
    Ok(Json(employees))
}

pub async fn create_employee(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let employee = Employee::from(parse_body(&body)?);
    let employees = state.db.employees();

    let inserted = employees.insert_one(&employee, None).await.map_err(|e| {
        tracing::error!("Failed to insert employee: {}", e);
        record_operation("create", "error");
        AppError::from(e)
    })?;

    // Answer with what the store holds, not with the in-memory copy.
    let created = employees
        .find_one(doc! { "_id": inserted.inserted_id.clone() }, None)
        .await
        .map_err(|e| {
            tracing::error!(
                inserted_id = %inserted.inserted_id,
                "Failed to read back inserted employee: {}",
                e
            );
            record_operation("create", "error");
            AppError::from(e)
        })?
        .ok_or_else(|| {
            tracing::error!(
                inserted_id = %inserted.inserted_id,
                "Inserted employee not found on read-back"
            );
            record_operation("create", "error");
            AppError::DatabaseError(anyhow::anyhow!(
                "inserted employee {} could not be read back",
                inserted.inserted_id
            ))
        })?;

    record_operation("create", "ok");
    tracing::info!(employee_id = %inserted.inserted_id, "Employee created");

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(created))))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let employee_id =
        ObjectId::parse_str(&id).map_err(|_| AppError::Status(StatusCode::BAD_REQUEST))?;
    let req = parse_body(&body)?;

    let update = doc! {
        "$set": {
            "name": req.name.clone(),
            "age": req.age,
            "salary": req.salary,
        }
    };

    let previous = state
        .db
        .employees()
        .find_one_and_update(doc! { "_id": employee_id }, update, None)
        .await
        .map_err(|e| {
            tracing::error!(employee_id = %employee_id, "Failed to update employee: {}", e);
            record_operation("update", "error");
            AppError::from(e)
        })?;

    // A missing document answers a bare 400 here, unlike delete's 404.
    if previous.is_none() {
        record_operation("update", "not_found");
        tracing::debug!(employee_id = %employee_id, "No employee to update");
        return Err(AppError::Status(StatusCode::BAD_REQUEST));
    }

    record_operation("update", "ok");
    tracing::info!(employee_id = %employee_id, "Employee updated");

    Ok(Json(EmployeeResponse::echo(id, req)))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let employee_id =
        ObjectId::parse_str(&id).map_err(|e| AppError::BadRequest(anyhow::Error::new(e)))?;

    let result = state
        .db
        .employees()
        .delete_one(doc! { "_id": employee_id }, None)
        .await
        .map_err(|e| {
            tracing::error!(employee_id = %employee_id, "Failed to delete employee: {}", e);
            record_operation("delete", "error");
            AppError::from(e)
        })?;

    if result.deleted_count < 1 {
        record_operation("delete", "not_found");
        return Err(AppError::NotFound(anyhow::anyhow!(
            "no employee with id {}",
            id
        )));
    }

    record_operation("delete", "ok");
    tracing::info!(employee_id = %employee_id, "Employee deleted");

    Ok(Json(DELETED_MESSAGE))
}
