use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;

use super::MockBackend;
use crate::entities::{Employee, EmployeeDraft};
use crate::error;

const NOT_FOUND: &str = "Employee not found";
const UNAVAILABLE: &str = "Service unavailable";

#[derive(Debug, Serialize)]
struct Envelope {
    employee: Employee,
}

/// A failing response carrying the `{"error": ...}` payload.
#[derive(Debug)]
struct ApiError(StatusCode, &'static str);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = error::Response {
            error: self.1.to_string(),
        };
        (self.0, Json(body)).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

pub(super) fn router(backend: MockBackend) -> Router {
    Router::new()
        .route(
            "/api/employees",
            get(list_employees).post(create_employee),
        )
        .route(
            "/api/employees/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
        .layer(middleware::from_fn_with_state(backend.clone(), simulate_network))
        .with_state(backend)
}

/// Applies the configured latency and the outage switch to every request.
async fn simulate_network(
    State(backend): State<MockBackend>,
    request: Request,
    next: Next,
) -> Response {
    if !backend.latency.is_zero() {
        tokio::time::sleep(backend.latency).await;
    }
    if backend.db.lock().await.outage {
        debug!(uri = %request.uri(), "rejecting request during simulated outage");
        return ApiError(StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE).into_response();
    }
    trace!(method = %request.method(), uri = %request.uri(), "mock backend request");
    next.run(request).await
}

async fn list_employees(State(backend): State<MockBackend>) -> Json<Vec<Employee>> {
    Json(backend.db.lock().await.employees.clone())
}

async fn get_employee(
    State(backend): State<MockBackend>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope>> {
    let db = backend.db.lock().await;
    let employee = db
        .find(&id)
        .cloned()
        .ok_or(ApiError(StatusCode::NOT_FOUND, NOT_FOUND))?;
    Ok(Json(Envelope { employee }))
}

async fn create_employee(
    State(backend): State<MockBackend>,
    Json(draft): Json<EmployeeDraft>,
) -> (StatusCode, Json<Envelope>) {
    let employee = backend.db.lock().await.insert(draft);
    debug!(id = %employee.id, "mock backend created employee");
    (StatusCode::CREATED, Json(Envelope { employee }))
}

async fn update_employee(
    State(backend): State<MockBackend>,
    Path(id): Path<String>,
    Json(draft): Json<EmployeeDraft>,
) -> ApiResult<Json<Envelope>> {
    let mut db = backend.db.lock().await;
    let slot = db
        .employees
        .iter_mut()
        .find(|employee| employee.id == id)
        .ok_or(ApiError(StatusCode::NOT_FOUND, NOT_FOUND))?;
    *slot = draft.into_employee(id);
    Ok(Json(Envelope {
        employee: slot.clone(),
    }))
}

async fn delete_employee(
    State(backend): State<MockBackend>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut db = backend.db.lock().await;
    let position = db
        .employees
        .iter()
        .position(|employee| employee.id == id)
        .ok_or(ApiError(StatusCode::NOT_FOUND, NOT_FOUND))?;
    db.employees.remove(position);
    Ok(StatusCode::NO_CONTENT)
}
