use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    AppState,
    auth_token::AdminIdentity,
    entities::appointment,
    error::ServiceError,
    services::appointment_service::{self, NewAppointment},
};

#[derive(Serialize, ToSchema)]
pub struct CreatedResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
}

#[derive(Serialize, ToSchema)]
pub struct DeletedResponse {
    pub success: bool,
    pub message: String,
    /// The deleted record, or null when the id did not exist
    pub data: Option<appointment::Model>,
}

#[utoipa::path(
    post,
    tags = ["Appointment"],
    description = "Submit a booking request from the public form",
    path = "",
    request_body(content = NewAppointment, content_type = "application/json"),
    responses(
        (status = 200, description = "Appointment saved", body = CreatedResponse),
    )
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(body): Json<NewAppointment>,
) -> Result<Json<CreatedResponse>, ServiceError> {
    let stored = appointment_service::create(&state.db, body).await?;

    Ok(Json(CreatedResponse {
        success: true,
        message: "Appointment saved!".to_string(),
        id: stored.id,
    }))
}

#[utoipa::path(
    get,
    tags = ["Appointment"],
    description = "List all appointments, most recent first",
    path = "",
    responses(
        (status = 200, description = "Appointments fetched successfully", body = Vec<appointment::Model>),
        (status = 401, description = "Missing or invalid bearer token"),
    )
)]
pub async fn list_appointments(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<appointment::Model>>, ServiceError> {
    let appointments = appointment_service::list(&state.db).await?;
    Ok(Json(appointments))
}

#[utoipa::path(
    delete,
    tags = ["Appointment"],
    description = "Delete an appointment by id. Succeeds even when the id does not exist.",
    path = "/{id}",
    responses(
        (status = 200, description = "Deleted", body = DeletedResponse),
        (status = 401, description = "Missing or invalid bearer token"),
    )
)]
pub async fn delete_appointment(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ServiceError> {
    let deleted = appointment_service::delete(&state.db, &id).await?;

    Ok(Json(DeletedResponse {
        success: true,
        message: "Deleted".to_string(),
        data: deleted,
    }))
}

pub fn public_router() -> Router<AppState> {
    Router::new().route("/", post(create_appointment))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_appointments))
        .route("/{id}", delete(delete_appointment))
}
