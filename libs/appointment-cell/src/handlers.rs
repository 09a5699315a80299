use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_database::AppState;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;

use crate::models::{BookAppointmentRequest, RescheduleAppointmentRequest};
use crate::services::booking::AppointmentBookingService;

#[axum::debug_handler(state = AppState)]
pub async fn book_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<BookAppointmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(request) = payload?;
    debug!("Booking requested by {} {}", user.role, user.id);

    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service.book_appointment(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": appointment
        })),
    ))
}

#[axum::debug_handler(state = AppState)]
pub async fn get_appointments(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointments = booking_service.list_appointments().await?;

    Ok(Json(json!({
        "success": true,
        "data": appointments
    })))
}

#[axum::debug_handler(state = AppState)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let cancelled = booking_service.cancel_appointment(&appointment_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": { "id": cancelled.id },
        "message": "Appointment cancelled successfully"
    })))
}

#[axum::debug_handler(state = AppState)]
pub async fn reschedule_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
    payload: Result<Json<RescheduleAppointmentRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service.reschedule_appointment(&appointment_id, request).await?;

    Ok(Json(json!({
        "success": true,
        "data": appointment
    })))
}

#[axum::debug_handler(state = AppState)]
pub async fn complete_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service.complete_appointment(&appointment_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": appointment
    })))
}
