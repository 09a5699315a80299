use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;

use crate::models::UpdateAvailabilityRequest;
use crate::services::AvailabilityService;

#[axum::debug_handler(state = AppState)]
pub async fn get_availability(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let availability_service = AvailabilityService::new(&state);

    let availability = availability_service.get_availability(&user_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": availability
    })))
}

#[axum::debug_handler(state = AppState)]
pub async fn update_availability(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<UpdateAvailabilityRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    let availability_service = AvailabilityService::new(&state);

    let availability = availability_service
        .update_availability(&user, &user_id, request)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": availability
    })))
}
