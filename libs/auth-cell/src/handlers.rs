use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::AppState;
use shared_models::account::Role;
use shared_models::auth::TokenResponse;
use shared_models::error::AppError;
use shared_utils::extractor::extract_bearer_token;
use shared_utils::jwt;

use crate::models::{LoginRequest, RegisterRequest, UsersQuery};
use crate::services::AccountService;

#[axum::debug_handler(state = AppState)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(request) = payload?;
    let account_service = AccountService::new(&state);

    let account = account_service.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": account.to_public()
        })),
    ))
}

#[axum::debug_handler(state = AppState)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    let account_service = AccountService::new(&state);

    let session = account_service.authenticate(request).await?;

    Ok(Json(json!({
        "success": true,
        "token": session.token,
        "role": session.role,
        "userId": session.user_id,
        "name": session.name
    })))
}

#[axum::debug_handler(state = AppState)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<Value>, AppError> {
    let role = query
        .role
        .as_deref()
        .map(str::parse::<Role>)
        .transpose()
        .map_err(AppError::ValidationError)?;

    let account_service = AccountService::new(&state);
    let users = account_service.list_users(role).await?;

    Ok(Json(json!({
        "success": true,
        "data": users
    })))
}

pub async fn validate_token(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    debug!("Validating token");

    let token = extract_bearer_token(&headers)?;

    let user = jwt::validate_token(&token, &config.jwt_secret).map_err(AppError::Auth)?;

    Ok(Json(TokenResponse {
        valid: true,
        user_id: user.id,
        role: user.role,
    }))
}
