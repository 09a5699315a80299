use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn appointment_routes(state: AppState) -> Router {
    // All appointment operations require authentication
    Router::new()
        .route("/", get(handlers::get_appointments))
        .route("/book", post(handlers::book_appointment))
        .route("/cancel/{appointment_id}", delete(handlers::cancel_appointment))
        .route(
            "/reschedule/{appointment_id}",
            patch(handlers::reschedule_appointment).put(handlers::reschedule_appointment),
        )
        .route("/complete/{appointment_id}", patch(handlers::complete_appointment))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware))
        .with_state(state)
}
