use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn availability_routes(state: AppState) -> Router {
    // Reads are public; writes need a token for the account being changed
    let protected_methods = put(handlers::update_availability)
        .patch(handlers::update_availability)
        .route_layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware));

    Router::new()
        .route(
            "/{id}/availability",
            get(handlers::get_availability).merge(protected_methods),
        )
        .with_state(state)
}
