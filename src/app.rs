use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/dashboard/:project_id", get(handlers::dashboard_page))
        .route("/api/dashboard/:project_id", get(handlers::get_dashboard))
        .route("/api/catalog", get(handlers::get_catalog))
        .with_state(state)
}
