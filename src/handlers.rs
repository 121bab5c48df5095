use crate::catalog::{MetricDescriptor, catalog};
use crate::dashboard::build_dashboard;
use crate::errors::AppError;
use crate::models::{DashboardQuery, DashboardResponse};
use crate::state::AppState;
use crate::ui::render_dashboard;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Redirect {
    let project = urlencoding::encode(&state.config.default_project);
    Redirect::to(&format!("/dashboard/{project}"))
}

pub async fn dashboard_page(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let response = build_dashboard(&state, &project_id, &query)?;
    info!(
        project = %project_id,
        records = response.chart.data.len(),
        series = response.chart.series_keys.len(),
        "rendered dashboard page"
    );
    Ok(Html(render_dashboard(&response, query.days)))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(build_dashboard(&state, &project_id, &query)?))
}

pub async fn get_catalog() -> Json<&'static [MetricDescriptor]> {
    Json(catalog())
}
