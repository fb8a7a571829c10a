//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, routing::get};
use tracing::instrument;

use crate::{
    error::AppError,
    filters,
    services::dashboard::{DashboardMetrics, DashboardSource, WidgetPanel},
    state::AppState,
};

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: String,
    pub metrics: DashboardMetrics,
    pub widgets: Vec<WidgetPanel>,
}

/// Dashboard page handler.
///
/// # Errors
///
/// Returns an error if any collection or the widget layout cannot be read.
#[instrument(skip(state))]
pub async fn dashboard(State(state): State<AppState>) -> Result<DashboardTemplate, AppError> {
    let snapshot = DashboardSource::load(state.store()).await?.snapshot();
    Ok(DashboardTemplate {
        current_path: "/".to_string(),
        metrics: snapshot.metrics,
        widgets: snapshot.widgets,
    })
}
