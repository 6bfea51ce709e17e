//! Report endpoints
//!
//! `GET /` serves the state-selection form; `POST /results` runs the
//! report for the submitted state.

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::report::{self, StateReport};
use crate::state::AppState;

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Developer Salaries by State</title></head>
<body>
  <h1>Developer Salaries by State</h1>
  <form action="/results" method="post">
    <label for="state">State (full name, e.g. Texas):</label>
    <input type="text" id="state" name="state" required>
    <button type="submit">Show report</button>
  </form>
</body>
</html>
"#;

/// Report request: one `state` form field
#[derive(Deserialize)]
pub struct ReportRequest {
    pub state: String,
}

/// GET / - state selection form
async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// POST /results - run the report for the submitted state
///
/// A malformed form (missing `state` field, wrong content type) is a 400,
/// not axum's default rejection status.
async fn results(
    State(state): State<AppState>,
    form: Result<Form<ReportRequest>, FormRejection>,
) -> Result<Json<StateReport>, ApiError> {
    let Form(request) = form.map_err(|rejection| ApiError::BadRequest {
        message: rejection.body_text(),
    })?;

    let selected = request.state.trim();
    if selected.is_empty() {
        return Err(ApiError::BadRequest {
            message: "state field is required".to_string(),
        });
    }

    tracing::info!(state = %selected, "report requested");
    let report = report::build_report(state.pool(), selected).await?;
    Ok(Json(report))
}

/// Report routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/results", post(results))
}
