// SPDX-License-Identifier: MIT

//! Sleep history CSV export route.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::error::Result;
use crate::services::export;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/sleep/export", get(export_sleep))
}

/// Fetch the complete sleep history and return it as a CSV attachment.
async fn export_sleep(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    // History is everything before today, newest first
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let records = state.sleep_service.fetch_sleep_history(&today).await?;
    tracing::info!(count = records.len(), "Sleep history fetched, building CSV");

    let csv = export::build_csv(&records);
    let filename = export::export_filename(&today);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}
