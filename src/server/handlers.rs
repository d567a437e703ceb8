//! HTTP request handlers.
//!
//! Handlers never fail the whole request for per-unit problems — that
//! policy lives in the orchestrator. The failures that can surface here
//! are route-level ones (reset I/O, unreadable ledger), which render as a
//! flash-style notice or a 500 with a plain message.

use askama::Template;
use axum::{
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::templates::{IndexTemplate, ResultEntry, ResultsTemplate};
use super::AppState;
use crate::orchestrate::UploadedFile;

/// Render an askama template, degrading to the error text on failure.
fn render<T: Template>(template: T) -> Html<String> {
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    )
}

/// Health check endpoint to verify the API is running.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "API is running" }))
}

/// The upload form.
pub async fn home() -> Html<String> {
    render(IndexTemplate::plain())
}

/// Query parameters for the upload route.
#[derive(Debug, Deserialize)]
pub struct UploadParams {
    /// Vision model to use for analysis.
    pub vision_model: Option<String>,
}

/// Accept a multipart batch of files and render the results page.
pub async fn upload_files(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> Html<String> {
    let model = params
        .vision_model
        .unwrap_or_else(|| state.config.default_vision_model.clone());

    let mut files = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read multipart field: {}", e);
                break;
            }
        };

        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            // Non-file form fields are not part of the batch.
            continue;
        };
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        // An unreadable file is skipped, not fatal to the batch.
        match field.bytes().await {
            Ok(bytes) => files.push(UploadedFile {
                filename,
                content_type,
                bytes: bytes.to_vec(),
            }),
            Err(e) => {
                warn!("Error reading file '{}': {}", filename, e);
                continue;
            }
        }
    }

    if files.is_empty() {
        return render(IndexTemplate::with_error(
            "No files were uploaded. Please select at least one file.",
        ));
    }

    info!("Processing {} uploaded file(s) with '{}'", files.len(), model);
    let outcomes = state.orchestrator.process_batch(files, &model).await;

    render(ResultsTemplate {
        results: outcomes.into_iter().map(ResultEntry::from).collect(),
    })
}

/// Clear the temp-asset directory and reinitialise the ledger.
pub async fn reset_app(State(state): State<AppState>) -> Html<String> {
    let result = match state.assets.reset() {
        Ok(()) => state.ledger.reset().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => render(IndexTemplate::with_success(
            "Application has been reset. All temporary files and data have been cleared.",
        )),
        Err(e) => {
            warn!("Reset failed: {}", e);
            render(IndexTemplate::with_error(format!(
                "Error resetting application: {e}"
            )))
        }
    }
}

/// Serve the ledger as a CSV download, creating a header-only file first
/// if none exists.
pub async fn download_csv(State(state): State<AppState>) -> Response {
    if let Err(e) = state.ledger.ensure_exists().await {
        warn!("Could not initialise ledger for download: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
    }

    let bytes = match tokio::fs::read(state.ledger.path()).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Could not read ledger: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"image_descriptions.csv\"".to_string(),
            ),
        ],
        bytes,
    )
        .into_response()
}
