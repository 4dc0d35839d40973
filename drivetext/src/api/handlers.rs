use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{DriveTextError, Result};
use crate::models::{DriveFile, ExtractionResult};

use super::state::AppState;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesRequest {
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    #[serde(default)]
    pub access_token: Option<String>,
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Recursive file listing for a folder. The token comes from the request
/// body, then the Authorization header, then the app-credential supplier.
pub async fn list_files(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ListFilesRequest>,
) -> Result<Json<Vec<DriveFile>>> {
    let folder_id = match request.folder_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            return Err(DriveTextError::Validation(
                "folderId is required and must not be empty".to_string(),
            ))
        }
    };
    let bearer = resolve_token(&state, request.access_token.as_deref(), &headers).await?;

    let files = state.files.get_files_recursively(&folder_id, &bearer).await?;
    Ok(Json(files))
}

/// Download one item and run the extraction pipeline over its bytes.
pub async fn extract_item_text(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    headers: HeaderMap,
    body: Option<Json<ExtractRequest>>,
) -> Result<Json<ExtractionResult>> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let bearer = resolve_token(&state, request.access_token.as_deref(), &headers).await?;

    let item = state.client.get_item(&item_id, &bearer).await?;
    if item.is_folder() {
        return Err(DriveTextError::Validation(format!(
            "'{}' is a folder, not a file",
            item.name
        )));
    }
    let (buffer, downloaded_mime) = state.client.download_item(&item_id, &bearer).await?;
    let mime_type = item
        .file
        .as_ref()
        .and_then(|f| f.mime_type.clone())
        .unwrap_or(downloaded_mime);
    let file_name = item.name.clone();

    // Parsing backends are CPU-bound; keep them off the async workers.
    let extraction = state.extraction.clone();
    let result = tokio::task::spawn_blocking(move || {
        extraction.extract_text(&buffer, &mime_type, &file_name)
    })
    .await
    .map_err(|e| DriveTextError::Processing(format!("extraction task failed: {e}")))??;

    Ok(Json(result))
}

async fn resolve_token(
    state: &AppState,
    body_token: Option<&str>,
    headers: &HeaderMap,
) -> Result<String> {
    if let Some(token) = body_token.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }
    if let Some(token) = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
    {
        return Ok(token.to_string());
    }
    state.tokens.bearer().await
}
