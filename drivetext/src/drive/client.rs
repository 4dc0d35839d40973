use serde::Deserialize;

use crate::config::GraphConfig;
use crate::error::{DriveTextError, Result};
use crate::models::DriveItem;

#[derive(Debug, Deserialize)]
struct ChildrenPage {
    #[serde(default)]
    value: Vec<DriveItem>,
    #[serde(default, rename = "@odata.nextLink")]
    next_link: Option<String>,
}

/// Thin Microsoft Graph drive client: folder listing with continuation-token
/// pagination and raw content download. Tokens are supplied per call.
#[derive(Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    base_url: String,
}

impl GraphClient {
    pub fn new(config: &GraphConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .user_agent("drivetext/0.1")
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// List every child of a folder, following `@odata.nextLink` pages
    /// until the listing is exhausted.
    pub async fn list_children(&self, folder_id: &str, bearer: &str) -> Result<Vec<DriveItem>> {
        let mut url = format!("{}/me/drive/items/{}/children", self.base_url, folder_id);
        let mut items = Vec::new();
        loop {
            let response = self.http.get(&url).bearer_auth(bearer).send().await?;
            let response = Self::check_status(response, folder_id).await?;
            let page: ChildrenPage = response.json().await?;
            items.extend(page.value);
            match page.next_link {
                Some(next) => url = next,
                None => break,
            }
        }
        tracing::debug!(folder_id, count = items.len(), "listed folder children");
        Ok(items)
    }

    /// Fetch a single item's metadata.
    pub async fn get_item(&self, item_id: &str, bearer: &str) -> Result<DriveItem> {
        let url = format!("{}/me/drive/items/{}", self.base_url, item_id);
        let response = self.http.get(&url).bearer_auth(bearer).send().await?;
        let response = Self::check_status(response, item_id).await?;
        Ok(response.json().await?)
    }

    /// Download an item's raw bytes plus its declared content type.
    pub async fn download_item(&self, item_id: &str, bearer: &str) -> Result<(Vec<u8>, String)> {
        let url = format!("{}/me/drive/items/{}/content", self.base_url, item_id);
        let response = self.http.get(&url).bearer_auth(bearer).send().await?;
        let response = Self::check_status(response, item_id).await?;
        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response.bytes().await?.to_vec();
        tracing::debug!(item_id, bytes = bytes.len(), mime = %mime_type, "downloaded item");
        Ok((bytes, mime_type))
    }

    async fn check_status(response: reqwest::Response, subject: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(DriveTextError::Auth(format!(
                "Graph API rejected credentials for '{subject}'"
            ))),
            404 => Err(DriveTextError::NotFound(format!(
                "drive item '{subject}' not found"
            ))),
            code => Err(DriveTextError::Graph {
                status: code,
                message: truncate_body(&body),
            }),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX).collect();
        format!("{cut}…")
    }
}
