use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::GraphConfig;
use crate::error::{DriveTextError, Result};

/// Refresh this long before the advertised expiry to absorb clock skew.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Lifecycle-scoped bearer-token cache. Created at startup, passed
/// explicitly to whoever needs it, cleared on logout or expiry — never
/// ambient global state.
#[derive(Default)]
pub struct TokenStore {
    inner: RwLock<Option<CachedToken>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, or `None` when absent or within the expiry margin.
    pub async fn get(&self) -> Option<String> {
        let guard = self.inner.read().await;
        guard.as_ref().and_then(|t| {
            if t.expires_at - Utc::now() > Duration::seconds(EXPIRY_MARGIN_SECS) {
                Some(t.access_token.clone())
            } else {
                None
            }
        })
    }

    pub async fn store(&self, access_token: String, expires_in_secs: i64) {
        let token = CachedToken {
            access_token,
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
        };
        *self.inner.write().await = Some(token);
    }

    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// OAuth2 client-credentials supplier backed by a [`TokenStore`].
pub struct TokenSupplier {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    store: TokenStore,
}

impl TokenSupplier {
    pub fn new(config: &GraphConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .user_agent("drivetext/0.1")
            .build()
            .unwrap_or_default();
        Self {
            http,
            token_url: config.token_url.replace("{tenant}", &config.tenant_id),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            store: TokenStore::new(),
        }
    }

    /// Cached bearer credential, refreshed through the token endpoint when
    /// absent or expiring.
    pub async fn bearer(&self) -> Result<String> {
        if let Some(token) = self.store.get().await {
            return Ok(token);
        }
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(DriveTextError::Auth(
                "no access token supplied and no app credentials configured".to_string(),
            ));
        }

        tracing::info!("refreshing Graph access token");
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", "https://graph.microsoft.com/.default"),
        ];
        let response = self.http.post(&self.token_url).form(&params).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            self.store.clear().await;
            return Err(DriveTextError::Auth(format!(
                "token endpoint returned status {status}"
            )));
        }
        let token: TokenResponse = response.json().await?;
        let expires_in = token.expires_in.unwrap_or(3600);
        self.store.store(token.access_token.clone(), expires_in).await;
        Ok(token.access_token)
    }

    pub async fn invalidate(&self) {
        self.store.clear().await;
    }
}
