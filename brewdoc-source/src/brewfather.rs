//! Blocking client for the Brewfather v2 API.
//!
//! One authenticated GET per call. Failures surface as [`SourceError::Transport`] or
//! [`SourceError::Status`] tagged with the lookup that was in progress.

use crate::SourceError;
use crate::ports::BatchSource;
use brewdoc_types::{BatchRecord, BatchSummary, decode_batch_list};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.brewfather.app/v2";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest page the batch listing endpoint serves.
const BATCH_PAGE_LIMIT: u32 = 50;

/// Basic-auth pair: account user id and API key.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

impl Credentials {
    /// Both values must be present and non-blank.
    pub fn from_parts(
        username: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self, SourceError> {
        let username = username.filter(|s| !s.trim().is_empty());
        let api_key = api_key.filter(|s| !s.trim().is_empty());
        match (username, api_key) {
            (Some(username), Some(api_key)) => Ok(Self { username, api_key }),
            _ => Err(SourceError::MissingCredentials),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct BrewfatherClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl BrewfatherClient {
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("brewdoc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SourceError::Transport {
                context: "create HTTP client".to_string(),
                source,
            })?;

        Ok(Self::with_client(client, base_url, credentials))
    }

    /// Wraps a preconfigured HTTP client (proxies, TLS roots, test servers).
    pub fn with_client(client: Client, base_url: &str, credentials: Credentials) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_text(&self, url: &str, context: &str) -> Result<String, SourceError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.api_key))
            .send()
            .map_err(|source| SourceError::Transport {
                context: context.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                context: context.to_string(),
                status,
            });
        }

        response.text().map_err(|source| SourceError::Transport {
            context: context.to_string(),
            source,
        })
    }
}

impl BatchSource for BrewfatherClient {
    fn list_batches(&self) -> Result<Vec<BatchSummary>, SourceError> {
        let url = format!("{}/batches/?limit={}", self.base_url, BATCH_PAGE_LIMIT);
        let body = self.get_text(&url, "list batches")?;
        let batches =
            decode_batch_list(&body).map_err(|e| SourceError::record("decode batch list", e))?;
        info!(count = batches.len(), "listed batches");
        Ok(batches)
    }

    fn fetch_batch(&self, batch_id: &str) -> Result<BatchRecord, SourceError> {
        let url = format!("{}/batches/{}", self.base_url, batch_id);
        let context = format!("fetch batch {batch_id}");
        let body = self.get_text(&url, &context)?;
        BatchRecord::from_json(&body)
            .map_err(|e| SourceError::record(format!("decode batch {batch_id}"), e))
    }
}
