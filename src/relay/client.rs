//! Relay client - reqwest over HTTP
//!
//! Every call is a single exchange. Failures come back as [`RelayError`];
//! retrying is the caller's decision.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::wire::{self, Filter, FilterApplication, Filters, Message, MessageSet};

const OCTET_STREAM: &str = "application/octet-stream";

/// HTTP client for one relay.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    config: RelayConfig,
}

impl RelayClient {
    pub fn new(url: impl Into<String>) -> Result<Self, RelayError> {
        Self::with_config(RelayConfig::new(url))
    }

    pub fn with_config(config: RelayConfig) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn url(&self) -> &str {
        self.config.base_url()
    }

    fn message_url(&self, address: &str) -> String {
        format!("{}/message/{}", self.config.base_url(), address)
    }

    /// Messages addressed to `address` with timestamps in `[start, end]`.
    pub async fn fetch_messages(
        &self,
        address: &str,
        token: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<Message>, RelayError> {
        let url = self.message_url(address);
        debug!(%url, start, end, "fetching messages");
        let request = self
            .client
            .get(&url)
            .header(AUTHORIZATION, token)
            .query(&[("start", start), ("end", end)]);
        let response = self.send(&url, request).await?;
        let Some(body) = read_body(&url, response).await? else {
            return Ok(Vec::new());
        };
        let set: MessageSet = decode(&url, &body)?;
        debug!(%url, count = set.messages.len(), "fetched messages");
        Ok(set.messages)
    }

    pub async fn publish_messages(&self, address: &str, messages: &[Message]) -> Result<(), RelayError> {
        let url = self.message_url(address);
        let body = wire::encode(&MessageSet::from(messages.to_vec()));
        debug!(%url, count = messages.len(), bytes = body.len(), "publishing messages");
        let request = self.client.put(&url).header(CONTENT_TYPE, OCTET_STREAM).body(body);
        let response = self.send(&url, request).await?;
        expect_success(&url, response).await
    }

    /// Filters currently registered for `address`. Unauthenticated.
    pub async fn fetch_filters(&self, address: &str) -> Result<Vec<Filter>, RelayError> {
        let url = self.message_url(address);
        debug!(%url, "fetching filters");
        let response = self.send(&url, self.client.get(&url)).await?;
        let Some(body) = read_body(&url, response).await? else {
            return Ok(Vec::new());
        };
        let filters: Filters = decode(&url, &body)?;
        Ok(filters.filters)
    }

    pub async fn apply_filter(
        &self,
        address: &str,
        application: &FilterApplication,
        token: &str,
    ) -> Result<(), RelayError> {
        let url = self.message_url(address);
        debug!(%url, "applying filter");
        let request = self
            .client
            .put(&url)
            .header(AUTHORIZATION, token)
            .header(CONTENT_TYPE, OCTET_STREAM)
            .body(wire::encode(application));
        let response = self.send(&url, request).await?;
        expect_success(&url, response).await
    }

    /// Perform the exchange. A response is only inspected once one exists.
    async fn send(&self, url: &str, request: RequestBuilder) -> Result<Response, RelayError> {
        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                RelayError::Client(e)
            } else {
                warn!(%url, error = %e, "relay unreachable");
                RelayError::Unreachable { url: url.to_string(), source: e }
            }
        })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!(%url, status = response.status().as_u16(), "relay rejected token");
                Err(RelayError::Unauthorized { url: url.to_string() })
            }
            _ => Ok(response),
        }
    }
}

/// Body of a fetch. `None` when the relay has nothing for the address.
async fn read_body(url: &str, response: Response) -> Result<Option<Vec<u8>>, RelayError> {
    match response.status() {
        StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => Ok(None),
        status if status.is_success() => {
            let bytes = response
                .bytes()
                .await
                .map_err(|source| RelayError::Unreachable { url: url.to_string(), source })?;
            Ok(Some(bytes.to_vec()))
        }
        _ => Err(rejected(url, response).await),
    }
}

async fn expect_success(url: &str, response: Response) -> Result<(), RelayError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(rejected(url, response).await)
    }
}

async fn rejected(url: &str, response: Response) -> RelayError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    warn!(%url, status, "relay rejected request");
    RelayError::Rejected { url: url.to_string(), status, body: body.chars().take(500).collect() }
}

fn decode<M: prost::Message + Default>(url: &str, body: &[u8]) -> Result<M, RelayError> {
    wire::decode(body).map_err(|source| RelayError::Malformed { url: url.to_string(), source })
}
