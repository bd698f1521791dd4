//! # API Client
//!
//! Typed HTTP client for the backend REST API.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ApiClient Request Flow                           │
//! │                                                                         │
//! │  list_offers(query)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  endpoint(["offers"]) + query pairs                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET with bearer auth ───► transient failure? ──► backoff, retry       │
//! │       │                         (reads only; writes are never          │
//! │       ▼                          replayed automatically)               │
//! │  2xx ──► decode JSON ──► Page<Offer>                                   │
//! │  4xx/5xx ──► ClientError::Api { status, message (verbatim) }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Backend Is the Authority
//! Every entity lives on the server. This client performs no caching and no
//! local enforcement: when the server rejects a request (an out-of-table
//! status change, a stale update), the rejection is returned as
//! [`ClientError::Api`] with the server's own message for the UI to show.

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use dealdesk_core::types::{Client, Contract, ContractStatus, FollowUp, Offer, OfferStatus};

use crate::config::ApiConfig;
use crate::dto::{
    ApiKeyUpdate, ChatReply, ChatRequest, ChatTurn, ClientInput, ContractInput, ErrorBody,
    FollowUpInput, ListQuery, OfferInput, Page, StatusChange, WorkspaceSettings,
};
use crate::error::{ClientError, ClientResult};

// =============================================================================
// API Client
// =============================================================================

/// Typed client for the backend REST API.
///
/// Cloning is cheap: the underlying `reqwest::Client` is an `Arc` around a
/// connection pool, so one `ApiClient` is shared across the whole session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    base: Url,
}

impl ApiClient {
    /// Creates a client from a validated configuration.
    pub fn new(config: ApiConfig) -> ClientResult<Self> {
        config.validate()?;

        let base = Url::parse(config.base_url())?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        Ok(ApiClient { http, config, base })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // =========================================================================
    // Clients
    // =========================================================================

    /// Lists clients, paginated.
    pub async fn list_clients(&self, query: &ListQuery) -> ClientResult<Page<Client>> {
        let url = self.endpoint_with_query(&["clients"], query)?;
        self.get_with_retry(url).await
    }

    /// Fetches a single client.
    pub async fn get_client(&self, id: &str) -> ClientResult<Client> {
        let url = self.endpoint(&["clients", id])?;
        self.get_with_retry(url).await
    }

    /// Creates a client.
    pub async fn create_client(&self, input: &ClientInput) -> ClientResult<Client> {
        let url = self.endpoint(&["clients"])?;
        self.send_body(Method::POST, url, input).await
    }

    /// Updates a client.
    pub async fn update_client(&self, id: &str, input: &ClientInput) -> ClientResult<Client> {
        let url = self.endpoint(&["clients", id])?;
        self.send_body(Method::PUT, url, input).await
    }

    /// Deletes a client.
    pub async fn delete_client(&self, id: &str) -> ClientResult<()> {
        let url = self.endpoint(&["clients", id])?;
        self.send_empty(Method::DELETE, url).await
    }

    // =========================================================================
    // Offers
    // =========================================================================

    /// Lists offers, paginated.
    pub async fn list_offers(&self, query: &ListQuery) -> ClientResult<Page<Offer>> {
        let url = self.endpoint_with_query(&["offers"], query)?;
        self.get_with_retry(url).await
    }

    /// Fetches a single offer.
    pub async fn get_offer(&self, id: &str) -> ClientResult<Offer> {
        let url = self.endpoint(&["offers", id])?;
        self.get_with_retry(url).await
    }

    /// Creates an offer (starts as a draft on the backend).
    pub async fn create_offer(&self, input: &OfferInput) -> ClientResult<Offer> {
        let url = self.endpoint(&["offers"])?;
        self.send_body(Method::POST, url, input).await
    }

    /// Updates an offer's content.
    pub async fn update_offer(&self, id: &str, input: &OfferInput) -> ClientResult<Offer> {
        let url = self.endpoint(&["offers", id])?;
        self.send_body(Method::PUT, url, input).await
    }

    /// Deletes an offer.
    pub async fn delete_offer(&self, id: &str) -> ClientResult<()> {
        let url = self.endpoint(&["offers", id])?;
        self.send_empty(Method::DELETE, url).await
    }

    /// Requests an offer status change. The backend validates the
    /// transition and returns the offer as it now stands.
    pub async fn set_offer_status(&self, id: &str, status: OfferStatus) -> ClientResult<Offer> {
        let url = self.endpoint(&["offers", id, "status"])?;
        self.send_body(Method::POST, url, &StatusChange { status })
            .await
    }

    /// Downloads the rendered PDF for an offer.
    pub async fn offer_pdf(&self, id: &str) -> ClientResult<Vec<u8>> {
        let url = self.endpoint(&["offers", id, "pdf"])?;
        self.get_bytes(url).await
    }

    // =========================================================================
    // Contracts
    // =========================================================================

    /// Lists contracts, paginated.
    pub async fn list_contracts(&self, query: &ListQuery) -> ClientResult<Page<Contract>> {
        let url = self.endpoint_with_query(&["contracts"], query)?;
        self.get_with_retry(url).await
    }

    /// Fetches a single contract.
    pub async fn get_contract(&self, id: &str) -> ClientResult<Contract> {
        let url = self.endpoint(&["contracts", id])?;
        self.get_with_retry(url).await
    }

    /// Creates a contract.
    pub async fn create_contract(&self, input: &ContractInput) -> ClientResult<Contract> {
        let url = self.endpoint(&["contracts"])?;
        self.send_body(Method::POST, url, input).await
    }

    /// Updates a contract's content.
    pub async fn update_contract(&self, id: &str, input: &ContractInput) -> ClientResult<Contract> {
        let url = self.endpoint(&["contracts", id])?;
        self.send_body(Method::PUT, url, input).await
    }

    /// Deletes a contract.
    pub async fn delete_contract(&self, id: &str) -> ClientResult<()> {
        let url = self.endpoint(&["contracts", id])?;
        self.send_empty(Method::DELETE, url).await
    }

    /// Requests a contract status change.
    pub async fn set_contract_status(
        &self,
        id: &str,
        status: ContractStatus,
    ) -> ClientResult<Contract> {
        let url = self.endpoint(&["contracts", id, "status"])?;
        self.send_body(Method::POST, url, &StatusChange { status })
            .await
    }

    /// Downloads the rendered PDF for a contract.
    pub async fn contract_pdf(&self, id: &str) -> ClientResult<Vec<u8>> {
        let url = self.endpoint(&["contracts", id, "pdf"])?;
        self.get_bytes(url).await
    }

    // =========================================================================
    // Follow-Ups
    // =========================================================================

    /// Lists follow-up tasks, paginated.
    pub async fn list_followups(&self, query: &ListQuery) -> ClientResult<Page<FollowUp>> {
        let url = self.endpoint_with_query(&["followups"], query)?;
        self.get_with_retry(url).await
    }

    /// Fetches a single follow-up.
    pub async fn get_followup(&self, id: &str) -> ClientResult<FollowUp> {
        let url = self.endpoint(&["followups", id])?;
        self.get_with_retry(url).await
    }

    /// Creates a follow-up task.
    pub async fn create_followup(&self, input: &FollowUpInput) -> ClientResult<FollowUp> {
        let url = self.endpoint(&["followups"])?;
        self.send_body(Method::POST, url, input).await
    }

    /// Updates a follow-up task.
    pub async fn update_followup(&self, id: &str, input: &FollowUpInput) -> ClientResult<FollowUp> {
        let url = self.endpoint(&["followups", id])?;
        self.send_body(Method::PUT, url, input).await
    }

    /// Deletes a follow-up task.
    pub async fn delete_followup(&self, id: &str) -> ClientResult<()> {
        let url = self.endpoint(&["followups", id])?;
        self.send_empty(Method::DELETE, url).await
    }

    /// Marks a follow-up as completed.
    pub async fn complete_followup(&self, id: &str) -> ClientResult<FollowUp> {
        let url = self.endpoint(&["followups", id, "complete"])?;
        self.send_json(self.request(Method::POST, url)).await
    }

    // =========================================================================
    // AI Chat
    // =========================================================================

    /// Sends a chat message with prior turns and returns the reply text.
    ///
    /// The backend owns the model invocation; this call just ships the
    /// conversation over and hands the answer back.
    pub async fn chat(&self, message: &str, history: &[ChatTurn]) -> ClientResult<String> {
        let url = self.endpoint(&["ai", "chat"])?;
        let request = ChatRequest {
            message: message.to_string(),
            history: history.to_vec(),
        };
        let reply: ChatReply = self.send_body(Method::POST, url, &request).await?;
        Ok(reply.reply)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Fetches workspace settings.
    pub async fn get_settings(&self) -> ClientResult<WorkspaceSettings> {
        let url = self.endpoint(&["settings"])?;
        self.get_with_retry(url).await
    }

    /// Updates workspace settings.
    pub async fn update_settings(
        &self,
        settings: &WorkspaceSettings,
    ) -> ClientResult<WorkspaceSettings> {
        let url = self.endpoint(&["settings"])?;
        self.send_body(Method::PUT, url, settings).await
    }

    /// Rotates the API key used by the backend integrations surface.
    pub async fn set_api_key(&self, api_key: &str) -> ClientResult<()> {
        let url = self.endpoint(&["settings", "api-key"])?;
        let body = ApiKeyUpdate {
            api_key: api_key.to_string(),
        };
        let request = self.request(Method::POST, url).json(&body);
        let response = request.send().await?;
        Self::expect_success(response).await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Builds an endpoint URL from path segments.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl("base URL cannot hold a path".into()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    /// Builds an endpoint URL with list query parameters attached.
    fn endpoint_with_query(&self, segments: &[&str], query: &ListQuery) -> ClientResult<Url> {
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());
        Ok(url)
    }

    /// Starts a request with auth attached.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "API request");
        let mut request = self.http.request(method, url);
        if let Some(key) = self.config.api_key() {
            request = request.bearer_auth(key);
        }
        request
    }

    /// Sends a request with a JSON body and decodes the JSON response.
    async fn send_body<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(self.request(method, url).json(body)).await
    }

    /// Sends a request and decodes the JSON response.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::decode(response).await
    }

    /// Sends a request and expects an empty success response.
    async fn send_empty(&self, method: Method, url: Url) -> ClientResult<()> {
        let response = self.request(method, url).send().await?;
        Self::expect_success(response).await
    }

    /// GETs raw bytes (PDF downloads).
    async fn get_bytes(&self, url: Url) -> ClientResult<Vec<u8>> {
        let response = self.request(Method::GET, url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            Err(Self::api_error(status.as_u16(), response).await)
        }
    }

    /// GETs and decodes JSON, retrying transient failures.
    ///
    /// Only reads go through here: replaying a write that may have landed
    /// is never safe to do behind the user's back.
    async fn get_with_retry<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        let mut backoff = self.create_backoff();
        let mut retry_count = 0u32;

        loop {
            match self.send_json(self.request(Method::GET, url.clone())).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    retry_count += 1;
                    if retry_count > self.config.retry.max_retries {
                        return Err(e);
                    }

                    match backoff.next_backoff() {
                        Some(duration) => {
                            warn!(
                                error = %e,
                                attempt = retry_count,
                                ?duration,
                                "Transient API failure, retrying"
                            );
                            tokio::time::sleep(duration).await;
                        }
                        None => return Err(e),
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Builds the exponential backoff policy from config.
    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: Duration::from_millis(self.config.retry.initial_backoff_ms),
            max_interval: Duration::from_secs(self.config.retry.max_backoff_secs),
            max_elapsed_time: None,
            ..Default::default()
        }
    }

    /// Decodes a JSON response or maps a non-2xx status to an API error.
    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ClientError::DeserializationFailed(e.to_string()))
        } else {
            Err(Self::api_error(status.as_u16(), response).await)
        }
    }

    /// Checks a response for success, discarding any body.
    async fn expect_success(response: Response) -> ClientResult<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status.as_u16(), response).await)
        }
    }

    /// Builds an API error from a non-2xx response, keeping the server's
    /// message verbatim when one is present.
    async fn api_error(status: u16, response: Response) -> ClientError {
        let body = response.text().await.unwrap_or_default();
        ClientError::Api {
            status,
            message: Self::error_message(&body),
        }
    }

    /// Extracts the server's message from an error body, falling back to
    /// the raw body, then to a generic message.
    fn error_message(body: &str) -> String {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            return parsed.message;
        }
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "The server could not process the request".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
