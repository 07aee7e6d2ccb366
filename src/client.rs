//! Barid async client implementation.
//!
//! This module provides an async [`Client`] and [`ClientBuilder`] for the three read
//! endpoints of the Barid disposable email service.
//!
//! Typical flow:
//! 1) Build a client (`Client::new` or `Client::builder().build()`)
//! 2) List the accepted domains via [`Client::list_domains`]
//! 3) Poll an address's inbox via [`Client::list_emails`]
//! 4) Fetch full message content via [`Client::fetch_email`]

use crate::models::{ApiResponse, MessageDetail, MessageSummary};
use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
#[cfg(feature = "debug_responses")]
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default Barid API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.barid.site";
/// Number of messages requested per inbox listing.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Async client for the Barid disposable email API.
///
/// The underlying `reqwest::Client` shares its connection pool between clones, so this
/// type is cheap to clone. Create it once and clone as needed.
///
/// # Notes
/// - The service needs no session or token: every call is an independent GET.
/// - All methods are async and require a Tokio runtime (or any runtime compatible with `reqwest`).
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    proxy: Option<String>,
    user_agent: String,
    base_url: Url,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("http", &"<reqwest::Client>")
            .field("proxy", &self.proxy)
            .field("user_agent", &self.user_agent)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl Client {
    /// Create a [`ClientBuilder`] for configuring a new client.
    ///
    /// # Examples
    /// ```no_run
    /// # use barid_inbox::Client;
    /// # fn main() -> Result<(), barid_inbox::Error> {
    /// let client = Client::builder()
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the public Barid API using default settings.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Get the proxy URL configured for this client (if any).
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// List the domains the service accepts mail for, in server order.
    ///
    /// # Errors
    /// Returns an error if the request fails, the body is not valid JSON, or the
    /// service reports `success: false`.
    ///
    /// # Examples
    /// ```no_run
    /// # use barid_inbox::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), barid_inbox::Error> {
    /// let client = Client::new()?;
    /// for domain in client.list_domains().await? {
    ///     println!("{domain}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_domains(&self) -> Result<Vec<String>> {
        let url = self.endpoint(&["domains"])?;
        self.get_result("/domains", url).await
    }

    /// List up to `limit` messages received by `address`.
    ///
    /// Messages are returned in the order the service provides; no local sorting
    /// is applied.
    ///
    /// # Errors
    /// Returns an error if the request fails, the body is not valid JSON, or the
    /// service reports `success: false`.
    pub async fn list_emails(&self, address: &str, limit: u32) -> Result<Vec<MessageSummary>> {
        let mut url = self.endpoint(&["emails", address])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        self.get_result("/emails", url).await
    }

    /// Fetch the full content of a single message.
    ///
    /// Use [`Client::list_emails`] to obtain an `id`. Results are never cached; every
    /// call issues a fresh request.
    ///
    /// # Errors
    /// Returns an error if the request fails, the body is not valid JSON, or the
    /// service reports `success: false`.
    pub async fn fetch_email(&self, id: &str) -> Result<MessageDetail> {
        let url = self.endpoint(&["inbox", id])?;
        self.get_result("/inbox", url).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Api {
                endpoint: segments.first().copied().unwrap_or_default().to_string(),
                message: format!("base URL {} cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_result<T>(&self, endpoint: &str, url: Url) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = self.execute_request(url).await?;
        let envelope = serde_json::from_slice::<ApiResponse<T>>(&body)?;

        match envelope {
            ApiResponse {
                success: true,
                result: Some(result),
            } => Ok(result),
            ApiResponse { success: false, .. } => Err(Error::Api {
                endpoint: endpoint.to_string(),
                message: format!("success flag was false (body: {})", Self::body_snippet(&body)),
            }),
            ApiResponse { result: None, .. } => Err(Error::Api {
                endpoint: endpoint.to_string(),
                message: "missing `result`".to_string(),
            }),
        }
    }

    async fn execute_request(&self, url: Url) -> Result<Vec<u8>> {
        debug!(method = "GET", url = %url, "barid request");

        let response = self.http.get(url).headers(self.headers()).send().await?;

        let status = response.status();
        let status_err = response.error_for_status_ref().err();
        let body = response.bytes().await?;

        #[cfg(feature = "debug_responses")]
        self.log_response(status, &body);

        if let Some(err) = status_err {
            debug!(status = status.as_u16(), body = %Self::body_snippet(&body), "barid request failed");
            return Err(err.into());
        }

        Ok(body.to_vec())
    }

    #[cfg(feature = "debug_responses")]
    fn log_response(&self, status: StatusCode, body: &[u8]) {
        match serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
        {
            Some(pretty) => debug!(status = status.as_u16(), "barid response:\n{pretty}"),
            None => debug!(
                status = status.as_u16(),
                "barid response: {}",
                Self::body_snippet(body)
            ),
        }
    }

    fn body_snippet(body: &[u8]) -> String {
        String::from_utf8_lossy(body).chars().take(200).collect()
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(value) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, value);
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        headers
    }
}

/// Builder for configuring a Barid [`Client`].
///
/// # Defaults
/// - The public Barid endpoint ([`DEFAULT_BASE_URL`])
/// - No proxy
/// - Certificate validation enabled
/// - A `barid-inbox/<version>` user agent
/// - Reqwest default timeout (none)
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Set a proxy URL (e.g. `"http://127.0.0.1:8080"`).
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Configure whether to accept invalid TLS certificates (default: `false`).
    ///
    /// # Security
    /// Accepting invalid certificates is unsafe on untrusted networks; it is only useful
    /// for traffic inspection in controlled environments.
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the API base URL. Mostly useful for self-hosted instances and tests.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a request timeout applied to all operations.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the [`Client`].
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the HTTP client cannot be
    /// constructed (e.g. invalid proxy URL).
    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(&self.base_url)?;

        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build()?;

        Ok(Client {
            http,
            proxy: self.proxy,
            user_agent: self.user_agent,
            base_url,
        })
    }
}
