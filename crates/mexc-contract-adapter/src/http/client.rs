/*
[INPUT]:  HTTP configuration (base URL, timeouts, recv window, page delay, credentials)
[OUTPUT]: Configured reqwest client issuing signed GET requests
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::auth::Credentials;
use crate::http::signature::RequestSigner;
use crate::http::{MexcError, Result};
use crate::types::{ApiResponse, QueryParams};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Base URL for MEXC contract API
pub const CONTRACT_BASE_URL: &str = "https://contract.mexc.com";

const API_KEY_HEADER: &str = "ApiKey";
const REQUEST_TIME_HEADER: &str = "Request-Time";
const SIGNATURE_HEADER: &str = "Signature";
const RECV_WINDOW_HEADER: &str = "Recv-Window";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Milliseconds the server accepts between `Request-Time` and arrival
    pub recv_window_ms: u64,
    /// Fixed pause between two consecutive page requests
    pub page_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            recv_window_ms: 60_000,
            page_delay: Duration::from_millis(300),
        }
    }
}

/// Main HTTP client for MEXC contract private endpoints
#[derive(Debug)]
pub struct MexcClient {
    http_client: Client,
    base_url: Url,
    config: ClientConfig,
    signer: Option<RequestSigner>,
}

impl MexcClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_base_url(config, CONTRACT_BASE_URL)
    }

    /// Create a client against a different host (tests, proxies)
    pub fn with_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            config,
            signer: None,
        })
    }

    /// Set credentials for authenticated requests
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.signer = Some(RequestSigner::new(credentials));
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.set_credentials(credentials);
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.signer.is_some()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn signer(&self) -> Result<&RequestSigner> {
        self.signer.as_ref().ok_or(MexcError::MissingCredentials)
    }

    fn signed_headers(&self, request_time: &str, signature: &str) -> Result<HeaderMap> {
        let signer = self.signer()?;
        let header = |value: &str, what: &str| {
            HeaderValue::from_str(value)
                .map_err(|err| MexcError::Config(format!("invalid {what} header: {err}")))
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("apikey"),
            header(signer.api_key(), API_KEY_HEADER)?,
        );
        headers.insert(
            HeaderName::from_static("request-time"),
            header(request_time, REQUEST_TIME_HEADER)?,
        );
        headers.insert(
            HeaderName::from_static("signature"),
            header(signature, SIGNATURE_HEADER)?,
        );
        headers.insert(
            HeaderName::from_static("recv-window"),
            header(&self.config.recv_window_ms.to_string(), RECV_WINDOW_HEADER)?,
        );
        Ok(headers)
    }

    /// Issue one signed GET and unwrap the `{success, data}` envelope.
    ///
    /// The query string sent is exactly the canonical string that was signed.
    pub async fn signed_get<T>(&self, endpoint: &str, params: &QueryParams) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let signed = self.signer()?.sign_query(timestamp, params)?;
        let headers = self.signed_headers(&signed.request_time, &signed.signature)?;

        let mut url = self.base_url.join(endpoint)?;
        url.set_query((!signed.query.is_empty()).then_some(signed.query.as_str()));

        debug!(endpoint, query = %signed.query, "sending signed request");
        let response = self.http_client.get(url).headers(headers).send().await?;

        let status = response.status();
        let response_headers = header_pairs(response.headers());
        let body = response.text().await?;

        if !status.is_success() {
            warn!(
                endpoint,
                status = status.as_u16(),
                body = %body,
                headers = ?response_headers,
                "request rejected by HTTP layer"
            );
            return Err(MexcError::status_error(status, body, response_headers));
        }

        let envelope: ApiResponse = serde_json::from_str(&body)?;
        if !envelope.success {
            warn!(
                endpoint,
                code = ?envelope.code,
                message = ?envelope.message,
                "API reported failure"
            );
        }
        envelope.into_data()
    }
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or("<binary>").to_string(),
            )
        })
        .collect()
}
