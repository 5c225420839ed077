use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, warn};

use crate::error::Error;
use crate::fingerprint::digest;
use crate::range::{BreachQueryResult, is_valid_prefix, parse_range_body};

/// Environment variable overriding the range endpoint base URL.
pub const RANGE_ENDPOINT_ENV: &str = "PWNED_RANGE_ENDPOINT";

/// Public Pwned Passwords range API.
pub const DEFAULT_ENDPOINT: &str = "https://api.pwnedpasswords.com";

pub const DEFAULT_USER_AGENT: &str = concat!("pwned-range/", env!("CARGO_PKG_VERSION"));

/// Header asking the range API to pad responses with zero-count records.
pub const ADD_PADDING_HEADER: &str = "Add-Padding";

/// Base delay for exponential backoff (doubles each retry)
const RETRY_BASE_DELAY_MS: u64 = 100;

/// Fetches the raw `SUFFIX:COUNT` listing for a 5 character hash prefix.
pub trait RangeTransport: Send + Sync {
    fn fetch_range(&self, prefix: &str) -> impl Future<Output = Result<String, Error>> + Send;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL; requests go to `{endpoint}/range/{prefix}`.
    pub endpoint: String,
    pub user_agent: String,
    pub add_padding: bool,
    /// Extra attempts after a failed request. Zero means a single attempt.
    pub max_retries: u32,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            add_padding: true,
            max_retries: 0,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Default configuration with the endpoint taken from `PWNED_RANGE_ENDPOINT`
    /// when it is set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(endpoint) = std::env::var(RANGE_ENDPOINT_ENV) {
            config.endpoint = endpoint;
        }
        config
    }
}

/// HTTP implementation of [`RangeTransport`].
#[derive(Debug, Clone)]
pub struct RangeClient {
    http: reqwest::Client,
    endpoint: String,
    max_retries: u32,
}

impl RangeClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        if config.add_padding {
            headers.insert(ADD_PADDING_HEADER, HeaderValue::from_static("true"));
        }
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| Error::InvalidUserAgent { user_agent: config.user_agent.clone() })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        })
    }

    pub fn range_url(&self, prefix: &str) -> String {
        format!("{}/range/{}", self.endpoint, prefix)
    }

    async fn fetch_once(&self, url: &str, prefix: &str) -> Result<String, Error> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| Error::HttpRequest { prefix: prefix.to_string(), source })?;

        if !response.status().is_success() {
            return Err(Error::HttpStatus {
                prefix: prefix.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| Error::HttpRequest { prefix: prefix.to_string(), source })
    }
}

impl RangeTransport for RangeClient {
    async fn fetch_range(&self, prefix: &str) -> Result<String, Error> {
        if !is_valid_prefix(prefix) {
            return Err(Error::InvalidPrefix { prefix: prefix.to_string() });
        }

        let url = self.range_url(prefix);
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                let delay = RETRY_BASE_DELAY_MS * (1 << attempt.min(10));
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            match self.fetch_once(&url, prefix).await {
                Ok(body) => {
                    debug!(prefix, attempt, bytes = body.len(), "range fetched");
                    return Ok(body);
                }
                Err(e) if attempt < self.max_retries => {
                    warn!(prefix, attempt, error = %e, "range request failed, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Looks up a single password without any debouncing.
///
/// Only the first five characters of the password's fingerprint are handed to
/// `transport`.
pub async fn check_password<T: RangeTransport>(
    transport: &T,
    password: &str,
) -> Result<BreachQueryResult, Error> {
    let fingerprint = digest(password).await?;
    let body = transport.fetch_range(fingerprint.prefix()).await?;
    parse_range_body(&body, fingerprint.suffix())
}
