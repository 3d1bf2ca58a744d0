//! HTTP transport for the Okdesk API.
//!
//! [`OkdeskClient`] performs one authenticated request per [`ApiCall`] and
//! classifies the answer:
//!
//! - non-JSON content type: empty result when the call allows it, otherwise
//!   [`TransportError::NonJson`]
//! - JSON with status >= 400: [`ApiError`] built from the flattened error body
//! - JSON otherwise: the decoded value
//!
//! No retries are attempted.

use crate::config::ClientConfig;
use crate::error::{ApiError, TransportError};
use crate::request::{ApiCall, ApiRequest, RequestBody};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

const USER_AGENT: &str = concat!("okdesk-rust/", env!("CARGO_PKG_VERSION"));

/// Query parameter carrying the API token.
pub const TOKEN_PARAM: &str = "api_token";

/// Executes wire calls against an Okdesk account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform `call` and return the decoded JSON body.
    async fn execute(&self, call: ApiCall) -> Result<Value>;
}

/// Send a request through `transport` and parse its typed output.
///
/// # Errors
///
/// Propagates transport, API and decoding errors.
pub async fn send<R>(transport: &dyn Transport, request: &R) -> Result<R::Output>
where
    R: ApiRequest + ?Sized,
{
    let call = request.to_call();
    call.ensure_valid()?;
    let value = transport.execute(call).await?;
    request.parse_response(value)
}

/// Builder for [`OkdeskClient`].
#[derive(Debug)]
pub struct OkdeskClientBuilder {
    config: ClientConfig,
    http: Option<reqwest::Client>,
}

impl OkdeskClientBuilder {
    /// Create a builder from a validated configuration.
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self { config, http: None }
    }

    /// Use a preconfigured `reqwest` client instead of building one.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when the HTTP client cannot be constructed.
    pub fn build(self) -> Result<OkdeskClient> {
        let base_url = self.config.parsed_base_url()?;
        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .user_agent(
                    self.config
                        .user_agent
                        .clone()
                        .unwrap_or_else(|| USER_AGENT.to_owned()),
                )
                .gzip(true)
                .build()
                .map_err(|err| Error::ConfigError(err.to_string()))?,
        };

        Ok(OkdeskClient {
            inner: Arc::new(Inner {
                http,
                base_url,
                config: self.config,
            }),
        })
    }
}

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    base_url: Url,
    config: ClientConfig,
}

/// Asynchronous Okdesk API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct OkdeskClient {
    inner: Arc<Inner>,
}

impl OkdeskClient {
    /// Construct a client directly from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        OkdeskClientBuilder::new(config).build()
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Whether full request tracing is enabled.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.inner.config.debug
    }

    /// Send a typed request.
    ///
    /// # Errors
    ///
    /// Propagates transport, API and decoding errors.
    pub async fn send<R>(&self, request: &R) -> Result<R::Output>
    where
        R: ApiRequest + ?Sized,
    {
        send(self, request).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    fn encode_json(&self, body: &Value) -> Result<Vec<u8>> {
        let encoded = if self.debug() {
            serde_json::to_vec_pretty(body)?
        } else {
            serde_json::to_vec(body)?
        };
        Ok(encoded)
    }
}

#[async_trait]
impl Transport for OkdeskClient {
    async fn execute(&self, call: ApiCall) -> Result<Value> {
        call.ensure_valid()?;
        let url = self.endpoint(&call.path)?;
        let trace = self.debug();

        debug!(method = %call.method, path = %call.path, "Sending Okdesk request");
        if trace {
            info!(
                target: "okdesk::trace",
                method = %call.method,
                url = %url,
                params = ?call.query,
                body = ?call.body,
                "Okdesk request"
            );
        }

        let mut request = self
            .inner
            .http
            .request(call.method.clone(), url)
            .header(ACCEPT, "application/json")
            .query(&call.query)
            .query(&[(TOKEN_PARAM, self.inner.config.api_token())]);

        request = match call.body {
            RequestBody::Empty => request,
            RequestBody::Json(body) => request
                .header(CONTENT_TYPE, "application/json")
                .body(self.encode_json(&body)?),
            RequestBody::Multipart(body) => request.multipart(body.into_form()?),
        };

        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or_default().trim().to_owned())
            .unwrap_or_default();
        let text = response.text().await?;

        if trace {
            info!(
                target: "okdesk::trace",
                status = status.as_u16(),
                reason = status.canonical_reason().unwrap_or_default(),
                content_type = %content_type,
                body = %text,
                "Okdesk response"
            );
        }

        if !content_type.eq_ignore_ascii_case("application/json") {
            if call.allow_non_json {
                return Ok(Value::Object(serde_json::Map::new()));
            }
            return Err(TransportError::NonJson {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_owned(),
                content_type,
                body: text,
            }
            .into());
        }

        let value: Value = serde_json::from_str(&text)?;
        if status.as_u16() >= 400 {
            return Err(ApiError::from_body(status.as_u16(), &value)?.into());
        }
        Ok(value)
    }
}
