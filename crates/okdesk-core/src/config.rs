//! Configuration for Okdesk clients.
//!
//! A client is bound to one account endpoint (`https://<account>.okdesk.ru/`)
//! and one API token. The token is held as a [`SecretString`] and only exposed
//! when a request is sent.

use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use url::Url;
use validator::Validate;

/// Domain every hosted Okdesk account lives under.
pub const VENDOR_DOMAIN: &str = "okdesk.ru";

/// Configuration for an Okdesk client instance.
#[derive(Debug, Clone, Validate)]
pub struct ClientConfig {
    /// Account base URL, always ending in `/`
    #[validate(url)]
    base_url: String,

    api_token: Arc<SecretString>,

    /// Emit full request/response traces
    pub debug: bool,

    /// Override the `User-Agent` header
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a configuration for a hosted account.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Account URL, e.g. `https://demo.okdesk.ru/`; a missing
    ///   trailing slash is added
    /// * `api_token` - API token issued in the account settings
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the URL does not have the form
    /// `http(s)://<account>.okdesk.ru/`.
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Result<Self> {
        let config = Self::custom_endpoint(base_url, api_token)?;
        check_vendor_url(&config.base_url)?;
        Ok(config)
    }

    /// Create a configuration for an arbitrary endpoint (proxy, self-hosted or
    /// test server), skipping the vendor domain check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the URL is not an absolute http(s) URL.
    pub fn custom_endpoint(
        base_url: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self> {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let config = Self {
            base_url,
            api_token: Arc::new(SecretString::from(api_token.into())),
            debug: false,
            user_agent: None,
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        let parsed = Url::parse(&config.base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::ConfigError(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        Ok(config)
    }

    /// Enable or disable request tracing.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parsed base URL.
    ///
    /// # Errors
    ///
    /// Never fails for a validated configuration.
    pub fn parsed_base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub(crate) fn api_token(&self) -> &str {
        self.api_token.expose_secret()
    }
}

fn check_vendor_url(base_url: &str) -> Result<()> {
    let url = Url::parse(base_url)?;
    let suffix = format!(".{VENDOR_DOMAIN}");
    let host_ok = url
        .host_str()
        .and_then(|host| host.strip_suffix(suffix.as_str()))
        .is_some_and(|account| !account.is_empty());

    if host_ok && url.port().is_none() && url.path() == "/" && url.query().is_none() {
        Ok(())
    } else {
        Err(Error::ConfigError(format!(
            "Base URL must look like https://<account>.{VENDOR_DOMAIN}/, got {base_url}"
        )))
    }
}
