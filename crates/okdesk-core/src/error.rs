//! Error types for Okdesk operations.
//!
//! Three failure families surface to callers:
//!
//! - [`ApiError`]: the service answered with a JSON error body (status >= 400).
//!   The nested error object is flattened into human-readable messages.
//! - [`TransportError`]: the response was not JSON, or the connection failed.
//! - construction, configuration and decoding problems, reported through the
//!   remaining [`Error`] variants.

use serde_json::Value;
use thiserror::Error;

/// Main error type for Okdesk operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The service rejected the request with a JSON error body.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response could not be treated as an API answer at all.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request could not be built (missing upload file, unsupported parameter value).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A JSON body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    DecodeError(String),
}

/// Specialized result type for Okdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error reported by the Okdesk API.
///
/// `messages` holds the flattened error object, one entry per leaf message,
/// each prefixed with its dotted field path. `Display` joins them with newlines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .messages.join("\n"))]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,
    /// Flattened `field.path: message` entries.
    pub messages: Vec<String>,
}

impl ApiError {
    /// Build an error from a decoded JSON error body.
    ///
    /// The vendor wraps its error object under an `errors` key; bodies without
    /// that envelope are flattened as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeError`] when the error object contains a value that
    /// is neither a list of messages nor a nested object.
    pub fn from_body(status: u16, body: &Value) -> Result<Self> {
        let payload = match body {
            Value::Object(map) => map.get("errors").unwrap_or(body),
            other => other,
        };
        let messages = match payload {
            Value::Object(_) => flatten_error_messages(payload)?,
            Value::Array(items) => items.iter().map(message_text).collect(),
            Value::Null => Vec::new(),
            scalar => vec![message_text(scalar)],
        };
        Ok(Self { status, messages })
    }

    /// Returns true if the service reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Failures below the level of a well-formed API answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The response content type was not `application/json`.
    #[error("Unexpected response {status} {reason} with content type `{content_type}`: {body}")]
    NonJson {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        reason: String,
        /// Content type reported by the server
        content_type: String,
        /// Raw response text
        body: String,
    },

    /// Connection-level failure reported by the HTTP client
    #[error("HTTP request failed: {0}")]
    Connection(String),
}

/// Flatten a nested error object into `path: message` strings.
///
/// A list value emits one entry per item prefixed by its key; an object value
/// recurses and prefixes each child entry with `key.`. Entries keep the order
/// of the source object.
///
/// # Errors
///
/// Returns [`Error::DecodeError`] for any other value shape.
///
/// # Examples
///
/// ```
/// use okdesk_core::error::flatten_error_messages;
/// use serde_json::json;
///
/// let messages = flatten_error_messages(&json!({
///     "a": ["x"],
///     "b": {"c": ["y"]}
/// }))
/// .unwrap();
/// assert_eq!(messages, vec!["a: x", "b.c: y"]);
/// ```
pub fn flatten_error_messages(errors: &Value) -> Result<Vec<String>> {
    let Value::Object(map) = errors else {
        return Err(Error::DecodeError(format!(
            "error body must be an object, got {errors}"
        )));
    };

    let mut messages = Vec::new();
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                messages.extend(items.iter().map(|item| format!("{key}: {}", message_text(item))));
            }
            Value::Object(_) => {
                messages.extend(
                    flatten_error_messages(value)?
                        .into_iter()
                        .map(|child| format!("{key}.{child}")),
                );
            }
            other => {
                return Err(Error::DecodeError(format!(
                    "unsupported error value for `{key}`: {other}"
                )));
            }
        }
    }
    Ok(messages)
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Api(_) => "API_ERROR",
            Self::Transport(TransportError::NonJson { .. }) => "NON_JSON_RESPONSE",
            Self::Transport(TransportError::Connection(_)) => "HTTP_ERROR",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::DecodeError(_) => "DECODE_ERROR",
        }
    }

    /// Flattened API messages, empty for non-API errors.
    #[must_use]
    pub fn api_messages(&self) -> &[String] {
        match self {
            Self::Api(api) => &api.messages,
            _ => &[],
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(TransportError::Connection(err.to_string()))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}
