//! Request descriptions shared by every resource crate.
//!
//! An operation is a value implementing [`ApiRequest`]: it knows how to turn
//! itself into an [`ApiCall`] (method, path, query, body) and how to turn the
//! decoded JSON answer into its typed output. Keeping the two halves pure lets
//! the transport stay generic and lets tests assert the wire shape without a
//! server.

use crate::multipart::MultipartBody;
use crate::query::QueryParams;
use crate::{Error, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// An operation against the Okdesk API.
pub trait ApiRequest: Send + Sync {
    /// Typed result of the operation.
    type Output: Send;

    /// Describe the HTTP call.
    fn to_call(&self) -> ApiCall;

    /// Map the decoded response onto the typed output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeError`] when the body does not have the expected shape.
    fn parse_response(&self, value: Value) -> Result<Self::Output>;
}

/// Body of an outgoing call.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON document
    Json(Value),
    /// `multipart/form-data`
    Multipart(MultipartBody),
}

/// Wire description of one HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    /// HTTP method
    pub method: Method,
    /// Path relative to the account base URL, e.g. `api/v1/issues/5`
    pub path: String,
    /// Query pairs, excluding the auth token
    pub query: Vec<(String, String)>,
    /// Request body
    pub body: RequestBody,
    /// Accept a non-JSON answer as an empty result
    pub allow_non_json: bool,
    /// Reason the call could not be built; sending it fails with
    /// [`Error::InvalidRequest`]
    pub rejection: Option<String>,
}

impl ApiCall {
    /// Describe a call with `method` on `path`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            allow_non_json: false,
            rejection: None,
        }
    }

    /// `GET` call.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` call.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PATCH` call.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// `PUT` call.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `DELETE` call.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach query parameters.
    #[must_use]
    pub fn with_query(mut self, params: QueryParams) -> Self {
        self.query = params.into_pairs();
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Serialize `payload` as the JSON body.
    #[must_use]
    pub fn with_serialized<T: Serialize + ?Sized>(self, payload: &T) -> Self {
        match to_json(payload) {
            Ok(body) => self.with_json(body),
            Err(err) => self.rejecting(err),
        }
    }

    /// Serialize `payload` and wrap it under `key`, producing `{key: payload}`.
    #[must_use]
    pub fn with_wrapped_json<T: Serialize + ?Sized>(self, key: &str, payload: &T) -> Self {
        match to_json(payload) {
            Ok(body) => {
                let mut wrapper = serde_json::Map::new();
                wrapper.insert(key.to_owned(), body);
                self.with_json(Value::Object(wrapper))
            }
            Err(err) => self.rejecting(err),
        }
    }

    /// Mark the call as unsendable because building it failed with `err`.
    #[must_use]
    pub fn rejecting(mut self, err: Error) -> Self {
        self.rejection = Some(match err {
            Error::InvalidRequest(reason) => reason,
            other => other.to_string(),
        });
        self
    }

    /// Check that the call was built without errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] carrying the recorded rejection.
    pub fn ensure_valid(&self) -> Result<()> {
        match &self.rejection {
            Some(reason) => Err(Error::InvalidRequest(reason.clone())),
            None => Ok(()),
        }
    }

    /// Attach a multipart body.
    #[must_use]
    pub fn with_multipart(mut self, body: MultipartBody) -> Self {
        self.body = RequestBody::Multipart(body);
        self
    }

    /// Treat a non-JSON answer as an empty result.
    #[must_use]
    pub const fn allowing_non_json(mut self) -> Self {
        self.allow_non_json = true;
        self
    }

    /// JSON body, if any.
    #[must_use]
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Multipart body, if any.
    #[must_use]
    pub fn multipart_body(&self) -> Option<&MultipartBody> {
        match &self.body {
            RequestBody::Multipart(body) => Some(body),
            _ => None,
        }
    }
}

/// Serialize a request payload.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] when the payload cannot be represented
/// as JSON.
pub fn to_json<T: Serialize + ?Sized>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload)
        .map_err(|err| Error::InvalidRequest(format!("Cannot serialize request body: {err}")))
}

/// Decode a response body into `T`.
///
/// # Errors
///
/// Returns [`Error::DecodeError`] when the body does not match `T`.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|err| Error::DecodeError(err.to_string()))
}

/// Decode a value that the vendor returns either as one object or as a list.
///
/// `null`, `{}` and `[]` decode to an empty list.
///
/// # Errors
///
/// Returns [`Error::DecodeError`] when an element does not match `T`.
pub fn decode_one_or_many<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => decode(value),
        Value::Object(ref map) if map.is_empty() => Ok(Vec::new()),
        single => Ok(vec![decode(single)?]),
    }
}

/// Take the value at a nested key path, or `null` when absent.
#[must_use]
pub fn take_path(mut value: Value, path: &[&str]) -> Value {
    for key in path {
        value = match value {
            Value::Object(mut map) => map.remove(*key).unwrap_or(Value::Null),
            _ => return Value::Null,
        };
    }
    value
}

/// Direction of keyset pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Records after `from_id`
    Forward,
    /// Records before `from_id`
    Reverse,
}

impl Direction {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }
}

/// Keyset pagination shared by list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    /// `page[size]`
    pub size: Option<u32>,
    /// `page[from_id]`
    pub from_id: Option<i64>,
    /// `page[direction]`
    pub direction: Option<Direction>,
}

impl Page {
    /// Page of `size` records.
    #[must_use]
    pub const fn of_size(size: u32) -> Self {
        Self {
            size: Some(size),
            from_id: None,
            direction: None,
        }
    }

    /// Start after (or before) the given id.
    #[must_use]
    pub const fn from_id(mut self, id: i64, direction: Direction) -> Self {
        self.from_id = Some(id);
        self.direction = Some(direction);
        self
    }

    /// Append the page parameters.
    pub fn apply(&self, params: &mut QueryParams) {
        params.push_opt("page[size]", self.size);
        params.push_opt("page[from_id]", self.from_id);
        params.push_opt("page[direction]", self.direction.map(Direction::as_str));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Payload {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        phone: Option<String>,
    }

    #[test]
    fn wrapped_json_nests_payload() {
        let call = ApiCall::post("api/v1/companies/").with_wrapped_json(
            "company",
            &Payload {
                name: "x".into(),
                phone: None,
            },
        );
        assert_eq!(call.json_body(), Some(&json!({"company": {"name": "x"}})));
        assert_eq!(call.method, Method::POST);
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("unsupported value"))
        }
    }

    #[test]
    fn serialization_failure_rejects_call() {
        let call = ApiCall::post("api/v1/companies/").with_wrapped_json("company", &Unserializable);
        assert_eq!(call.body, RequestBody::Empty);
        match call.ensure_valid() {
            Err(Error::InvalidRequest(reason)) => {
                assert!(reason.contains("unsupported value"), "{reason}");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let call = ApiCall::patch("api/v1/equipments/3").with_serialized(&Unserializable);
        assert!(call.ensure_valid().is_err());
        assert!(matches!(
            to_json(&Unserializable),
            Err(Error::InvalidRequest(_))
        ));
        assert!(ApiCall::get("api/v1/issues/1").ensure_valid().is_ok());
    }

    #[test]
    fn one_or_many_normalizes_shapes() {
        let none: Vec<Value> = decode_one_or_many(Value::Null).unwrap();
        assert!(none.is_empty());
        let empty: Vec<Value> = decode_one_or_many(json!({})).unwrap();
        assert!(empty.is_empty());
        let single: Vec<Value> = decode_one_or_many(json!({"id": 1})).unwrap();
        assert_eq!(single, vec![json!({"id": 1})]);
        let many: Vec<Value> = decode_one_or_many(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn take_path_walks_nested_objects() {
        let value = json!({"check_list": {"items": [1, 2]}});
        assert_eq!(take_path(value, &["check_list", "items"]), json!([1, 2]));
        assert_eq!(take_path(json!([]), &["check_list"]), Value::Null);
    }

    #[test]
    fn page_renders_only_present_fields() {
        let mut params = QueryParams::new();
        Page::of_size(50)
            .from_id(10, Direction::Reverse)
            .apply(&mut params);
        assert_eq!(
            params.into_pairs(),
            vec![
                ("page[size]".to_string(), "50".to_string()),
                ("page[from_id]".to_string(), "10".to_string()),
                ("page[direction]".to_string(), "reverse".to_string()),
            ]
        );

        let mut empty = QueryParams::new();
        Page::default().apply(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn decode_reports_shape_mismatch() {
        let err = decode::<Vec<i64>>(json!({"id": 1})).unwrap_err();
        assert!(matches!(err, Error::DecodeError(_)));
    }
}
