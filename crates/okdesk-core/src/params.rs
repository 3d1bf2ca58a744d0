//! Scalar coercion of request values into query/form strings.

use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Serializer;
use serde_json::Value;

/// Wire date format, `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minute-precision date-time format used by deadline and time entry fields.
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

const ISO_NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A value that can be rendered as a single query or form parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Text passed through unchanged
    Str(String),
    /// Integer rendered in decimal
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Rendered as `true` / `false`
    Bool(bool),
    /// Rendered as `YYYY-MM-DD`
    Date(NaiveDate),
    /// Rendered in ISO-8601 without offset
    DateTime(NaiveDateTime),
    /// Rendered in ISO-8601 with offset
    Timestamp(DateTime<FixedOffset>),
    /// Rendered as `key:value,` per entry
    Map(Vec<(String, ParamValue)>),
    /// Sequences cannot be rendered as a single parameter
    List(Vec<ParamValue>),
}

/// Render a value as a parameter string.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] for sequences, which must be expanded into
/// repeated `key[]` parameters by the caller instead.
///
/// # Examples
///
/// ```
/// use okdesk_core::params::{to_param, ParamValue};
///
/// assert_eq!(to_param(&ParamValue::Bool(true)).unwrap(), "true");
/// assert_eq!(to_param(&ParamValue::Int(42)).unwrap(), "42");
/// ```
pub fn to_param(value: &ParamValue) -> Result<String> {
    Ok(match value {
        ParamValue::Str(text) => text.clone(),
        ParamValue::Int(number) => number.to_string(),
        ParamValue::Float(number) => number.to_string(),
        ParamValue::Bool(flag) => flag.to_string(),
        ParamValue::Date(date) => format_date(*date),
        ParamValue::DateTime(moment) => format_iso_naive(*moment),
        ParamValue::Timestamp(moment) => moment.to_rfc3339(),
        ParamValue::Map(entries) => {
            let mut rendered = String::new();
            for (key, entry) in entries {
                rendered.push_str(key);
                rendered.push(':');
                rendered.push_str(&to_param(entry)?);
                rendered.push(',');
            }
            rendered
        }
        ParamValue::List(_) => {
            return Err(Error::InvalidRequest(
                "a sequence cannot be converted to a single parameter".into(),
            ))
        }
    })
}

/// Format a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a date-time as `YYYY-MM-DD HH:MM`.
#[must_use]
pub fn format_minutes(moment: NaiveDateTime) -> String {
    moment.format(MINUTE_FORMAT).to_string()
}

/// Format a date-time in ISO-8601, omitting a zero fraction.
#[must_use]
pub fn format_iso_naive(moment: NaiveDateTime) -> String {
    moment.format(ISO_NAIVE_FORMAT).to_string()
}

/// Serialize an optional date-time in ISO-8601, for `serialize_with`.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize_iso<S: Serializer>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(moment) => serializer.serialize_str(&format_iso_naive(*moment)),
        None => serializer.serialize_none(),
    }
}

/// Serialize a date-time as `YYYY-MM-DD HH:MM`, for `serialize_with`.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize_minutes<S: Serializer>(
    value: &NaiveDateTime,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_minutes(*value))
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for ParamValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for ParamValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<&Value> for ParamValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Str(String::new()),
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Number(number) => number
                .as_i64()
                .map(Self::Int)
                .or_else(|| number.as_f64().map(Self::Float))
                .unwrap_or_else(|| Self::Str(number.to_string())),
            Value::String(text) => Self::Str(text.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(
                map.iter()
                    .map(|(key, entry)| (key.clone(), Self::from(entry)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn renders_scalars() {
        assert_eq!(to_param(&"text".into()).unwrap(), "text");
        assert_eq!(to_param(&7i64.into()).unwrap(), "7");
        assert_eq!(to_param(&true.into()).unwrap(), "true");
        assert_eq!(to_param(&false.into()).unwrap(), "false");
        assert_eq!(to_param(&date().into()).unwrap(), "2024-03-05");
    }

    #[test]
    fn renders_datetimes_in_iso() {
        let naive = date().and_hms_opt(10, 20, 30).unwrap();
        assert_eq!(to_param(&naive.into()).unwrap(), "2024-03-05T10:20:30");

        let aware = DateTime::parse_from_rfc3339("2024-03-05T10:20:30+03:00").unwrap();
        assert_eq!(to_param(&aware.into()).unwrap(), "2024-03-05T10:20:30+03:00");
    }

    #[test]
    fn sequence_is_rejected() {
        let err = to_param(&vec![1i64, 2].into()).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn mapping_keeps_trailing_separator() {
        let value = ParamValue::Map(vec![
            ("a".into(), ParamValue::Int(1)),
            ("b".into(), ParamValue::Bool(false)),
        ]);
        assert_eq!(to_param(&value).unwrap(), "a:1,b:false,");
    }

    #[test]
    fn converts_json_values() {
        assert_eq!(ParamValue::from(&json!(3)), ParamValue::Int(3));
        assert_eq!(ParamValue::from(&json!(1.5)), ParamValue::Float(1.5));
        assert_eq!(ParamValue::from(&json!("x")), ParamValue::Str("x".into()));
        assert!(matches!(ParamValue::from(&json!([1])), ParamValue::List(_)));
    }

    #[test]
    fn minute_format_drops_seconds() {
        let moment = date().and_hms_opt(9, 5, 59).unwrap();
        assert_eq!(format_minutes(moment), "2024-03-05 09:05");
    }

    #[derive(serde::Serialize)]
    struct Stamps {
        #[serde(serialize_with = "serialize_iso", skip_serializing_if = "Option::is_none")]
        planned: Option<NaiveDateTime>,
        #[serde(serialize_with = "serialize_minutes")]
        logged: NaiveDateTime,
    }

    #[test]
    fn serde_helpers_use_wire_formats() {
        let moment = date().and_hms_opt(9, 5, 0).unwrap();
        let stamps = Stamps {
            planned: Some(moment),
            logged: moment,
        };
        assert_eq!(
            serde_json::to_value(&stamps).unwrap(),
            json!({"planned": "2024-03-05T09:05:00", "logged": "2024-03-05 09:05"})
        );
    }
}
