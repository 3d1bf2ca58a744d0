//! Encoding of custom-attribute filters into query parameters.
//!
//! Okdesk lets accounts define typed custom attributes on companies, issues
//! and equipment. List endpoints accept filters on them namespaced under a
//! caller-supplied prefix, e.g. `custom_parameters[code_since]`.

use crate::params::{format_date, to_param, ParamValue, MINUTE_FORMAT};
use crate::Result;
use chrono::{NaiveDate, NaiveDateTime};

/// Custom attribute field types as named by the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeFieldType {
    /// `ftdate`
    Date,
    /// `ftdatetime`
    DateTime,
    /// `ftcheckbox`
    Checkbox,
    /// `ftselect`
    Select,
    /// `ftmultiselect`
    Multiselect,
    /// `ftstring`
    String,
}

impl AttributeFieldType {
    /// Vendor type tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "ftdate",
            Self::DateTime => "ftdatetime",
            Self::Checkbox => "ftcheckbox",
            Self::Select => "ftselect",
            Self::Multiselect => "ftmultiselect",
            Self::String => "ftstring",
        }
    }
}

/// A filter on one custom attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeFilter {
    /// Date range, either bound may be open.
    Date {
        /// Attribute code
        code: String,
        /// Lower bound
        since: Option<NaiveDate>,
        /// Upper bound
        until: Option<NaiveDate>,
    },
    /// Date-time range, either bound may be open.
    DateTime {
        /// Attribute code
        code: String,
        /// Lower bound
        since: Option<NaiveDateTime>,
        /// Upper bound
        until: Option<NaiveDateTime>,
    },
    /// Checkbox state.
    Checkbox {
        /// Attribute code
        code: String,
        /// Expected state
        value: bool,
    },
    /// Any of the given select options.
    Select {
        /// Attribute code
        code: String,
        /// Rendered option values
        values: Vec<String>,
    },
    /// Any of the given multiselect options.
    Multiselect {
        /// Attribute code
        code: String,
        /// Rendered option values
        values: Vec<String>,
    },
    /// Exact string value.
    String {
        /// Attribute code
        code: String,
        /// Expected value
        value: String,
    },
}

impl AttributeFilter {
    /// Filter a date attribute on an optional range.
    pub fn date(
        code: impl Into<String>,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Self {
        Self::Date {
            code: code.into(),
            since,
            until,
        }
    }

    /// Filter a date-time attribute on an optional range.
    pub fn datetime(
        code: impl Into<String>,
        since: Option<NaiveDateTime>,
        until: Option<NaiveDateTime>,
    ) -> Self {
        Self::DateTime {
            code: code.into(),
            since,
            until,
        }
    }

    /// Filter a checkbox attribute.
    pub fn checkbox(code: impl Into<String>, value: bool) -> Self {
        Self::Checkbox {
            code: code.into(),
            value,
        }
    }

    /// Filter a select attribute on any of `values`.
    ///
    /// # Errors
    ///
    /// Fails if a value is itself a sequence.
    pub fn select<I, V>(code: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        Ok(Self::Select {
            code: code.into(),
            values: render_values(values)?,
        })
    }

    /// Filter a multiselect attribute on any of `values`.
    ///
    /// # Errors
    ///
    /// Fails if a value is itself a sequence.
    pub fn multiselect<I, V>(code: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        Ok(Self::Multiselect {
            code: code.into(),
            values: render_values(values)?,
        })
    }

    /// Filter a string attribute.
    pub fn string(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self::String {
            code: code.into(),
            value: value.into(),
        }
    }

    /// Attribute code this filter applies to.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Date { code, .. }
            | Self::DateTime { code, .. }
            | Self::Checkbox { code, .. }
            | Self::Select { code, .. }
            | Self::Multiselect { code, .. }
            | Self::String { code, .. } => code,
        }
    }

    /// Vendor field type of the filtered attribute.
    #[must_use]
    pub const fn field_type(&self) -> AttributeFieldType {
        match self {
            Self::Date { .. } => AttributeFieldType::Date,
            Self::DateTime { .. } => AttributeFieldType::DateTime,
            Self::Checkbox { .. } => AttributeFieldType::Checkbox,
            Self::Select { .. } => AttributeFieldType::Select,
            Self::Multiselect { .. } => AttributeFieldType::Multiselect,
            Self::String { .. } => AttributeFieldType::String,
        }
    }

    /// Parameter entries for this filter under `namespace`.
    ///
    /// Each entry is a key and the values sent for it; list-valued keys end
    /// in `[]`. Open range bounds produce no entry.
    #[must_use]
    pub fn to_params(&self, namespace: &str) -> Vec<(String, Vec<String>)> {
        let key = |suffix: &str| format!("{namespace}[{}{suffix}]", self.code());
        match self {
            Self::Date { since, until, .. } => [
                since.map(|d| (key("_since"), vec![format_date(d)])),
                until.map(|d| (key("_until"), vec![format_date(d)])),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Self::DateTime { since, until, .. } => [
                since.map(|d| (key("_since"), vec![d.format(MINUTE_FORMAT).to_string()])),
                until.map(|d| (key("_until"), vec![d.format(MINUTE_FORMAT).to_string()])),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Self::Checkbox { value, .. } => vec![(key(""), vec![value.to_string()])],
            Self::Select { values, .. } | Self::Multiselect { values, .. } => {
                vec![(format!("{}[]", key("")), values.clone())]
            }
            Self::String { value, .. } => vec![(key(""), vec![value.clone()])],
        }
    }
}

fn render_values<I, V>(values: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = V>,
    V: Into<ParamValue>,
{
    values.into_iter().map(|v| to_param(&v.into())).collect()
}

/// Merge the parameters of several filters into one ordered mapping.
///
/// When two filters produce the same key the later one wins, keeping the
/// position of the first occurrence.
#[must_use]
pub fn convert_attribute_filters(
    namespace: &str,
    filters: &[AttributeFilter],
) -> Vec<(String, Vec<String>)> {
    let mut merged: Vec<(String, Vec<String>)> = Vec::new();
    for (key, values) in filters.iter().flat_map(|f| f.to_params(namespace)) {
        match merged.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = values,
            None => merged.push((key, values)),
        }
    }
    merged
}
