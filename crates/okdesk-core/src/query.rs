//! Convenience builder for HTTP query parameters.
//!
//! Keys are kept in insertion order. List values follow the vendor's Rails
//! convention of repeating `key[]` once per element.

use crate::filters::{convert_attribute_filters, AttributeFilter};
use crate::params::{format_date, format_iso_naive};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Display;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &str, value: Option<T>)
    where
        T: ToString,
    {
        if let Some(value) = value {
            self.pairs.push((key.to_owned(), value.to_string()));
        }
    }

    /// Append using a mapping function when the value is present.
    pub fn push_opt_with<T, F>(&mut self, key: &str, value: Option<T>, mut map: F)
    where
        F: FnMut(T) -> String,
    {
        if let Some(value) = value {
            self.pairs.push((key.to_owned(), map(value)));
        }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: &str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key.to_owned(), value.to_string()));
    }

    /// Append `key[]` once per element, in order.
    pub fn push_list<T>(&mut self, key: &str, values: &[T])
    where
        T: Display,
    {
        let key = format!("{key}[]");
        self.pairs
            .extend(values.iter().map(|value| (key.clone(), value.to_string())));
    }

    /// Append `key[]` entries when the list is present.
    pub fn push_opt_list<T>(&mut self, key: &str, values: Option<&[T]>)
    where
        T: Display,
    {
        if let Some(values) = values {
            self.push_list(key, values);
        }
    }

    /// Append a `YYYY-MM-DD` date when present.
    pub fn push_date(&mut self, key: &str, value: Option<NaiveDate>) {
        self.push_opt_with(key, value, format_date);
    }

    /// Append an ISO-8601 date-time when present.
    pub fn push_datetime(&mut self, key: &str, value: Option<NaiveDateTime>) {
        self.push_opt_with(key, value, format_iso_naive);
    }

    /// Append custom attribute filters under `namespace`.
    pub fn push_filters(&mut self, namespace: &str, filters: &[AttributeFilter]) {
        for (key, values) in convert_attribute_filters(namespace, filters) {
            self.pairs
                .extend(values.into_iter().map(|value| (key.clone(), value)));
        }
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }

    /// Borrow the collected pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
