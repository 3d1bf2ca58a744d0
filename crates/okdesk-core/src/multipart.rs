//! File uploads and `multipart/form-data` bodies.
//!
//! Parts are collected into an inspectable [`MultipartBody`] and only turned
//! into a [`reqwest::multipart::Form`] by the transport.

use crate::params::{to_param, ParamValue};
use crate::{Error, Result};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// File read into memory for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    file_name: String,
    mime_type: String,
    content: Vec<u8>,
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.content.len())
            .finish()
    }
}

impl UploadFile {
    /// Read a file from disk.
    ///
    /// The file is read eagerly and its handle closed before returning, so a
    /// missing file surfaces here rather than while sending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|err| {
            Error::InvalidRequest(format!("File {} not found: {err}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_owned();

        Ok(Self {
            file_name,
            mime_type,
            content,
        })
    }

    /// Build an upload from bytes already in memory.
    pub fn from_bytes(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_owned();
        Self {
            file_name,
            mime_type,
            content,
        }
    }

    /// Base name sent with the part.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Guessed MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// File contents.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// A file attached to a resource, with optional description and visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    /// File to upload
    pub file: UploadFile,
    /// Description shown next to the file
    pub description: Option<String>,
    /// Whether clients can see the file
    pub is_public: Option<bool>,
}

impl AttachmentUpload {
    /// Attach a file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(UploadFile::from_path(path)?))
    }

    /// Attach an already loaded file.
    #[must_use]
    pub const fn new(file: UploadFile) -> Self {
        Self {
            file,
            description: None,
            is_public: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set client visibility.
    #[must_use]
    pub const fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }
}

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartField {
    /// Plain text field
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// File field
    File {
        /// Field name
        name: String,
        /// Uploaded file
        file: UploadFile,
    },
}

impl MultipartField {
    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Ordered collection of multipart fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    fields: Vec<MultipartField>,
}

impl MultipartBody {
    /// Create an empty body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(MultipartField::Text {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Add a text field when the value is present.
    pub fn text_opt<T: ToString>(&mut self, name: impl Into<String>, value: Option<T>) {
        if let Some(value) = value {
            self.text(name, value.to_string());
        }
    }

    /// Add `name[]` once per element.
    pub fn text_list<T: ToString>(&mut self, name: &str, values: &[T]) {
        for value in values {
            self.text(format!("{name}[]"), value.to_string());
        }
    }

    /// Add a file field.
    pub fn file(&mut self, name: impl Into<String>, file: UploadFile) {
        self.fields.push(MultipartField::File {
            name: name.into(),
            file,
        });
    }

    /// Add a JSON value, flattening objects into `name[key]` and arrays into
    /// `name[]`. Nulls are skipped.
    pub fn push_value(&mut self, name: &str, value: &Value) {
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (key, entry) in map {
                    self.push_value(&format!("{name}[{key}]"), entry);
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.push_value(&format!("{name}[]"), item);
                }
            }
            scalar => {
                // scalars never fail coercion
                if let Ok(text) = to_param(&ParamValue::from(scalar)) {
                    self.text(name, text);
                }
            }
        }
    }

    /// Collected fields, in order.
    #[must_use]
    pub fn fields(&self) -> &[MultipartField] {
        &self.fields
    }

    /// Value of the first text field called `name`.
    #[must_use]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|field| match field {
            MultipartField::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Returns true if the body has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert into a `reqwest` form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if a file part carries an unusable MIME type.
    pub fn into_form(self) -> Result<Form> {
        let mut form = Form::new();
        for field in self.fields {
            form = match field {
                MultipartField::Text { name, value } => form.text(name, value),
                MultipartField::File { name, file } => {
                    let part = Part::bytes(file.content)
                        .file_name(file.file_name)
                        .mime_str(&file.mime_type)
                        .map_err(|err| Error::InvalidRequest(err.to_string()))?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn upload_reads_file_and_guesses_mime() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"\x89PNG").unwrap();

        let upload = UploadFile::from_path(file.path()).unwrap();
        assert_eq!(upload.mime_type(), "image/png");
        assert_eq!(upload.content(), b"\x89PNG");
        assert!(upload.file_name().ends_with(".png"));
    }

    #[test]
    fn missing_file_fails_at_construction() {
        let err = AttachmentUpload::from_path("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        let upload = UploadFile::from_bytes("dump.zzzunknown", vec![1, 2]);
        assert_eq!(upload.mime_type(), "application/octet-stream");
    }

    #[test]
    fn push_value_flattens_nested_json() {
        let mut body = MultipartBody::new();
        body.push_value(
            "issue[custom_parameters]",
            &json!({"code": "A1", "flags": [true, false], "empty": null}),
        );

        let names: Vec<&str> = body.fields().iter().map(MultipartField::name).collect();
        assert_eq!(
            names,
            vec![
                "issue[custom_parameters][code]",
                "issue[custom_parameters][flags][]",
                "issue[custom_parameters][flags][]",
            ]
        );
        assert_eq!(body.text_value("issue[custom_parameters][code]"), Some("A1"));
    }

    #[test]
    fn text_list_repeats_bracketed_name() {
        let mut body = MultipartBody::new();
        body.text_list("issue[observer_ids]", &[3, 4]);
        assert_eq!(body.fields().len(), 2);
        assert_eq!(body.text_value("issue[observer_ids][]"), Some("3"));
    }
}
