//! Error types for slug fields and forms.

use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while configuring or using slug preview fields.
#[derive(Debug, Error)]
pub enum SlugPreviewError {
    /// A URL format template does not hold exactly one `{slug}` placeholder.
    #[error("invalid url format {format:?}: {reason}")]
    InvalidUrlFormat {
        /// The offending template.
        format: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Form data did not clean.
    #[error("validation errors: {0}")]
    Validation(ValidationErrors),

    /// The form does not declare a field with this name.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Settings or record (de)serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single validation failure, carrying a human-readable message and a
/// stable machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Message shown to the end user.
    pub message: String,
    /// Stable error code, e.g. `invalid`.
    pub code: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Collection of validation errors by field.
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub errors: HashMap<String, Vec<ValidationError>>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: &str, error: ValidationError) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(error);
    }

    /// Adds several errors for a field.
    pub fn extend(&mut self, field: &str, errors: impl IntoIterator<Item = ValidationError>) {
        for error in errors {
            self.add(field, error);
        }
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns errors for a specific field.
    pub fn get(&self, field: &str) -> Option<&Vec<ValidationError>> {
        self.errors.get(field)
    }

    /// Returns the messages for a field, empty when it has none.
    pub fn messages(&self, field: &str) -> Vec<String> {
        self.get(field)
            .map(|errors| errors.iter().map(|e| e.message.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns all errors as a flat list.
    pub fn all_errors(&self) -> Vec<(&str, &ValidationError)> {
        self.errors
            .iter()
            .flat_map(|(field, errors)| errors.iter().map(move |e| (field.as_str(), e)))
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields: Vec<_> = self.errors.keys().collect();
        fields.sort();
        for field in fields {
            for error in &self.errors[field] {
                writeln!(f, "{field}: {} [{}]", error.message, error.code)?;
            }
        }
        Ok(())
    }
}

/// Result type alias for slug preview operations.
pub type Result<T> = std::result::Result<T, SlugPreviewError>;
