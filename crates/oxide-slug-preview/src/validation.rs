//! Slug validators.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::slugify::Slugify;

static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid regex"));

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value.
    fn validate(&self, value: &str) -> Result<(), ValidationError>;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;

    /// Returns the error code for this validator.
    fn code(&self) -> &str {
        "invalid"
    }
}

/// Shared validator handle, as stored on fields.
pub type SharedValidator = Arc<dyn Validator>;

/// Accepts a value only when slugifying it again leaves it unchanged.
///
/// Use this instead of [`SlugValidator`] whenever a field slugifies with
/// something other than [`Slugify::ascii`]: the built-in validator only
/// knows the character set, not what the function rewrites.
#[derive(Debug, Clone)]
pub struct ValidateSlug {
    slugify: Slugify,
    message: String,
    code: String,
}

impl ValidateSlug {
    /// Creates a validator for the given slugify function.
    pub fn new(slugify: Slugify) -> Self {
        Self {
            slugify,
            message: "Enter a valid slug.".to_string(),
            code: "invalid".to_string(),
        }
    }

    /// Sets a custom message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets a custom error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Returns the slugify function values are checked against.
    pub fn slugify(&self) -> &Slugify {
        &self.slugify
    }
}

impl Default for ValidateSlug {
    fn default() -> Self {
        Self::new(Slugify::default())
    }
}

impl Validator for ValidateSlug {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        if self.slugify.apply(value) == value {
            Ok(())
        } else {
            Err(ValidationError::new(&self.message, &self.code))
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &str {
        &self.code
    }
}

/// The framework's built-in slug validator: letters, digits, `_` and `-`.
#[derive(Debug, Clone)]
pub struct SlugValidator {
    message: String,
}

impl SlugValidator {
    /// Creates a new SlugValidator with the default message.
    pub fn new() -> Self {
        Self {
            message: "Enter a valid \u{201c}slug\u{201d} consisting of letters, numbers, \
                      underscores or hyphens."
                .to_string(),
        }
    }

    /// Creates a new SlugValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for SlugValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for SlugValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        if SLUG_RE.is_match(value) {
            Ok(())
        } else {
            Err(ValidationError::new(&self.message, self.code()))
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a maximum length in characters.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: format!("Ensure this value has at most {max_length} characters."),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        if value.chars().count() > self.max_length {
            Err(ValidationError::new(&self.message, self.code()))
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> &str {
        "max_length"
    }
}

/// Returns the slug validators a field using `slugify` starts with.
///
/// The ASCII built-in is covered by the built-in [`SlugValidator`]; any
/// other function, including the transliterating default, gets a matching
/// [`ValidateSlug`] in its place.
pub fn slug_validators(slugify: &Slugify) -> Vec<SharedValidator> {
    if slugify.is_ascii() {
        vec![Arc::new(SlugValidator::new())]
    } else {
        vec![Arc::new(ValidateSlug::new(slugify.clone()))]
    }
}

/// Runs every validator and collects all failures.
pub fn run_validators(validators: &[SharedValidator], value: &str) -> Vec<ValidationError> {
    validators
        .iter()
        .filter_map(|v| v.validate(value).err())
        .collect()
}
