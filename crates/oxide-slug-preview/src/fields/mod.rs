//! Model field types.
//!
//! These are the persistence-layer side of a slug: field metadata, the
//! pre-save hook that derives the stored value, and the derivation of a
//! matching form field.

mod slug_preview;

pub use slug_preview::{Deconstruction, SlugPreviewField};

use serde_json::Value;

use crate::error::ValidationError;
use crate::record::{value_to_text, Record};
use crate::slugify::Slugify;
use crate::url_format::UrlFormat;

/// Slug settings shared by the model field and the form field derived
/// from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugFieldConfig {
    /// Attribute to derive the slug from.
    pub populate_from: Option<String>,
    /// Re-derive from `populate_from` on every save, not only when empty.
    pub always_update: bool,
    /// Slugify function in effect.
    pub slugify: Slugify,
    /// URL format for the preview; `None` asks the record, then falls back
    /// to `/{slug}/`.
    pub url_format: Option<UrlFormat>,
}

/// Common field options.
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    /// Whether the field can be null.
    pub null: bool,
    /// Whether the field is blank (empty string allowed).
    pub blank: bool,
    /// Default value for the field.
    pub default: Option<String>,
    /// Whether to create a database index.
    pub db_index: bool,
    /// Whether the field must be unique.
    pub unique: bool,
    /// Human-readable name for the field.
    pub verbose_name: Option<String>,
    /// Help text for forms.
    pub help_text: Option<String>,
    /// Whether the field is editable in forms.
    pub editable: bool,
}

impl FieldOptions {
    /// Creates new field options with defaults.
    pub fn new() -> Self {
        Self {
            editable: true,
            ..Default::default()
        }
    }

    /// Sets the null option.
    #[must_use]
    pub fn null(mut self, value: bool) -> Self {
        self.null = value;
        self
    }

    /// Sets the blank option.
    #[must_use]
    pub fn blank(mut self, value: bool) -> Self {
        self.blank = value;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the db_index option.
    #[must_use]
    pub fn db_index(mut self, value: bool) -> Self {
        self.db_index = value;
        self
    }

    /// Sets the unique option.
    #[must_use]
    pub fn unique(mut self, value: bool) -> Self {
        self.unique = value;
        self
    }

    /// Sets the verbose_name option.
    #[must_use]
    pub fn verbose_name(mut self, value: impl Into<String>) -> Self {
        self.verbose_name = Some(value.into());
        self
    }

    /// Sets the help_text option.
    #[must_use]
    pub fn help_text(mut self, value: impl Into<String>) -> Self {
        self.help_text = Some(value.into());
        self
    }

    /// Sets the editable option.
    #[must_use]
    pub fn editable(mut self, value: bool) -> Self {
        self.editable = value;
        self
    }
}

/// A model field.
pub trait Field {
    /// The attribute this field stores on the record.
    fn name(&self) -> &str;

    /// Returns the field options.
    fn options(&self) -> &FieldOptions;

    /// Validates a value for this field, returning every failure.
    fn validate(&self, value: &str) -> Result<(), Vec<ValidationError>>;

    /// Returns the value to store, right before the record is saved.
    ///
    /// `add` is true when the record is being inserted.
    fn pre_save(&self, record: &mut dyn Record, _add: bool) -> Option<String> {
        record.get(self.name()).as_ref().and_then(value_to_text)
    }
}

/// Runs the pre-save hook of every field, in order, and returns the
/// values to store keyed by attribute name.
pub fn run_pre_save(
    record: &mut dyn Record,
    fields: &[&dyn Field],
    add: bool,
) -> Vec<(String, Value)> {
    fields
        .iter()
        .map(|field| {
            let value = field.pre_save(record, add).map_or(Value::Null, Value::String);
            (field.name().to_string(), value)
        })
        .collect()
}

/// Turns `field_name` into a label: `"field name"` with a capital first
/// letter.
pub(crate) fn humanize(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.trim().chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DynamicRecord;
    use serde_json::json;

    struct Plain(FieldOptions);

    impl Field for Plain {
        fn name(&self) -> &str {
            "title"
        }

        fn options(&self) -> &FieldOptions {
            &self.0
        }

        fn validate(&self, _value: &str) -> Result<(), Vec<ValidationError>> {
            Ok(())
        }
    }

    #[test]
    fn test_field_options_builder() {
        let options = FieldOptions::new()
            .blank(true)
            .unique(true)
            .verbose_name("Web address")
            .help_text("Used in URLs");
        assert!(options.editable);
        assert!(options.blank);
        assert!(options.unique);
        assert!(!options.null);
        assert_eq!(options.verbose_name.as_deref(), Some("Web address"));
    }

    #[test]
    fn test_default_pre_save_returns_current_text() {
        let field = Plain(FieldOptions::new());
        let mut record = DynamicRecord::new().with("title", "Hello");
        assert_eq!(field.pre_save(&mut record, true), Some("Hello".to_string()));
    }

    #[test]
    fn test_run_pre_save_collects_values() {
        let field = Plain(FieldOptions::new());
        let mut record = DynamicRecord::new().with("title", "Hello");
        let values = run_pre_save(&mut record, &[&field], false);
        assert_eq!(values, vec![("title".to_string(), json!("Hello"))]);
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("slug"), "Slug");
        assert_eq!(humanize("url_slug"), "Url slug");
        assert_eq!(humanize(""), "");
    }
}
