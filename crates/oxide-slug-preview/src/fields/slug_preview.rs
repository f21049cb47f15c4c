//! The persisted slug field.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::forms::{FormFieldOverrides, SlugPreviewFormField};
use crate::record::{is_empty_value, value_to_text, Record};
use crate::slugify::Slugify;
use crate::url_format::UrlFormat;
use crate::validation::{run_validators, slug_validators, MaxLengthValidator, SharedValidator};

use super::{humanize, Field, FieldOptions, SlugFieldConfig};

const DEFAULT_MAX_LENGTH: usize = 50;
const FIELD_PATH: &str = "oxide_slug_preview::fields::SlugPreviewField";

/// A slug field that derives its value before each save and renders with a
/// URL preview in forms.
///
/// # Example
///
/// ```
/// use oxide_slug_preview::{DynamicRecord, Field, Record, SlugPreviewField};
///
/// let field = SlugPreviewField::new("slug").populate_from("title");
/// let mut post = DynamicRecord::new().with("title", "Hello World");
///
/// let slug = field.pre_save(&mut post, true);
/// assert_eq!(slug.as_deref(), Some("hello-world"));
/// assert_eq!(post.get("slug"), Some("hello-world".into()));
/// ```
#[derive(Debug, Clone)]
pub struct SlugPreviewField {
    /// Attribute name on the record.
    pub name: String,
    /// Maximum slug length; longer slugs are truncated on save.
    pub max_length: usize,
    /// Slug settings shared with the form field.
    pub config: SlugFieldConfig,
    /// Field options.
    pub options: FieldOptions,
}

impl SlugPreviewField {
    /// Creates a new field stored under `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_length: DEFAULT_MAX_LENGTH,
            config: SlugFieldConfig::default(),
            options: FieldOptions::new().db_index(true),
        }
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = length;
        self
    }

    /// Derives the slug from another attribute.
    #[must_use]
    pub fn populate_from(mut self, attr: impl Into<String>) -> Self {
        self.config.populate_from = Some(attr.into());
        self
    }

    /// Sets whether to re-derive on every save.
    #[must_use]
    pub fn always_update(mut self, value: bool) -> Self {
        self.config.always_update = value;
        self
    }

    /// Sets the slugify function.
    #[must_use]
    pub fn slugify(mut self, slugify: Slugify) -> Self {
        self.config.slugify = slugify;
        self
    }

    /// Sets the URL format.
    #[must_use]
    pub fn url_format(mut self, url_format: UrlFormat) -> Self {
        self.config.url_format = Some(url_format);
        self
    }

    /// Sets field options.
    #[must_use]
    pub fn options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// Validators run by [`Field::validate`].
    pub fn validators(&self) -> Vec<SharedValidator> {
        let mut validators: Vec<SharedValidator> =
            vec![std::sync::Arc::new(MaxLengthValidator::new(self.max_length))];
        validators.extend(slug_validators(&self.config.slugify));
        validators
    }

    /// Derives the matching form field.
    pub fn formfield(&self) -> SlugPreviewFormField {
        self.formfield_with(FormFieldOverrides::default())
    }

    /// Derives the matching form field; overrides win over this field's
    /// settings.
    pub fn formfield_with(&self, overrides: FormFieldOverrides) -> SlugPreviewFormField {
        let label = overrides
            .label
            .or_else(|| self.options.verbose_name.clone())
            .unwrap_or_else(|| humanize(&self.name));

        let mut field = SlugPreviewFormField::new(&self.name)
            .label(label)
            .required(overrides.required.unwrap_or(!self.options.blank))
            .max_length(overrides.max_length.unwrap_or(self.max_length))
            .always_update(overrides.always_update.unwrap_or(self.config.always_update))
            .slugify(overrides.slugify.unwrap_or_else(|| self.config.slugify.clone()));

        if let Some(attr) = overrides.populate_from.or_else(|| self.config.populate_from.clone()) {
            field = field.populate_from(attr);
        }
        if let Some(url_format) = overrides.url_format.or_else(|| self.config.url_format.clone()) {
            field = field.url_format(url_format);
        }
        if let Some(text) = overrides.help_text.or_else(|| self.options.help_text.clone()) {
            field = field.help_text(text);
        }
        if let Some(initial) = overrides.initial.or_else(|| self.options.default.clone()) {
            field = field.initial(initial);
        }
        field
    }

    /// Describes how to rebuild this field, for schema introspection.
    pub fn deconstruct(&self) -> Deconstruction {
        let mut kwargs = Map::new();
        if self.max_length != DEFAULT_MAX_LENGTH {
            kwargs.insert("max_length".into(), self.max_length.into());
        }
        if let Some(attr) = &self.config.populate_from {
            kwargs.insert("populate_from".into(), attr.as_str().into());
        }
        if self.config.always_update {
            kwargs.insert("always_update".into(), true.into());
        }
        if let Some(url_format) = &self.config.url_format {
            kwargs.insert("url_format".into(), url_format.to_string().into());
        }
        if !self.config.slugify.is_default() {
            kwargs.insert("slugify".into(), self.config.slugify.name().into());
        }

        let options = &self.options;
        if !options.db_index {
            kwargs.insert("db_index".into(), false.into());
        }
        for (key, set) in [
            ("null", options.null),
            ("blank", options.blank),
            ("unique", options.unique),
        ] {
            if set {
                kwargs.insert(key.into(), true.into());
            }
        }
        if !options.editable {
            kwargs.insert("editable".into(), false.into());
        }
        for (key, text) in [
            ("default", &options.default),
            ("verbose_name", &options.verbose_name),
            ("help_text", &options.help_text),
        ] {
            if let Some(text) = text {
                kwargs.insert(key.into(), text.as_str().into());
            }
        }

        Deconstruction {
            path: FIELD_PATH.to_string(),
            args: Vec::new(),
            kwargs,
        }
    }

    fn truncate(&self, slug: String) -> String {
        if slug.chars().count() <= self.max_length {
            return slug;
        }
        let truncated: String = slug.chars().take(self.max_length).collect();
        debug!(field = %self.name, %slug, %truncated, "slug truncated to max length");
        truncated
    }
}

impl Field for SlugPreviewField {
    fn name(&self) -> &str {
        &self.name
    }

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn validate(&self, value: &str) -> Result<(), Vec<ValidationError>> {
        if value.is_empty() {
            if self.options.blank {
                return Ok(());
            }
            return Err(vec![ValidationError::new(
                "This field cannot be blank.",
                "blank",
            )]);
        }

        let errors = run_validators(&self.validators(), value);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn pre_save(&self, record: &mut dyn Record, _add: bool) -> Option<String> {
        let mut value = record.get(&self.name).unwrap_or(Value::Null);

        if let Some(source) = &self.config.populate_from {
            if self.config.always_update || is_empty_value(&value) {
                match record.get(source) {
                    Some(derived) => value = derived,
                    None => warn!(
                        field = %self.name,
                        %source,
                        "populate_from attribute missing on record, keeping current value"
                    ),
                }
            }
        }

        // Manually entered values go through slugify too.
        let slug = value_to_text(&value).map(|text| self.truncate(self.config.slugify.apply(&text)));
        debug!(field = %self.name, slug = ?slug, "slug derived");

        record.set(
            &self.name,
            slug.clone().map_or(Value::Null, Value::String),
        );
        slug
    }
}

/// How to rebuild a field: its import path plus constructor arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deconstruction {
    /// Path of the field type.
    pub path: String,
    /// Positional arguments.
    pub args: Vec<Value>,
    /// Keyword arguments that differ from the defaults.
    pub kwargs: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormField;
    use crate::record::DynamicRecord;
    use serde_json::json;

    #[test]
    fn test_populates_empty_slug() {
        let field = SlugPreviewField::new("slug").populate_from("title");
        let mut record = DynamicRecord::new().with("title", "Hello World");
        assert_eq!(field.pre_save(&mut record, true).as_deref(), Some("hello-world"));
        assert_eq!(record.get("slug"), Some(json!("hello-world")));
    }

    #[test]
    fn test_keeps_existing_slug_without_always_update() {
        let field = SlugPreviewField::new("slug").populate_from("title");
        let mut record = DynamicRecord::new()
            .with("title", "Hello World")
            .with("slug", "custom");
        assert_eq!(field.pre_save(&mut record, false).as_deref(), Some("custom"));
    }

    #[test]
    fn test_always_update_overwrites() {
        let field = SlugPreviewField::new("slug")
            .populate_from("title")
            .always_update(true);
        let mut record = DynamicRecord::new()
            .with("title", "New Title")
            .with("slug", "old");
        assert_eq!(field.pre_save(&mut record, false).as_deref(), Some("new-title"));
        assert_eq!(record.get("slug"), Some(json!("new-title")));
    }

    #[test]
    fn test_manual_value_is_normalized() {
        let field = SlugPreviewField::new("slug").slugify(Slugify::ascii());
        let mut record = DynamicRecord::new().with("slug", "Typed By Hand");
        assert_eq!(field.pre_save(&mut record, true).as_deref(), Some("typed-by-hand"));
    }

    #[test]
    fn test_truncates_to_max_length() {
        let field = SlugPreviewField::new("slug")
            .max_length(5)
            .slugify(Slugify::custom("fixed", |_: &str| "abcdefgh".to_string()));
        let mut record = DynamicRecord::new().with("slug", "anything");
        assert_eq!(field.pre_save(&mut record, true).as_deref(), Some("abcde"));
    }

    #[test]
    fn test_empty_without_source_is_null() {
        let field = SlugPreviewField::new("slug");
        let mut record = DynamicRecord::new().with("slug", "");
        assert_eq!(field.pre_save(&mut record, true), None);
        assert_eq!(record.get("slug"), Some(Value::Null));
    }

    #[test]
    fn test_missing_source_attribute_is_empty() {
        let field = SlugPreviewField::new("slug").populate_from("title");
        let mut record = DynamicRecord::new();
        assert_eq!(field.pre_save(&mut record, true), None);
    }

    #[test]
    fn test_missing_source_keeps_existing_slug() {
        let field = SlugPreviewField::new("slug")
            .populate_from("headline")
            .always_update(true)
            .max_length(4);
        let mut record = DynamicRecord::new().with("slug", "Kept Value");
        assert_eq!(field.pre_save(&mut record, false).as_deref(), Some("kept"));
        assert_eq!(record.get("slug"), Some(json!("kept")));
    }

    #[test]
    fn test_non_text_source_is_coerced() {
        let field = SlugPreviewField::new("slug").populate_from("number");
        let mut record = DynamicRecord::new().with("number", 2024);
        assert_eq!(field.pre_save(&mut record, true).as_deref(), Some("2024"));
    }

    #[test]
    fn test_validate() {
        let field = SlugPreviewField::new("slug").max_length(10);
        assert!(field.validate("fine-slug").is_ok());
        let errors = field.validate("far too long slug").unwrap_err();
        assert!(errors.iter().any(|e| e.code == "max_length"));
        assert!(errors.iter().any(|e| e.code == "invalid"));
        assert_eq!(field.validate("").unwrap_err()[0].code, "blank");

        let blank_ok = SlugPreviewField::new("slug").options(FieldOptions::new().blank(true));
        assert!(blank_ok.validate("").is_ok());
    }

    #[test]
    fn test_validate_with_custom_slugify() {
        let lower = Slugify::custom("lower", |s: &str| s.to_lowercase());
        let field = SlugPreviewField::new("slug").slugify(lower);
        assert_eq!(field.validate("UPPER").unwrap_err()[0].code, "invalid");
        assert!(field.validate("lower").is_ok());
    }

    #[test]
    fn test_formfield_carries_configuration() {
        let field = SlugPreviewField::new("slug")
            .max_length(80)
            .populate_from("title")
            .always_update(true)
            .url_format(UrlFormat::parse("/posts/{slug}/").unwrap())
            .options(FieldOptions::new().verbose_name("Web address").help_text("Shown in links"));

        let form_field = field.formfield();
        assert_eq!(FormField::name(&form_field), "slug");
        assert_eq!(FormField::label(&form_field), "Web address");
        assert_eq!(FormField::help_text(&form_field), Some("Shown in links"));
        assert!(FormField::required(&form_field));
        assert_eq!(form_field.widget_attrs().get("maxlength").map(String::as_str), Some("80"));
        let config = form_field.config();
        assert_eq!(config.populate_from.as_deref(), Some("title"));
        assert!(config.always_update);
        assert_eq!(config.slugify, field.config.slugify);
        assert_eq!(
            config.url_format.as_ref().map(ToString::to_string).as_deref(),
            Some("/posts/{slug}/")
        );
    }

    #[test]
    fn test_formfield_overrides_win() {
        let field = SlugPreviewField::new("slug")
            .populate_from("title")
            .options(FieldOptions::new().blank(true));

        let form_field = field.formfield_with(
            FormFieldOverrides::new()
                .label("Permalink")
                .populate_from("headline")
                .required(true)
                .slugify(Slugify::ascii()),
        );
        assert_eq!(FormField::label(&form_field), "Permalink");
        assert_eq!(form_field.config().populate_from.as_deref(), Some("headline"));
        assert!(FormField::required(&form_field));
        assert_eq!(form_field.config().slugify, Slugify::ascii());
    }

    #[test]
    fn test_formfield_label_from_name() {
        let form_field = SlugPreviewField::new("url_slug").formfield();
        assert_eq!(FormField::label(&form_field), "Url slug");
        assert!(FormField::required(&form_field));
    }

    #[test]
    fn test_deconstruct_lists_non_defaults() {
        let plain = SlugPreviewField::new("slug").deconstruct();
        assert_eq!(plain.path, "oxide_slug_preview::fields::SlugPreviewField");
        assert!(plain.args.is_empty());
        assert!(plain.kwargs.is_empty());

        let configured = SlugPreviewField::new("slug")
            .max_length(100)
            .populate_from("title")
            .always_update(true)
            .url_format(UrlFormat::parse("/p/{slug}").unwrap())
            .slugify(Slugify::custom("shout", |s: &str| s.to_uppercase()))
            .options(FieldOptions::new().unique(true).verbose_name("Slug"));
        let json = serde_json::to_value(configured.deconstruct()).unwrap();
        assert_eq!(
            json["kwargs"],
            json!({
                "max_length": 100,
                "populate_from": "title",
                "always_update": true,
                "url_format": "/p/{slug}",
                "slugify": "shout",
                "db_index": false,
                "unique": true,
                "verbose_name": "Slug",
            })
        );
    }
}
