//! The slug form field.

use std::sync::Arc;

use crate::error::ValidationError;
use crate::fields::SlugFieldConfig;
use crate::slugify::Slugify;
use crate::url_format::UrlFormat;
use crate::validation::{slug_validators, MaxLengthValidator, SharedValidator, Validator};
use crate::widgets::{SlugPreviewWidget, Widget, WidgetAttrs};

use super::{clean_text, FormField};

/// A form field rendering a [`SlugPreviewWidget`].
///
/// The slug settings are exposed to the page as `data-populate-from`,
/// `data-url-format` and `data-always-update` attributes on the input, so a
/// client-side script can read them without repeating the configuration.
///
/// Only the ASCII slugify is checked with the built-in slug validator; any
/// other function, the default included, gets a matching
/// [`ValidateSlug`](crate::validation::ValidateSlug), so every value that
/// cleans is left unchanged on save.
#[derive(Clone)]
pub struct SlugPreviewFormField {
    name: String,
    label: String,
    required: bool,
    max_length: Option<usize>,
    help_text: Option<String>,
    initial: Option<String>,
    config: SlugFieldConfig,
    extra_validators: Vec<SharedValidator>,
    widget: SlugPreviewWidget,
}

impl std::fmt::Debug for SlugPreviewFormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlugPreviewFormField")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("required", &self.required)
            .field("max_length", &self.max_length)
            .field("config", &self.config)
            .field("widget", &self.widget)
            .finish_non_exhaustive()
    }
}

impl SlugPreviewFormField {
    /// Creates a required slug field with the default slugify function.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: crate::fields::humanize(&name),
            name,
            required: true,
            max_length: None,
            help_text: None,
            initial: None,
            config: SlugFieldConfig::default(),
            extra_validators: Vec::new(),
            widget: SlugPreviewWidget::new(),
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets whether the field is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    /// Sets help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Sets initial value.
    #[must_use]
    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Derives the slug from another form field.
    #[must_use]
    pub fn populate_from(mut self, attr: impl Into<String>) -> Self {
        self.config.populate_from = Some(attr.into());
        self
    }

    /// Sets whether the client keeps re-deriving the slug.
    #[must_use]
    pub fn always_update(mut self, value: bool) -> Self {
        self.config.always_update = value;
        self
    }

    /// Sets the slugify function, swapping in the matching validator.
    #[must_use]
    pub fn slugify(mut self, slugify: Slugify) -> Self {
        self.config.slugify = slugify;
        self
    }

    /// Sets the URL format, on the field and its widget.
    #[must_use]
    pub fn url_format(mut self, url_format: UrlFormat) -> Self {
        self.widget.url_format = Some(url_format.clone());
        self.config.url_format = Some(url_format);
        self
    }

    /// Replaces the widget, keeping the field's URL format on it.
    #[must_use]
    pub fn widget(mut self, widget: SlugPreviewWidget) -> Self {
        self.widget = widget;
        if self.config.url_format.is_some() {
            self.widget.url_format.clone_from(&self.config.url_format);
        }
        self
    }

    /// Adds a validator on top of the slug validators.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.extra_validators.push(Arc::new(validator));
        self
    }

    /// The slug settings.
    pub fn config(&self) -> &SlugFieldConfig {
        &self.config
    }

    /// The preview widget.
    pub fn preview_widget(&self) -> &SlugPreviewWidget {
        &self.widget
    }

    /// Every validator run on non-empty input.
    pub fn validators(&self) -> Vec<SharedValidator> {
        let mut validators: Vec<SharedValidator> = Vec::new();
        if let Some(max) = self.max_length {
            validators.push(Arc::new(MaxLengthValidator::new(max)));
        }
        validators.extend(slug_validators(&self.config.slugify));
        validators.extend(self.extra_validators.iter().cloned());
        validators
    }
}

impl FormField for SlugPreviewFormField {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn required(&self) -> bool {
        self.required
    }

    fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    fn initial(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    fn widget(&self) -> &dyn Widget {
        &self.widget
    }

    fn widget_attrs(&self) -> WidgetAttrs {
        let mut attrs = WidgetAttrs::new();
        if let Some(max) = self.max_length {
            attrs.set("maxlength", max.to_string());
        }
        if let Some(source) = &self.config.populate_from {
            attrs.set("data-populate-from", source);
        }
        if let Some(url_format) = &self.config.url_format {
            attrs.set("data-url-format", url_format.to_string());
        }
        attrs.set("data-always-update", self.config.always_update.to_string());
        attrs
    }

    fn clean(&self, raw: Option<&str>) -> Result<String, Vec<ValidationError>> {
        clean_text(raw, self.required, &self.validators())
    }
}

/// Settings that win over a model field's own when deriving its form
/// field.
#[derive(Debug, Clone, Default)]
pub struct FormFieldOverrides {
    /// Label.
    pub label: Option<String>,
    /// Whether the field is required.
    pub required: Option<bool>,
    /// Help text.
    pub help_text: Option<String>,
    /// Initial value.
    pub initial: Option<String>,
    /// Maximum length.
    pub max_length: Option<usize>,
    /// Source attribute.
    pub populate_from: Option<String>,
    /// Always-update flag.
    pub always_update: Option<bool>,
    /// Slugify function.
    pub slugify: Option<Slugify>,
    /// URL format.
    pub url_format: Option<UrlFormat>,
}

impl FormFieldOverrides {
    /// Creates empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Overrides whether the field is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Overrides the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Overrides the initial value.
    #[must_use]
    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Overrides the maximum length.
    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    /// Overrides the source attribute.
    #[must_use]
    pub fn populate_from(mut self, attr: impl Into<String>) -> Self {
        self.populate_from = Some(attr.into());
        self
    }

    /// Overrides the always-update flag.
    #[must_use]
    pub fn always_update(mut self, value: bool) -> Self {
        self.always_update = Some(value);
        self
    }

    /// Overrides the slugify function.
    #[must_use]
    pub fn slugify(mut self, slugify: Slugify) -> Self {
        self.slugify = Some(slugify);
        self
    }

    /// Overrides the URL format.
    #[must_use]
    pub fn url_format(mut self, url_format: UrlFormat) -> Self {
        self.url_format = Some(url_format);
        self
    }
}
