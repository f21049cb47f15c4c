//! Plain text form fields.

use std::sync::Arc;

use crate::error::ValidationError;
use crate::validation::{MaxLengthValidator, SharedValidator, Validator};
use crate::widgets::{TextInput, Widget, WidgetAttrs};

use super::{clean_text, FormField};

/// A single-line text field, such as the title a slug is derived from.
pub struct CharField {
    /// Field name.
    pub name: String,
    /// Field label.
    pub label: String,
    /// Whether the field is required.
    pub required: bool,
    /// Maximum length in characters.
    pub max_length: Option<usize>,
    /// The widget to render.
    pub widget: Box<dyn Widget>,
    /// Help text.
    pub help_text: Option<String>,
    /// Initial value.
    pub initial: Option<String>,
    /// Extra validators.
    pub validators: Vec<SharedValidator>,
    /// Widget attributes.
    pub attrs: WidgetAttrs,
}

impl std::fmt::Debug for CharField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharField")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("required", &self.required)
            .field("max_length", &self.max_length)
            .field("help_text", &self.help_text)
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}

impl CharField {
    /// Creates a required text field.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: true,
            max_length: None,
            widget: Box::new(TextInput::new()),
            help_text: None,
            initial: None,
            validators: Vec::new(),
            attrs: WidgetAttrs::new(),
        }
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

    /// Replaces the widget.
    #[must_use]
    pub fn widget(mut self, widget: impl Widget + 'static) -> Self {
        self.widget = Box::new(widget);
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

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Sets a widget attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }

    fn all_validators(&self) -> Vec<SharedValidator> {
        let mut validators: Vec<SharedValidator> = Vec::new();
        if let Some(max) = self.max_length {
            validators.push(Arc::new(MaxLengthValidator::new(max)));
        }
        validators.extend(self.validators.iter().cloned());
        validators
    }
}

impl FormField for CharField {
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
        self.widget.as_ref()
    }

    fn widget_attrs(&self) -> WidgetAttrs {
        let mut attrs = self.attrs.clone();
        if let Some(max) = self.max_length {
            attrs.set("maxlength", max.to_string());
        }
        attrs
    }

    fn clean(&self, raw: Option<&str>) -> Result<String, Vec<ValidationError>> {
        clean_text(raw, self.required, &self.all_validators())
    }
}
