//! Model forms and bound fields.
//!
//! A [`ModelForm`] edits one record. Looking up a field returns a
//! [`BoundField`] that knows the field, its current value and the record,
//! and hands the record to the widget through a [`RenderContext`] when it
//! renders. Widgets that need the record, like the slug preview resolving a
//! record-specific URL format, get it without any extra wiring.

use std::collections::{BTreeMap, HashMap};

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::Div;
use serde_json::Value;

use crate::config::Settings;
use crate::error::{Result, SlugPreviewError, ValidationError, ValidationErrors};
use crate::record::{value_to_text, Record};
use crate::widgets::{Media, RenderContext};

use super::FormField;

/// A form editing a single record.
#[derive(Default)]
pub struct ModelForm<'r> {
    fields: Vec<Box<dyn FormField>>,
    data: Option<HashMap<String, String>>,
    instance: Option<&'r dyn Record>,
}

impl std::fmt::Debug for ModelForm<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelForm")
            .field(
                "fields",
                &self.fields.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .field("data", &self.data)
            .field("has_instance", &self.instance.is_some())
            .finish()
    }
}

impl<'r> ModelForm<'r> {
    /// Creates an empty, unbound form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: impl FormField + 'static) -> Self {
        self.fields.push(Box::new(field));
        self
    }

    /// Sets the record being edited.
    #[must_use]
    pub fn instance(mut self, record: &'r dyn Record) -> Self {
        self.instance = Some(record);
        self
    }

    /// Binds submitted data.
    #[must_use]
    pub fn data(mut self, data: HashMap<String, String>) -> Self {
        self.data = Some(data);
        self
    }

    /// Returns whether data was submitted.
    pub fn is_bound(&self) -> bool {
        self.data.is_some()
    }

    /// The record being edited.
    pub fn record(&self) -> Option<&'r dyn Record> {
        self.instance
    }

    /// Returns the bound field for `name`.
    pub fn bound_field(&self, name: &str) -> Result<BoundField<'_>> {
        self.fields
            .iter()
            .find(|f| f.name() == name)
            .map(|f| self.bind(f.as_ref()))
            .ok_or_else(|| SlugPreviewError::UnknownField(name.to_string()))
    }

    /// Returns every bound field, in declaration order.
    pub fn bound_fields(&self) -> Vec<BoundField<'_>> {
        self.fields.iter().map(|f| self.bind(f.as_ref())).collect()
    }

    fn bind<'a>(&'a self, field: &'a dyn FormField) -> BoundField<'a> {
        BoundField {
            field,
            record: self.instance,
            data: self
                .data
                .as_ref()
                .map(|data| data.get(field.name()).map(String::as_str)),
        }
    }

    /// Cleans every field of the submitted data.
    pub fn full_clean(&self) -> Result<CleanedData> {
        let mut cleaned = BTreeMap::new();
        let mut errors = ValidationErrors::new();

        for bound in self.bound_fields() {
            match bound.clean() {
                Ok(value) => {
                    cleaned.insert(bound.name().to_string(), value);
                }
                Err(field_errors) => errors.extend(bound.name(), field_errors),
            }
        }

        if errors.is_empty() {
            Ok(CleanedData { values: cleaned })
        } else {
            Err(SlugPreviewError::Validation(errors))
        }
    }

    /// Returns whether the form is bound and its data cleans.
    pub fn is_valid(&self) -> bool {
        self.is_bound() && self.full_clean().is_ok()
    }

    /// Validation errors of the submitted data; empty for unbound forms.
    pub fn errors(&self) -> ValidationErrors {
        match self.full_clean() {
            Err(SlugPreviewError::Validation(errors)) if self.is_bound() => errors,
            _ => ValidationErrors::new(),
        }
    }

    /// Assets every widget of the form needs.
    pub fn media(&self, settings: &Settings) -> Media {
        self.fields
            .iter()
            .fold(Media::new(), |media, f| media.merge(&f.widget().media(settings)))
    }

    /// Renders the form with Bootstrap 5 styling.
    pub fn render(&self, action: &str, method: &str) -> String {
        let mut form = html! {
            form.action(#action).method(#method)
        };

        for bound in self.bound_fields() {
            let field_html = bound.render();
            form = form.child::<Div, _>(|d| d.raw(&field_html));
        }

        form = form.child::<Div, _>(|d| {
            let btn = html! {
                button.type_("submit").class("btn btn-primary") {
                    "Save"
                }
            };
            d.raw(btn.render())
        });

        form.render()
    }
}

/// A field paired with the form's data and record, for one render.
#[derive(Clone, Copy)]
pub struct BoundField<'a> {
    field: &'a dyn FormField,
    record: Option<&'a dyn Record>,
    // Outer `None`: unbound form. Inner `None`: nothing submitted for it.
    data: Option<Option<&'a str>>,
}

impl std::fmt::Debug for BoundField<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundField")
            .field("name", &self.field.name())
            .field("has_record", &self.record.is_some())
            .field("data", &self.data)
            .finish()
    }
}

impl<'a> BoundField<'a> {
    /// Field name.
    pub fn name(&self) -> &'a str {
        self.field.name()
    }

    /// The underlying form field.
    pub fn field(&self) -> &'a dyn FormField {
        self.field
    }

    /// The record this field edits.
    pub fn record(&self) -> Option<&'a dyn Record> {
        self.record
    }

    /// The render context handed to the widget.
    pub fn context(&self) -> RenderContext<'a> {
        RenderContext::new(self.field, self.record)
    }

    /// HTML id of the input.
    pub fn id(&self) -> String {
        format!("id_{}", self.name())
    }

    /// The value to display: submitted data when bound, otherwise the
    /// record's attribute, otherwise the field's initial value.
    pub fn value(&self) -> Option<String> {
        match self.data {
            Some(submitted) => submitted.map(str::to_string),
            None => self
                .record
                .and_then(|r| r.get(self.name()))
                .as_ref()
                .and_then(value_to_text)
                .or_else(|| self.field.initial().map(str::to_string)),
        }
    }

    fn clean(&self) -> std::result::Result<String, Vec<ValidationError>> {
        self.field.clean(self.data.flatten())
    }

    /// Validation errors for the submitted value; empty when unbound.
    pub fn errors(&self) -> Vec<ValidationError> {
        if self.data.is_none() {
            return Vec::new();
        }
        self.clean().err().unwrap_or_default()
    }

    /// Renders just the widget.
    pub fn as_widget(&self) -> String {
        let mut attrs = self.field.widget_attrs();
        attrs.set("id", self.id());

        if !self.errors().is_empty() {
            let current_class = attrs.get("class").cloned().unwrap_or_default();
            attrs.set("class", format!("{current_class} is-invalid").trim());
        }

        if self.field.required() {
            attrs.set("required", "required");
        }

        let value = self.value();
        self.field.widget().render_in_context(
            &self.context(),
            self.name(),
            value.as_deref(),
            &attrs,
        )
    }

    /// Renders label, widget, errors and help text.
    pub fn render(&self) -> String {
        let id = self.id();
        let required_marker = if self.field.required() { " *" } else { "" };
        let label_text = format!("{}{}", self.field.label(), required_marker);
        let errors: Vec<String> = self.errors().into_iter().map(|e| e.message).collect();
        let widget_html = self.as_widget();

        let label_el = html! {
            label.for_(#id).class("form-label") { #label_text }
        };

        let help_text = self.field.help_text().map(str::to_string);

        html! { div.class("mb-3") }
            .raw(label_el.render())
            .raw(&widget_html)
            .children(&errors, |error, div: Element<Div>| {
                div.class("invalid-feedback").text(error)
            })
            .when(help_text.is_some(), |d| {
                d.child::<Div, _>(|h| {
                    h.class("form-text")
                        .text(help_text.as_deref().unwrap_or(""))
                })
            })
            .render()
    }
}

/// Values of a form that cleaned successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedData {
    values: BTreeMap<String, String>,
}

impl CleanedData {
    /// Returns the cleaned value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Iterates over `(field, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Writes the values onto a record. Empty values become null, so
    /// pre-save hooks treat them as missing.
    pub fn apply_to(&self, record: &mut dyn Record) {
        for (name, value) in &self.values {
            let value = if value.is_empty() {
                Value::Null
            } else {
                Value::String(value.clone())
            };
            record.set(name, value);
        }
    }
}
