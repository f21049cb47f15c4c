//! Form fields and model forms.

mod form;
mod slug_preview;
mod text;

pub use form::{BoundField, CleanedData, ModelForm};
pub use slug_preview::{FormFieldOverrides, SlugPreviewFormField};
pub use text::CharField;

use crate::error::ValidationError;
use crate::validation::{run_validators, SharedValidator};
use crate::widgets::{Widget, WidgetAttrs};

/// A field of a form: how to render it and how to clean submitted input.
pub trait FormField: Send + Sync {
    /// Field name, matching the record attribute.
    fn name(&self) -> &str;

    /// Label shown next to the input.
    fn label(&self) -> &str;

    /// Whether an empty value is rejected.
    fn required(&self) -> bool;

    /// Help text shown below the input.
    fn help_text(&self) -> Option<&str> {
        None
    }

    /// Value shown when neither submitted data nor the record has one.
    fn initial(&self) -> Option<&str> {
        None
    }

    /// The widget that renders the input.
    fn widget(&self) -> &dyn Widget;

    /// Attributes the field adds to its widget.
    fn widget_attrs(&self) -> WidgetAttrs {
        WidgetAttrs::new()
    }

    /// Normalizes and validates a submitted value.
    ///
    /// Empty input cleans to `""` unless the field is required.
    fn clean(&self, raw: Option<&str>) -> Result<String, Vec<ValidationError>>;
}

/// Error reported for a missing required value.
pub(crate) fn required_error() -> ValidationError {
    ValidationError::new("This field is required.", "required")
}

/// Shared cleaning for text-like fields: trim, check required, then run
/// every validator on non-empty values.
pub(crate) fn clean_text(
    raw: Option<&str>,
    required: bool,
    validators: &[SharedValidator],
) -> Result<String, Vec<ValidationError>> {
    let value = raw.map(str::trim).unwrap_or_default().to_string();
    if value.is_empty() {
        return if required {
            Err(vec![required_error()])
        } else {
            Ok(value)
        };
    }

    let errors = run_validators(validators, &value);
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}
