//! # oxide-slug-preview
//!
//! A slug field that previews the final URL while you type.
//!
//! This crate provides:
//! - A persisted [`SlugPreviewField`] that derives its value from another
//!   attribute right before the record is saved
//! - A matching [`SlugPreviewFormField`] whose validators follow the
//!   configured slugify function
//! - A [`SlugPreviewWidget`] that wraps the input in a URL preview
//! - [`ModelForm`]s that pass the record being edited to their widgets
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_slug_preview::{DynamicRecord, ModelForm, SlugPreviewField};
//!
//! let field = SlugPreviewField::new("slug").populate_from("title");
//! let post = DynamicRecord::new()
//!     .with("title", "Hello World")
//!     .with("slug", "hello-world")
//!     .with_url_format("/blog/{slug}/");
//!
//! let form = ModelForm::new().field(field.formfield()).instance(&post);
//! let html = form.bound_field("slug").unwrap().as_widget();
//!
//! assert!(html.contains(r#"<span class="url-prefix">/blog/</span>"#));
//! assert!(html.contains(r#"value="hello-world""#));
//! ```
//!
//! ## Custom slugify functions
//!
//! ```rust
//! use oxide_slug_preview::{FormField, Slugify, SlugPreviewFormField};
//!
//! let field = SlugPreviewFormField::new("slug")
//!     .slugify(Slugify::custom("lower", |s: &str| s.to_lowercase()));
//!
//! assert!(field.clean(Some("lower")).is_ok());
//! assert_eq!(field.clean(Some("UPPER")).unwrap_err()[0].code, "invalid");
//! ```
//!
//! ## Features
//!
//! - `unicode` (default): the default slugify transliterates non-ASCII
//!   text instead of dropping it.

pub mod config;
mod error;
pub mod fields;
pub mod forms;
pub mod record;
pub mod slugify;
pub mod url_format;
pub mod validation;
pub mod widgets;

pub use config::Settings;
pub use error::{Result, SlugPreviewError, ValidationError, ValidationErrors};
pub use fields::{
    run_pre_save, Deconstruction, Field, FieldOptions, SlugFieldConfig, SlugPreviewField,
};
pub use forms::{
    BoundField, CharField, CleanedData, FormField, FormFieldOverrides, ModelForm,
    SlugPreviewFormField,
};
pub use record::{DynamicRecord, Record, RecordUrlFormatProvider, URL_FORMAT_ATTR};
#[cfg(feature = "unicode")]
pub use slugify::unicode_slugify;
pub use slugify::{ascii_slugify, default_slugify, Slugify};
pub use url_format::UrlFormat;
pub use validation::{SlugValidator, ValidateSlug, Validator};
pub use widgets::{Media, RenderContext, SlugPreviewWidget, TextInput, Widget, WidgetAttrs};
