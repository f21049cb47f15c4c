//! The record contract fields read from and write to.
//!
//! A record is whatever the persistence layer saves: the slug field only
//! needs to read named attributes, write its own attribute back, and
//! optionally ask the record for a URL format.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A model instance with named attributes.
pub trait Record {
    /// Returns an attribute value, or `None` when the record has no such
    /// attribute.
    fn get(&self, attr: &str) -> Option<Value>;

    /// Sets an attribute value.
    fn set(&mut self, attr: &str, value: Value);

    /// Returns the record's URL format capability, if it has one.
    fn url_format_provider(&self) -> Option<&dyn RecordUrlFormatProvider> {
        None
    }
}

/// Optional record capability: a record-specific URL format template such
/// as `/blog/2024/{slug}/`.
pub trait RecordUrlFormatProvider {
    /// Returns the template, which must contain a single `{slug}`.
    fn url_format(&self) -> String;
}

/// Returns whether a value counts as empty (null or an empty string).
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Coerces a value to text, returning `None` for empty values.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        _ if is_empty_value(value) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Attribute under which a [`DynamicRecord`] keeps its URL format.
pub const URL_FORMAT_ATTR: &str = "url_format";

/// A record backed by a JSON object.
///
/// The `url_format` attribute is not stored in the map: reading or writing
/// it goes to [`DynamicRecord::url_format`].
///
/// ```
/// use oxide_slug_preview::{DynamicRecord, Record};
/// use serde_json::json;
///
/// let mut record = DynamicRecord::new().with("title", "Hello");
/// record.set("slug", json!("hello"));
/// assert_eq!(record.get("slug"), Some(json!("hello")));
/// assert_eq!(record.get("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicRecord {
    /// Attribute values.
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
    /// Record-specific URL format, exposed through
    /// [`RecordUrlFormatProvider`] when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_format: Option<String>,
}

impl DynamicRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, attr: impl Into<String>, value: impl Into<Value>) -> Self {
        let attr: String = attr.into();
        self.set(&attr, value.into());
        self
    }

    /// Builder method to set the record's URL format.
    #[must_use]
    pub fn with_url_format(mut self, template: impl Into<String>) -> Self {
        self.url_format = Some(template.into());
        self
    }

    /// Parses a record from a JSON object.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Record for DynamicRecord {
    fn get(&self, attr: &str) -> Option<Value> {
        if attr == URL_FORMAT_ATTR {
            return self.url_format.clone().map(Value::String);
        }
        self.attrs.get(attr).cloned()
    }

    fn set(&mut self, attr: &str, value: Value) {
        if attr == URL_FORMAT_ATTR {
            self.url_format = value_to_text(&value);
            return;
        }
        self.attrs.insert(attr.to_string(), value);
    }

    fn url_format_provider(&self) -> Option<&dyn RecordUrlFormatProvider> {
        self.url_format
            .as_ref()
            .map(|_| self as &dyn RecordUrlFormatProvider)
    }
}

impl RecordUrlFormatProvider for DynamicRecord {
    fn url_format(&self) -> String {
        self.url_format.clone().unwrap_or_default()
    }
}
