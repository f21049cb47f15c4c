//! Form widgets for rendering HTML inputs.

mod media;
mod slug_preview;

pub use media::Media;
pub use slug_preview::SlugPreviewWidget;

use std::collections::BTreeMap;

use crate::config::Settings;
use crate::forms::FormField;
use crate::record::Record;

/// Attributes that can be applied to a widget.
///
/// Attributes render in name order, values HTML-escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAttrs {
    /// HTML attributes.
    pub attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Copies every attribute of `other` over these.
    pub fn update(&mut self, other: &Self) {
        for (k, v) in &other.attrs {
            self.attrs.insert(k.clone(), v.clone());
        }
    }

    /// Returns whether no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Renders attributes as an HTML attribute string.
    pub fn to_html(&self) -> String {
        self.attrs
            .iter()
            .map(|(k, v)| format!(r#"{k}="{}""#, html_escape(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

/// What a widget can see of its surroundings while rendering.
///
/// The widget itself is the receiver of the render call; the context adds
/// the form field it belongs to and the record being edited. Widgets that
/// don't care simply ignore it.
#[derive(Clone, Copy, Default)]
pub struct RenderContext<'a> {
    /// The form field being rendered.
    pub field: Option<&'a dyn FormField>,
    /// The record the form edits.
    pub record: Option<&'a dyn Record>,
}

impl<'a> RenderContext<'a> {
    /// A context with neither field nor record.
    pub fn detached() -> Self {
        Self::default()
    }

    /// A context for `field`, editing `record` when there is one.
    pub fn new(field: &'a dyn FormField, record: Option<&'a dyn Record>) -> Self {
        Self {
            field: Some(field),
            record,
        }
    }
}

/// Trait for form widgets that render HTML inputs.
pub trait Widget: Send + Sync {
    /// Renders the widget as HTML.
    ///
    /// # Arguments
    /// * `name` - The field name (used for the name attribute)
    /// * `value` - The current value (if any)
    /// * `attrs` - Additional HTML attributes
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String;

    /// Renders the widget with access to its field and record.
    fn render_in_context(
        &self,
        _ctx: &RenderContext<'_>,
        name: &str,
        value: Option<&str>,
        attrs: &WidgetAttrs,
    ) -> String {
        self.render(name, value, attrs)
    }

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }

    /// Static assets the widget needs on the page.
    fn media(&self, _settings: &Settings) -> Media {
        Media::new()
    }
}

/// A plain text input.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Attributes applied to every render.
    pub attrs: WidgetAttrs,
}

impl TextInput {
    /// Creates a new text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set a default attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }
}

impl Widget for TextInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let mut all = self.attrs.clone();
        all.update(attrs);

        let value_attr = value
            .filter(|v| !v.is_empty())
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default();
        let extra_attrs = if all.is_empty() {
            String::new()
        } else {
            format!(" {}", all.to_html())
        };
        format!(
            r#"<input type="{}" name="{}"{value_attr}{extra_attrs}>"#,
            self.input_type(),
            html_escape(name)
        )
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input() {
        let widget = TextInput::new();
        let html = widget.render("username", None, &WidgetAttrs::new());
        assert_eq!(html, r#"<input type="text" name="username">"#);
    }

    #[test]
    fn test_text_input_value_and_attrs() {
        let widget = TextInput::new().attr("class", "vTextField");
        let attrs = WidgetAttrs::new().with("id", "id_title");
        let html = widget.render("title", Some("<b>"), &attrs);
        assert_eq!(
            html,
            r#"<input type="text" name="title" value="&lt;b&gt;" class="vTextField" id="id_title">"#
        );
    }

    #[test]
    fn test_render_in_context_defaults_to_render() {
        let widget = TextInput::new();
        let ctx = RenderContext::detached();
        assert_eq!(
            widget.render_in_context(&ctx, "x", Some("1"), &WidgetAttrs::new()),
            widget.render("x", Some("1"), &WidgetAttrs::new())
        );
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_widget_attrs_are_ordered_and_escaped() {
        let attrs = WidgetAttrs::new()
            .with("id", "my-input")
            .with("class", "form-control")
            .with("data-url-format", "/a/{slug}/?q=\"x\"");
        assert_eq!(
            attrs.to_html(),
            r#"class="form-control" data-url-format="/a/{slug}/?q=&quot;x&quot;" id="my-input""#
        );
    }

    #[test]
    fn test_widget_attrs_update_overrides() {
        let mut attrs = WidgetAttrs::new().with("class", "a").with("id", "x");
        attrs.update(&WidgetAttrs::new().with("class", "b"));
        assert_eq!(attrs.get("class").map(String::as_str), Some("b"));
        assert_eq!(attrs.get("id").map(String::as_str), Some("x"));
    }
}
