//! The slug input with a live URL preview around it.

use tracing::warn;

use crate::config::Settings;
use crate::record::Record;
use crate::url_format::UrlFormat;

use super::{html_escape, Media, RenderContext, TextInput, Widget, WidgetAttrs};

/// A text input rendered inside the URL it will produce:
///
/// ```text
/// <kbd class="slugpreview">
///   <span class="url-prefix">/posts/</span>
///   <span class="url-slug"><input ...></span>
///   <span class="url-suffix">/</span>
/// </kbd>
/// ```
///
/// The URL format is resolved at render time: the widget's own format wins,
/// then the record's [`RecordUrlFormatProvider`](crate::RecordUrlFormatProvider),
/// then `/{slug}/`.
#[derive(Debug, Clone, Default)]
pub struct SlugPreviewWidget {
    /// Explicitly configured URL format.
    pub url_format: Option<UrlFormat>,
    input: TextInput,
}

impl SlugPreviewWidget {
    /// Creates a widget without a fixed URL format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL format.
    #[must_use]
    pub fn url_format(mut self, url_format: UrlFormat) -> Self {
        self.url_format = Some(url_format);
        self
    }

    /// Builder method to set a default input attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.input = self.input.attr(key, value);
        self
    }

    /// Picks the URL format to render with.
    pub fn effective_url_format(&self, record: Option<&dyn Record>) -> UrlFormat {
        if let Some(url_format) = &self.url_format {
            return url_format.clone();
        }

        let Some(provider) = record.and_then(|r| r.url_format_provider()) else {
            return UrlFormat::default();
        };

        let template = provider.url_format();
        UrlFormat::parse(&template).unwrap_or_else(|err| {
            warn!("record url format rejected, using default: {err}");
            UrlFormat::default()
        })
    }

    /// Wraps an already rendered input tag in the prefix and suffix spans.
    ///
    /// `input_tag` is trusted markup; the prefix and suffix are escaped.
    pub fn render_preview(&self, input_tag: &str, url_format: &UrlFormat) -> String {
        format!(
            concat!(
                r#"<span class="url-prefix">{}</span>"#,
                r#"<span class="url-slug">{}</span>"#,
                r#"<span class="url-suffix">{}</span>"#,
            ),
            html_escape(url_format.prefix()),
            input_tag,
            html_escape(url_format.suffix()),
        )
    }

    fn render_with_record(
        &self,
        record: Option<&dyn Record>,
        name: &str,
        value: Option<&str>,
        attrs: &WidgetAttrs,
    ) -> String {
        let input_tag = self.input.render(name, value, attrs);
        let url_format = self.effective_url_format(record);
        format!(
            r#"<kbd class="slugpreview">{}</kbd>"#,
            self.render_preview(&input_tag, &url_format)
        )
    }
}

impl Widget for SlugPreviewWidget {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        self.render_with_record(None, name, value, attrs)
    }

    fn render_in_context(
        &self,
        ctx: &RenderContext<'_>,
        name: &str,
        value: Option<&str>,
        attrs: &WidgetAttrs,
    ) -> String {
        self.render_with_record(ctx.record, name, value, attrs)
    }

    fn media(&self, settings: &Settings) -> Media {
        let min = if settings.debug { "" } else { ".min" };
        // slug_preview.js must load after urlify and prepopulate.
        Media::new()
            .css("all", "slug_preview/css/slug_preview.css")
            .js(format!("admin/js/vendor/jquery/jquery{min}.js"))
            .js("admin/js/jquery.init.js")
            .js("admin/js/urlify.js")
            .js(format!("admin/js/prepopulate{min}.js"))
            .js("slug_preview/js/slug_preview.js")
    }
}
