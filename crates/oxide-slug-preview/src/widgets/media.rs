//! Static asset declarations for widgets.

use crate::config::Settings;

use super::html_escape;

/// Stylesheets and scripts a widget depends on.
///
/// Script order matters: scripts render in the order they were declared,
/// and merging keeps the first occurrence of each path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Media {
    css: Vec<(String, String)>,
    js: Vec<String>,
}

impl Media {
    /// Creates an empty media declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stylesheet for the given medium (e.g. `all`).
    #[must_use]
    pub fn css(mut self, medium: impl Into<String>, path: impl Into<String>) -> Self {
        let entry = (medium.into(), path.into());
        if !self.css.contains(&entry) {
            self.css.push(entry);
        }
        self
    }

    /// Adds a script after the ones already declared.
    #[must_use]
    pub fn js(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if !self.js.contains(&path) {
            self.js.push(path);
        }
        self
    }

    /// Declared stylesheets as `(medium, path)` pairs.
    pub fn css_files(&self) -> &[(String, String)] {
        &self.css
    }

    /// Declared scripts, in load order.
    pub fn js_files(&self) -> &[String] {
        &self.js
    }

    /// Returns whether nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.css.is_empty() && self.js.is_empty()
    }

    /// Combines two declarations, keeping this one's order first.
    #[must_use]
    pub fn merge(self, other: &Self) -> Self {
        let with_css = other
            .css
            .iter()
            .fold(self, |media, (medium, path)| media.css(medium, path));
        other.js.iter().fold(with_css, |media, path| media.js(path))
    }

    /// Renders `<link>` tags for the stylesheets.
    pub fn render_css(&self, settings: &Settings) -> String {
        self.css
            .iter()
            .map(|(medium, path)| {
                format!(
                    r#"<link href="{}" media="{}" rel="stylesheet">"#,
                    html_escape(&absolute_path(path, settings)),
                    html_escape(medium)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders `<script>` tags for the scripts.
    pub fn render_js(&self, settings: &Settings) -> String {
        self.js
            .iter()
            .map(|path| {
                format!(
                    r#"<script src="{}"></script>"#,
                    html_escape(&absolute_path(path, settings))
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders stylesheets followed by scripts.
    pub fn render(&self, settings: &Settings) -> String {
        [self.render_css(settings), self.render_js(settings)]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Prefixes relative asset paths with the static URL.
fn absolute_path(path: &str, settings: &Settings) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/') {
        path.to_string()
    } else {
        format!("{}{path}", settings.static_url)
    }
}
