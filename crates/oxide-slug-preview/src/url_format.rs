//! URL format templates such as `/blog/{slug}/`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlugPreviewError};

/// The placeholder a URL format must contain exactly once.
pub const SLUG_PLACEHOLDER: &str = "{slug}";

/// A URL template split around its single `{slug}` placeholder.
///
/// ```
/// use oxide_slug_preview::UrlFormat;
///
/// let format = UrlFormat::parse("/posts/{slug}/").unwrap();
/// assert_eq!(format.prefix(), "/posts/");
/// assert_eq!(format.suffix(), "/");
/// assert_eq!(format.url_for("hello"), "/posts/hello/");
///
/// assert!(UrlFormat::parse("/posts/").is_err());
/// assert!(UrlFormat::parse("/{slug}/{slug}/").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UrlFormat {
    prefix: String,
    suffix: String,
}

impl UrlFormat {
    /// Parses a template, requiring exactly one `{slug}` placeholder.
    pub fn parse(template: &str) -> Result<Self> {
        let mut parts = template.split(SLUG_PLACEHOLDER);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(prefix), Some(suffix), None) => Ok(Self {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            }),
            (_, None, _) => Err(SlugPreviewError::InvalidUrlFormat {
                format: template.to_string(),
                reason: "missing {slug} placeholder",
            }),
            _ => Err(SlugPreviewError::InvalidUrlFormat {
                format: template.to_string(),
                reason: "more than one {slug} placeholder",
            }),
        }
    }

    /// Text rendered before the slug.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Text rendered after the slug.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Fills in the placeholder.
    pub fn url_for(&self, slug: &str) -> String {
        format!("{}{slug}{}", self.prefix, self.suffix)
    }
}

impl Default for UrlFormat {
    fn default() -> Self {
        Self {
            prefix: "/".to_string(),
            suffix: "/".to_string(),
        }
    }
}

impl fmt::Display for UrlFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SLUG_PLACEHOLDER}{}", self.prefix, self.suffix)
    }
}

impl FromStr for UrlFormat {
    type Err = SlugPreviewError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for UrlFormat {
    type Error = SlugPreviewError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<UrlFormat> for String {
    fn from(value: UrlFormat) -> Self {
        value.to_string()
    }
}
