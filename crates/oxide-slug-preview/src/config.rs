//! Runtime settings.

use serde::{Deserialize, Serialize};

/// Environment variable for [`Settings::debug`].
pub const DEBUG_ENV: &str = "SLUG_PREVIEW_DEBUG";
/// Environment variable for [`Settings::static_url`].
pub const STATIC_URL_ENV: &str = "SLUG_PREVIEW_STATIC_URL";

/// Settings shared by widgets when they render their assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Serve unminified scripts.
    pub debug: bool,
    /// Prefix for relative static asset paths.
    pub static_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            static_url: "/static/".to_string(),
        }
    }
}

impl Settings {
    /// Reads settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parses settings from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            debug: lookup(DEBUG_ENV).map_or(defaults.debug, |v| parse_flag(&v)),
            static_url: lookup(STATIC_URL_ENV)
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.static_url),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
