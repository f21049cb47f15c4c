//! Slugify functions and the handle fields use to refer to them.
//!
//! Two built-in variants exist:
//! - [`ascii_slugify`] strips accents and keeps ASCII letters, digits, `_`
//!   and `-` only, so `"déjà vu"` becomes `"deja-vu"`.
//! - [`unicode_slugify`] (feature `unicode`) transliterates Unicode text to
//!   ASCII before slugifying, so `"Ærøskøbing"` becomes `"aeroskobing"`
//!   instead of losing characters.
//!
//! The process default is chosen at build time: the Unicode variant when the
//! `unicode` feature is enabled, the ASCII one otherwise.
//!
//! Every slugify function must be pure and idempotent:
//! `f(f(x)) == f(x)`.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static STRIP_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("valid regex"));
static DASH_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").expect("valid regex"));

/// Signature of a slugify function.
pub type SlugifyFn = dyn Fn(&str) -> String + Send + Sync;

/// Converts text to an ASCII-only slug.
///
/// Decomposes the text (NFKD) and drops whatever is still not ASCII, which
/// keeps the base letter of accented characters. Then lowercases, drops
/// anything that is not a letter, digit, `_`, whitespace or `-`, turns runs
/// of whitespace and dashes into a single `-`, and strips leading and
/// trailing `-` and `_`.
///
/// ```
/// use oxide_slug_preview::ascii_slugify;
///
/// assert_eq!(ascii_slugify("Hello, World!"), "hello-world");
/// assert_eq!(ascii_slugify("  -_snake_case_-  "), "snake_case");
/// assert_eq!(ascii_slugify("Crème brûlée"), "creme-brulee");
/// ```
pub fn ascii_slugify(text: &str) -> String {
    let ascii: String = text.nfkd().filter(char::is_ascii).collect();
    let lowered = ascii.to_lowercase();
    let stripped = STRIP_CHARS.replace_all(&lowered, "");
    let dashed = DASH_RUNS.replace_all(&stripped, "-");
    dashed.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Converts text to a slug, transliterating non-ASCII characters first.
#[cfg(feature = "unicode")]
pub fn unicode_slugify(text: &str) -> String {
    slug::slugify(text)
}

/// The process-wide default slugify function.
pub fn default_slugify(text: &str) -> String {
    Slugify::default().apply(text)
}

#[derive(Clone)]
enum Kind {
    Ascii,
    #[cfg(feature = "unicode")]
    Unicode,
    Custom {
        name: Cow<'static, str>,
        func: Arc<SlugifyFn>,
    },
}

/// A cheaply clonable handle to a slugify function.
///
/// Two handles compare equal when they point to the same built-in variant or
/// to the same custom function instance.
#[derive(Clone)]
pub struct Slugify {
    kind: Kind,
}

impl Slugify {
    /// The ASCII-only built-in.
    pub fn ascii() -> Self {
        Self { kind: Kind::Ascii }
    }

    /// The transliterating built-in.
    #[cfg(feature = "unicode")]
    pub fn unicode() -> Self {
        Self {
            kind: Kind::Unicode,
        }
    }

    /// Wraps a custom slugify function.
    ///
    /// The name identifies the function in logs and field deconstruction.
    pub fn custom<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            kind: Kind::Custom {
                name: name.into(),
                func: Arc::new(func),
            },
        }
    }

    /// Applies the function to `text`.
    pub fn apply(&self, text: &str) -> String {
        match &self.kind {
            Kind::Ascii => ascii_slugify(text),
            #[cfg(feature = "unicode")]
            Kind::Unicode => unicode_slugify(text),
            Kind::Custom { func, .. } => func(text),
        }
    }

    /// Returns the function name.
    pub fn name(&self) -> &str {
        match &self.kind {
            Kind::Ascii => "ascii",
            #[cfg(feature = "unicode")]
            Kind::Unicode => "unicode",
            Kind::Custom { name, .. } => &**name,
        }
    }

    /// Returns whether this is the ASCII built-in.
    pub fn is_ascii(&self) -> bool {
        matches!(self.kind, Kind::Ascii)
    }

    /// Returns whether this is the process default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for Slugify {
    #[cfg(feature = "unicode")]
    fn default() -> Self {
        Self::unicode()
    }

    #[cfg(not(feature = "unicode"))]
    fn default() -> Self {
        Self::ascii()
    }
}

impl PartialEq for Slugify {
    fn eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (Kind::Ascii, Kind::Ascii) => true,
            #[cfg(feature = "unicode")]
            (Kind::Unicode, Kind::Unicode) => true,
            (Kind::Custom { func: a, .. }, Kind::Custom { func: b, .. }) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Slugify {}

impl fmt::Debug for Slugify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slugify").field(&self.name()).finish()
    }
}
