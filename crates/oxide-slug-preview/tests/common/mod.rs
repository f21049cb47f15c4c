#![allow(dead_code)]

use std::collections::HashMap;

use oxide_slug_preview::{DynamicRecord, SlugPreviewField, Slugify};

/// Inputs covering ASCII, punctuation, whitespace runs and non-ASCII text.
pub const SAMPLES: &[&str] = &[
    "",
    "Hello World",
    "hello-world",
    "  leading and trailing  ",
    "Multiple   ---   separators",
    "snake_case_name",
    "__edges__",
    "Punctuation! Does? It: work;",
    "MiXeD CaSe 123",
    "Ærøskøbing",
    "Crème brûlée",
    "Привет мир",
    "日本語のテキスト",
    "emoji 🚀 rocket",
    "tab\tand\nnewline",
    "-",
];

/// A slugify that only lowercases, so any uppercase input is rejected by
/// its validator.
pub fn lowercase_slugify() -> Slugify {
    Slugify::custom("lowercase", |s: &str| s.to_lowercase())
}

/// A blog post with a title and an optional slug.
pub fn post(title: &str, slug: Option<&str>) -> DynamicRecord {
    let record = DynamicRecord::new().with("title", title);
    match slug {
        Some(slug) => record.with("slug", slug),
        None => record,
    }
}

/// The slug field of a blog post.
pub fn post_slug_field() -> SlugPreviewField {
    SlugPreviewField::new("slug").populate_from("title")
}

/// Submitted form data.
pub fn submitted(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}
