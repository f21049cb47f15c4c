mod common;

use common::{lowercase_slugify, post, post_slug_field, submitted};
use oxide_slug_preview::{
    CharField, Field, FormField, ModelForm, Record, Settings, SlugPreviewError, SlugPreviewField,
    SlugPreviewWidget, UrlFormat, Widget, WidgetAttrs,
};
use serde_json::json;

#[test]
fn test_widget_markup() {
    let widget = SlugPreviewWidget::new().url_format(UrlFormat::parse("/posts/{slug}/").unwrap());
    let html = widget.render("slug", Some("my-post"), &WidgetAttrs::new());
    assert_eq!(
        html,
        concat!(
            r#"<kbd class="slugpreview">"#,
            r#"<span class="url-prefix">/posts/</span>"#,
            r#"<span class="url-slug"><input type="text" name="slug" value="my-post"></span>"#,
            r#"<span class="url-suffix">/</span>"#,
            "</kbd>",
        )
    );
}

#[test]
fn test_bound_field_resolved_twice_carries_record() {
    let record = post("Hello", Some("hello")).with_url_format("/blog/2024/{slug}/");
    let form = ModelForm::new()
        .field(post_slug_field().formfield())
        .instance(&record);

    let first = form.bound_field("slug").unwrap();
    let second = form.bound_field("slug").unwrap();
    assert!(first.record().is_some());
    assert!(second.record().is_some());
    assert_eq!(first.as_widget(), second.as_widget());
    assert!(first
        .as_widget()
        .contains(r#"<span class="url-prefix">/blog/2024/</span>"#));
}

#[test]
fn test_field_url_format_wins_over_record() {
    let record = post("Hello", None).with_url_format("/record/{slug}/");
    let field = post_slug_field().url_format(UrlFormat::parse("/field/{slug}").unwrap());
    let form = ModelForm::new().field(field.formfield()).instance(&record);

    let html = form.bound_field("slug").unwrap().as_widget();
    assert!(html.contains(r#"<span class="url-prefix">/field/</span>"#));
    assert!(html.contains(r#"<span class="url-suffix"></span>"#));
}

#[test]
fn test_malformed_record_format_falls_back() {
    let record = post("Hello", None).with_url_format("/no-placeholder/");
    let form = ModelForm::new()
        .field(post_slug_field().formfield())
        .instance(&record);

    let html = form.bound_field("slug").unwrap().as_widget();
    assert!(html.contains(r#"<span class="url-prefix">/</span>"#));
    assert!(html.contains(r#"<span class="url-suffix">/</span>"#));
}

#[test]
fn test_configured_format_must_have_one_placeholder() {
    assert!(matches!(
        UrlFormat::parse("/posts/"),
        Err(SlugPreviewError::InvalidUrlFormat { .. })
    ));
    assert!(matches!(
        UrlFormat::parse("/{slug}/{slug}/"),
        Err(SlugPreviewError::InvalidUrlFormat { .. })
    ));
}

#[test]
fn test_input_carries_data_attributes() {
    let field = post_slug_field()
        .always_update(true)
        .url_format(UrlFormat::parse("/p/{slug}/").unwrap());
    let form = ModelForm::new().field(field.formfield());

    let html = form.bound_field("slug").unwrap().as_widget();
    assert!(html.contains(r#"data-populate-from="title""#));
    assert!(html.contains(r#"data-url-format="/p/{slug}/""#));
    assert!(html.contains(r#"data-always-update="true""#));
    assert!(html.contains(r#"maxlength="50""#));
    assert!(html.contains(r#"id="id_slug""#));
}

#[test]
fn test_custom_slugify_end_to_end() {
    let model_field = SlugPreviewField::new("slug")
        .populate_from("title")
        .slugify(lowercase_slugify());
    let form_field = model_field.formfield();
    assert_eq!(form_field.config().slugify.name(), "lowercase");

    let rejected = ModelForm::new()
        .field(model_field.formfield())
        .data(submitted(&[("slug", "UPPER")]));
    let errors = match rejected.full_clean() {
        Err(SlugPreviewError::Validation(errors)) => errors,
        other => panic!("expected validation errors, got {other:?}"),
    };
    assert_eq!(errors.get("slug").unwrap()[0].code, "invalid");

    let accepted = ModelForm::new()
        .field(model_field.formfield())
        .data(submitted(&[("slug", "lower")]));
    let cleaned = accepted.full_clean().unwrap();

    let mut record = post("Some Title", None);
    cleaned.apply_to(&mut record);
    assert_eq!(model_field.pre_save(&mut record, true).as_deref(), Some("lower"));
}

#[test]
fn test_blank_submission_is_derived_on_save() {
    let model_field = post_slug_field().options(oxide_slug_preview::FieldOptions::new().blank(true));
    let form = ModelForm::new()
        .field(CharField::new("title", "Title"))
        .field(model_field.formfield())
        .data(submitted(&[("title", "Fresh Post"), ("slug", "")]));

    let cleaned = form.full_clean().unwrap();
    let mut record = post("", Some("stale"));
    cleaned.apply_to(&mut record);
    assert_eq!(record.get("slug"), Some(json!(null)));

    model_field.pre_save(&mut record, false);
    assert_eq!(record.get("slug"), Some(json!("fresh-post")));
}

#[test]
fn test_formfield_overrides() {
    use oxide_slug_preview::FormFieldOverrides;

    let model_field = SlugPreviewField::new("permalink").options(
        oxide_slug_preview::FieldOptions::new()
            .verbose_name("Web address")
            .help_text("Part of the URL"),
    );
    let plain = model_field.formfield();
    assert_eq!(FormField::label(&plain), "Web address");
    assert_eq!(FormField::help_text(&plain), Some("Part of the URL"));
    assert!(FormField::required(&plain));

    let overridden = model_field.formfield_with(
        FormFieldOverrides::new()
            .label("Slug")
            .required(false)
            .max_length(20),
    );
    assert_eq!(FormField::label(&overridden), "Slug");
    assert!(!FormField::required(&overridden));
    assert_eq!(
        overridden.widget_attrs().get("maxlength").map(String::as_str),
        Some("20")
    );
}

#[test]
fn test_media_order_and_debug_names() {
    let form = ModelForm::new()
        .field(CharField::new("title", "Title"))
        .field(post_slug_field().formfield());

    let production = Settings::default();
    let media = form.media(&production);
    assert_eq!(
        media.js_files(),
        [
            "admin/js/vendor/jquery/jquery.min.js",
            "admin/js/jquery.init.js",
            "admin/js/urlify.js",
            "admin/js/prepopulate.min.js",
            "slug_preview/js/slug_preview.js",
        ]
    );
    assert!(media
        .render(&production)
        .contains(r#"<script src="/static/slug_preview/js/slug_preview.js"></script>"#));

    let debug = Settings {
        debug: true,
        static_url: "https://cdn.example.com/assets/".to_string(),
    };
    let media = form.media(&debug);
    assert_eq!(media.js_files()[0], "admin/js/vendor/jquery/jquery.js");
    assert!(media
        .render(&debug)
        .contains("https://cdn.example.com/assets/slug_preview/css/slug_preview.css"));
}

#[test]
fn test_full_form_render() {
    let record = post("Hello", Some("hello"));
    let form = ModelForm::new()
        .field(CharField::new("title", "Title"))
        .field(post_slug_field().formfield())
        .instance(&record);

    let html = form.render("/posts/1", "post");
    assert!(html.contains(r#"value="Hello""#));
    assert!(html.contains(r#"value="hello""#));
    assert!(html.contains("slugpreview"));
}

#[test]
fn test_unknown_field_lookup() {
    let form = ModelForm::new().field(post_slug_field().formfield());
    let err = form.bound_field("title").unwrap_err();
    assert!(err.to_string().contains("title"));
}
