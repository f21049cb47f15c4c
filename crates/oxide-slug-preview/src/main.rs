//! slug-preview CLI
//!
//! Command-line tool for trying out slugs, validators and the preview
//! widget against records stored as JSON.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_slug_preview::config::{DEBUG_ENV, STATIC_URL_ENV};
use oxide_slug_preview::validation::{run_validators, slug_validators};
use oxide_slug_preview::{
    DynamicRecord, Field, ModelForm, Settings, SlugPreviewField, SlugPreviewFormField, Slugify,
    UrlFormat,
};

/// Slug fields with a live URL preview.
#[derive(Parser)]
#[command(name = "slug-preview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Serve unminified scripts in rendered media.
    #[arg(
        long,
        global = true,
        env = DEBUG_ENV,
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    debug: bool,

    /// Prefix for relative static asset paths.
    #[arg(long, global = true, env = STATIC_URL_ENV, default_value = "/static/")]
    static_url: String,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            debug: self.debug,
            static_url: self.static_url.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the slug for a piece of text.
    Slugify {
        /// Text to slugify.
        text: String,

        /// Use the ASCII-only slugify function.
        #[arg(long)]
        ascii: bool,
    },

    /// Check that a value is a valid slug.
    Validate {
        /// Value to check.
        value: String,

        /// Validate against the ASCII-only slugify function.
        #[arg(long)]
        ascii: bool,
    },

    /// Render the slug input with its URL preview.
    Render {
        /// Field name.
        name: String,

        /// Submitted value (binds the form).
        #[arg(long)]
        value: Option<String>,

        /// URL format, e.g. `/blog/{slug}/`.
        #[arg(short, long)]
        url_format: Option<String>,

        /// Attribute the slug is derived from.
        #[arg(short, long)]
        populate_from: Option<String>,

        /// Keep re-deriving the slug while the source changes.
        #[arg(long)]
        always_update: bool,

        /// JSON file holding the record being edited.
        #[arg(short, long)]
        record: Option<PathBuf>,

        /// Also print the CSS and script tags the widget needs.
        #[arg(long)]
        media: bool,
    },

    /// Run the pre-save hook on a record and print the result.
    PreSave {
        /// JSON file holding the record.
        #[arg(short, long)]
        record: PathBuf,

        /// Field name.
        field: String,

        /// Attribute the slug is derived from.
        #[arg(short, long)]
        populate_from: Option<String>,

        /// Re-derive even when the slug is already set.
        #[arg(long)]
        always_update: bool,

        /// Maximum slug length.
        #[arg(short, long)]
        max_length: Option<usize>,

        /// Use the ASCII-only slugify function.
        #[arg(long)]
        ascii: bool,

        /// Treat the record as newly inserted.
        #[arg(long)]
        add: bool,
    },
}

fn pick_slugify(ascii: bool) -> Slugify {
    if ascii {
        Slugify::ascii()
    } else {
        Slugify::default()
    }
}

fn load_record(path: &Path) -> anyhow::Result<DynamicRecord> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read record {}", path.display()))?;
    let record = DynamicRecord::from_json(&json)
        .with_context(|| format!("failed to parse record {}", path.display()))?;
    debug!("Loaded record from {}", path.display());
    Ok(record)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = cli.settings();

    match cli.command {
        Commands::Slugify { text, ascii } => {
            let slugify = pick_slugify(ascii);
            debug!("Slugifying with {:?}", slugify);
            println!("{}", slugify.apply(&text));
        }

        Commands::Validate { value, ascii } => {
            let slugify = pick_slugify(ascii);
            let errors = run_validators(&slug_validators(&slugify), &value);
            if let Some(error) = errors.first() {
                bail!("{:?}: {} [{}]", value, error.message, error.code);
            }
            info!("{:?} is a valid slug.", value);
        }

        Commands::Render {
            name,
            value,
            url_format,
            populate_from,
            always_update,
            record,
            media,
        } => {
            let record = record.as_deref().map(load_record).transpose()?;

            let mut field = SlugPreviewFormField::new(&name).always_update(always_update);
            if let Some(template) = url_format {
                field = field.url_format(UrlFormat::parse(&template)?);
            }
            if let Some(source) = populate_from {
                field = field.populate_from(source);
            }

            let mut form = ModelForm::new().field(field);
            if let Some(record) = &record {
                form = form.instance(record);
            }
            if let Some(value) = value {
                form = form.data(HashMap::from([(name.clone(), value)]));
            }

            if media {
                println!("{}", form.media(&settings).render(&settings));
            }
            println!("{}", form.bound_field(&name)?.as_widget());
        }

        Commands::PreSave {
            record,
            field,
            populate_from,
            always_update,
            max_length,
            ascii,
            add,
        } => {
            let mut instance = load_record(&record)?;

            let mut slug_field = SlugPreviewField::new(&field)
                .always_update(always_update)
                .slugify(pick_slugify(ascii));
            if let Some(source) = populate_from {
                slug_field = slug_field.populate_from(source);
            }
            if let Some(max) = max_length {
                slug_field = slug_field.max_length(max);
            }

            match slug_field.pre_save(&mut instance, add) {
                Some(slug) => info!("{} = {:?}", field, slug),
                None => info!("{} left empty", field),
            }
            println!("{}", serde_json::to_string_pretty(&instance)?);
        }
    }

    Ok(())
}
