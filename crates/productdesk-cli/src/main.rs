//! Productdesk CLI: create, edit and delete products, and inspect portfolio items.
//!
//! Set PRODUCTDESK_API_URL (or API_URL) and optionally PRODUCTDESK_API_TOKEN.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use productdesk_api_client::ApiClient;
use productdesk_cli::{init_tracing, truncate_string, ConsoleNavigator, ConsoleNotifier};
use productdesk_core::models::{FormMode, RouteContext, UploadFileList};
use productdesk_core::{ClientConfig, ProductApi};
use productdesk_form::portfolio::{load_portfolio, PortfolioView, ReviewMode};
use productdesk_form::thumbnail::upload_file_from_path;
use productdesk_form::{
    Collaborators, Field, FormCommand, FormHandle, FormRuntime, ProductForm, SubmitOutcome,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "productdesk", about = "Product management CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct ProductFields {
    /// Product name
    #[arg(long)]
    name: Option<String>,
    /// Short description (at most 256 characters are kept)
    #[arg(long)]
    short_description: Option<String>,
    /// Full description as HTML
    #[arg(long, conflicts_with = "full_description_file")]
    full_description: Option<String>,
    /// Read the full description HTML from a file
    #[arg(long)]
    full_description_file: Option<PathBuf>,
    /// Website URL
    #[arg(long)]
    website: Option<String>,
    /// Video URL
    #[arg(long)]
    video_url: Option<String>,
    /// Image to upload as the product photo
    #[arg(long)]
    photo: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a product
    Add {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Edit an existing product; omitted fields keep their current value
    Edit {
        /// Product slug
        slug: String,
        #[command(flatten)]
        fields: ProductFields,
        /// Empty the upload list; a persisted photo is still sent
        #[arg(long, conflicts_with = "photo")]
        clear_photo: bool,
    },
    /// Delete a product
    Delete {
        /// Product slug
        slug: String,
    },
    /// Show a product snapshot
    Get {
        /// Product slug
        slug: String,
    },
    /// Print the preview source for a local image
    Preview {
        /// Path to the image
        file: PathBuf,
        /// Maximum number of characters to print
        #[arg(long, default_value = "120")]
        max_len: usize,
    },
    /// Show a portfolio item with its reviews and completed tasks
    Portfolio {
        /// Person slug
        person_slug: String,
        /// Portfolio item id
        profile_item_id: String,
        /// Review direction: received or given
        #[arg(long, default_value = "received")]
        mode: ReviewMode,
        /// Output format: json or table
        #[arg(long, default_value = "table")]
        format: String,
    },
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

async fn apply_fields(handle: &FormHandle, fields: &ProductFields) -> Result<()> {
    let text_fields = [
        (Field::Name, &fields.name),
        (Field::ShortDescription, &fields.short_description),
        (Field::FullDescription, &fields.full_description),
        (Field::Website, &fields.website),
        (Field::VideoUrl, &fields.video_url),
    ];
    for (field, value) in text_fields {
        if let Some(value) = value {
            handle.edit(field, value.clone()).await?;
        }
    }

    if let Some(path) = &fields.full_description_file {
        let html = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        handle.edit(Field::FullDescription, html).await?;
    }

    if let Some(path) = &fields.photo {
        let file = upload_file_from_path(path).await?;
        handle.set_files(vec![file]).await?;
    }

    Ok(())
}

/// Run one command through a spawned form and wait for its outcome.
async fn run_form(
    form: ProductForm,
    fields: &ProductFields,
    clear_photo: bool,
    command: FormCommand,
) -> Result<()> {
    let (handle, mut outcomes, task) = FormRuntime::spawn(form);

    apply_fields(&handle, fields).await?;
    if clear_photo {
        handle.set_files(UploadFileList::default()).await?;
    }
    handle.request(command).await?;

    let outcome = outcomes
        .recv()
        .await
        .context("Form stopped before the submission finished")?;
    drop(handle);
    task.await.context("Form runtime panicked")?;

    match outcome {
        SubmitOutcome::Succeeded {
            destination,
            message,
            ..
        } => print_json(&serde_json::json!({
            "success": true,
            "message": message,
            "location": destination,
        })),
        SubmitOutcome::Rejected { operation, error } | SubmitOutcome::Failed { operation, error } => {
            Err(anyhow::anyhow!("{} failed: {}", operation.as_str(), error))
        }
        SubmitOutcome::NavigationFailed { operation, error } => Err(error.context(format!(
            "{} succeeded but navigation failed",
            operation.as_str()
        ))),
    }
}

fn print_portfolio_table(view: &PortfolioView) {
    println!("Product:    {} ({})", view.product.label, view.product.href);
    if let Some(initiative) = &view.initiative {
        println!("Initiative: {} ({})", initiative.label, initiative.href);
    }
    println!("Summary:    {}", truncate_string(&view.summary, 80));
    if view.has_attachments {
        println!("Attachments: yes");
    }
    if !view.video_url.is_empty() {
        println!("Video:      {}", view.video_url);
    }

    println!();
    println!("Reviews ({:?}):", view.mode);
    for review in &view.reviews {
        println!(
            "  {:<24} {:>4}  {}",
            truncate_string(&review.created_by.full_name, 24),
            review
                .score
                .map(|s| format!("{:.1}", s))
                .unwrap_or_else(|| "-".to_string()),
            truncate_string(&review.text, 60)
        );
    }

    if let Some(stories) = &view.stories {
        println!();
        println!("Stories done by {}:", stories.author_first_name);
        println!("  {:<10} {}", "KEY", "DESCRIPTION");
        for row in &stories.rows {
            println!("  {:<10} {}", row.key, truncate_string(&row.description, 70));
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("Failed to load configuration")?;
    let client = Arc::new(ApiClient::new(&config).context(
        "Failed to create API client. Set PRODUCTDESK_API_URL (or API_URL)",
    )?);
    tracing::debug!(endpoint = client.endpoint(), "API client ready");

    let collaborators = Collaborators {
        api: client.clone(),
        navigator: Arc::new(ConsoleNavigator::new()),
        notifier: Arc::new(ConsoleNotifier),
    };

    match cli.command {
        Commands::Add { fields } => {
            let form = ProductForm::new(
                FormMode::Adding,
                RouteContext::default(),
                collaborators,
                &config,
            );
            run_form(form, &fields, false, FormCommand::Create).await?;
        }
        Commands::Edit {
            slug,
            fields,
            clear_photo,
        } => {
            let data = client
                .get_product(&slug)
                .await?
                .with_context(|| format!("Product {} not found", slug))?;
            let form = ProductForm::new(
                FormMode::Editing(data),
                RouteContext::for_product(slug),
                collaborators,
                &config,
            );
            run_form(form, &fields, clear_photo, FormCommand::Update).await?;
        }
        Commands::Delete { slug } => {
            let form = ProductForm::new(
                FormMode::Adding,
                RouteContext::for_product(slug),
                collaborators,
                &config,
            );
            run_form(form, &ProductFields::default(), false, FormCommand::Delete).await?;
        }
        Commands::Get { slug } => {
            let data = client
                .get_product(&slug)
                .await?
                .with_context(|| format!("Product {} not found", slug))?;
            print_json(&data)?;
        }
        Commands::Preview { file, max_len } => {
            let entry = upload_file_from_path(&file).await?;
            let source = productdesk_form::upload::preview_source(&entry).await?;
            println!("{}", truncate_string(&source, max_len));
        }
        Commands::Portfolio {
            person_slug,
            profile_item_id,
            mode,
            format,
        } => {
            let data = load_portfolio(client.as_ref(), &person_slug, &profile_item_id).await;
            let view = data.view(mode);
            match format.as_str() {
                "json" => print_json(&view)?,
                "table" => print_portfolio_table(&view),
                other => {
                    return Err(anyhow::anyhow!(
                        "Invalid format '{}'. Must be: json or table",
                        other
                    ))
                }
            }
        }
    }

    Ok(())
}
