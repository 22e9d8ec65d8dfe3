mod config;

use anyhow::Context;
use brewdoc_render::RecipeDocumentBuilder;
use brewdoc_source::adapters::{
    BatchRecipeSource, FileSink, FsRecipeSource, StdoutSink, load_batch_file,
};
use brewdoc_source::ports::{BatchSource, DocumentSink, RecipeSource};
use brewdoc_source::{SourceError, find_batch_id};
use brewdoc_types::{BatchRecord, RecipeRecord};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::{Parser, Subcommand};
use config::{CliOverrides, ConfigMerger, MergedConfig};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "brewdoc",
    version,
    about = "Render Brewfather recipes and brew-day notes as markdown posts."
)]
struct Cli {
    /// Config file (default: ./brewdoc.toml when present).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render an exported recipe JSON file.
    Render(RenderArgs),
    /// Fetch a recipe by name through its batch and render it.
    Fetch(FetchArgs),
    /// Print the id of the batch brewed from a recipe.
    FindBatch(FindBatchArgs),
}

#[derive(Debug, clap::Args)]
struct ApiArgs {
    /// Brewfather user id.
    #[arg(long, env = "BREWFATHER_USERNAME")]
    username: Option<String>,

    /// Brewfather API key.
    #[arg(long, env = "BREWFATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// API root (default: https://api.brewfather.app/v2).
    #[arg(long, env = "BREWFATHER_BASE_URL")]
    base_url: Option<String>,
}

#[derive(Debug, clap::Args)]
struct OutputArgs {
    /// Skip the batch lookup and render an empty Notes section.
    #[arg(long, default_value_t = false)]
    no_notes: bool,

    /// Write the document to this file instead of stdout.
    #[arg(long)]
    out: Option<Utf8PathBuf>,

    /// Format note dates in UTC instead of the local time zone.
    #[arg(long, default_value_t = false)]
    utc: bool,
}

#[derive(Debug, Parser)]
struct RenderArgs {
    /// Recipe exported from Brewfather as JSON.
    recipe_json: Utf8PathBuf,

    /// Batch JSON to take notes from instead of querying the API.
    #[arg(long)]
    batch_json: Option<Utf8PathBuf>,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    api: ApiArgs,
}

#[derive(Debug, Parser)]
struct FetchArgs {
    /// Recipe name, matched exactly against batch listings.
    name: String,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    api: ApiArgs,
}

#[derive(Debug, Parser)]
struct FindBatchArgs {
    /// Recipe name, matched exactly against batch listings.
    name: String,

    #[command(flatten)]
    api: ApiArgs,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        let code = e
            .downcast_ref::<SourceError>()
            .map(SourceError::exit_code)
            .unwrap_or(1);
        return ExitCode::from(code);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    // stdout carries the document.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    match cli.cmd {
        Command::Render(args) => cmd_render(args, config_path),
        Command::Fetch(args) => cmd_fetch(args, config_path),
        Command::FindBatch(args) => cmd_find_batch(args, config_path),
    }
}

fn merged_config(
    config_path: Option<&Utf8Path>,
    api: ApiArgs,
    no_notes: bool,
) -> anyhow::Result<MergedConfig> {
    let file_config = config::load_or_default(config_path, Utf8Path::new("."))?;
    Ok(ConfigMerger::new(file_config).merge(CliOverrides {
        username: api.username,
        api_key: api.api_key,
        base_url: api.base_url,
        no_notes,
    }))
}

fn cmd_render(args: RenderArgs, config_path: Option<&Utf8Path>) -> anyhow::Result<()> {
    let merged = merged_config(config_path, args.api, args.output.no_notes)?;

    let recipe = FsRecipeSource::new(args.recipe_json.clone())
        .load_recipe()
        .with_context(|| format!("load recipe {}", args.recipe_json))?;
    info!(recipe = %recipe.name, "loaded recipe");

    let batch = if !merged.include_notes {
        debug!("notes disabled");
        None
    } else if let Some(path) = &args.batch_json {
        Some(load_batch_file(path).with_context(|| format!("load batch {}", path))?)
    } else {
        let client = merged.client()?;
        let batch = client
            .batch_for_recipe(&recipe.name)
            .with_context(|| format!("fetch notes for recipe {:?}", recipe.name))?;
        Some(batch)
    };

    emit(&recipe, batch.as_ref(), &merged, &args.output)
}

fn cmd_fetch(args: FetchArgs, config_path: Option<&Utf8Path>) -> anyhow::Result<()> {
    let merged = merged_config(config_path, args.api, args.output.no_notes)?;
    let client = merged.client()?;

    let (recipe, batch) = BatchRecipeSource::new(&client, args.name.as_str())
        .fetch()
        .with_context(|| format!("fetch recipe {:?}", args.name))?;
    info!(recipe = %recipe.name, batch = ?batch.id, "fetched recipe");

    let batch = merged.include_notes.then_some(&batch);
    emit(&recipe, batch, &merged, &args.output)
}

fn cmd_find_batch(args: FindBatchArgs, config_path: Option<&Utf8Path>) -> anyhow::Result<()> {
    let merged = merged_config(config_path, args.api, true)?;
    let client = merged.client()?;

    let batches = client.list_batches().context("list batches")?;
    let batch_id = find_batch_id(&batches, &args.name)?;
    println!("{}", batch_id);
    Ok(())
}

fn emit(
    recipe: &RecipeRecord,
    batch: Option<&BatchRecord>,
    merged: &MergedConfig,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    let builder = RecipeDocumentBuilder::new(recipe)
        .batch(batch)
        .share_base_url(merged.share_base_url.as_str());
    let document = if output.utc {
        builder.build_in(&Utc)
    } else {
        builder.build()
    };

    let sink: Box<dyn DocumentSink> = match &output.out {
        Some(path) => Box::new(FileSink::new(path.clone())),
        None => Box::new(StdoutSink),
    };
    sink.write_document(&document.to_string())?;

    if let Some(path) = &output.out {
        info!(path = %path, "wrote recipe document");
    }
    Ok(())
}
