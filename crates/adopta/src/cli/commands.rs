//! # CLI Layer
//!
//! The only place that knows about terminal I/O, exit codes and output formats.
//!
//! ## Responsibilities
//!
//! 1. **Argument parsing**: clap, in `setup`
//! 2. **Context setup**: config layering (flags over env over file), logging,
//!    the favorites remote and the async runtime
//! 3. **Dispatch**: route each command to the marketplace facade
//! 4. **Output**: text via `render`, or JSON

use super::render::{render_cards, render_facets, render_notification};
use super::setup::{Cli, Commands, FavCommands, OutputFormat};
use adoptaapp::api::Marketplace;
use adoptaapp::attributes::FilterSchema;
use adoptaapp::catalog::{CatalogFilterEngine, SEARCH_KEY};
use adoptaapp::config::AdoptaConfig;
use adoptaapp::favorites::{FavoriteSet, NotificationKind, ToggleOutcome};
use adoptaapp::model::{CatalogEntry, EntityId, Pet, Product};
use adoptaapp::remote::FileRemote;
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = resolve_config(&cli)?;
    debug!(?config, "resolved configuration");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let command = cli.command.unwrap_or(Commands::List {
        filters: Vec::new(),
        search: None,
        favorites_only: false,
        output: OutputFormat::Text,
    });

    match config.catalog_kind.as_str() {
        "products" => runtime.block_on(dispatch::<Product>(&config, command)),
        _ => runtime.block_on(dispatch::<Pet>(&config, command)),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Config from env and file, with command-line flags on top.
fn resolve_config(cli: &Cli) -> Result<AdoptaConfig> {
    let mut config = AdoptaConfig::load()?;
    if let Some(path) = &cli.catalog {
        config.catalog_file = Some(path.clone());
    }
    if let Some(path) = &cli.favorites {
        config.favorites_file = Some(path.clone());
    }
    if let Some(kind) = cli.kind {
        config.catalog_kind = kind.as_str().to_string();
    }
    // Validates catalog_kind
    config.schema()?;
    Ok(config)
}

fn load_catalog<E: DeserializeOwned>(path: &Path) -> Result<Vec<E>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse catalog {}", path.display()))
}

async fn open_marketplace<E>(config: &AdoptaConfig) -> Result<Marketplace<E>>
where
    E: CatalogEntry + DeserializeOwned,
{
    let schema = config.schema()?;
    let catalog: Vec<E> = load_catalog(config.catalog_path()?)?;
    info!(entries = catalog.len(), kind = schema.name, "catalog loaded");

    let remote = Arc::new(FileRemote::new(config.favorites_path()?));
    let favorites = FavoriteSet::new(remote)
        .with_notifier(|message: &str, kind: NotificationKind| {
            eprintln!("{}", render_notification(message, kind));
        })
        .with_success_notifications(config.notify_success);
    favorites.initialize().await?;

    Ok(Marketplace::new(
        CatalogFilterEngine::new(schema, catalog),
        Arc::new(favorites),
    ))
}

async fn dispatch<E>(config: &AdoptaConfig, command: Commands) -> Result<()>
where
    E: CatalogEntry + DeserializeOwned + Serialize,
{
    let mut market = open_marketplace::<E>(config).await?;
    let schema = market.engine().schema();

    match command {
        Commands::List {
            filters,
            search,
            favorites_only,
            output,
        } => {
            for (key, value) in &filters {
                market.set_filter(key, value)?;
            }
            if let Some(term) = &search {
                market.set_filter(SEARCH_KEY, term)?;
            }
            let view = market.view();
            let mut cards = market.cards(&view);
            if favorites_only {
                cards.retain(|card| card.favorite);
            }
            match output {
                OutputFormat::Text => print!("{}", render_cards(schema, &cards)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
            }
        }
        Commands::Facets { output } => {
            let facets = market.facets();
            match output {
                OutputFormat::Text => print!("{}", render_facets(schema, &facets)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&*facets)?),
            }
        }
        Commands::Fav { action } => handle_fav(&market, schema, action).await?,
    }
    Ok(())
}

async fn handle_fav<E>(
    market: &Marketplace<E>,
    schema: &FilterSchema,
    action: FavCommands,
) -> Result<()>
where
    E: CatalogEntry + Serialize,
{
    let (id, outcome) = match action {
        FavCommands::List { output } => {
            let entries = market.favorites_in_catalog();
            let cards: Vec<_> = entries
                .into_iter()
                .map(|entry| adoptaapp::api::Card {
                    entry,
                    favorite: true,
                    pending: false,
                })
                .collect();
            match output {
                OutputFormat::Text => print!("{}", render_cards(schema, &cards)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
            }
            return Ok(());
        }
        FavCommands::Toggle { id } => (id, market.toggle(id).await?),
        FavCommands::Add { id } => (id, market.add(id).await?),
        FavCommands::Remove { id } => (id, market.remove(id).await?),
    };

    let label = entry_label(market, id);
    match outcome {
        ToggleOutcome::Committed { favorite: true } => println!("Added {} to favorites", label),
        ToggleOutcome::Committed { favorite: false } => {
            println!("Removed {} from favorites", label)
        }
        ToggleOutcome::Unchanged { favorite: true } => {
            println!("{} is already a favorite", label)
        }
        ToggleOutcome::Unchanged { favorite: false } => println!("{} is not a favorite", label),
        ToggleOutcome::RolledBack { .. } => bail!("favorites were not changed for {}", label),
        ToggleOutcome::NotInitialized | ToggleOutcome::Disposed => {
            return Err(anyhow!("favorites are unavailable"))
        }
    }
    Ok(())
}

fn entry_label<E: CatalogEntry>(market: &Marketplace<E>, id: EntityId) -> String {
    market
        .engine()
        .catalog()
        .iter()
        .find(|entry| entry.id() == id)
        .and_then(|entry| entry.text("name"))
        .map(|name| format!("{} (#{})", name, id))
        .unwrap_or_else(|| format!("#{}", id))
}
