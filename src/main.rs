use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use pokedex::api::PokeApi;
use pokedex::app::{App, AppEvent};
use pokedex::catalog::{CatalogState, CategoryFilterMode};
use pokedex::config::Config;
use pokedex::theme::ThemeVariant;
use pokedex::ui;

fn parse_category_filter(s: &str) -> Result<CategoryFilterMode, String> {
    CategoryFilterMode::from_str_name(s)
        .ok_or_else(|| format!("unknown mode '{s}' (expected 'highlight' or 'restrict')"))
}

#[derive(Parser, Debug)]
#[command(name = "pokedex", about = "Terminal Pokédex backed by PokéAPI")]
struct Args {
    /// Config file (default: ~/.config/pokedex/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// PokéAPI base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Number of entries to fetch at startup
    #[arg(long, value_name = "N")]
    limit: Option<u32>,

    /// Theme: dark or light
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// How selected types affect the grid: highlight or restrict
    #[arg(long, value_name = "MODE", value_parser = parse_category_filter)]
    category_filter: Option<CategoryFilterMode>,

    /// Shorthand for --category-filter restrict
    #[arg(long, conflicts_with = "category_filter")]
    restrict_categories: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout belongs to the terminal UI
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            tracing::debug!("No config location available, using defaults");
            Config::default()
        }
    };

    let base_url = args.api_url.unwrap_or(config.api_base_url.clone());
    let page_limit = args.limit.unwrap_or(config.page_limit);
    let category_filter = if args.restrict_categories {
        CategoryFilterMode::Restrict
    } else {
        args.category_filter.unwrap_or(config.category_filter)
    };
    let theme_name = args.theme.unwrap_or(config.theme.clone());
    let timeout = config.request_timeout();

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;
    let api = PokeApi::new(client, &base_url, timeout)
        .with_context(|| format!("Invalid API base URL '{base_url}'"))?;

    tracing::info!(
        base_url = %api.base_url(),
        page_limit,
        ?category_filter,
        "Starting"
    );

    let mut app = App::new(api, CatalogState::new(category_filter), page_limit);

    match ThemeVariant::from_str_name(&theme_name) {
        Some(variant) => app.set_theme(variant),
        None => tracing::warn!(theme = %theme_name, "Unknown theme, using dark"),
    }

    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!("{warning}");
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(64);
    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
