//! `rezka` command line front end
//!
//! Every subcommand prints its result as pretty JSON on stdout; logs go to
//! stderr.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use rezka_scraper::domain::{ContentType, ListingFilter};
use rezka_scraper::infrastructure::config::site;
use rezka_scraper::infrastructure::{ConfigManager, init_logging_with_config};
use rezka_scraper::{BrowseQuery, BrowseSection, EpisodeSelection, RezkaScraper};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[clap(name = "rezka", version, about = "Browse and extract HDRezka catalog data")]
struct Cli {
    /// Configuration file to use instead of the per-user one
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Mirror to talk to, overriding the configured base URL
    #[clap(long, global = true)]
    base_url: Option<String>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search the catalog.
    Search {
        query: String,
        /// Single page to fetch; every page when omitted
        #[clap(long)]
        page: Option<u32>,
        /// Page size reported for a single page; the configured one when omitted
        #[clap(long, requires = "page")]
        page_size: Option<u32>,
    },

    /// List a catalog section.
    Browse {
        #[clap(long, value_enum)]
        kind: Option<KindArg>,
        /// Genre or collection path, e.g. `films/drama/`
        #[clap(long, conflicts_with = "kind")]
        path: Option<String>,
        #[clap(long, value_enum)]
        filter: Option<FilterArg>,
        #[clap(long)]
        page: Option<u32>,
        #[clap(long, requires = "page")]
        page_size: Option<u32>,
    },

    /// Show an item by URL or numeric id.
    Item { target: String },

    /// Show a person by URL.
    Person { url: String },

    /// Show one page of comments of an item.
    Comments {
        item_id: u64,
        #[clap(long, default_value = "1")]
        page: u32,
    },

    /// Resolve playable streams of an item.
    Stream {
        item_id: u64,
        #[clap(long, default_value_t = site::DEFAULT_TRANSLATOR_ID)]
        translator: u64,
        /// Season of a show; a movie when omitted
        #[clap(long, requires = "episode")]
        season: Option<u32>,
        #[clap(long, requires = "season")]
        episode: Option<u32>,
    },

    /// List genres per content type.
    Genres,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Films,
    Series,
    Cartoons,
    Anime,
}

impl From<KindArg> for ContentType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Films => Self::Films,
            KindArg::Series => Self::Series,
            KindArg::Cartoons => Self::Cartoons,
            KindArg::Anime => Self::Anime,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterArg {
    Last,
    Popular,
    Soon,
    Watching,
}

impl From<FilterArg> for ListingFilter {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::Last => Self::Last,
            FilterArg::Popular => Self::Popular,
            FilterArg::Soon => Self::Soon,
            FilterArg::Watching => Self::Watching,
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let mut config = manager.load_config().await?;
    init_logging_with_config(config.logging.clone())?;
    if let Some(base_url) = cli.base_url {
        config.site.base_url = base_url;
    }
    info!("Using mirror {}", config.site.base_url);

    let scraper = RezkaScraper::new(&config.site).context("Failed to build HTTP client")?;
    run(&scraper, cli.command, config.site.page_size).await
}

async fn run(scraper: &RezkaScraper, command: Commands, default_page_size: u32) -> Result<()> {
    match command {
        Commands::Search {
            query,
            page,
            page_size,
        } => match page {
            Some(page) => {
                let page_size = page_size.unwrap_or(default_page_size);
                print_json(&scraper.catalog().search_page(&query, page, page_size).await?)
            }
            None => print_json(&scraper.catalog().search_all(&query).await?),
        },
        Commands::Browse {
            kind,
            path,
            filter,
            page,
            page_size,
        } => {
            let section = match (kind, path) {
                (Some(kind), _) => BrowseSection::Content(kind.into()),
                (None, Some(path)) => BrowseSection::Path(path),
                (None, None) => BrowseSection::All,
            };
            let mut query = BrowseQuery::new(section);
            if let Some(filter) = filter {
                query = query.with_filter(filter.into());
            }
            match page {
                Some(page) => {
                    let page_size = page_size.unwrap_or(default_page_size);
                    print_json(&scraper.catalog().browse_page(&query, page, page_size).await?)
                }
                None => print_json(&scraper.catalog().browse_all(&query).await?),
            }
        }
        Commands::Item { target } => {
            let details = match target.parse::<u64>() {
                Ok(id) => scraper.items().item_by_id(id).await?,
                Err(_) => scraper.items().item(&target).await?,
            };
            print_json(&details)
        }
        Commands::Person { url } => print_json(&scraper.persons().person(&url).await?),
        Commands::Comments { item_id, page } => {
            print_json(&scraper.comments().comments(item_id, page).await?)
        }
        Commands::Stream {
            item_id,
            translator,
            season,
            episode,
        } => {
            let bundle = match (season, episode) {
                (Some(season), Some(episode)) => {
                    let selection = EpisodeSelection { season, episode };
                    scraper
                        .streams()
                        .series_streams(item_id, translator, selection)
                        .await?
                }
                (None, None) => scraper.streams().movie_streams(item_id, translator).await?,
                _ => return Err(anyhow!("--season and --episode must be given together")),
            };
            print_json(&bundle)
        }
        Commands::Genres => print_json(&scraper.catalog().genres().await?),
    }
}
