use std::env;
use std::io;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelf_cli::{parse_browse_line, parse_id, parse_query_args, BrowseCommand, TerminalView, BROWSE_HELP};
use shelf_core::config::{Config, Settings};
use shelf_core::{load_from, Catalog, FileCatalogSource, Intent, ViewAdapter};
use shelf_favourites::{Favourites, FileStore};
use shelf_query::QueryEngine;
use shelf_session::{run, Session};

const USAGE: &str = "Usage: shelf <browse|query|categories|fav|favs> [args...]";

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() { eprintln!("{USAGE}"); std::process::exit(1); }
    let cmd = args.remove(0);
    (cmd, args)
}

struct Paths {
    catalog: PathBuf,
    store_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")))
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let paths = Paths { catalog: settings.catalog_path(config.base()), store_dir: settings.store_dir(config.base()) };
    tracing::debug!(env = config.env_name(), catalog = %paths.catalog.display(), store = %paths.store_dir.display(), "configuration loaded");

    let (cmd, args) = parse_args();
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(async {
        match cmd.as_str() {
            "browse" => browse(&settings, &paths).await,
            "query" => query(&args, &paths).await,
            "categories" => categories(&paths).await,
            "fav" => add_favourite(&args, &settings, &paths).await,
            "favs" => list_favourites(&settings, &paths),
            _ => { eprintln!("Unknown command: {}\n{USAGE}", cmd); std::process::exit(1); }
        }
    })
}

async fn load_catalog(paths: &Paths) -> anyhow::Result<Catalog> { Ok(load_from(&FileCatalogSource::new(&paths.catalog)).await?) }

async fn query(args: &[String], paths: &Paths) -> anyhow::Result<()> {
    let query = parse_query_args(args).map_err(anyhow::Error::msg)?;
    let mut engine = QueryEngine::new(load_catalog(paths).await?);
    engine.set_search_text(query.search);
    engine.set_category(&query.category)?;
    let view = engine.set_sort_key(&query.sort)?;
    TerminalView::new(io::stdout().lock()).render_items(&view);
    Ok(())
}

async fn categories(paths: &Paths) -> anyhow::Result<()> {
    let catalog = load_catalog(paths).await?;
    TerminalView::new(io::stdout().lock()).render_categories(catalog.categories());
    Ok(())
}

async fn add_favourite(args: &[String], settings: &Settings, paths: &Paths) -> anyhow::Result<()> {
    let id = args.first().ok_or_else(|| anyhow::anyhow!("Usage: shelf fav <id>")).and_then(|a| parse_id(a).map_err(anyhow::Error::msg))?;
    let catalog = load_catalog(paths).await?;
    let mut favourites = Favourites::load(FileStore::new(&paths.store_dir), settings.favourites.key.as_str());
    let count = favourites.add(&catalog, id)?.len();
    TerminalView::new(io::stdout().lock()).render_favourites_count(count);
    Ok(())
}

fn list_favourites(settings: &Settings, paths: &Paths) -> anyhow::Result<()> {
    let favourites = Favourites::load(FileStore::new(&paths.store_dir), settings.favourites.key.as_str());
    let items: Vec<_> = favourites.items().iter().collect();
    let mut view = TerminalView::new(io::stdout().lock());
    view.render_favourites_count(items.len());
    view.list(&items);
    Ok(())
}

async fn browse(settings: &Settings, paths: &Paths) -> anyhow::Result<()> {
    let favourites = Favourites::load(FileStore::new(&paths.store_dir), settings.favourites.key.as_str());
    let session = Session::open(&FileCatalogSource::new(&paths.catalog), favourites, TerminalView::new(io::stdout())).await;
    println!("{BROWSE_HELP}");

    let (tx, rx) = unbounded_channel();
    let reader = tokio::spawn(read_intents(tx));
    let session = run(session, rx, &settings.search).await;
    reader.await??;
    println!("Bye. {} favourite(s) saved.", session.favourites().count());
    Ok(())
}

/// Forward stdin lines as intents until `/quit` or EOF; dropping `tx` ends the session loop.
async fn read_intents(tx: UnboundedSender<Intent>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_browse_line(&line) {
            Ok(BrowseCommand::Intent(intent)) => { if tx.send(intent).is_err() { break; } }
            Ok(BrowseCommand::Help) => println!("{BROWSE_HELP}"),
            Ok(BrowseCommand::Quit) => break,
            Err(message) => eprintln!("{message}"),
        }
    }
    Ok(())
}
