use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gw_core::Config;
use gw_scrapers::{sources, NewsService};
use gw_web::{create_app, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about = "Authenticated extraction API for UAE news sites", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Bind address, overrides GW_HOST
        #[arg(long)]
        host: Option<String>,
        /// Bind port, overrides GW_PORT/PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print extracted records for a source to stdout
    Scrape {
        /// Source route name (e.g. khaleej-times, gulf-news)
        source: String,
        /// Scrape a single article instead of the listing page
        #[arg(long)]
        url: Option<String>,
    },
    /// List available news sources
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { host, port } => serve(host, port).await,
        Commands::Scrape { source, url } => scrape(&source, url.as_deref()).await,
        Commands::List => list(),
    }
}

async fn serve(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let service = NewsService::with_default_sources()?;
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server is running on http://{}", addr);

    let app = create_app(AppState { service, config });
    axum::serve(listener, app).await?;
    Ok(())
}

async fn scrape(source: &str, url: Option<&str>) -> anyhow::Result<()> {
    let service = NewsService::with_default_sources()?;
    if service.by_route(source).is_none() {
        anyhow::bail!("unknown source: {}", source);
    }

    match url {
        Some(url) => {
            let article = service.article(source, url).await;
            println!("{}", serde_json::to_string_pretty(&article)?);
        }
        None => {
            let headlines = service.headlines(source).await;
            println!("Found {} headlines", headlines.len());
            for headline in &headlines {
                println!("- {} ({})", headline.title, headline.url);
            }
        }
    }
    Ok(())
}

fn list() -> anyhow::Result<()> {
    println!("Available sources:");
    for scraper in sources::uae::get_scrapers() {
        println!("  {} ({})", scraper.route(), scraper.source());
    }
    Ok(())
}
