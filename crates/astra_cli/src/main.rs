use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;
use astra_core::types::{query_or, DEFAULT_NEWS_QUERY, NO_ARTICLES_MESSAGE};
use astra_core::{Config, NewsOutcome, NewsSource};
use astra_inference::create_model;
use astra_kundli::{AstrologyApiClient, KundliReader};
use astra_news::client::MAX_PAGE_SIZE;
use astra_news::{NewsApiClient, NewsSummarizer};
use astra_web::handlers::LLM_MAX_TOKENS;
use astra_web::{create_app, AppState};

mod args;

use args::{Cli, Commands};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn serve(config: &Config, host: &str, port: u16) -> anyhow::Result<()> {
    let model = create_model(config)?;
    let news: Arc<dyn NewsSource> = Arc::new(NewsApiClient::new(&config.news)?);
    let app = create_app(AppState::new(model, news));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn read_birth_text() -> anyhow::Result<String> {
    eprintln!("Please enter your birth details (e.g. 'Generate my Kundli. My birth details: 12 Jan 2000, 10:30 AM, Mumbai.')");
    eprint!("> ");
    let mut line = String::new();
    tokio::io::BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(line)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = cli.config.into_config()?;

    match cli.command {
        Commands::Serve { host, port } => serve(&config, &host, port).await?,
        Commands::Ask { query } => {
            let model = create_model(&config)?;
            println!("{}", model.complete(&query.join(" "), LLM_MAX_TOKENS).await?);
        }
        Commands::News { query } => {
            let query = query.join(" ");
            let client = NewsApiClient::new(&config.news)?;
            match client.search(query_or(Some(query.as_str()), DEFAULT_NEWS_QUERY), MAX_PAGE_SIZE).await? {
                NewsOutcome::Empty => println!("{}", NO_ARTICLES_MESSAGE),
                NewsOutcome::Articles(articles) => {
                    for (idx, article) in articles.iter().enumerate() {
                        println!(
                            "{}. {} ({})",
                            idx + 1,
                            article.description.as_deref().unwrap_or("No description"),
                            article.published_at.as_deref().unwrap_or("Unknown date"),
                        );
                    }
                }
            }
        }
        Commands::Summary { query } => {
            let model = create_model(&config)?;
            let news = Arc::new(NewsApiClient::new(&config.news)?);
            let summarizer = NewsSummarizer::new(news, model);
            println!("{}", summarizer.summarize(&query.join(" ")).await?.into_text());
        }
        Commands::Kundli { text } => {
            let text = if text.is_empty() { read_birth_text().await? } else { text.join(" ") };
            let model = create_model(&config)?;
            let astrology = Arc::new(AstrologyApiClient::new(&config.astrology)?);
            info!("Processing your Kundli request...");
            println!("{}", KundliReader::new(model, astrology).read(&text).await?);
        }
    }

    Ok(())
}
