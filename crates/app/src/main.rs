//! feedline entry point.
//!
//! Runs one command against the remote feed and the local cache. Logging goes
//! to stderr so stdout carries only command output.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feedline_core::config::AppConfig;
use feedline_core::feed::load_image_data_task;
use feedline_core::{Error, FeedLoader};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod composition;

use composition::App;

#[derive(Parser, Debug)]
#[command(name = "feedline")]
#[command(about = "Image feed loader with an offline SQLite cache")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the feed from FEEDLINE_FEED_URL, falling back to the cache; prints JSON
    Load,

    /// Purge the cached feed if it has expired or cannot be read
    Validate,

    /// Load image data, cache first, and print its size
    Image {
        /// Image URL as listed in the feed
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    let app = App::open(&config).await?;

    match args.command {
        Command::Load => {
            let feed_url = feedline_client::parse_endpoint(config.require_feed_url()?)?;
            let feed = app.feed_loader(feed_url).load().await.map_err(with_hint)?;
            println!("{}", serde_json::to_string_pretty(&feed)?);
        }
        Command::Validate => {
            app.validate_cache().await?;
            tracing::info!("feed cache validated");
        }
        Command::Image { url } => {
            let url = feedline_client::parse_endpoint(&url)?;
            let mut task = load_image_data_task(Arc::new(app.image_loader()), url);

            let data = tokio::select! {
                result = &mut task => result.map_err(with_hint)?,
                _ = tokio::signal::ctrl_c() => {
                    task.cancel();
                    tracing::warn!("image load cancelled");
                    task.await?
                }
            };
            println!("{} bytes", data.len());
        }
    }

    Ok(())
}

fn with_hint(err: Error) -> anyhow::Error {
    if err.is_purgeable() {
        anyhow::Error::new(err).context("feed cache unusable; `feedline validate` purges an unreadable cache")
    } else {
        err.into()
    }
}
