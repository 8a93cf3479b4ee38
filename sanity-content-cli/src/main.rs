//! sanity-content: run the blog content queries from the command line
//!
//! Loads the client config from a TOML file (if present) and `SANITY_*`
//! environment variables, then prints the query result as JSON.

use std::path::Path;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use sanity_content::{ClientConfig, ContentFacade};

#[derive(Parser)]
#[command(name = "sanity-content")]
#[command(about = "Query blog content from the Sanity content store")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sanity-content.toml")]
    config: String,

    /// Preview token; enables draft content
    #[arg(long, env = "SANITY_PREVIEW_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Site settings
    Settings,
    /// All posts, newest first
    Posts,
    /// Every post slug
    Slugs,
    /// A single post
    Post {
        slug: String,
    },
    /// A post and the newest other posts (requires --token)
    PostAndMore {
        slug: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sanity_content=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    // Load config file, then let the environment override it
    let mut config = if Path::new(&cli.config).exists() {
        info!("Config file: {}", cli.config);
        ClientConfig::from_file(&cli.config)?
    } else {
        info!("Config file not found, using defaults");
        ClientConfig::default()
    };
    config.apply_env_overrides(|key| std::env::var(key).ok())?;

    let facade = ContentFacade::new(config)?;
    let token = cli.token.as_deref();

    let output: Value = match cli.command {
        Command::Settings => serde_json::to_value(facade.get_settings(token).await?)?,
        Command::Posts => serde_json::to_value(facade.get_all_posts(token).await?)?,
        Command::Slugs => serde_json::to_value(facade.get_all_posts_slugs(token).await?)?,
        Command::Post { slug } => {
            serde_json::to_value(facade.get_post_by_slug(&slug, token).await?)?
        }
        Command::PostAndMore { slug } => {
            if token.is_none() {
                tracing::warn!("post-and-more only returns content with a preview token");
            }
            serde_json::to_value(facade.get_post_and_more_stories(&slug, token).await?)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
