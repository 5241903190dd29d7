use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use podium::config::{Config, SENTINEL};
use podium::extract;
use podium::fetch::Fetcher;
use podium::report::Identifier;
use podium::rest::{self, AppState};

#[derive(Parser)]
#[command(
    name = "podium",
    about = "Podium — leaderboard rank lookup",
    version,
    after_help = "Run 'podium <command> --help' for details on each command."
)]
struct Cli {
    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the rank lookup HTTP API
    Serve {
        /// Listen port
        #[arg(long)]
        port: Option<u16>,
        /// Leaderboard page URL to scrape
        #[arg(long)]
        source_url: Option<String>,
    },
    /// Look up one handle and print the result
    Lookup {
        /// Handle to look up (with or without a leading @)
        handle: String,
        /// Leaderboard page URL to scrape
        #[arg(long)]
        source_url: Option<String>,
        /// Output as JSON (machine-readable)
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "podium=debug" } else { "podium=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env()?;

    match cli.command {
        Commands::Serve { port, source_url } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(source_url) = source_url {
                config.source_url = source_url;
            }
            config.validate()?;
            rest::start(Arc::new(AppState::new(config))).await
        }
        Commands::Lookup {
            handle,
            source_url,
            json,
        } => {
            if let Some(source_url) = source_url {
                config.source_url = source_url;
            }
            config.validate()?;

            let id = Identifier::new(&handle);
            if id.normalized().is_empty() {
                anyhow::bail!("handle must not be empty");
            }
            let as_supplied = id.raw().to_string();

            let fetcher = Fetcher::new(config.fetch_timeout);
            let body = fetcher.fetch_page(&config.source_url).await?;
            let report =
                tokio::task::spawn_blocking(move || extract::lookup_in_page(&body, &id)).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.found {
                println!(
                    "@{} — rank {}, score {}",
                    report.handle,
                    report.display_rank(),
                    report.display_score()
                );
                if let Some(windows) = &report.windows {
                    for (window, stats) in windows {
                        let rank = stats
                            .rank
                            .map(|r| format!("#{r}"))
                            .unwrap_or_else(|| SENTINEL.to_string());
                        let score = stats
                            .score
                            .map(podium::report::format_score)
                            .unwrap_or_else(|| SENTINEL.to_string());
                        println!("  {window}: rank {rank}, score {score}");
                    }
                }
            } else {
                // Echo the handle as the caller typed it.
                println!("{as_supplied} not found on the leaderboard");
            }
            Ok(())
        }
    }
}
