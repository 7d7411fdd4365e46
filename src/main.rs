use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use polarity_lab::config::{Config, DEFAULT_PROBE_HANDLE};
use polarity_lab::sentiment::traits::SentimentScorer;

/// polarity-lab: lexicon sentiment for social posts and open data.
///
/// Fetches tweets or CKAN catalog records, keeps them as JSON files, and
/// scores each document by summing VADER word polarities.
#[derive(Parser)]
#[command(name = "polarity-lab", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that your bearer token is accepted
    Validate {
        /// Account to resolve as a probe
        #[arg(long, default_value = DEFAULT_PROBE_HANDLE)]
        handle: String,
    },

    /// Fetch a user's recent tweets, reusing the on-disk cache
    FetchUser {
        /// The username, with or without @
        handle: String,

        /// Max tweets to download (default: 200)
        #[arg(long, default_value = "200")]
        max: usize,

        /// Ignore the cache and download again
        #[arg(long)]
        refresh: bool,
    },

    /// Search recent tweets for a hashtag and save them
    FetchHashtag {
        /// The hashtag, with or without #
        hashtag: String,

        /// Restrict to a circle: "lat,long,radius" (e.g. "43.65,-79.38,5km")
        #[arg(long)]
        location: Option<String>,

        /// Number of tweets (default: 15)
        #[arg(long, default_value = "15")]
        count: usize,

        /// Where to write the JSON file
        #[arg(long)]
        out: PathBuf,
    },

    /// Show a CKAN package and optionally save its first table
    Package {
        /// Package id or name
        id: String,

        /// Save the first JSON/CSV resource as a JSON array here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Download the Toronto Public Library events feed
    TplEvents {
        /// Where to write the JSON file
        #[arg(long)]
        out: PathBuf,
    },

    /// Score every record in a JSON file
    Score {
        /// JSON array of flat records (e.g. saved tweets)
        path: PathBuf,

        /// Field holding the document id
        #[arg(long, default_value = "id")]
        id_field: String,

        /// Field holding the text to score
        #[arg(long, default_value = "text")]
        text_field: String,

        /// Rows to show at each end of the ranking (default: 10)
        #[arg(long, default_value = "10")]
        top: usize,

        /// Also write {id: score} as JSON here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the normalized form of a piece of text
    Clean {
        /// Text to normalize
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("polarity_lab=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { handle } => {
            let config = Config::load()?;
            let client = twitter_client(&config)?;

            let user = client.validate_authentication(&handle).await?;
            println!(
                "{} Resolved @{} (id {})",
                "Keys are valid.".green().bold(),
                user.username,
                user.id
            );
        }

        Commands::FetchUser {
            handle,
            max,
            refresh,
        } => {
            let config = Config::load()?;
            let client = twitter_client(&config)?;
            let handle = handle.strip_prefix('@').unwrap_or(&handle);

            let cache = polarity_lab::storage::cache_path(&config.cache_dir, handle);
            if refresh && cache.is_file() {
                std::fs::remove_file(&cache)
                    .with_context(|| format!("Failed to remove {}", cache.display()))?;
                info!(path = %cache.display(), "Cleared tweet cache");
            }

            let spinner = spinner(format!("Fetching tweets for @{handle}..."));
            let tweets = polarity_lab::storage::get_user_tweets_with_cache(
                &client,
                handle,
                max,
                &config.cache_dir,
            )
            .await;
            spinner.finish_and_clear();
            let tweets = tweets?;

            println!("{} tweets for @{handle}", tweets.len());
            println!("  Cache: {}", cache.display());
            println!(
                "{}",
                format!(
                    "Score them with: polarity-lab score {}",
                    cache.display()
                )
                .dimmed()
            );
        }

        Commands::FetchHashtag {
            hashtag,
            location,
            count,
            out,
        } => {
            let config = Config::load()?;
            let client = twitter_client(&config)?;

            let spinner = spinner(format!("Searching #{}...", hashtag.trim_start_matches('#')));
            let tweets = polarity_lab::twitter::tweets::download_recent_tweets_by_hashtag(
                &client,
                &hashtag,
                location.as_deref(),
                count,
            )
            .await;
            spinner.finish_and_clear();
            let tweets = tweets?;

            polarity_lab::storage::save_tweets(&tweets, &out)?;
            println!("Saved {} tweets to {}", tweets.len(), out.display());
        }

        Commands::Package { id, out } => {
            let config = Config::load()?;
            let client = polarity_lab::ckan::client::CkanClient::new(&config.ckan_api_url)?;

            let package = client.retrieve_package(&id).await?;
            polarity_lab::output::terminal::display_package(&package);

            if let Some(out) = out {
                let table =
                    polarity_lab::ckan::tables::load_package_table(&client, &package).await?;
                polarity_lab::storage::write_data(&table, &out)?;
                println!("\nSaved {} rows to {}", table.len(), out.display());
            }
        }

        Commands::TplEvents { out } => {
            let config = Config::load()?;
            let client = polarity_lab::ckan::client::CkanClient::new(&config.ckan_api_url)?;

            let spinner = spinner("Loading Toronto Public Library events...".to_string());
            let table = polarity_lab::ckan::tables::load_tpl_events(&client).await;
            spinner.finish_and_clear();
            let table = table?;

            polarity_lab::storage::write_data(&table, &out)?;
            println!("Saved {} events to {}", table.len(), out.display());
        }

        Commands::Score {
            path,
            id_field,
            text_field,
            top,
            out,
        } => {
            let config = Config::load()?;
            config.require_lexicon()?;

            let lexicon = polarity_lab::sentiment::lexicon::Lexicon::load(&config.lexicon_path)?;
            let records: Vec<polarity_lab::sentiment::document::Record> =
                polarity_lab::storage::read_data(&path)?;
            let documents = polarity_lab::sentiment::document::documents_from_records(
                &records,
                &id_field,
                &text_field,
            )
            .with_context(|| format!("Cannot score {}", path.display()))?;

            let scorer = polarity_lab::sentiment::scorer::LexiconScorer::new(lexicon);
            let result = scorer.score(&documents)?;

            polarity_lab::output::terminal::display_polarity_table(&result, &documents, top);
            polarity_lab::output::terminal::display_summary(&result);

            if let Some(out) = out {
                let json = serde_json::to_string_pretty(&result)?;
                std::fs::write(&out, json)
                    .with_context(|| format!("Failed to write {}", out.display()))?;
                println!("\n{}", format!("Scores saved to: {}", out.display()).bold());
            }
        }

        Commands::Clean { text } => {
            println!("{}", polarity_lab::sentiment::normalize::clean_text(&text));
        }
    }

    Ok(())
}

/// Load keys and build an authenticated Twitter client.
fn twitter_client(config: &Config) -> Result<polarity_lab::twitter::client::TwitterClient> {
    config.require_keys()?;
    let keys = polarity_lab::keys::ApiKeys::load(&config.keys_path)?;
    let token = keys.require(polarity_lab::keys::BEARER_TOKEN)?;
    polarity_lab::twitter::client::TwitterClient::new(&config.twitter_api_url, token)
}

/// A spinner for network calls of unknown length.
fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
