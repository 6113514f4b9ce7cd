//! The bot run.
//!
//! A run reads the checkpoint, searches all hashtags concurrently, retweets
//! every result that is not itself a retweet, and finally moves the
//! checkpoint forward to the highest tweet ID processed.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

use crate::checkpoint::{next_checkpoint, CheckpointStore};
use crate::config::Settings;
use crate::dispatch::dispatch_searches;
use crate::error::BotError;
use crate::twitter::{sanitize_for_logging, Search, TweetApi, TwitterClient};

/// Counters describing what a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of hashtags searched
    pub hashtags: usize,
    /// Statuses received across all searches
    pub collected: usize,
    /// Statuses skipped because they are retweets
    pub skipped_retweets: usize,
    /// Tweets retweeted successfully
    pub reposted: usize,
    /// Tweets whose retweet request failed
    pub failed_reposts: usize,
    /// Checkpoint written at the end of the run, if any
    pub checkpoint: Option<i64>,
}

impl RunSummary {
    /// Number of tweets counted toward the checkpoint.
    pub fn processed(&self) -> usize {
        self.reposted + self.failed_reposts
    }
}

/// Loads settings, builds the Twitter client and performs one run.
///
/// Reposted tweets are printed to stdout as `<id> <text>`.
///
/// # Errors
///
/// Returns a [`BotError`] if the settings cannot be loaded or the new
/// checkpoint cannot be written. All other failures are logged and skipped.
pub async fn run(
    settings_path: &Path,
    checkpoint_path: &Path,
    api_base_url: &str,
) -> Result<RunSummary, BotError> {
    let settings = Settings::load(settings_path)?;
    let client = Arc::new(TwitterClient::new(&settings.twitter, api_base_url));
    let store = CheckpointStore::new(checkpoint_path);

    let mut stdout = std::io::stdout();
    run_once(client, &settings.twitter.hash, &store, &mut stdout).await
}

/// Performs one run against `api`.
///
/// # Parameters
///
/// - `api`: the API used for searches and retweets
/// - `hashtags`: search queries, in configuration order
/// - `store`: checkpoint file, read at the start and written at the end
/// - `out`: operator output receiving one `<id> <text>` line per reposted tweet
pub async fn run_once<A, W>(
    api: Arc<A>,
    hashtags: &[String],
    store: &CheckpointStore,
    out: &mut W,
) -> Result<RunSummary, BotError>
where
    A: TweetApi + 'static,
    W: Write,
{
    let checkpoint = store.load();

    let mut summary = RunSummary {
        hashtags: hashtags.len(),
        ..RunSummary::default()
    };

    if hashtags.is_empty() {
        info!("No hashtags configured, nothing to do");
        return Ok(summary);
    }

    let searches = dispatch_searches(Arc::clone(&api), hashtags, checkpoint).await;
    let processed = repost_new_tweets(api.as_ref(), hashtags, searches, out, &mut summary).await;

    match next_checkpoint(checkpoint, &processed) {
        Some(latest) => {
            store.write(latest)?;
            summary.checkpoint = Some(latest);
        }
        None => info!("No new tweets processed, checkpoint left at {}", checkpoint),
    }

    info!(
        "Run finished: {} hashtag(s), {} collected, {} retweet(s) skipped, {} reposted, {} repost failure(s)",
        summary.hashtags,
        summary.collected,
        summary.skipped_retweets,
        summary.reposted,
        summary.failed_reposts
    );
    Ok(summary)
}

/// Retweets every status that is not a retweet and returns the IDs processed.
///
/// Searches are walked in order. A failed retweet is logged and its ID is
/// still returned, so the checkpoint moves past it.
pub async fn repost_new_tweets<A, W>(
    api: &A,
    hashtags: &[String],
    searches: Vec<Search>,
    out: &mut W,
    summary: &mut RunSummary,
) -> Vec<i64>
where
    A: TweetApi,
    W: Write,
{
    let mut tweet_ids = Vec::new();

    for (hash, search) in hashtags.iter().zip(searches) {
        summary.collected += search.statuses.len();

        for tweet in search.statuses {
            if tweet.is_retweet() {
                summary.skipped_retweets += 1;
                continue;
            }

            tweet_ids.push(tweet.id);
            if let Err(e) = writeln!(out, "{} {}", tweet.id, tweet.text) {
                warn!("Could not print tweet {}: {}", tweet.id, e);
            }

            match api.retweet(tweet.id).await {
                Ok(()) => summary.reposted += 1,
                Err(e) => {
                    warn!(
                        "Could not retweet {} ({}) for hash '{}': {}",
                        tweet.id,
                        sanitize_for_logging(&tweet.text, 80),
                        hash,
                        e
                    );
                    summary.failed_reposts += 1;
                }
            }
        }
    }

    tweet_ids
}
