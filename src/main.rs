//! # Tweetbot
//!
//! Retweets new tweets matching the hashtags in `settings.yaml`, then exits.
//! Meant to be started periodically by cron or a systemd timer.
//!
//! ## Environment Variables
//!
//! - `TWEETBOT_SETTINGS`: settings file (defaults to `settings.yaml`)
//! - `TWEETBOT_CHECKPOINT`: checkpoint file (defaults to `lastTweetId`)
//! - `TWEETBOT_API_BASE`: API base URL (defaults to `https://api.twitter.com/1.1`)
//! - `RUST_LOG`: log level (defaults to `info`)

use log::{error, info};

use tweetbot::{get_api_base_url, get_checkpoint_path, get_settings_path, run};

/// Main entry point for one bot run.
///
/// Reposted tweets are printed to stdout, logs go to stderr.
///
/// # Example Usage
///
/// ```bash
/// # Run from the directory holding settings.yaml
/// cargo run --release
///
/// # Run with debug logging and explicit paths
/// RUST_LOG=debug TWEETBOT_SETTINGS=/etc/tweetbot/settings.yaml \
///     TWEETBOT_CHECKPOINT=/var/lib/tweetbot/lastTweetId cargo run
/// ```
///
/// # Exit Status
///
/// Exits with status 1 if the settings cannot be loaded or the checkpoint
/// cannot be written. Failed searches and retweets are logged and do not
/// change the exit status.
#[tokio::main]
async fn main() {
    // Initialize the logging system
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = get_settings_path();
    let checkpoint_path = get_checkpoint_path();
    let api_base_url = get_api_base_url();

    match run(&settings_path, &checkpoint_path, &api_base_url).await {
        Ok(summary) => {
            info!("Processed {} new tweet(s)", summary.processed());
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
