//! Retweet operation for Twitter API.

use log::info;
use reqwest::Method;

use crate::error::BoxError;

use super::api::TwitterClient;

impl TwitterClient {
    /// Retweets the tweet with `tweet_id` as the bot account.
    ///
    /// Uses `POST statuses/retweet/:id.json`. The response body is not used.
    ///
    /// # Errors
    ///
    /// This function can fail for several reasons:
    /// - Network connectivity issues
    /// - The tweet was already retweeted by the bot (403)
    /// - Twitter API rate limiting or other API errors
    pub async fn retweet(&self, tweet_id: i64) -> Result<(), BoxError> {
        info!("Retweeting tweet {}", tweet_id);
        let path = format!("statuses/retweet/{}.json", tweet_id);
        self.make_signed_request(Method::POST, &path, &[], "retweet")
            .await?;
        Ok(())
    }
}
