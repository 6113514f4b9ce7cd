//! Twitter/X API integration module.
//!
//! This module contains the types and calls for the two endpoints the bot
//! uses, searching tweets and retweeting, behind the [`TweetApi`] trait so
//! that the run logic does not depend on the HTTP transport.

use std::future::Future;

use crate::error::BoxError;

mod api;
mod retweet;
mod search;

pub use api::{sanitize_for_logging, TwitterClient};
pub use search::{Search, SearchParams, Tweet, RESULT_TYPE_RECENT, SEARCH_COUNT};

/// Operations the bot performs against the social network.
pub trait TweetApi: Send + Sync {
    /// Runs one search and returns its statuses in API order.
    fn search_tweets(
        &self,
        params: SearchParams,
    ) -> impl Future<Output = Result<Search, BoxError>> + Send;

    /// Retweets one tweet as the bot account.
    fn retweet(&self, tweet_id: i64) -> impl Future<Output = Result<(), BoxError>> + Send;
}

impl TweetApi for TwitterClient {
    async fn search_tweets(&self, params: SearchParams) -> Result<Search, BoxError> {
        TwitterClient::search(self, &params).await
    }

    async fn retweet(&self, tweet_id: i64) -> Result<(), BoxError> {
        TwitterClient::retweet(self, tweet_id).await
    }
}
