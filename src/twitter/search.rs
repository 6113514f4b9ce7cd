//! Tweet search for Twitter API.
//!
//! This module contains the request and response types of the v1.1
//! `search/tweets.json` endpoint and the client call that performs it.

use log::{debug, info};
use reqwest::Method;
use serde::Deserialize;

use crate::error::BoxError;

use super::api::TwitterClient;

/// Number of tweets requested per hashtag and run.
pub const SEARCH_COUNT: u32 = 5;

/// Result type asking for the most recent tweets only.
pub const RESULT_TYPE_RECENT: &str = "recent";

/// Parameters of one search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub count: u32,
    pub result_type: String,
    /// Only return tweets with an ID greater than this
    pub since_id: Option<i64>,
}

impl SearchParams {
    /// Creates parameters for the `count` most recent tweets matching `query`.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            count: SEARCH_COUNT,
            result_type: RESULT_TYPE_RECENT.to_string(),
            since_id: None,
        }
    }

    /// Restricts results to tweets newer than `checkpoint`.
    ///
    /// A checkpoint of zero means no previous run, and leaves the search
    /// unbounded.
    pub fn since(mut self, checkpoint: i64) -> Self {
        self.since_id = (checkpoint != 0).then_some(checkpoint);
        self
    }

    /// Query string parameters in request order.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("q".to_string(), self.query.clone()),
            ("count".to_string(), self.count.to_string()),
            ("result_type".to_string(), self.result_type.clone()),
        ];
        if let Some(since_id) = self.since_id {
            pairs.push(("since_id".to_string(), since_id.to_string()));
        }
        pairs
    }
}

/// Body of a `search/tweets.json` response.
///
/// `Search::default()` is the empty result used in place of a failed search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Search {
    #[serde(default)]
    pub statuses: Vec<Tweet>,
}

/// A tweet as returned by the search endpoint, reduced to the fields the bot uses.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: i64,
    #[serde(default)]
    pub text: String,
    /// Present when the tweet is itself a retweet of another tweet
    #[serde(default)]
    pub retweeted_status: Option<serde_json::Value>,
}

impl Tweet {
    pub fn is_retweet(&self) -> bool {
        self.retweeted_status.is_some()
    }
}

impl TwitterClient {
    /// Searches recent tweets using the v1.1 search endpoint.
    ///
    /// # Returns
    ///
    /// - `Ok(Search)`: The decoded statuses, possibly empty
    /// - `Err(BoxError)`: On network errors, API errors or an undecodable body
    pub async fn search(&self, params: &SearchParams) -> Result<Search, BoxError> {
        info!(
            "Searching tweets for '{}' (since_id: {:?})",
            params.query, params.since_id
        );

        let body = self
            .make_signed_request(
                Method::GET,
                "search/tweets.json",
                &params.to_query_pairs(),
                "search_tweets",
            )
            .await?;

        let search: Search = serde_json::from_str(&body)?;
        debug!(
            "Search for '{}' returned {} statuses",
            params.query,
            search.statuses.len()
        );
        Ok(search)
    }
}
