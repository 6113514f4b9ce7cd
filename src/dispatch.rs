//! Concurrent hashtag search.
//!
//! One task is spawned per hashtag and the join handles are awaited in
//! configuration order. Every hashtag yields exactly one [`Search`], a failed
//! or panicked task yields `Search::default()`, so the number of results
//! always equals the number of hashtags.

use std::sync::Arc;

use log::{error, info, warn};

use crate::twitter::{Search, SearchParams, TweetApi};

/// Searches every hashtag concurrently and collects one result per hashtag.
///
/// # Parameters
///
/// - `api`: shared API handle, cloned into each task
/// - `hashtags`: search queries, in configuration order
/// - `checkpoint`: last processed tweet ID, used as `since_id` when non-zero
///
/// # Returns
///
/// A vector with `hashtags.len()` entries where entry `i` belongs to
/// `hashtags[i]`, regardless of the order in which searches complete.
pub async fn dispatch_searches<A>(api: Arc<A>, hashtags: &[String], checkpoint: i64) -> Vec<Search>
where
    A: TweetApi + 'static,
{
    info!("Dispatching {} hashtag search(es)", hashtags.len());

    let handles: Vec<_> = hashtags
        .iter()
        .map(|hash| {
            let api = Arc::clone(&api);
            let params = SearchParams::new(hash.as_str()).since(checkpoint);
            tokio::spawn(async move { api.search_tweets(params).await })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (hash, handle) in hashtags.iter().zip(handles) {
        let search = match handle.await {
            Ok(Ok(search)) => {
                info!(
                    "Search for hash '{}' returned {} tweet(s)",
                    hash,
                    search.statuses.len()
                );
                search
            }
            Ok(Err(e)) => {
                warn!("Could not search tweets for hash '{}': {}", hash, e);
                Search::default()
            }
            Err(e) => {
                error!("Search task for hash '{}' did not complete: {}", hash, e);
                Search::default()
            }
        };
        results.push(search);
    }

    results
}
