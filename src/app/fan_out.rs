//! Concurrent sub-fetch helpers shared by the aggregator and the signature resolver.

use std::future::Future;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::{EditorialError, Result};
use crate::observability::{AggregatorMetrics, DegradedOperation};

/// Run `f` for every key concurrently and return the `Some` results in key order.
///
/// A task error aborts the remaining tasks; degradable failures must already be
/// mapped to `Ok(None)` by the caller's future.
pub async fn fan_out<K, T, F, Fut>(keys: Vec<K>, f: F) -> Result<Vec<(K, T)>>
where
    K: Clone + Send + 'static,
    T: Send + 'static,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<Option<T>>> + Send + 'static,
{
    let mut set = JoinSet::new();
    for (idx, key) in keys.iter().cloned().enumerate() {
        let fut = f(key);
        set.spawn(async move { (idx, fut.await) });
    }

    let mut resolved: Vec<(usize, T)> = Vec::with_capacity(keys.len());
    while let Some(joined) = set.join_next().await {
        let (idx, result) = joined?;
        if let Some(value) = result? {
            resolved.push((idx, value));
        }
    }
    resolved.sort_by_key(|(idx, _)| *idx);

    Ok(resolved
        .into_iter()
        .map(|(idx, value)| (keys[idx].clone(), value))
        .collect())
}

/// Turn a failed optional sub-fetch into an absent value. Configuration errors still propagate.
pub fn degrade<T>(operation: DegradedOperation, id: &str, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_configuration() => Err(e),
        Err(e @ EditorialError::NotFound { .. }) => {
            debug!(operation = operation.as_str(), id, "{}", e);
            AggregatorMetrics::record_degraded(operation);
            Ok(None)
        }
        Err(e) => {
            warn!(operation = operation.as_str(), id, error = %e, "Optional fetch failed, omitting");
            AggregatorMetrics::record_degraded(operation);
            Ok(None)
        }
    }
}

/// Drop empty and repeated ids, keeping first-seen order.
pub fn dedup_ids<'a, I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    ids.into_iter()
        .filter(|id| !id.is_empty() && seen.insert(*id))
        .map(str::to_string)
        .collect()
}
