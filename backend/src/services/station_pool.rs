//! Bounded fan-out over the per-province station feed
//!
//! A fixed-size worker pool pulls province names from a shared cursor; each
//! worker claims the next index, performs one upstream request, and records
//! the outcome under that province's key. Workers touch disjoint keys, so
//! the merge needs no locking: each worker accumulates its own pairs and
//! the map is assembled after all workers have joined.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use shared::AwsApiResponse;
use tokio::task::JoinSet;

use crate::external::AwsStationClient;

/// Default worker-pool size.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Fetch station readings for every province in `provinces`.
///
/// At most `concurrency` requests are in flight at once. A failed request
/// (transport error or non-2xx) becomes a failure placeholder for that key
/// only; one province's failure never aborts the others. The returned map
/// holds exactly one entry per distinct input province, and the call itself
/// always completes — there is no aggregate failure.
pub async fn fetch_all(
    client: &AwsStationClient,
    provinces: &[&str],
    concurrency: usize,
) -> BTreeMap<String, AwsApiResponse> {
    let provinces: Arc<Vec<String>> =
        Arc::new(provinces.iter().map(|p| p.to_string()).collect());
    let cursor = Arc::new(AtomicUsize::new(0));
    let workers = concurrency.max(1).min(provinces.len().max(1));

    let mut pool = JoinSet::new();
    for _ in 0..workers {
        let client = client.clone();
        let provinces = Arc::clone(&provinces);
        let cursor = Arc::clone(&cursor);
        pool.spawn(async move {
            let mut claimed = Vec::new();
            loop {
                let index = cursor.fetch_add(1, Ordering::Relaxed);
                let Some(province) = provinces.get(index) else {
                    break;
                };
                let outcome = match client.fetch_province(province).await {
                    Ok(response) => response,
                    Err(err) => {
                        tracing::warn!("station fetch failed for {}: {}", province, err);
                        AwsApiResponse::failure(err.to_string())
                    }
                };
                claimed.push((province.clone(), outcome));
            }
            claimed
        });
    }

    let mut merged = BTreeMap::new();
    while let Some(joined) = pool.join_next().await {
        if let Ok(pairs) = joined {
            for (province, outcome) in pairs {
                merged.insert(province, outcome);
            }
        }
    }

    // A worker that died mid-claim must not drop keys from the result.
    for province in provinces.iter() {
        merged
            .entry(province.clone())
            .or_insert_with(|| AwsApiResponse::failure("worker aborted"));
    }

    merged
}
