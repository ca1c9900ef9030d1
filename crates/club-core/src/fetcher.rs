//! The fetcher (spec.md §4.1/§4.2/§5, C5): a scheduled job that lists
//! upcoming matches, fetches and upserts each one on its own spawned task,
//! waits for the whole page, then re-drives every match still in progress
//! through the topic matching its *current* persisted status, carrying the
//! freshly-upserted entity. This is what lets a match whose provider status
//! changed after booking (e.g. later reported `PLAYED`/`CONFIRMED`) make
//! further progress without waiting on a redelivery of a stale event.

use crate::error::CoreError;
use crate::state::topic_for_status;
use chrono::{DateTime, Utc};
use club_bus::EventBus;
use club_metrics::Metrics;
use club_provider::ProviderClient;
use club_store::ConnectionPool;
use log::{error, info, warn};
use std::sync::Arc;

async fn fetch_and_upsert_one(
    provider: Arc<ProviderClient>,
    pool: ConnectionPool,
    metrics: Arc<Metrics>,
    match_id: String,
) -> Result<(), CoreError> {
    metrics.record_provider_call();
    let m = match provider.get_match(&match_id).await {
        Ok(m) => m,
        Err(e) => {
            metrics.record_provider_call_failure();
            return Err(e.into());
        }
    };

    let mut conn = pool.get().map_err(club_store::StoreError::PoolError)?;
    club_store::upsert_match(&mut conn, &m)?;
    Ok(())
}

/// One fetch tick: queries C1, filters to club matches via C2, upserts
/// results, and re-publishes each in-progress match to the topic its
/// current status is waiting on.
pub async fn run_fetch(
    provider: Arc<ProviderClient>,
    pool: ConnectionPool,
    bus: &EventBus,
    metrics: Arc<Metrics>,
    from_start_date: Option<DateTime<Utc>>,
) -> Result<(), CoreError> {
    metrics.record_fetch_run();

    metrics.record_provider_call();
    let summaries = match provider.list_matches(from_start_date).await {
        Ok(s) => s,
        Err(e) => {
            metrics.record_provider_call_failure();
            return Err(e.into());
        }
    };
    info!("fetch: {} match summaries returned", summaries.len());

    let tasks = summaries.into_iter().map(|summary| {
        let provider = Arc::clone(&provider);
        let pool = pool.clone();
        let metrics = Arc::clone(&metrics);
        tokio::spawn(fetch_and_upsert_one(provider, pool, metrics, summary.match_id))
    });

    for joined in futures::future::join_all(tasks).await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("fetch: failed to fetch/upsert a match: {e}"),
            Err(e) => error!("fetch: a fetch/upsert task panicked: {e}"),
        }
    }

    let mut conn = pool.get().map_err(club_store::StoreError::PoolError)?;
    let in_progress = club_store::get_matches_for_processing(&mut conn)?;
    drop(conn);

    for stored in in_progress {
        if !stored.entity.is_club_match() {
            continue;
        }

        let Some(topic) = topic_for_status(stored.processing_status) else {
            continue;
        };

        if let Err(e) = bus.publish(topic, &stored.entity).await {
            warn!(
                "fetch: failed to publish kick event ({topic}) for {}: {e}",
                stored.entity.match_id
            );
        }
    }

    Ok(())
}
