//! Deployment Collector
//!
//! Queries NerdGraph for deployments inside a trailing one-hour window and
//! emits `newrelic_application_deployment`, labeled `(appname, version)`.
//! Deployments are presence markers: the value is always 1 and the sample
//! carries the deployment's own timestamp, truncated from milliseconds to
//! whole seconds.
//!
//! The upstream query bounds how many guids one request may carry, so the
//! entity directory is walked in chunks of [`GUID_CHUNK_SIZE`], strictly
//! sequentially. An upstream error on any chunk discards the whole stage
//! for the cycle, including records already gathered from earlier chunks.

use super::{EntityDirectory, GUID_CHUNK_SIZE};
use crate::error::{ExporterError, Result};
use crate::metrics::MetricFamily;
use crate::newrelic::types::Deployment;
use crate::newrelic::NewRelicClient;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

pub const DEPLOYMENT_FAMILY: &str = "newrelic_application_deployment";

/// Trailing window for deployment lookups.
const DEPLOYMENT_WINDOW: Duration = Duration::from_secs(3600);

/// Fetch recent deployments for every directory entry and assemble the
/// deployment family.
///
/// Returns `Ok(None)` when a chunk response carries an upstream error: the
/// family is absent for the cycle and no further chunks are attempted.
/// Transport failures propagate as `Err`.
pub async fn collect_deployment_metrics(
    client: &NewRelicClient,
    directory: &EntityDirectory,
) -> Result<Option<MetricFamily>> {
    // One window boundary per cycle, shared by every chunk.
    let window_start_ms = window_start_millis(SystemTime::now());

    let mut records = Vec::new();
    for chunk in directory.guid_chunks(GUID_CHUNK_SIZE) {
        match client.query_recent_deployments(chunk, window_start_ms).await {
            Ok(mut found) => records.append(&mut found),
            Err(ExporterError::Upstream(message)) => {
                warn!(error = %message, "deployment query rejected, dropping deployment metrics");
                return Ok(None);
            }
            Err(e) => return Err(e),
        }
    }
    info!(deployments = records.len(), "collected recent deployments");

    Ok(Some(deployment_family(&records, directory)))
}

/// Assemble the deployment family from accumulated records.
///
/// A record whose guid is absent from the directory is skipped: the two
/// upstream queries are issued at slightly different times and may disagree,
/// and a sample with a fabricated name would pollute the label set.
pub fn deployment_family(records: &[Deployment], directory: &EntityDirectory) -> MetricFamily {
    let mut family = MetricFamily::gauge(
        DEPLOYMENT_FAMILY,
        "New Relic application deployment within the last hour",
        &["appname", "version"],
    );

    for record in records {
        let Some(name) = directory.resolve(&record.entity_guid) else {
            warn!(guid = %record.entity_guid, "deployment references unknown entity, skipping");
            continue;
        };
        family.push_sample(
            vec![name.to_string(), record.version.clone()],
            1.0,
            Some(timestamp_seconds(record.timestamp)),
        );
    }
    family
}

/// Window boundary in epoch milliseconds: `now` minus one hour.
pub fn window_start_millis(now: SystemTime) -> i64 {
    let since_epoch = now
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .saturating_sub(DEPLOYMENT_WINDOW);
    since_epoch.as_millis() as i64
}

/// Upstream reports milliseconds; the exposition sample wants whole
/// seconds. Truncates, never rounds.
pub fn timestamp_seconds(timestamp_ms: i64) -> i64 {
    timestamp_ms / 1000
}
