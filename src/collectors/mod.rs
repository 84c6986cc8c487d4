//! Metric Collectors
//!
//! One collection cycle runs per scrape and is a strict linear pipeline:
//!
//! 1. [`summary`] queries the REST API and emits the five application
//!    summary families.
//! 2. The entity directory is rebuilt from an APM entity search.
//! 3. [`deployment`] queries recent deployments per guid chunk and emits
//!    the deployment family.
//!
//! # Error Handling
//!
//! An upstream error payload at stage 2 or 3 ends the pipeline early but
//! keeps everything already produced; the scrape still answers with a
//! partial-but-valid family sequence. Transport failures propagate and fail
//! the whole cycle.
//!
//! Nothing survives a cycle: the directory and every family are rebuilt
//! from scratch on the next scrape.

use crate::error::{ExporterError, Result};
use crate::metrics::MetricFamily;
use crate::newrelic::types::Entity;
use crate::newrelic::NewRelicClient;
use std::collections::HashMap;
use tracing::{info, warn};

pub mod deployment;
pub mod summary;

/// Upstream bound on how many guids one deployment query may carry.
pub const GUID_CHUNK_SIZE: usize = 25;

/// Guid → name lookup for the current cycle, preserving upstream order for
/// chunking.
#[derive(Debug, Default)]
pub struct EntityDirectory {
    order: Vec<String>,
    names: HashMap<String, String>,
}

impl EntityDirectory {
    /// Build the directory from an entity search result. A guid reported
    /// twice keeps its first name and is chunked once.
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        let mut directory = Self::default();
        for entity in entities {
            if !directory.names.contains_key(&entity.guid) {
                directory.order.push(entity.guid.clone());
                directory.names.insert(entity.guid, entity.name);
            }
        }
        directory
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Partition the guid set, in original order, into consecutive chunks
    /// of at most `size`. Covers every guid exactly once.
    pub fn guid_chunks(&self, size: usize) -> impl Iterator<Item = &[String]> {
        self.order.chunks(size)
    }

    pub fn resolve(&self, guid: &str) -> Option<&str> {
        self.names.get(guid).map(String::as_str)
    }
}

/// Orchestrates one collection cycle against the New Relic APIs.
pub struct NewRelicCollector {
    client: NewRelicClient,
}

impl NewRelicCollector {
    pub fn new(client: NewRelicClient) -> Self {
        Self { client }
    }

    /// Run one collection cycle and return the families in pipeline order.
    ///
    /// Returns `Err` only for transport failures; recovered upstream errors
    /// yield the families produced before the failing stage.
    pub async fn collect(&self) -> Result<Vec<MetricFamily>> {
        let mut families = summary::collect_summary_metrics(&self.client).await?;

        let entities = match self.client.query_apm_entities().await {
            Ok(entities) => entities,
            Err(ExporterError::Upstream(message)) => {
                warn!(error = %message, "entity search rejected, skipping deployment metrics");
                return Ok(families);
            }
            Err(e) => return Err(e),
        };
        let directory = EntityDirectory::from_entities(entities);
        info!(entities = directory.len(), "rebuilt APM entity directory");

        match deployment::collect_deployment_metrics(&self.client, &directory).await? {
            Some(family) => families.push(family),
            None => { /* chunk failure, already logged */ }
        }

        Ok(families)
    }
}
