//! New Relic API Client
//!
//! HTTP client for the two upstream surfaces the exporter reads:
//!
//! - **v2 REST API**: `GET {api_base}/v2/applications.json` with the
//!   credential in an `X-Api-Key` header.
//! - **NerdGraph**: `POST {api_base}/graphql` with the credential in an
//!   `API-Key` header and the query as a JSON body.
//!
//! # Error Handling
//!
//! Transport failures and non-success statuses surface as
//! [`ExporterError::Http`] and propagate; a NerdGraph response whose
//! `errors` array is non-empty (or whose `data` is missing) becomes
//! [`ExporterError::Upstream`], which the collectors recover from by
//! dropping the affected stage for the cycle. No retries, no timeout
//! overrides: a stalled upstream call stalls the whole cycle.
//!
//! # Example
//!
//! ```no_run
//! use newrelic_exporter::config::NewRelicConfig;
//! use newrelic_exporter::newrelic::NewRelicClient;
//! use secrecy::SecretString;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = NewRelicConfig {
//!     api_base_url: "https://api.newrelic.com/".to_string(),
//!     api_key: SecretString::from("your-api-key"),
//! };
//!
//! let client = NewRelicClient::new(config);
//! let apps = client.query_application_summaries().await?;
//! # Ok(())
//! # }
//! ```

use crate::config::NewRelicConfig;
use crate::error::{ExporterError, Result};
use crate::newrelic::types::*;
use secrecy::ExposeSecret;
use tracing::debug;

/// Client for the New Relic REST and NerdGraph APIs.
///
/// Holds a connection-pooling [`reqwest::Client`]; safe to share across
/// async tasks, though the exporter issues every request sequentially.
pub struct NewRelicClient {
    http: reqwest::Client,
    config: NewRelicConfig,
}

impl NewRelicClient {
    pub fn new(config: NewRelicConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch the per-application performance summaries.
    ///
    /// A response without an `applications` array yields an empty list.
    pub async fn query_application_summaries(&self) -> Result<Vec<Application>> {
        let url = format!("{}v2/applications.json", self.config.api_base_url);
        debug!(%url, "querying application summaries");

        let response: ApplicationsResponse = self
            .http
            .get(&url)
            .header("X-Api-Key", self.config.api_key.expose_secret())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.applications)
    }

    /// Fetch every entity in the APM domain, name and guid.
    pub async fn query_apm_entities(&self) -> Result<Vec<Entity>> {
        let query = "{ actor { entitySearch(queryBuilder: {domain: APM}) \
                     { results { entities { name guid } } } } }"
            .to_string();

        let data: EntitySearchData = self.graphql(query).await?;
        Ok(data.actor.entity_search.results.entities)
    }

    /// Fetch deployments for up to one chunk of guids, restricted to events
    /// at or after `window_start_ms` (epoch milliseconds).
    pub async fn query_recent_deployments(
        &self,
        guids: &[String],
        window_start_ms: i64,
    ) -> Result<Vec<Deployment>> {
        let guid_list = guids
            .iter()
            .map(|guid| format!("\"{}\"", guid))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "{{ actor {{ entities(guids: [{guid_list}]) \
             {{ deploymentSearch(filter: {{timeWindow: {{startTime: {window_start_ms}}}}}) \
             {{ results {{ version timestamp entityGuid }} }} }} }} }}"
        );

        let data: DeploymentSearchData = self.graphql(query).await?;

        // Flatten in response order; entities without deployments in the
        // window come back with an empty result set.
        Ok(data
            .actor
            .entities
            .into_iter()
            .filter_map(|entity| entity.deployment_search)
            .flat_map(|search| search.results)
            .collect())
    }

    /// Execute a NerdGraph query and unwrap the response envelope.
    ///
    /// Checks the top-level `errors` array before touching `data`, per the
    /// GraphQL convention of reporting query failures inside a 200 response.
    async fn graphql<T>(&self, query: String) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}graphql", self.config.api_base_url);
        debug!(%url, "issuing NerdGraph query");

        let response: GraphQlResponse<T> = self
            .http
            .post(&url)
            .header("API-Key", self.config.api_key.expose_secret())
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.errors.first() {
            return Err(ExporterError::Upstream(error.message.clone()));
        }

        response
            .data
            .ok_or_else(|| ExporterError::Upstream("response carried no data".to_string()))
    }
}
