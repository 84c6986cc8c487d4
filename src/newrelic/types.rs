//! New Relic API Type Definitions
//!
//! Struct definitions for the two upstream surfaces the exporter consumes:
//! the v2 REST API (`/v2/applications.json`) and NerdGraph, New Relic's
//! GraphQL endpoint.
//!
//! # Design Notes
//!
//! - **Optional Fields**: the REST payload omits summary fields freely, so
//!   every summary metric is `Option<f64>`. Absence means "no value this
//!   cycle", never zero.
//! - **Serde Defaults**: collections default to empty so a response without
//!   an `applications` or `entities` array parses as "nothing found".
//!
//! # Endpoints Covered
//!
//! - `GET /v2/applications.json` → [`ApplicationsResponse`], [`Application`]
//! - NerdGraph `entitySearch` → [`EntitySearchData`], [`Entity`]
//! - NerdGraph `deploymentSearch` → [`DeploymentSearchData`], [`Deployment`]

use serde::Deserialize;

/// Response body of `GET /v2/applications.json`.
#[derive(Debug, Deserialize)]
pub struct ApplicationsResponse {
    #[serde(default)]
    pub applications: Vec<Application>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Application {
    pub name: String,
    /// Absent for applications that have not reported recently.
    #[serde(default)]
    pub application_summary: Option<ApplicationSummary>,
}

/// Per-application summary block. Each field may be omitted independently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationSummary {
    pub response_time: Option<f64>,
    pub throughput: Option<f64>,
    pub error_rate: Option<f64>,
    pub apdex_target: Option<f64>,
    pub apdex_score: Option<f64>,
}

/// Generic NerdGraph response envelope. `errors` must be checked before
/// `data` is trusted.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
}

/// `data` shape of the APM entity search query.
#[derive(Debug, Deserialize)]
pub struct EntitySearchData {
    pub actor: EntitySearchActor,
}

#[derive(Debug, Deserialize)]
pub struct EntitySearchActor {
    #[serde(rename = "entitySearch")]
    pub entity_search: EntitySearch,
}

#[derive(Debug, Deserialize)]
pub struct EntitySearch {
    pub results: EntitySearchResults,
}

#[derive(Debug, Deserialize)]
pub struct EntitySearchResults {
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// An APM-domain entity. The guid is opaque; only equality is meaningful.
#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    pub guid: String,
    pub name: String,
}

/// `data` shape of the deployment search query.
#[derive(Debug, Deserialize)]
pub struct DeploymentSearchData {
    pub actor: DeploymentActor,
}

#[derive(Debug, Deserialize)]
pub struct DeploymentActor {
    #[serde(default)]
    pub entities: Vec<EntityDeployments>,
}

#[derive(Debug, Deserialize)]
pub struct EntityDeployments {
    #[serde(rename = "deploymentSearch")]
    #[serde(default)]
    pub deployment_search: Option<DeploymentSearch>,
}

#[derive(Debug, Deserialize)]
pub struct DeploymentSearch {
    #[serde(default)]
    pub results: Vec<Deployment>,
}

/// One deployment event inside the trailing window.
#[derive(Debug, Clone, Deserialize)]
pub struct Deployment {
    #[serde(rename = "entityGuid")]
    pub entity_guid: String,
    pub version: String,
    /// Epoch milliseconds, as reported by NerdGraph.
    pub timestamp: i64,
}
