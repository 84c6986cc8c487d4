//! New Relic Prometheus Exporter
//!
//! Re-publishes New Relic APM data - per-application performance summaries
//! and recent deployment events - as Prometheus metrics.
//!
//! # Overview
//!
//! Every scrape of `/metrics` runs one collection cycle: the exporter
//! queries the New Relic v2 REST API for application summaries, rebuilds
//! the APM entity directory via NerdGraph, then looks up deployments from
//! the last hour in guid chunks. Nothing persists between cycles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    HTTPS (REST +     ┌──────────────┐
//! │  New Relic  │ ◄──────────────────► │   Exporter   │
//! │     API     │      NerdGraph)      │              │
//! └─────────────┘                      │ ┌──────────┐ │      HTTP      ┌────────────┐
//!                                      │ │  Client  │ │ ◄────────────► │ Prometheus │
//!                                      │ └──────────┘ │   /metrics     └────────────┘
//!                                      │ ┌──────────┐ │
//!                                      │ │Collectors│ │
//!                                      │ └──────────┘ │
//!                                      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`newrelic`] - REST/NerdGraph client and API type definitions
//! - [`collectors`] - collection pipeline and metric family assembly
//! - [`metrics`] - metric family model and text encoding
//! - [`server`] - HTTP server
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use newrelic_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Operational Notes
//!
//! Each scrape costs one REST call plus `1 + ceil(entities / 25)` NerdGraph
//! calls. Concurrent scrapes run independent cycles and multiply that load
//! against New Relic's rate limits; scrape from a single Prometheus server.

pub mod collectors;
pub mod config;
pub mod error;
pub mod metrics;
pub mod newrelic;
pub mod server;
