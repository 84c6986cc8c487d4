//! Application Summary Collector
//!
//! Turns `/v2/applications.json` into the five summary gauge families,
//! labeled by application name:
//!
//! - `newrelic_application_response_time`
//! - `newrelic_application_throughput`
//! - `newrelic_application_error_rate`
//! - `newrelic_application_apdex_target`
//! - `newrelic_application_apdex_score`
//!
//! A sample exists only when the application carries a summary block and
//! the block carries that field. Missing fields are skipped, never zeroed.

use crate::error::Result;
use crate::metrics::MetricFamily;
use crate::newrelic::types::{Application, ApplicationSummary};
use crate::newrelic::NewRelicClient;
use tracing::info;

/// The five summary metric kinds, in emission order.
pub const SUMMARY_KINDS: [SummaryKind; 5] = [
    SummaryKind::ResponseTime,
    SummaryKind::Throughput,
    SummaryKind::ErrorRate,
    SummaryKind::ApdexTarget,
    SummaryKind::ApdexScore,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    ResponseTime,
    Throughput,
    ErrorRate,
    ApdexTarget,
    ApdexScore,
}

impl SummaryKind {
    pub fn family_name(self) -> &'static str {
        match self {
            Self::ResponseTime => "newrelic_application_response_time",
            Self::Throughput => "newrelic_application_throughput",
            Self::ErrorRate => "newrelic_application_error_rate",
            Self::ApdexTarget => "newrelic_application_apdex_target",
            Self::ApdexScore => "newrelic_application_apdex_score",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Self::ResponseTime => "New Relic application response time in seconds",
            Self::Throughput => "New Relic application throughput",
            Self::ErrorRate => "New Relic application error rate",
            Self::ApdexTarget => "New Relic application apdex target",
            Self::ApdexScore => "New Relic application apdex score",
        }
    }

    fn value_in(self, summary: &ApplicationSummary) -> Option<f64> {
        match self {
            Self::ResponseTime => summary.response_time,
            Self::Throughput => summary.throughput,
            Self::ErrorRate => summary.error_rate,
            Self::ApdexTarget => summary.apdex_target,
            Self::ApdexScore => summary.apdex_score,
        }
    }
}

/// Query the summary endpoint and build the five families.
///
/// Transport failures propagate; there is no recovered-error path on this
/// stage.
pub async fn collect_summary_metrics(client: &NewRelicClient) -> Result<Vec<MetricFamily>> {
    let applications = client.query_application_summaries().await?;
    info!(
        applications = applications.len(),
        "collected application summaries"
    );
    Ok(summary_families(&applications))
}

/// Assemble the five summary families from parsed applications, in the
/// fixed kind order. Families may be empty.
pub fn summary_families(applications: &[Application]) -> Vec<MetricFamily> {
    SUMMARY_KINDS
        .iter()
        .map(|kind| {
            let mut family = MetricFamily::gauge(kind.family_name(), kind.help(), &["appname"]);
            for application in applications {
                let Some(summary) = &application.application_summary else {
                    continue;
                };
                if let Some(value) = kind.value_in(summary) {
                    family.push_sample(vec![application.name.clone()], value, None);
                }
            }
            family
        })
        .collect()
}
