//! Prometheus Metric Family Model
//!
//! Every scrape rebuilds its metric families from scratch, so instead of a
//! registry of long-lived gauges this module models a family as a plain
//! value: a fixed name/help/label schema plus the samples gathered during
//! the current collection cycle. Deployment samples carry an explicit
//! timestamp, which the high-level `prometheus` gauge API cannot express,
//! so encoding goes through the crate's `proto` types and [`TextEncoder`].
//!
//! # Family Schema
//!
//! Family names, help strings, and label names are fixed at compile time
//! (`&'static str`); only label values and sample values come from upstream
//! data.

use prometheus::proto;
use prometheus::{Encoder, TextEncoder};
use protobuf::RepeatedField;

/// A single gauge sample within a family.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Label values, positionally matching the family's label names.
    pub label_values: Vec<String>,
    pub value: f64,
    /// Explicit sample timestamp in whole seconds since the epoch.
    /// `None` means "scrape time", the Prometheus default.
    pub timestamp_secs: Option<i64>,
}

/// A gauge metric family assembled during one collection cycle.
#[derive(Debug, Clone)]
pub struct MetricFamily {
    name: &'static str,
    help: &'static str,
    label_names: &'static [&'static str],
    samples: Vec<Sample>,
}

impl MetricFamily {
    pub fn gauge(
        name: &'static str,
        help: &'static str,
        label_names: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            help,
            label_names,
            samples: Vec::new(),
        }
    }

    /// Append a sample. `label_values` must match the family's label names
    /// positionally.
    pub fn push_sample(
        &mut self,
        label_values: Vec<String>,
        value: f64,
        timestamp_secs: Option<i64>,
    ) {
        debug_assert_eq!(label_values.len(), self.label_names.len());
        self.samples.push(Sample {
            label_values,
            value,
            timestamp_secs,
        });
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    fn to_proto(&self) -> proto::MetricFamily {
        let metrics: Vec<proto::Metric> = self
            .samples
            .iter()
            .map(|sample| {
                let labels: Vec<proto::LabelPair> = self
                    .label_names
                    .iter()
                    .zip(&sample.label_values)
                    .map(|(name, value)| {
                        let mut pair = proto::LabelPair::default();
                        pair.set_name(name.to_string());
                        pair.set_value(value.clone());
                        pair
                    })
                    .collect();

                let mut gauge = proto::Gauge::default();
                gauge.set_value(sample.value);

                let mut metric = proto::Metric::default();
                metric.set_label(RepeatedField::from_vec(labels));
                metric.set_gauge(gauge);
                if let Some(secs) = sample.timestamp_secs {
                    // The text exposition format takes milliseconds.
                    metric.set_timestamp_ms(secs * 1000);
                }
                metric
            })
            .collect();

        let mut family = proto::MetricFamily::default();
        family.set_name(self.name.to_string());
        family.set_help(self.help.to_string());
        family.set_field_type(proto::MetricType::GAUGE);
        family.set_metric(RepeatedField::from_vec(metrics));
        family
    }
}

/// Render metric families in Prometheus text format.
///
/// Families without samples are omitted from the output; the text encoder
/// rejects them, and a header with no samples carries no information for
/// the scraper anyway.
pub fn encode_text(families: &[MetricFamily]) -> anyhow::Result<String> {
    let proto_families: Vec<proto::MetricFamily> = families
        .iter()
        .filter(|family| !family.samples.is_empty())
        .map(MetricFamily::to_proto)
        .collect();
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&proto_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Content type of the text exposition format, for the `/metrics` response.
pub fn format_type() -> String {
    TextEncoder::new().format_type().to_string()
}
