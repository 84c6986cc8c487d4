//! Tests for metric family assembly and the entity directory.

use newrelic_exporter::collectors::deployment::{
    deployment_family, timestamp_seconds, window_start_millis, DEPLOYMENT_FAMILY,
};
use newrelic_exporter::collectors::summary::{summary_families, SUMMARY_KINDS};
use newrelic_exporter::collectors::{EntityDirectory, GUID_CHUNK_SIZE};
use newrelic_exporter::newrelic::types::{Application, Deployment, Entity};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn application(name: &str, summary: Option<serde_json::Value>) -> Application {
    let mut value = serde_json::json!({ "name": name });
    if let Some(summary) = summary {
        value["application_summary"] = summary;
    }
    serde_json::from_value(value).expect("Failed to build Application")
}

fn entities(count: usize) -> Vec<Entity> {
    (0..count)
        .map(|i| Entity {
            guid: format!("guid-{i:02}"),
            name: format!("app-{i:02}"),
        })
        .collect()
}

#[test]
fn test_summary_families_fixed_order() {
    let families = summary_families(&[]);

    assert_eq!(families.len(), 5);
    for (family, kind) in families.iter().zip(SUMMARY_KINDS) {
        assert_eq!(family.name(), kind.family_name());
        assert!(family.samples().is_empty());
    }
}

#[test]
fn test_summary_sample_per_present_kind() {
    let apps = vec![application(
        "checkout",
        Some(serde_json::json!({ "response_time": 0.12, "throughput": 50.0 })),
    )];

    let families = summary_families(&apps);

    let response_time = &families[0];
    assert_eq!(response_time.name(), "newrelic_application_response_time");
    assert_eq!(response_time.samples().len(), 1);
    assert_eq!(response_time.samples()[0].label_values, vec!["checkout"]);
    assert_eq!(response_time.samples()[0].value, 0.12);
    assert_eq!(response_time.samples()[0].timestamp_secs, None);

    let throughput = &families[1];
    assert_eq!(throughput.samples().len(), 1);
    assert_eq!(throughput.samples()[0].value, 50.0);

    // Missing kinds are skipped, not zeroed
    for family in &families[2..] {
        assert!(
            family.samples().is_empty(),
            "{} should have no samples",
            family.name()
        );
    }
}

#[test]
fn test_summary_skips_application_without_summary_block() {
    let apps = vec![
        application("reporting", None),
        application("checkout", Some(serde_json::json!({ "throughput": 7.5 }))),
    ];

    let families = summary_families(&apps);

    for family in &families {
        for sample in family.samples() {
            assert_ne!(sample.label_values[0], "reporting");
        }
    }
    assert_eq!(families[1].samples().len(), 1);
}

#[test]
fn test_directory_chunking_covers_every_guid_once() {
    let directory = EntityDirectory::from_entities(entities(60));

    let chunks: Vec<&[String]> = directory.guid_chunks(GUID_CHUNK_SIZE).collect();
    assert_eq!(chunks.len(), 3); // ceil(60 / 25)
    assert_eq!(chunks[0].len(), 25);
    assert_eq!(chunks[1].len(), 25);
    assert_eq!(chunks[2].len(), 10);

    let concatenated: Vec<&String> = chunks.into_iter().flatten().collect();
    assert_eq!(concatenated.len(), 60);
    assert_eq!(concatenated[0], "guid-00");
    assert_eq!(concatenated[59], "guid-59");
}

#[test]
fn test_directory_deduplicates_guids() {
    let mut list = entities(2);
    list.push(Entity {
        guid: "guid-00".to_string(),
        name: "renamed".to_string(),
    });

    let directory = EntityDirectory::from_entities(list);

    assert_eq!(directory.len(), 2);
    // First name wins
    assert_eq!(directory.resolve("guid-00"), Some("app-00"));
}

#[test]
fn test_directory_resolve_miss() {
    let directory = EntityDirectory::from_entities(entities(1));
    assert_eq!(directory.resolve("not-there"), None);
}

#[test]
fn test_deployment_timestamp_truncated_not_rounded() {
    assert_eq!(timestamp_seconds(1700000000123), 1700000000);
    assert_eq!(timestamp_seconds(1700000000999), 1700000000);
    assert_eq!(timestamp_seconds(999), 0);
}

#[test]
fn test_deployment_family_assembly() {
    let directory = EntityDirectory::from_entities(vec![Entity {
        guid: "g1".to_string(),
        name: "checkout".to_string(),
    }]);
    let records = vec![Deployment {
        entity_guid: "g1".to_string(),
        version: "v2".to_string(),
        timestamp: 1700000000123,
    }];

    let family = deployment_family(&records, &directory);

    assert_eq!(family.name(), DEPLOYMENT_FAMILY);
    assert_eq!(family.samples().len(), 1);
    let sample = &family.samples()[0];
    assert_eq!(sample.label_values, vec!["checkout", "v2"]);
    assert_eq!(sample.value, 1.0);
    assert_eq!(sample.timestamp_secs, Some(1700000000));
}

#[test]
fn test_deployment_family_skips_unresolved_guid() {
    let directory = EntityDirectory::from_entities(entities(1));
    let records = vec![
        Deployment {
            entity_guid: "guid-00".to_string(),
            version: "v1".to_string(),
            timestamp: 1700000000000,
        },
        Deployment {
            entity_guid: "vanished".to_string(),
            version: "v9".to_string(),
            timestamp: 1700000000000,
        },
    ];

    let family = deployment_family(&records, &directory);

    assert_eq!(family.samples().len(), 1);
    assert_eq!(family.samples()[0].label_values[0], "app-00");
}

#[test]
fn test_window_start_one_hour_before_now() {
    let now = UNIX_EPOCH + Duration::from_millis(1700003600500);
    assert_eq!(window_start_millis(now), 1700000000500);
}

#[test]
fn test_window_start_saturates_near_epoch() {
    let now = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
    assert_eq!(window_start_millis(now), 0);
}
