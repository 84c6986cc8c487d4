use newrelic_exporter::newrelic::types::*;
use serde_json::json;

#[test]
fn test_deserialize_application_with_full_summary() {
    let json = json!({
        "name": "checkout",
        "application_summary": {
            "response_time": 0.12,
            "throughput": 50.0,
            "error_rate": 0.01,
            "apdex_target": 0.5,
            "apdex_score": 0.97
        }
    });

    let app: Application = serde_json::from_value(json).expect("Failed to parse Application");
    assert_eq!(app.name, "checkout");
    let summary = app.application_summary.expect("summary should be present");
    assert_eq!(summary.response_time, Some(0.12));
    assert_eq!(summary.apdex_score, Some(0.97));
}

#[test]
fn test_deserialize_application_with_partial_summary() {
    // Missing fields stay None rather than defaulting to zero
    let json = json!({
        "name": "checkout",
        "application_summary": {
            "response_time": 0.12,
            "throughput": 50.0
        }
    });

    let app: Application = serde_json::from_value(json).expect("Failed to parse Application");
    let summary = app.application_summary.expect("summary should be present");
    assert_eq!(summary.response_time, Some(0.12));
    assert_eq!(summary.throughput, Some(50.0));
    assert_eq!(summary.error_rate, None);
    assert_eq!(summary.apdex_target, None);
    assert_eq!(summary.apdex_score, None);
}

#[test]
fn test_deserialize_application_without_summary() {
    let json = json!({ "name": "idle-app" });

    let app: Application = serde_json::from_value(json).expect("Failed to parse Application");
    assert!(app.application_summary.is_none());
}

#[test]
fn test_deserialize_applications_response_without_array() {
    // An empty body still parses; the applications list defaults to empty
    let response: ApplicationsResponse =
        serde_json::from_value(json!({})).expect("Failed to parse response");
    assert!(response.applications.is_empty());
}

#[test]
fn test_deserialize_entity_search_response() {
    let json = json!({
        "data": {
            "actor": {
                "entitySearch": {
                    "results": {
                        "entities": [
                            { "name": "checkout", "guid": "g1" },
                            { "name": "billing", "guid": "g2" }
                        ]
                    }
                }
            }
        }
    });

    let response: GraphQlResponse<EntitySearchData> =
        serde_json::from_value(json).expect("Failed to parse entity search");
    assert!(response.errors.is_empty());
    let entities = response.data.unwrap().actor.entity_search.results.entities;
    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].guid, "g1");
    assert_eq!(entities[1].name, "billing");
}

#[test]
fn test_deserialize_graphql_error_envelope() {
    let json = json!({
        "errors": [ { "message": "NRQL timeout" } ]
    });

    let response: GraphQlResponse<EntitySearchData> =
        serde_json::from_value(json).expect("Failed to parse error envelope");
    assert!(response.data.is_none());
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "NRQL timeout");
}

#[test]
fn test_deserialize_deployment_search_response() {
    let json = json!({
        "data": {
            "actor": {
                "entities": [
                    {
                        "deploymentSearch": {
                            "results": [
                                {
                                    "version": "v2",
                                    "timestamp": 1700000000123i64,
                                    "entityGuid": "g1"
                                }
                            ]
                        }
                    },
                    { "deploymentSearch": { "results": [] } }
                ]
            }
        }
    });

    let response: GraphQlResponse<DeploymentSearchData> =
        serde_json::from_value(json).expect("Failed to parse deployment search");
    let entities = response.data.unwrap().actor.entities;
    assert_eq!(entities.len(), 2);
    let results = &entities[0].deployment_search.as_ref().unwrap().results;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entity_guid, "g1");
    assert_eq!(results[0].version, "v2");
    assert_eq!(results[0].timestamp, 1700000000123);
}
