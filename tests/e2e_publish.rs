//! End-to-end tests for export and publishing: build the fixture network,
//! serialize it, and push it through `MemoryService`.

mod common;

use common::*;
use defence_network::export::{dangling_endpoints, network_document, write_json};
use defence_network::model::columns::*;
use defence_network::upload::NetworkService;
use defence_network::{
    build_national_model, publish, Error, MemoryService, ModelConfig, PublishOutcome, PublishRequest, Value,
};
use pretty_assertions::assert_eq;

fn request(name: &str) -> PublishRequest {
    let network = build_national_model(&workbook(), &ModelConfig::default()).unwrap();
    PublishRequest {
        name: name.into(),
        description: "National defence capability ecosystem".into(),
        directed: true,
        document: network_document(&network).unwrap(),
    }
}

#[test]
fn test_document_matches_network() {
    let network = build_national_model(&workbook(), &ModelConfig::default()).unwrap();
    let doc = network_document(&network).unwrap();

    assert_eq!(doc.nodes.len(), network.nodes.len());
    assert_eq!(doc.edges.len(), network.edges.len());
    assert_eq!(doc.edges.iter().map(|e| e.id).collect::<Vec<_>>(), (0..doc.edges.len()).collect::<Vec<_>>());
    assert!(dangling_endpoints(&doc).is_empty());

    let bae = doc.nodes.iter().find(|n| n.id == Value::from("BAE")).unwrap();
    assert_eq!(bae.attributes.get(NODE_TYPE), &Value::from("Prime Contractor"));
}

#[test]
fn test_json_file_round_trips_through_serde() {
    let network = build_national_model(&workbook(), &ModelConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("network.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write_json(&network, &mut file).unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["nodes"].as_array().unwrap().len(), 31);
    assert_eq!(json["edges"][36]["id"], 36);
    assert_eq!(json["nodes"][0]["id"], "Maritime");
    assert_eq!(json["nodes"][0]["attributes"]["Defence Overview Label"], "Maritime");
}

#[test]
fn test_buffered_json_is_complete_before_drop() {
    let network = build_national_model(&workbook(), &ModelConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("network.json");
    let mut writer = std::io::BufWriter::new(std::fs::File::create(&path).unwrap());
    write_json(&network, &mut writer).unwrap();

    // writer still alive: everything must already be on disk
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["edges"].as_array().unwrap().len(), 37);
    drop(writer);
}

#[tokio::test]
async fn test_publish_creates_then_updates() {
    let service = MemoryService::new();

    let created = publish(&service, &request("National Defence")).await.unwrap();
    let PublishOutcome::Created(summary) = created else { panic!("expected create, got {created:?}") };

    let mut second = request("National Defence");
    second.description = "refreshed".into();
    second.directed = false;
    let updated = publish(&service, &second).await.unwrap();
    assert_eq!(updated, PublishOutcome::Updated(summary.clone()));

    let stored = service.get(&summary.id).unwrap();
    assert_eq!(stored.description, "refreshed");
    // direction is fixed at creation
    assert!(stored.directed);
    assert_eq!(stored.document.nodes.len(), 31);
    assert_eq!(service.list_networks().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_publish_leaves_other_networks_alone() {
    let service = MemoryService::new();
    publish(&service, &request("Other")).await.unwrap();
    let outcome = publish(&service, &request("National Defence")).await.unwrap();
    assert!(matches!(outcome, PublishOutcome::Created(_)));
    assert_eq!(service.networks().len(), 2);
}

#[tokio::test]
async fn test_publish_failure_is_upload_conflict() {
    let service = MemoryService::failing("401 Unauthorized");
    let err = publish(&service, &request("National Defence")).await.unwrap_err();
    assert!(matches!(err, Error::UploadConflict(_)));
}
