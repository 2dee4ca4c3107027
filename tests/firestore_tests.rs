use chrono::{TimeZone, Utc};
use mdblog::config::FirestoreSettings;
use mdblog::error::BlogError;
use mdblog::model::NewPost;
use mdblog::storage::{FirestoreStore, PostStore};
use mockito::{Matcher, Server};
use serde_json::json;

const DOCUMENTS: &str = "/v1/projects/demo-blog/databases/(default)/documents";

fn store(server: &Server) -> FirestoreStore {
    let _ = rustls::crypto::ring::default_provider().install_default();
    let settings = FirestoreSettings {
        project_id: "demo-blog".to_string(),
        base_url: format!("{}/v1", server.url()),
        ..Default::default()
    };
    let client = reqwest::blocking::Client::new();
    FirestoreStore::with_client(client, &settings).unwrap()
}

#[test]
fn test_query_sends_descending_order_and_decodes_rows() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", format!("{}:runQuery", DOCUMENTS).as_str())
        .match_body(Matcher::PartialJson(json!({
            "structuredQuery": {
                "from": [{ "collectionId": "posts" }],
                "orderBy": [{
                    "field": { "fieldPath": "createdAt" },
                    "direction": "DESCENDING",
                }],
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {
                    "document": {
                        "name": "projects/demo-blog/databases/(default)/documents/posts/newer",
                        "fields": {
                            "title": { "stringValue": "Newer" },
                            "content": { "stringValue": "# Hi" },
                            "createdAt": { "timestampValue": "2024-02-01T08:00:00Z" }
                        }
                    },
                    "readTime": "2024-02-02T00:00:00Z"
                },
                {
                    "document": {
                        "name": "projects/demo-blog/databases/(default)/documents/posts/older",
                        "fields": {
                            "title": { "stringValue": "Older" },
                            "content": { "stringValue": "text" },
                            "createdAt": { "timestampValue": "2024-01-01T08:00:00Z" }
                        }
                    },
                    "readTime": "2024-02-02T00:00:00Z"
                }
            ])
            .to_string(),
        )
        .create();

    let records = store(&server).query_newest_first().unwrap();

    mock.assert();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["newer", "older"]);
    assert_eq!(records[0].title, "Newer");
    assert_eq!(records[0].content, "# Hi");
    assert_eq!(
        records[0].created_at,
        Some(Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap())
    );
}

#[test]
fn test_query_of_empty_collection() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", format!("{}:runQuery", DOCUMENTS).as_str())
        .with_status(200)
        .with_body(r#"[{"readTime": "2024-02-02T00:00:00Z"}]"#)
        .create();

    let records = store(&server).query_newest_first().unwrap();

    mock.assert();
    assert!(records.is_empty());
}

#[test]
fn test_insert_returns_id_from_document_name() {
    let mut server = Server::new();
    let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    let mock = server
        .mock("POST", format!("{}/posts", DOCUMENTS).as_str())
        .match_body(Matcher::PartialJson(json!({
            "fields": {
                "title": { "stringValue": "Hello" },
                "content": { "stringValue": "# Hi" },
                "createdAt": { "timestampValue": "2024-01-15T10:30:00.000000Z" }
            }
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "name": "projects/demo-blog/databases/(default)/documents/posts/Xk29aPq0",
                "fields": {
                    "title": { "stringValue": "Hello" },
                    "content": { "stringValue": "# Hi" },
                    "createdAt": { "timestampValue": "2024-01-15T10:30:00Z" }
                },
                "createTime": "2024-01-15T10:30:00.100000Z",
                "updateTime": "2024-01-15T10:30:00.100000Z"
            })
            .to_string(),
        )
        .create();

    let id = store(&server)
        .insert(&NewPost::new("Hello", "# Hi").with_created_at(at))
        .unwrap();

    mock.assert();
    assert_eq!(id, "Xk29aPq0");
}

#[test]
fn test_insert_without_document_name_fails() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", format!("{}/posts", DOCUMENTS).as_str())
        .with_status(200)
        .with_body(r#"{"name": ""}"#)
        .create();

    let result = store(&server).insert(&NewPost::new("Hello", "# Hi"));

    assert!(matches!(result, Err(BlogError::StoreUnavailable(_))));
}

#[test]
fn test_delete_targets_document_path() {
    let mut server = Server::new();
    let mock = server
        .mock("DELETE", format!("{}/posts/Xk29aPq0", DOCUMENTS).as_str())
        .with_status(200)
        .with_body("{}")
        .create();

    store(&server).delete("Xk29aPq0").unwrap();

    mock.assert();
}

#[test]
fn test_unavailable_service_maps_to_store_unavailable() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", format!("{}:runQuery", DOCUMENTS).as_str())
        .with_status(503)
        .with_body("backend warming up\n")
        .create();

    let err = store(&server).query_newest_first().unwrap_err();

    match err {
        BlogError::StoreUnavailable(message) => {
            assert!(message.contains("503"), "message: {}", message);
            assert!(message.contains("backend warming up"), "message: {}", message);
        }
        other => panic!("expected StoreUnavailable, got {:?}", other),
    }
}

#[test]
fn test_failed_delete_is_reported() {
    let mut server = Server::new();
    let _mock = server
        .mock("DELETE", format!("{}/posts/gone", DOCUMENTS).as_str())
        .with_status(403)
        .with_body(r#"{"error": {"status": "PERMISSION_DENIED"}}"#)
        .create();

    let err = store(&server).delete("gone").unwrap_err();

    assert!(err.to_string().contains("PERMISSION_DENIED"));
}
