use super::PostStore;
use crate::config::FirestoreSettings;
use crate::error::{BlogError, Result};
use crate::model::{NewPost, RawPost};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use url::Url;

const TITLE_FIELD: &str = "title";
const CONTENT_FIELD: &str = "content";
const CREATED_AT_FIELD: &str = "createdAt";

/// Cloud Firestore, through the v1 REST API.
///
/// Works against the production endpoint or the local emulator, depending on
/// `base_url`. No request timeout is set: a stalled call blocks the action
/// that made it until the server answers.
pub struct FirestoreStore {
    client: Client,
    endpoints: Endpoints,
}

/// REST resource URLs for one collection.
struct Endpoints {
    documents_url: Url,
    collection: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RunQueryRow {
    #[serde(default)]
    document: Option<Document>,
}

impl FirestoreStore {
    pub fn new(settings: &FirestoreSettings) -> Result<Self> {
        // reqwest is built without a default crypto provider. Installing fails
        // harmlessly when one is already set.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let client = Client::builder()
            .user_agent(concat!("mdblog/", env!("CARGO_PKG_VERSION")))
            .timeout(None::<std::time::Duration>)
            .build()?;

        Self::with_client(client, settings)
    }

    pub fn with_client(client: Client, settings: &FirestoreSettings) -> Result<Self> {
        Ok(Self {
            client,
            endpoints: Endpoints::new(settings, settings.resolved_api_key())?,
        })
    }
}

impl Endpoints {
    fn new(settings: &FirestoreSettings, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            documents_url: documents_url(settings)?,
            collection: settings.collection.clone(),
            api_key,
        })
    }

    fn build(&self, method_suffix: Option<&str>, segments: &[&str]) -> Result<Url> {
        let mut url = self.documents_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| BlogError::Config("Firestore base_url cannot be a base".to_string()))?;
            if let Some(suffix) = method_suffix {
                // `documents:runQuery` is a method on the documents resource
                path.pop();
                path.push(&format!("documents{}", suffix));
            }
            path.extend(segments);
        }
        if let Some(ref key) = self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    fn run_query(&self) -> Result<Url> {
        self.build(Some(":runQuery"), &[])
    }

    fn collection(&self) -> Result<Url> {
        self.build(None, &[self.collection.as_str()])
    }

    fn document(&self, id: &str) -> Result<Url> {
        self.build(None, &[self.collection.as_str(), id])
    }
}

/// `{base}/projects/{project}/databases/{database}/documents`
fn documents_url(settings: &FirestoreSettings) -> Result<Url> {
    let mut url = Url::parse(&settings.base_url)
        .map_err(|e| BlogError::Config(format!("Invalid Firestore base_url: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| BlogError::Config("Firestore base_url cannot be a base".to_string()))?
        .pop_if_empty()
        .extend([
            "projects",
            settings.project_id.as_str(),
            "databases",
            settings.database.as_str(),
            "documents",
        ]);
    Ok(url)
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(BlogError::StoreUnavailable(format!(
        "Firestore returned {}: {}",
        status,
        body.trim()
    )))
}

fn encode_fields(post: &NewPost) -> Value {
    json!({
        "fields": {
            TITLE_FIELD: { "stringValue": post.title },
            CONTENT_FIELD: { "stringValue": post.content },
            CREATED_AT_FIELD: {
                "timestampValue": post.created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
            },
        }
    })
}

fn string_field(fields: &HashMap<String, Value>, name: &str) -> String {
    fields
        .get(name)
        .and_then(|v| v.get("stringValue"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Only a `timestampValue` decodes; any other value type counts as missing.
fn timestamp_field(fields: &HashMap<String, Value>, name: &str) -> Option<DateTime<Utc>> {
    fields
        .get(name)
        .and_then(|v| v.get("timestampValue"))
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn decode_document(document: Document) -> RawPost {
    let id = document
        .name
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    RawPost {
        id,
        title: string_field(&document.fields, TITLE_FIELD),
        content: string_field(&document.fields, CONTENT_FIELD),
        created_at: timestamp_field(&document.fields, CREATED_AT_FIELD),
    }
}

fn decode_run_query(rows: Vec<RunQueryRow>) -> Vec<RawPost> {
    rows.into_iter()
        .filter_map(|row| row.document)
        .map(decode_document)
        .collect()
}

impl PostStore for FirestoreStore {
    fn query_newest_first(&self) -> Result<Vec<RawPost>> {
        let url = self.endpoints.run_query()?;
        tracing::debug!(collection = %self.endpoints.collection, "Querying Firestore");

        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.endpoints.collection }],
                "orderBy": [{
                    "field": { "fieldPath": CREATED_AT_FIELD },
                    "direction": "DESCENDING",
                }],
            }
        });

        let response = check_status(self.client.post(url).json(&body).send()?)?;
        let rows: Vec<RunQueryRow> = response.json()?;
        Ok(decode_run_query(rows))
    }

    fn insert(&self, post: &NewPost) -> Result<String> {
        let url = self.endpoints.collection()?;
        let response = check_status(self.client.post(url).json(&encode_fields(post)).send()?)?;
        let document: Document = response.json()?;
        let raw = decode_document(document);
        if raw.id.is_empty() {
            return Err(BlogError::StoreUnavailable(
                "Firestore response carried no document name".to_string(),
            ));
        }
        Ok(raw.id)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let url = self.endpoints.document(id)?;
        check_status(self.client.delete(url).send()?)?;
        Ok(())
    }
}
