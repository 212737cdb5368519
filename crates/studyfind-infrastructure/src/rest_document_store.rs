//! Firestore-compatible REST DocumentStore implementation.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use uuid::Uuid;

use studyfind_core::config::RestStoreConfig;
use studyfind_core::error::{Result, StudyError};
use studyfind_core::store::{CollectionPath, Document, DocumentStore, Fields};

use crate::firestore_codec::{decode_run_query, encode_fields};

/// Document store talking to the Firestore v1 REST API.
///
/// - `query_ordered` → `POST {parent}:runQuery` with an ascending `orderBy`
/// - `add_with_server_timestamp` → `POST documents:commit` with a
///   `REQUEST_TIME` field transform, so the timestamp comes from the server
/// - `delete` → `DELETE` with an `exists=true` precondition so a missing
///   document is reported instead of silently succeeding
pub struct RestDocumentStore {
    client: reqwest::Client,
    endpoint: String,
    database_path: String,
    id_token: Option<String>,
}

impl RestDocumentStore {
    pub fn new(config: &RestStoreConfig) -> Result<Self> {
        if config.project_id.trim().is_empty() {
            return Err(StudyError::config("store.rest.project_id must not be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StudyError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            database_path: format!(
                "projects/{}/databases/{}",
                config.project_id, config.database
            ),
            id_token: config.id_token.clone(),
        })
    }

    /// `projects/{p}/databases/{d}/documents/{relative}`
    fn resource_name(&self, relative: &str) -> String {
        format!("{}/documents/{}", self.database_path, relative)
    }

    fn run_query_url(&self, collection: &CollectionPath) -> String {
        match collection.parent() {
            Some(parent) => format!("{}/{}:runQuery", self.endpoint, self.resource_name(parent)),
            None => format!("{}/{}/documents:runQuery", self.endpoint, self.database_path),
        }
    }

    fn commit_url(&self) -> String {
        format!("{}/{}/documents:commit", self.endpoint, self.database_path)
    }

    fn document_url(&self, collection: &CollectionPath, id: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint,
            self.resource_name(&format!("{}/{}", collection, id))
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.id_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, ctx: &str) -> Result<Response> {
        let res = builder.send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        if is_missing_document(status, &body) {
            return Err(StudyError::not_found("document", ctx.to_string()));
        }
        Err(StudyError::unavailable(format!("{ctx} ({status}): {body}")))
    }
}

fn is_missing_document(status: StatusCode, body: &str) -> bool {
    status == StatusCode::NOT_FOUND
        || (status == StatusCode::BAD_REQUEST && body.contains("FAILED_PRECONDITION"))
}

pub(crate) fn run_query_body(collection: &CollectionPath, order_by: &str) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection.collection_id() }],
            "orderBy": [{
                "field": { "fieldPath": order_by },
                "direction": "ASCENDING"
            }]
        }
    })
}

pub(crate) fn commit_body(document_name: &str, fields: &Fields, timestamp_field: &str) -> Value {
    json!({
        "writes": [{
            "update": {
                "name": document_name,
                "fields": encode_fields(fields)
            },
            "updateTransforms": [{
                "fieldPath": timestamp_field,
                "setToServerValue": "REQUEST_TIME"
            }],
            "currentDocument": { "exists": false }
        }]
    })
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn query_ordered(
        &self,
        collection: &CollectionPath,
        order_by: &str,
    ) -> Result<Vec<Document>> {
        let url = self.run_query_url(collection);
        let res = self
            .send(
                self.request(Method::POST, &url)
                    .json(&run_query_body(collection, order_by)),
                "runQuery",
            )
            .await?;

        let payload: Value = res.json().await?;
        Ok(decode_run_query(&payload)
            .into_iter()
            .filter(|doc| doc.timestamp(order_by).is_some())
            .collect())
    }

    async fn add_with_server_timestamp(
        &self,
        collection: &CollectionPath,
        fields: Fields,
        timestamp_field: &str,
    ) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        let name = self.resource_name(&format!("{}/{}", collection, id));

        self.send(
            self.request(Method::POST, &self.commit_url())
                .json(&commit_body(&name, &fields, timestamp_field)),
            "commit",
        )
        .await?;

        Ok(id)
    }

    async fn delete(&self, collection: &CollectionPath, id: &str) -> Result<()> {
        let url = self.document_url(collection, id);
        self.send(
            self.request(Method::DELETE, &url)
                .query(&[("currentDocument.exists", "true")]),
            id,
        )
        .await?;
        Ok(())
    }
}
