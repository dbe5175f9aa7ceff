//! Generic per-collection document-store client.
//!
//! Documents are schemaless JSON records identified by store-assigned
//! string IDs, addressed as `{base_url}/{collection}` and
//! `{base_url}/{collection}/{id}`.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use lector_core::models::config::StoreConfig;

use crate::error::{Result, StoreError};

/// A schemaless document with its store-assigned ID.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(flatten)]
    pub data: Value,
}

impl Document {
    /// Decode the document into a typed entity, carrying the ID along.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let mut object = self.data.clone();
        if let Some(map) = object.as_object_mut() {
            map.insert("id".to_string(), Value::String(self.id.clone()));
        }
        Ok(serde_json::from_value(object)?)
    }
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

/// Client for the remote document store.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    http: reqwest::Client,
    base_url: String,
}

impl DocumentStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &config.api_key {
            if let Ok(mut value) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            } else {
                warn!("API key contains invalid header characters; sending no credentials");
            }
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }

    async fn fail(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        StoreError::Status { status, message }
    }

    /// List every document in a collection.
    pub async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let response = self.http.get(self.collection_url(collection)).send().await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        let documents: Vec<Document> = response.json().await?;
        debug!(collection, count = documents.len(), "listed documents");
        Ok(documents)
    }

    /// Fetch a single document by ID.
    pub async fn get(&self, collection: &str, id: &str) -> Result<Document> {
        let response = self
            .http
            .get(self.document_url(collection, id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        Ok(response.json().await?)
    }

    /// Create a document; the store assigns and returns its ID.
    pub async fn create(&self, collection: &str, data: &Value) -> Result<String> {
        let response = self
            .http
            .post(self.collection_url(collection))
            .json(data)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        let created: CreatedResponse = response.json().await?;
        debug!(collection, id = %created.id, "created document");
        Ok(created.id)
    }

    /// Update an existing document by ID.
    pub async fn update(&self, collection: &str, id: &str, data: &Value) -> Result<()> {
        let response = self
            .http
            .patch(self.document_url(collection, id))
            .json(data)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        debug!(collection, id, "updated document");
        Ok(())
    }

    /// Delete a document by ID.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.document_url(collection, id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }
        debug!(collection, id, "deleted document");
        Ok(())
    }

    /// Resolve a list of referenced IDs with concurrent reads.
    ///
    /// Reads fan out and land in disjoint result slots; the call fails if
    /// any single read fails.
    pub async fn get_many(&self, collection: &str, ids: &[String]) -> Result<Vec<Document>> {
        futures::future::try_join_all(ids.iter().map(|id| self.get(collection, id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn store(server: &MockServer) -> DocumentStore {
        let config = StoreConfig {
            base_url: server.uri(),
            ..StoreConfig::default()
        };
        DocumentStore::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_list_documents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/municipios"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "m1", "denominacion": "Santa Cruz Amilpas" },
                { "id": "m2", "denominacion": "Santa María Huatulco" },
            ])))
            .mount(&server)
            .await;

        let documents = store(&server).await.list("municipios").await.unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id, "m1");
        assert_eq!(documents[0].data["denominacion"], "Santa Cruz Amilpas");
    }

    #[tokio::test]
    async fn test_create_returns_assigned_id() {
        let server = MockServer::start().await;
        let payload = json!({ "descripcion": "Bacheo de calles" });
        Mock::given(method("POST"))
            .and(path("/solicitudes"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "s9" })))
            .mount(&server)
            .await;

        let id = store(&server)
            .await
            .create("solicitudes", &payload)
            .await
            .unwrap();
        assert_eq!(id, "s9");
    }

    #[tokio::test]
    async fn test_get_missing_document_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vehiculos/v404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = store(&server).await.get("vehiculos", "v404").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_server_error_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/empresas/e1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = store(&server).await.delete("empresas", "e1").await.unwrap_err();
        match err {
            StoreError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_many_fans_out() {
        let server = MockServer::start().await;
        for id in ["v1", "v2", "v3"] {
            Mock::given(method("GET"))
                .and(path(format!("/vehiculos/{id}")))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!({ "id": id, "placa": id })),
                )
                .mount(&server)
                .await;
        }

        let ids: Vec<String> = ["v1", "v2", "v3"].map(String::from).to_vec();
        let documents = store(&server).await.get_many("vehiculos", &ids).await.unwrap();

        assert_eq!(documents.len(), 3);
        // Results land in the same slots the IDs came from.
        for (id, document) in ids.iter().zip(&documents) {
            assert_eq!(&document.id, id);
        }
    }
}
