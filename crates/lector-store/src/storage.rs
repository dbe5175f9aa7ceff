//! Path-addressed object storage and the auxiliary docgen endpoint.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use lector_core::models::config::StoreConfig;

use crate::error::{Result, StoreError};

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// Client for the path-addressed blob storage.
///
/// Used for municipality/company images and letterhead templates; an
/// upload returns the blob's publicly-fetchable URL.
#[derive(Debug, Clone)]
pub struct ObjectStorage {
    http: reqwest::Client,
    storage_url: String,
}

impl ObjectStorage {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            storage_url: config.storage_url.trim_end_matches('/').to_string(),
        })
    }

    /// Upload a blob under `path` and return its download URL.
    pub async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let url = format!("{}/{}", self.storage_url, path.trim_start_matches('/'));
        let response = self
            .http
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, message });
        }

        let uploaded: UploadResponse = response.json().await?;
        debug!(path, url = %uploaded.url, "uploaded blob");
        Ok(uploaded.url)
    }
}

/// Client for the auxiliary `generate-docx` endpoint.
///
/// The endpoint is an opaque external collaborator: it takes a letterhead
/// URL plus request fields as query parameters and answers with the
/// populated document bytes.
#[derive(Debug, Clone)]
pub struct DocgenEndpoint {
    http: reqwest::Client,
    docgen_url: String,
}

impl DocgenEndpoint {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            docgen_url: config.docgen_url.clone(),
        })
    }

    /// Fetch a populated document for the given letterhead and fields.
    pub async fn generate(
        &self,
        letterhead_url: &str,
        fields: &[(String, String)],
    ) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(&self.docgen_url)
            .query(&[("letterhead", letterhead_url)])
            .query(fields)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, message });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer) -> StoreConfig {
        StoreConfig {
            storage_url: format!("{}/storage", server.uri()),
            docgen_url: format!("{}/generate-docx", server.uri()),
            ..StoreConfig::default()
        }
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/storage/empresas/e1/logo.png"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "url": "https://cdn.example.com/empresas/e1/logo.png"
            })))
            .mount(&server)
            .await;

        let storage = ObjectStorage::new(&config(&server)).unwrap();
        let url = storage
            .upload("empresas/e1/logo.png", vec![0x89, 0x50], "image/png")
            .await
            .unwrap();
        assert_eq!(url, "https://cdn.example.com/empresas/e1/logo.png");
    }

    #[tokio::test]
    async fn test_generate_docx_passes_query_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/generate-docx"))
            .and(query_param("letterhead", "https://cdn.example.com/hoja.docx"))
            .and(query_param("solicitante", "Tesorería"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04".to_vec()))
            .mount(&server)
            .await;

        let docgen = DocgenEndpoint::new(&config(&server)).unwrap();
        let bytes = docgen
            .generate(
                "https://cdn.example.com/hoja.docx",
                &[("solicitante".to_string(), "Tesorería".to_string())],
            )
            .await
            .unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
