//! Blob container client

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode, Url};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::storage::auth::SharedKeyCredential;
use crate::storage::connection::StorageAccount;

/// REST API version sent with every request
const STORAGE_API_VERSION: &str = "2021-08-06";

/// MIME type of generated reports
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Destination for rendered reports
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Store `data` under `name`, replacing anything already there
    async fn store(&self, name: &str, data: Vec<u8>) -> Result<()>;
}

/// Client for a single blob container
#[derive(Clone)]
pub struct BlobContainerClient {
    client: Client,
    credential: SharedKeyCredential,
    endpoint: String,
    container: String,
}

impl BlobContainerClient {
    pub fn new(account: &StorageAccount, container: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            credential: SharedKeyCredential::new(
                account.account_name.clone(),
                account.account_key.clone(),
            ),
            endpoint: account.blob_endpoint(),
            container: container.into(),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Create the container unless it already exists.
    ///
    /// Returns `true` when this call created it.
    pub async fn create_if_not_exists(&self) -> Result<bool> {
        let mut url = self.container_url()?;
        url.query_pairs_mut().append_pair("restype", "container");

        let response = self.send_signed(Method::PUT, url, HeaderMap::new(), Vec::new()).await?;
        let status = response.status();

        if status == StatusCode::CREATED {
            info!("Created blob container {}", self.container);
            return Ok(true);
        }

        let code = error_code(&response);
        if status == StatusCode::CONFLICT && code == "ContainerAlreadyExists" {
            debug!("Blob container {} already exists", self.container);
            return Ok(false);
        }

        Err(Error::StorageError {
            status: status.as_u16(),
            code,
        })
    }

    /// Upload `data` as a block blob, overwriting any existing blob
    pub async fn upload_blob(&self, name: &str, data: Vec<u8>, content_type: &str) -> Result<()> {
        let url = self.blob_url(name)?;

        let mut headers = HeaderMap::new();
        headers.insert("x-ms-blob-type", HeaderValue::from_static("BlockBlob"));
        headers.insert(CONTENT_TYPE, header_value(content_type)?);

        let response = self.send_signed(Method::PUT, url, headers, data).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::StorageError {
                status: status.as_u16(),
                code: error_code(&response),
            });
        }

        debug!("Uploaded blob {}/{}", self.container, name);
        Ok(())
    }

    fn container_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            Error::ConfigError(format!("Invalid blob endpoint '{}': {}", self.endpoint, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| Error::ConfigError(format!("Blob endpoint '{}' cannot be a base URL", self.endpoint)))?
            .pop_if_empty()
            .push(&self.container);
        Ok(url)
    }

    fn blob_url(&self, name: &str) -> Result<Url> {
        let mut url = self.container_url()?;
        url.path_segments_mut()
            .map_err(|_| Error::ConfigError(format!("Blob endpoint '{}' cannot be a base URL", self.endpoint)))?
            .push(name);
        Ok(url)
    }

    async fn send_signed(
        &self,
        method: Method,
        url: Url,
        mut headers: HeaderMap,
        body: Vec<u8>,
    ) -> Result<Response> {
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        headers.insert("x-ms-date", header_value(&date)?);
        headers.insert("x-ms-version", HeaderValue::from_static(STORAGE_API_VERSION));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));

        let authorization = self.credential.authorization(&method, &url, &headers)?;
        headers.insert(AUTHORIZATION, header_value(&authorization)?);

        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl ReportStore for BlobContainerClient {
    async fn store(&self, name: &str, data: Vec<u8>) -> Result<()> {
        self.create_if_not_exists().await?;
        self.upload_blob(name, data, DOCX_CONTENT_TYPE).await
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::ConfigError(format!("Invalid header value: {}", e)))
}

fn error_code(response: &Response) -> String {
    response
        .headers()
        .get("x-ms-error-code")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| response.status().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> BlobContainerClient {
        let account = StorageAccount::from_connection_string(&format!(
            "AccountName=testaccount;AccountKey=dGVzdGtleQ==;BlobEndpoint={}",
            server.uri()
        ))
        .unwrap();
        BlobContainerClient::new(&account, "report")
    }

    #[test]
    fn test_blob_url_encodes_name() {
        let account = StorageAccount::from_connection_string(
            "AccountName=testaccount;AccountKey=dGVzdGtleQ==",
        )
        .unwrap();
        let client = BlobContainerClient::new(&account, "report");
        let url = client.blob_url("air travel_20250106100000.docx").unwrap();
        assert_eq!(
            url.as_str(),
            "https://testaccount.blob.core.windows.net/report/air%20travel_20250106100000.docx"
        );
        assert_eq!(client.container(), "report");
    }

    #[tokio::test]
    async fn test_create_container_when_missing() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/report"))
            .and(query_param("restype", "container"))
            .and(header_exists("authorization"))
            .and(header("x-ms-version", STORAGE_API_VERSION))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server).create_if_not_exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_existing_container_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/report"))
            .respond_with(
                ResponseTemplate::new(409).insert_header("x-ms-error-code", "ContainerAlreadyExists"),
            )
            .mount(&server)
            .await;

        assert!(!client_for(&server).create_if_not_exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_container_conflict_other_than_exists_fails() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/report"))
            .respond_with(
                ResponseTemplate::new(409).insert_header("x-ms-error-code", "ContainerBeingDeleted"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).create_if_not_exists().await.unwrap_err();
        match err {
            Error::StorageError { status, code } => {
                assert_eq!(status, 409);
                assert_eq!(code, "ContainerBeingDeleted");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_store_creates_container_then_uploads() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/report"))
            .and(query_param("restype", "container"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/report/car_20250106100000.docx"))
            .and(header("x-ms-blob-type", "BlockBlob"))
            .and(header("content-type", DOCX_CONTENT_TYPE))
            .and(header_exists("x-ms-date"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .store("car_20250106100000.docx", b"report bytes".to_vec())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/report/car.docx"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ms-error-code", "AuthenticationFailed"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .upload_blob("car.docx", vec![1, 2, 3], DOCX_CONTENT_TYPE)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("AuthenticationFailed"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let account = StorageAccount::from_connection_string(
            "AccountName=testaccount;AccountKey=dGVzdGtleQ==;BlobEndpoint=http://127.0.0.1:1",
        )
        .unwrap();
        let client = BlobContainerClient::new(&account, "report");
        let err = client.store("car.docx", vec![]).await.unwrap_err();
        assert!(matches!(err, Error::HttpError(_)));
    }
}
