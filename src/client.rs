//! File Hub REST API Client
//!
//! HTTP client for the File Hub backend's `/files/` endpoints.

use async_trait::async_trait;
use reqwest::{multipart, Client, Response, Url};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::filters::SearchFilters;
use crate::hub::{FileApi, UploadPayload};
use crate::model::{DeleteOutcome, FileRecord, Paginated, StorageStats, UploadResult};

/// File Hub REST API client
pub struct FileHubClient {
    client: Client,
    base: Url,
}

impl FileHubClient {
    /// Create a new client for the configured base URL
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        // A trailing slash makes `Url::join` append rather than replace
        let base = Url::parse(&format!("{}/", config.base_url.trim_end_matches('/')))
            .map_err(|e| ClientError::Transport(format!("Invalid API URL '{}': {}", config.base_url, e)))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base
            .join(path)
            .map_err(|e| ClientError::Transport(format!("Invalid endpoint '{}': {}", path, e)))
    }

    /// Absolute URL for a record's download locator
    pub fn resolve_locator(&self, locator: &str) -> ClientResult<Url> {
        Url::parse(locator).or_else(|_| {
            self.base
                .join(locator)
                .map_err(|e| ClientError::Transport(format!("Invalid file URL '{}': {}", locator, e)))
        })
    }
}

/// Pass successful responses through, turn the rest into [`ClientError::Api`]
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = ClientError::from_response(status.as_u16(), &body);
    tracing::warn!(status = status.as_u16(), error = %err, "File Hub request failed");
    Err(err)
}

#[async_trait]
impl FileApi for FileHubClient {
    async fn upload(&self, payload: UploadPayload) -> ClientResult<UploadResult> {
        let url = self.endpoint("files/")?;
        let size = payload.bytes.len();

        let part = multipart::Part::bytes(payload.bytes)
            .file_name(payload.name.clone())
            .mime_str(&payload.mime)?;
        let form = multipart::Form::new().part("file", part);

        let response = self.client.post(url).multipart(form).send().await?;
        let result: UploadResult = check(response).await?.json().await?;

        tracing::info!(
            file = %payload.name,
            size,
            duplicate = result.is_duplicate,
            saved = result.storage_saved,
            "Uploaded file"
        );
        Ok(result)
    }

    async fn search(&self, filters: &SearchFilters, page: u32) -> ClientResult<Paginated<FileRecord>> {
        let url = self.endpoint("files/search/")?;
        let query = filters.query_pairs(page);
        tracing::debug!(?query, "Searching files");

        let response = self.client.get(url).query(&query).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn get_file(&self, id: Uuid) -> ClientResult<FileRecord> {
        let url = self.endpoint(&format!("files/{}/", id))?;
        let response = self.client.get(url).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete(&self, id: Uuid) -> ClientResult<DeleteOutcome> {
        let url = self.endpoint(&format!("files/{}/", id))?;
        let response = check(self.client.delete(url).send().await?).await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        let outcome = DeleteOutcome::from_response(status, &body);

        tracing::info!(%id, ?outcome, "Deleted file");
        Ok(outcome)
    }

    async fn download(&self, record: &FileRecord) -> ClientResult<Vec<u8>> {
        let locator = record
            .file
            .as_deref()
            .ok_or_else(|| ClientError::NotDownloadable(record.original_filename.clone()))?;
        let url = self.resolve_locator(locator)?;

        let response = self.client.get(url).send().await?;
        let bytes = check(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn storage_stats(&self) -> ClientResult<StorageStats> {
        let url = self.endpoint("files/storage_stats/")?;
        let response = self.client.get(url).send().await?;
        Ok(check(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> FileHubClient {
        FileHubClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoints_keep_base_path() {
        let client = client("http://localhost:8000/api/");
        assert_eq!(client.base_url(), "http://localhost:8000/api/");
        assert_eq!(
            client.endpoint("files/search/").unwrap().as_str(),
            "http://localhost:8000/api/files/search/"
        );
    }

    #[test]
    fn test_resolve_locator() {
        let client = client("http://localhost:8000/api");
        assert_eq!(
            client.resolve_locator("/media/uploads/a.pdf").unwrap().as_str(),
            "http://localhost:8000/media/uploads/a.pdf"
        );
        assert_eq!(
            client
                .resolve_locator("https://cdn.example.com/uploads/a.pdf")
                .unwrap()
                .as_str(),
            "https://cdn.example.com/uploads/a.pdf"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = FileHubClient::new(&ApiConfig {
            base_url: "not a url".to_string(),
            timeout_secs: 5,
        });
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }
}
