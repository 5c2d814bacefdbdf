//! File Hub Service
//!
//! [`FileHub`] wraps a [`FileApi`] transport with the [`QueryCache`] and the
//! mutation rules: a successful upload or delete invalidates both the
//! listing and the statistics so the next read refetches.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::cache::{CacheScope, FileQuery, QueryCache};
use crate::error::{ClientError, ClientResult};
use crate::filters::SearchFilters;
use crate::model::{DeleteOutcome, FileRecord, Paginated, StorageStats, UploadResult};
use crate::upload::{SelectedFile, UploadError, UploadForm, UploadNotice};

/// A file ready to be sent to `POST /files/`
#[derive(Clone, Debug)]
pub struct UploadPayload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Transport for the File Hub REST endpoints
#[async_trait]
pub trait FileApi: Send + Sync {
    async fn upload(&self, payload: UploadPayload) -> ClientResult<UploadResult>;

    async fn search(&self, filters: &SearchFilters, page: u32) -> ClientResult<Paginated<FileRecord>>;

    async fn get_file(&self, id: Uuid) -> ClientResult<FileRecord>;

    async fn delete(&self, id: Uuid) -> ClientResult<DeleteOutcome>;

    async fn download(&self, record: &FileRecord) -> ClientResult<Vec<u8>>;

    async fn storage_stats(&self) -> ClientResult<StorageStats>;
}

/// Describe a file on disk as an upload selection
pub fn select_path(path: &Path) -> std::io::Result<SelectedFile<PathBuf>> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", path.display()),
        ));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());
    let mime = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(SelectedFile {
        name,
        mime,
        size: metadata.len(),
        handle: path.to_path_buf(),
    })
}

/// Cached File Hub operations
pub struct FileHub<A: FileApi> {
    api: A,
    cache: QueryCache,
}

impl<A: FileApi> FileHub<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// One listing page, served from cache when still valid
    pub async fn list(&mut self, filters: &SearchFilters, page: u32) -> ClientResult<Paginated<FileRecord>> {
        let query = FileQuery::new(filters.clone(), page);
        if let Some(cached) = self.cache.files(&query) {
            tracing::debug!(page = query.page, "Listing served from cache");
            return Ok(cached.clone());
        }

        let result = self.api.search(filters, query.page).await?;
        self.cache.store_files(query, result.clone());
        Ok(result)
    }

    /// Statistics, served from cache when still valid
    pub async fn stats(&mut self) -> ClientResult<StorageStats> {
        if let Some(cached) = self.cache.stats() {
            return Ok(cached.clone());
        }

        let stats = self.api.storage_stats().await?;
        self.cache.store_stats(stats.clone());
        Ok(stats)
    }

    /// Drop the cached statistics and fetch them again (polling)
    pub async fn refresh_stats(&mut self) -> ClientResult<StorageStats> {
        self.cache.invalidate(CacheScope::Stats);
        self.stats().await
    }

    pub async fn get_file(&self, id: Uuid) -> ClientResult<FileRecord> {
        self.api.get_file(id).await
    }

    pub async fn upload(&mut self, payload: UploadPayload) -> ClientResult<UploadResult> {
        let result = self.api.upload(payload).await?;
        self.cache.invalidate_after_mutation();
        Ok(result)
    }

    /// Drive an upload form: nothing is sent when no file is selected, the
    /// selection is reset on success and kept (with an inline message) on
    /// failure.
    pub async fn submit_upload(
        &mut self,
        form: &mut UploadForm<PathBuf>,
    ) -> Result<Option<UploadNotice>, UploadError> {
        let selected = form.begin_submit()?;

        let outcome = match tokio::fs::read(&selected.handle).await {
            Ok(bytes) => {
                let payload = UploadPayload {
                    name: selected.name.clone(),
                    mime: selected.mime.clone(),
                    bytes,
                };
                self.upload(payload).await
            }
            Err(e) => Err(ClientError::Io(e)),
        };

        match outcome {
            Ok(result) => Ok(form.finish(Ok(&result))),
            Err(e) => {
                tracing::error!(file = %selected.name, error = %e, "Upload failed");
                Ok(form.finish(Err(e.user_message())))
            }
        }
    }

    pub async fn delete(&mut self, id: Uuid) -> ClientResult<DeleteOutcome> {
        let outcome = self.api.delete(id).await?;
        self.cache.invalidate_after_mutation();
        Ok(outcome)
    }

    /// Fetch a record's content and write it under `dir` (or to `dir` itself
    /// when it is not a directory). Returns the written path.
    pub async fn download_to(&self, record: &FileRecord, dest: &Path) -> ClientResult<PathBuf> {
        let bytes = self.api.download(record).await?;

        let target = if dest.is_dir() {
            dest.join(record.download_name())
        } else {
            dest.to_path_buf()
        };
        tokio::fs::write(&target, &bytes).await?;

        tracing::info!(file = %record.original_filename, path = ?target, bytes = bytes.len(), "Downloaded file");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeApi {
        files: Mutex<Vec<FileRecord>>,
        searches: AtomicUsize,
        stats_calls: AtomicUsize,
        uploads: AtomicUsize,
        fail_uploads: bool,
    }

    fn record(name: &str, size: u64) -> FileRecord {
        FileRecord {
            id: Uuid::new_v4(),
            original_filename: name.to_string(),
            file_type: "text/plain".to_string(),
            size,
            uploaded_at: Utc::now(),
            file: Some(format!("/media/uploads/{}", name)),
            file_hash: None,
            is_duplicate: false,
            storage_saved: 0,
        }
    }

    #[async_trait]
    impl FileApi for FakeApi {
        async fn upload(&self, payload: UploadPayload) -> ClientResult<UploadResult> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            if self.fail_uploads {
                return Err(ClientError::from_response(
                    500,
                    r#"{"error": "Failed to save file", "detail": "Unable to save file to storage."}"#,
                ));
            }
            let created = record(&payload.name, payload.bytes.len() as u64);
            self.files.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn search(&self, filters: &SearchFilters, _page: u32) -> ClientResult<Paginated<FileRecord>> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            let results: Vec<FileRecord> = self
                .files
                .lock()
                .unwrap()
                .iter()
                .filter(|f| filters.min_size.map_or(true, |min| f.size >= min))
                .cloned()
                .collect();
            Ok(Paginated {
                count: results.len() as u64,
                next: None,
                previous: None,
                results,
            })
        }

        async fn get_file(&self, id: Uuid) -> ClientResult<FileRecord> {
            self.files
                .lock()
                .unwrap()
                .iter()
                .find(|f| f.id == id)
                .cloned()
                .ok_or_else(|| ClientError::from_response(404, r#"{"detail": "Not found."}"#))
        }

        async fn delete(&self, id: Uuid) -> ClientResult<DeleteOutcome> {
            self.files.lock().unwrap().retain(|f| f.id != id);
            Ok(DeleteOutcome::Removed)
        }

        async fn download(&self, record: &FileRecord) -> ClientResult<Vec<u8>> {
            Ok(record.original_filename.as_bytes().to_vec())
        }

        async fn storage_stats(&self) -> ClientResult<StorageStats> {
            self.stats_calls.fetch_add(1, Ordering::SeqCst);
            let total = self.files.lock().unwrap().len() as u64;
            Ok(StorageStats {
                total_files: total,
                unique_files: total,
                ..Default::default()
            })
        }
    }

    fn hub_with(names: &[&str]) -> FileHub<FakeApi> {
        let api = FakeApi::default();
        for name in names {
            api.files.lock().unwrap().push(record(name, 2048));
        }
        FileHub::new(api)
    }

    #[tokio::test]
    async fn test_listing_is_cached() {
        let mut hub = hub_with(&["a.txt", "b.txt"]);
        let filters = SearchFilters::default();

        assert_eq!(hub.list(&filters, 1).await.unwrap().count, 2);
        assert_eq!(hub.list(&filters, 1).await.unwrap().count, 2);
        assert_eq!(hub.api().searches.load(Ordering::SeqCst), 1);

        let narrowed = SearchFilters {
            min_size: Some(4096),
            ..Default::default()
        };
        assert_eq!(hub.list(&narrowed, 1).await.unwrap().count, 0);
        assert_eq!(hub.api().searches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_delete_invalidates_listing_and_stats() {
        let mut hub = hub_with(&["a.txt", "b.txt"]);
        let filters = SearchFilters::default();

        let page = hub.list(&filters, 1).await.unwrap();
        assert_eq!(hub.stats().await.unwrap().total_files, 2);

        let outcome = hub.delete(page.results[0].id).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Removed);

        let page = hub.list(&filters, 1).await.unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(hub.stats().await.unwrap().total_files, 1);
        assert_eq!(hub.api().searches.load(Ordering::SeqCst), 2);
        assert_eq!(hub.api().stats_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_submit_without_file_sends_nothing() {
        let mut hub = hub_with(&[]);
        let mut form = UploadForm::new();

        let result = hub.submit_upload(&mut form).await;
        assert_eq!(result, Err(UploadError::NoFileSelected));
        assert_eq!(form.error(), Some("Please select a file to upload"));
        assert_eq!(hub.api().uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_upload_refreshes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello world").unwrap();

        let mut hub = hub_with(&[]);
        let mut form = UploadForm::new();
        form.select(Some(select_path(&path).unwrap()));
        assert_eq!(form.selected().unwrap().mime, "text/plain");

        let notice = hub.submit_upload(&mut form).await.unwrap().unwrap();
        assert_eq!(notice.filename, "notes.txt");
        assert!(form.selected().is_none());
        assert_eq!(hub.api().uploads.load(Ordering::SeqCst), 1);
        assert_eq!(hub.cache().version(CacheScope::Files), 1);
        assert_eq!(hub.cache().version(CacheScope::Stats), 1);
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello world").unwrap();

        let mut hub = FileHub::new(FakeApi {
            fail_uploads: true,
            ..Default::default()
        });
        let mut form = UploadForm::new();
        form.select(Some(select_path(&path).unwrap()));

        assert_eq!(hub.submit_upload(&mut form).await, Ok(None));
        assert_eq!(form.error(), Some("Unable to save file to storage."));
        assert!(form.selected().is_some());
        assert_eq!(hub.cache().version(CacheScope::Files), 0);
    }

    #[tokio::test]
    async fn test_download_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let hub = hub_with(&["report.txt"]);
        let file = hub.api().files.lock().unwrap()[0].clone();

        let path = hub.download_to(&file, dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("report.txt"));
        assert_eq!(std::fs::read(&path).unwrap(), b"report.txt");
    }

    #[tokio::test]
    async fn test_download_to_stays_inside_directory() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = dir.path().join("downloads");
        std::fs::create_dir(&downloads).unwrap();
        let hub = hub_with(&["../escaped.txt"]);
        let file = hub.api().files.lock().unwrap()[0].clone();

        let path = hub.download_to(&file, &downloads).await.unwrap();
        assert_eq!(path, downloads.join("escaped.txt"));
        assert!(path.exists());
        assert!(!dir.path().join("escaped.txt").exists());
    }

    #[test]
    fn test_select_path_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(select_path(dir.path()).is_err());
    }
}
