//! Data Model
//!
//! Data-transfer records mirroring the File Hub backend's JSON contract.
//! Everything here is an immutable snapshot received from the network.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded file as listed by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,
    pub original_filename: String,
    /// MIME type reported at upload time
    pub file_type: String,
    /// Size in bytes
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
    /// Download locator; duplicate references may not carry one
    #[serde(default)]
    pub file: Option<String>,
    /// SHA-256 of the content, hex encoded
    #[serde(default)]
    pub file_hash: Option<String>,
    #[serde(default)]
    pub is_duplicate: bool,
    /// Bytes saved by not storing this file again
    #[serde(default)]
    pub storage_saved: u64,
}

impl FileRecord {
    /// Name to offer when saving a download.
    ///
    /// Only the last path segment of `original_filename` is kept, so the
    /// name can be joined onto a local directory without leaving it.
    pub fn download_name(&self) -> &str {
        let name = self
            .original_filename
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or_default()
            .trim();
        match name {
            "" | "." | ".." => "download",
            name => name,
        }
    }

    /// Short hash prefix for display, if the backend computed one
    pub fn short_hash(&self) -> Option<&str> {
        self.file_hash
            .as_deref()
            .map(|h| h.char_indices().nth(12).map_or(h, |(end, _)| &h[..end]))
    }
}

/// Result of `POST /files/`.
///
/// Same shape as a listed record; `is_duplicate` and `storage_saved` describe
/// what the backend did with this particular upload.
pub type UploadResult = FileRecord;

/// Page-number paginated collection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn empty() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of pages for the given page size (at least one)
    pub fn total_pages(&self, page_size: u32) -> u32 {
        if page_size == 0 || self.count == 0 {
            return 1;
        }
        let pages = (self.count + page_size as u64 - 1) / page_size as u64;
        pages.min(u32::MAX as u64) as u32
    }
}

/// Aggregate deduplication statistics from `GET /files/storage_stats/`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageStats {
    pub total_files: u64,
    pub unique_files: u64,
    pub duplicate_references: u64,
    pub storage_saved_bytes: u64,
    #[serde(default)]
    pub storage_saved_readable: String,
}

/// What the backend did with a `DELETE /files/{id}/`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Record (and physical file, if last reference) removed
    Removed,
    /// Other references remain; only the reference count was decremented
    ReferenceReleased { message: String },
}

/// Body of a 200 answer to a delete request
#[derive(Debug, Deserialize)]
pub struct DeleteMessage {
    pub message: String,
}

impl DeleteOutcome {
    /// Interpret a successful answer to `DELETE /files/{id}/`.
    ///
    /// 204 means the record is gone. A 200 carries `{message}` when other
    /// references remain; a 200 without a readable message counts as removed.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 204 {
            return DeleteOutcome::Removed;
        }
        match serde_json::from_str::<DeleteMessage>(body) {
            Ok(msg) => DeleteOutcome::ReferenceReleased { message: msg.message },
            Err(_) => DeleteOutcome::Removed,
        }
    }
}
