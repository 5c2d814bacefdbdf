//! HTTP API Client
//!
//! Functions for communicating with the File Hub REST API.

use filehub::{ClientError, DeleteOutcome, FileRecord, Paginated, SearchFilters, StorageStats, UploadResult};
use gloo_net::http::{Request, Response};
use uuid::Uuid;

/// Default API base URL, overridable at build time with `FILEHUB_API_URL`
pub const DEFAULT_API_BASE: &str = match option_env!("FILEHUB_API_URL") {
    Some(url) => url,
    None => "http://localhost:8000/api",
};

const API_URL_KEY: &str = "filehub_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty());

    normalize_base(stored.as_deref().unwrap_or(DEFAULT_API_BASE))
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, &normalize_base(url));
        }
    }
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Absolute URL for a record's `file` locator.
///
/// Absolute locators pass through; `/media/...` style paths are resolved
/// against the API's origin, anything else against the API base.
pub fn resolve_file_url(api_base: &str, locator: &str) -> String {
    if locator.starts_with("http://") || locator.starts_with("https://") {
        return locator.to_string();
    }

    if let Some(path) = locator.strip_prefix('/') {
        let origin_end = api_base
            .find("://")
            .map(|i| i + 3)
            .and_then(|start| api_base[start..].find('/').map(|j| start + j))
            .unwrap_or(api_base.len());
        return format!("{}/{}", &api_base[..origin_end], path);
    }

    format!("{}/{}", api_base, locator)
}

/// Turn a failed response into a typed error, keeping the status
async fn api_failure(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = ClientError::from_response(status, &body);
    web_sys::console::warn_1(&format!("File Hub API error {}: {}", status, err.user_message()).into());
    err
}

/// Turn a failed response into the message shown to the user
async fn api_error(response: Response) -> String {
    api_failure(response).await.user_message()
}

// ============ API Functions ============

/// Upload one file as multipart form data
pub async fn upload_file(file: &web_sys::File) -> Result<UploadResult, String> {
    let api_base = get_api_base();

    let form = web_sys::FormData::new().map_err(|e| format!("Request build error: {:?}", e))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| format!("Request build error: {:?}", e))?;

    let response = Request::post(&format!("{}/files/", api_base))
        .body(form)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(api_error(response).await);
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch one page of the filtered listing.
///
/// Errors keep the HTTP status so callers can tell a page that no longer
/// exists (404) from other failures.
pub async fn search_files(filters: &SearchFilters, page: u32) -> Result<Paginated<FileRecord>, ClientError> {
    let api_base = get_api_base();
    let url = format!("{}/files/search/{}", api_base, filters.query_string(page));

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ClientError::Transport(format!("Network error: {}", e)))?;

    if !response.ok() {
        return Err(api_failure(response).await);
    }

    response.json().await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// Delete a file (or release one reference to it)
pub async fn delete_file(id: Uuid) -> Result<DeleteOutcome, String> {
    let api_base = get_api_base();

    let response = Request::delete(&format!("{}/files/{}/", api_base, id))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(api_error(response).await);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Ok(DeleteOutcome::from_response(status, &body))
}

/// Fetch the raw bytes behind a record
pub async fn download_file(record: &FileRecord) -> Result<Vec<u8>, String> {
    let locator = record
        .file
        .as_deref()
        .ok_or_else(|| format!("{} has no downloadable content", record.original_filename))?;
    let url = resolve_file_url(&get_api_base(), locator);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(api_error(response).await);
    }

    response.binary().await
        .map_err(|e| format!("Download error: {}", e))
}

/// Fetch deduplication statistics
pub async fn fetch_storage_stats() -> Result<StorageStats, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/files/storage_stats/", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(api_error(response).await);
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}
