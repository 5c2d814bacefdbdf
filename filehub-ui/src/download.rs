//! Browser downloads via object URLs.

use filehub::{trigger_download, DownloadError, FileRecord, ObjectUrlHost};
use wasm_bindgen::JsCast;

/// [`ObjectUrlHost`] backed by `URL.createObjectURL` and a detached anchor
pub struct BrowserDownloads;

impl ObjectUrlHost for BrowserDownloads {
    fn create_object_url(&self, data: &[u8], mime: &str) -> Result<String, DownloadError> {
        let bytes = js_sys::Uint8Array::from(data);
        let parts = js_sys::Array::of1(&bytes);

        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime);

        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| DownloadError::CreateUrl(format!("{:?}", e)))?;

        web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|e| DownloadError::CreateUrl(format!("{:?}", e)))
    }

    fn click_download(&self, url: &str, filename: &str) -> Result<(), DownloadError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| DownloadError::Click("no document".to_string()))?;

        let anchor = document
            .create_element("a")
            .map_err(|e| DownloadError::Click(format!("{:?}", e)))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| DownloadError::Click("not an anchor element".to_string()))?;

        anchor.set_href(url);
        anchor.set_download(filename);
        anchor.click();
        Ok(())
    }

    fn revoke_object_url(&self, url: &str) {
        let _ = web_sys::Url::revoke_object_url(url);
    }
}

/// Fetch a record's bytes and hand them to the browser as a file
pub async fn download_record(record: &FileRecord) -> Result<(), String> {
    let data = crate::api::download_file(record).await?;
    let mime = if record.file_type.is_empty() {
        "application/octet-stream"
    } else {
        &record.file_type
    };

    trigger_download(&BrowserDownloads, &data, mime, record.download_name())
        .map_err(|e| e.to_string())
}
