//! Upload Form
//!
//! State of the upload widget: the current selection, the in-flight flag and
//! the inline message. The actual request is made by whoever drives the form
//! (the browser component or [`FileHub::submit_upload`]).
//!
//! [`FileHub::submit_upload`]: crate::hub::FileHub::submit_upload

use thiserror::Error;

use crate::format::format_bytes;
use crate::model::UploadResult;

/// Message shown when submitting without a selection
pub const NO_FILE_MESSAGE: &str = "Please select a file to upload";

/// A file picked by the user, described by name, MIME type and size.
///
/// The payload itself stays with the platform (`web_sys::File`, a path on
/// disk) and is carried as `handle`.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile<H> {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub handle: H,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please select a file to upload")]
    NoFileSelected,

    #[error("An upload is already in progress")]
    InProgress,
}

/// Outcome message after a successful upload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadNotice {
    pub filename: String,
    pub deduplicated: bool,
    pub message: String,
}

impl UploadNotice {
    pub fn from_result(result: &UploadResult) -> Self {
        let message = if result.is_duplicate {
            format!(
                "{} matched an existing file; {} of storage saved",
                result.original_filename,
                format_bytes(result.storage_saved)
            )
        } else {
            format!("{} uploaded successfully", result.original_filename)
        };
        Self {
            filename: result.original_filename.clone(),
            deduplicated: result.is_duplicate,
            message,
        }
    }
}

/// Local state of the upload widget
#[derive(Clone, Debug)]
pub struct UploadForm<H> {
    selected: Option<SelectedFile<H>>,
    uploading: bool,
    error: Option<String>,
}

impl<H> Default for UploadForm<H> {
    fn default() -> Self {
        Self {
            selected: None,
            uploading: false,
            error: None,
        }
    }
}

impl<H: Clone> UploadForm<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection; a new pick clears any previous error.
    pub fn select(&mut self, file: Option<SelectedFile<H>>) {
        self.selected = file;
        self.error = None;
    }

    /// Drop the selection and any message; ignored while a submission runs
    pub fn clear(&mut self) {
        if !self.uploading {
            self.selected = None;
            self.error = None;
        }
    }

    pub fn selected(&self) -> Option<&SelectedFile<H>> {
        self.selected.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a submission. Fails without side effects beyond the inline
    /// message when nothing is selected.
    pub fn begin_submit(&mut self) -> Result<SelectedFile<H>, UploadError> {
        if self.uploading {
            return Err(UploadError::InProgress);
        }
        match &self.selected {
            Some(file) => {
                self.uploading = true;
                self.error = None;
                Ok(file.clone())
            }
            None => {
                self.error = Some(NO_FILE_MESSAGE.to_string());
                Err(UploadError::NoFileSelected)
            }
        }
    }

    /// Finish a submission. On success the selection is reset and a notice
    /// is returned for the parent; on failure the message is kept inline and
    /// the selection stays so the user can retry.
    pub fn finish(&mut self, outcome: Result<&UploadResult, String>) -> Option<UploadNotice> {
        self.uploading = false;
        match outcome {
            Ok(result) => {
                self.selected = None;
                self.error = None;
                Some(UploadNotice::from_result(result))
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileRecord;

    fn picked() -> SelectedFile<u32> {
        SelectedFile {
            name: "notes.txt".to_string(),
            mime: "text/plain".to_string(),
            size: 42,
            handle: 7,
        }
    }

    fn result(duplicate: bool) -> FileRecord {
        let saved = if duplicate { 2048 } else { 0 };
        serde_json::from_value(serde_json::json!({
            "id": "0b7e6a1c-5d3f-4a7e-9c1b-2f8d6e4a9b10",
            "file": null,
            "original_filename": "notes.txt",
            "file_type": "text/plain",
            "size": 2048,
            "uploaded_at": "2025-11-06T10:30:00Z",
            "is_duplicate": duplicate,
            "storage_saved": saved
        }))
        .unwrap()
    }

    #[test]
    fn test_submit_without_selection() {
        let mut form = UploadForm::<u32>::new();
        assert_eq!(form.begin_submit(), Err(UploadError::NoFileSelected));
        assert_eq!(form.error(), Some(NO_FILE_MESSAGE));
        assert!(!form.is_uploading());
    }

    #[test]
    fn test_success_resets_selection() {
        let mut form = UploadForm::new();
        form.select(Some(picked()));
        let file = form.begin_submit().unwrap();
        assert_eq!(file.handle, 7);
        assert!(form.is_uploading());
        assert_eq!(form.begin_submit(), Err(UploadError::InProgress));

        let notice = form.finish(Ok(&result(false))).unwrap();
        assert_eq!(notice.message, "notes.txt uploaded successfully");
        assert!(form.selected().is_none());
        assert!(!form.is_uploading());
    }

    #[test]
    fn test_failure_keeps_selection() {
        let mut form = UploadForm::new();
        form.select(Some(picked()));
        form.begin_submit().unwrap();

        assert!(form.finish(Err("Unable to save file to storage.".to_string())).is_none());
        assert_eq!(form.error(), Some("Unable to save file to storage."));
        assert_eq!(form.selected(), Some(&picked()));
    }

    #[test]
    fn test_duplicate_notice() {
        let notice = UploadNotice::from_result(&result(true));
        assert!(notice.deduplicated);
        assert_eq!(
            notice.message,
            "notes.txt matched an existing file; 2.00 KB of storage saved"
        );
    }

    #[test]
    fn test_clear_ignored_while_uploading() {
        let mut form = UploadForm::new();
        form.select(Some(picked()));
        form.begin_submit().unwrap();
        form.clear();
        assert!(form.selected().is_some());

        form.finish(Err("boom".to_string()));
        form.clear();
        assert!(form.selected().is_none());
        assert!(form.error().is_none());
    }
}
