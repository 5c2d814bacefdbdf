//! Download Triggering
//!
//! Browser downloads go fetch blob -> create object URL -> synthesize a click
//! on an anchor -> revoke the object URL. The object URL must be released on
//! every path, so it lives in an [`ObjectUrl`] guard that revokes on drop.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DownloadError {
    #[error("Could not prepare download: {0}")]
    CreateUrl(String),

    #[error("Could not start download: {0}")]
    Click(String),
}

/// Platform hooks for object URLs and anchor clicks
pub trait ObjectUrlHost {
    fn create_object_url(&self, data: &[u8], mime: &str) -> Result<String, DownloadError>;

    fn click_download(&self, url: &str, filename: &str) -> Result<(), DownloadError>;

    fn revoke_object_url(&self, url: &str);
}

/// An object URL that is revoked when dropped
pub struct ObjectUrl<'h, H: ObjectUrlHost + ?Sized> {
    host: &'h H,
    url: String,
}

impl<'h, H: ObjectUrlHost + ?Sized> ObjectUrl<'h, H> {
    pub fn create(host: &'h H, data: &[u8], mime: &str) -> Result<Self, DownloadError> {
        let url = host.create_object_url(data, mime)?;
        Ok(Self { host, url })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl<H: ObjectUrlHost + ?Sized> Drop for ObjectUrl<'_, H> {
    fn drop(&mut self) {
        self.host.revoke_object_url(&self.url);
    }
}

/// Hand `data` to the user as a file named `filename`.
pub fn trigger_download<H: ObjectUrlHost + ?Sized>(
    host: &H,
    data: &[u8],
    mime: &str,
    filename: &str,
) -> Result<(), DownloadError> {
    let url = ObjectUrl::create(host, data, mime)?;
    host.click_download(url.as_str(), filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeHost {
        fail_click: bool,
        created: RefCell<Vec<String>>,
        clicked: RefCell<Vec<(String, String)>>,
        revoked: RefCell<Vec<String>>,
    }

    impl ObjectUrlHost for FakeHost {
        fn create_object_url(&self, data: &[u8], _mime: &str) -> Result<String, DownloadError> {
            let url = format!("blob:fake/{}", data.len());
            self.created.borrow_mut().push(url.clone());
            Ok(url)
        }

        fn click_download(&self, url: &str, filename: &str) -> Result<(), DownloadError> {
            if self.fail_click {
                return Err(DownloadError::Click("anchor detached".to_string()));
            }
            self.clicked
                .borrow_mut()
                .push((url.to_string(), filename.to_string()));
            Ok(())
        }

        fn revoke_object_url(&self, url: &str) {
            self.revoked.borrow_mut().push(url.to_string());
        }
    }

    #[test]
    fn test_url_revoked_after_click() {
        let host = FakeHost::default();
        trigger_download(&host, b"hello", "text/plain", "hello.txt").unwrap();

        assert_eq!(
            *host.clicked.borrow(),
            vec![("blob:fake/5".to_string(), "hello.txt".to_string())]
        );
        assert_eq!(*host.revoked.borrow(), *host.created.borrow());
    }

    #[test]
    fn test_url_revoked_when_click_fails() {
        let host = FakeHost {
            fail_click: true,
            ..Default::default()
        };
        let err = trigger_download(&host, b"hello", "text/plain", "hello.txt").unwrap_err();

        assert!(matches!(err, DownloadError::Click(_)));
        assert_eq!(*host.revoked.borrow(), vec!["blob:fake/5".to_string()]);
    }
}
