//! # File Hub
//!
//! Client for the File Hub service: upload files, browse and filter the
//! uploaded-file listing, delete or download files, and follow the storage
//! saved by backend deduplication.
//!
//! ## Modules
//!
//! The platform-neutral core is shared with the browser front-end
//! (`filehub-ui`):
//!
//! - [`model`]: data-transfer records of the REST contract
//! - [`filters`]: filter panel state, validation and query parameters
//! - [`debounce`]: quiet-period emission of filter changes
//! - [`cache`]: listing/statistics cache with mutation invalidation
//! - [`upload`]: upload widget state
//! - [`download`]: object URL lifecycle for browser downloads
//! - [`stats`]: statistics summary cards
//! - [`format`]: byte, date and ratio formatting
//!
//! With the default `native` feature:
//!
//! - [`client`]: `reqwest` client for the REST API
//! - [`hub`]: cached service facade used by the `filehub` CLI
//! - [`config`] and [`logging`]: TOML/env configuration and `tracing` setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use filehub::{ApiConfig, FileHub, FileHubClient, FilterForm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut hub = FileHub::new(FileHubClient::new(&ApiConfig::default())?);
//!
//!     let mut form = FilterForm::new();
//!     form.set_search("report");
//!     form.set_max_size_kb("500");
//!     let filters = form.validate()?;
//!
//!     let page = hub.list(&filters, 1).await?;
//!     println!("{} matching files", page.count);
//!
//!     let stats = hub.stats().await?;
//!     println!("{} saved by deduplication", stats.storage_saved_readable);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod debounce;
pub mod download;
pub mod error;
pub mod filters;
pub mod format;
pub mod model;
pub mod stats;
pub mod upload;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod hub;
#[cfg(feature = "native")]
pub mod logging;

// Re-export top-level types for convenience
pub use cache::{CacheScope, FileQuery, QueryCache};
pub use debounce::{Debouncer, Ticket, DEFAULT_QUIET_PERIOD};
pub use download::{trigger_download, DownloadError, ObjectUrl, ObjectUrlHost};
pub use error::{ClientError, ClientResult, ErrorPayload};
pub use filters::{FilterError, FilterField, FilterForm, SearchFilters, FILE_TYPE_OPTIONS};
pub use format::{format_bytes, format_percent, format_timestamp, mime_label};
pub use model::{DeleteOutcome, FileRecord, Paginated, StorageStats, UploadResult};
pub use stats::{StatCard, StatsSummary, DEFAULT_POLL_INTERVAL};
pub use upload::{SelectedFile, UploadError, UploadForm, UploadNotice, NO_FILE_MESSAGE};

#[cfg(feature = "native")]
pub use client::FileHubClient;
#[cfg(feature = "native")]
pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, UiConfig};
#[cfg(feature = "native")]
pub use debounce::DebouncedEmitter;
#[cfg(feature = "native")]
pub use hub::{select_path, FileApi, FileHub, UploadPayload};
