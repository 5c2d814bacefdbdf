//! UI Components
//!
//! Leptos components composed by the pages.

pub mod file_list;
pub mod file_search;
pub mod file_upload;
pub mod loading;
pub mod nav;
pub mod storage_stats;
pub mod toast;

pub use file_list::FileList;
pub use file_search::FileSearch;
pub use file_upload::FileUpload;
pub use nav::Nav;
pub use storage_stats::StatsPanel;
pub use toast::Toast;
