//! Pages
//!
//! Top-level page components for each route.

pub mod files;
pub mod settings;

pub use files::Files;
pub use settings::Settings;
