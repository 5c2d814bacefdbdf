//! File Hub UI
//!
//! Browser front-end for the File Hub service built with Leptos (WASM).
//!
//! # Features
//!
//! - Upload with deduplication feedback
//! - Filtered, paginated file listing
//! - Download and delete
//! - Storage savings statistics
//!
//! # Architecture
//!
//! A client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! Filter validation, caching and formatting come from the `filehub` core
//! crate; this crate adds the components and the `gloo-net` HTTP calls.

use leptos::*;

mod api;
mod app;
mod components;
mod download;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
