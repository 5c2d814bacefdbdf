//! Files Page
//!
//! Statistics, upload widget, filter panel and listing on one screen.

use filehub::{SearchFilters, UploadNotice};
use leptos::*;

use crate::components::{FileList, FileSearch, FileUpload, StatsPanel};
use crate::state::global::GlobalState;

/// Main page component
#[component]
pub fn Files() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_upload = state.clone();
    let on_uploaded = move |notice: UploadNotice| {
        state_for_upload.show_success(&notice.message);
        state_for_upload.invalidate_after_mutation();
    };

    let on_filters = move |filters: SearchFilters| state.set_filters(filters);

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Files"</h1>
                <p class="text-gray-400 mt-1">"Upload, find and manage deduplicated files"</p>
            </div>

            <StatsPanel />

            <FileUpload on_uploaded=on_uploaded />

            <FileSearch on_change=on_filters />

            <FileList />
        </div>
    }
}
