//! File List Component
//!
//! Paginated table of uploaded files with download and delete actions.

use filehub::{format_bytes, format_timestamp, mime_label, ClientError, DeleteOutcome, FileQuery, FileRecord, Paginated};
use leptos::*;
use uuid::Uuid;

use crate::api;
use crate::components::loading::ListSkeleton;
use crate::download::download_record;
use crate::state::global::GlobalState;

/// File listing for the current filters and page
#[component]
pub fn FileList(
    #[prop(default = 10)]
    page_size: u32,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let files = create_rw_signal(None::<Paginated<FileRecord>>);
    let loading = state.loading;
    let (error, set_error) = create_signal(None::<String>);
    let busy = create_rw_signal(None::<Uuid>);

    // Refetch on filter, page or cache version change
    let filters = state.filters;
    let page = state.page;
    let version = state.files_version;
    let cache = state.cache;
    create_effect(move |_| {
        let key = (filters.get(), page.get(), version.get());
        let query = FileQuery::new(key.0.clone(), key.1);

        if let Some(hit) = cache.with_value(|c| c.files(&query).cloned()) {
            files.set(Some(hit));
            set_error.set(None);
            loading.set(false);
            return;
        }

        loading.set(true);
        spawn_local(async move {
            let result = api::search_files(&query.filters, query.page).await;

            // A newer request has taken over
            let current = (filters.get_untracked(), page.get_untracked(), version.get_untracked());
            if current != key {
                return;
            }

            // Deleting the last row of the last page leaves that page missing
            if let Some(previous) = step_back(query.page, &result) {
                page.set(previous);
                return;
            }

            match result {
                Ok(result) => {
                    cache.update_value(|c| c.store_files(query, result.clone()));
                    files.set(Some(result));
                    set_error.set(None);
                }
                Err(e) => {
                    let message = e.user_message();
                    web_sys::console::error_1(&format!("Failed to load files: {}", message).into());
                    set_error.set(Some(message));
                }
            }
            loading.set(false);
        });
    });

    let state_for_delete = state.clone();
    let on_delete = move |record: FileRecord| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("Delete {}?", record.original_filename)).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        busy.set(Some(record.id));
        let state = state_for_delete.clone();
        spawn_local(async move {
            match api::delete_file(record.id).await {
                Ok(DeleteOutcome::Removed) => {
                    state.show_success(&format!("Deleted {}", record.original_filename));
                    state.invalidate_after_mutation();
                }
                Ok(DeleteOutcome::ReferenceReleased { message }) => {
                    state.show_success(&message);
                    state.invalidate_after_mutation();
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Delete failed: {}", e).into());
                    state.show_error(&format!("Delete failed: {}", e));
                }
            }
            busy.set(None);
        });
    };

    let state_for_download = state.clone();
    let on_download = move |record: FileRecord| {
        busy.set(Some(record.id));
        let state = state_for_download.clone();
        spawn_local(async move {
            if let Err(e) = download_record(&record).await {
                web_sys::console::error_1(&format!("Download failed: {}", e).into());
                state.show_error(&format!("Download failed: {}", e));
            }
            busy.set(None);
        });
    };

    let state_for_pages = state.clone();

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-xl font-semibold">"Files"</h2>
                {move || loading.get().then(|| view! {
                    <span class="loading-spinner w-4 h-4" />
                })}
            </div>

            {move || {
                if let Some(msg) = error.get() {
                    return view! {
                        <p class="text-red-400 text-sm">{msg}</p>
                    }.into_view();
                }

                match files.get() {
                    None => view! { <ListSkeleton count=5 /> }.into_view(),
                    Some(listing) if listing.is_empty() => view! {
                        <p class="text-gray-400 text-center py-8">"No files found"</p>
                    }.into_view(),
                    Some(listing) => {
                        let rows = listing.results.clone().into_iter().map(|record| {
                            let on_delete = on_delete.clone();
                            let on_download = on_download.clone();
                            view! {
                                <FileRow
                                    record=record
                                    busy=busy
                                    on_delete=move |r| on_delete(r)
                                    on_download=move |r| on_download(r)
                                />
                            }
                        }).collect_view();

                        let state = state_for_pages.clone();
                        view! {
                            <table class="w-full text-sm">
                                <thead class="text-gray-400 text-left border-b border-gray-700">
                                    <tr>
                                        <th class="py-2">"Name"</th>
                                        <th class="py-2">"Type"</th>
                                        <th class="py-2 text-right">"Size"</th>
                                        <th class="py-2">"Uploaded"</th>
                                        <th class="py-2 text-right">"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>{rows}</tbody>
                            </table>
                            <Pagination listing=listing page_size=page_size state=state />
                        }.into_view()
                    }
                }
            }}
        </section>
    }
}

/// One row of the listing
#[component]
fn FileRow<D, L>(
    record: FileRecord,
    busy: RwSignal<Option<Uuid>>,
    on_delete: D,
    on_download: L,
) -> impl IntoView
where
    D: Fn(FileRecord) + 'static,
    L: Fn(FileRecord) + 'static,
{
    let id = record.id;
    let is_busy = move || busy.get() == Some(id);
    let downloadable = record.file.is_some();
    let for_delete = record.clone();
    let for_download = record.clone();

    view! {
        <tr class="border-b border-gray-700/50 hover:bg-gray-700/30">
            <td class="py-3">
                <div class="flex items-center space-x-2">
                    <span
                        class="font-medium"
                        title=record.short_hash().map(|h| format!("SHA-256 {}…", h))
                    >
                        {record.original_filename.clone()}
                    </span>
                    {record.is_duplicate.then(|| view! {
                        <span
                            class="px-2 py-0.5 text-xs rounded-full bg-yellow-600/30 text-yellow-300"
                            title=format!("Saved {}", format_bytes(record.storage_saved))
                        >
                            "Duplicate"
                        </span>
                    })}
                </div>
            </td>
            <td class="py-3 text-gray-400">{mime_label(&record.file_type)}</td>
            <td class="py-3 text-right">{format_bytes(record.size)}</td>
            <td class="py-3 text-gray-400">{format_timestamp(&record.uploaded_at)}</td>
            <td class="py-3 text-right space-x-2">
                <button
                    on:click=move |_| on_download(for_download.clone())
                    disabled=move || is_busy() || !downloadable
                    class="px-3 py-1 bg-gray-600 hover:bg-gray-500 disabled:opacity-50 rounded"
                >
                    "Download"
                </button>
                <button
                    on:click=move |_| on_delete(for_delete.clone())
                    disabled=is_busy
                    class="px-3 py-1 bg-red-600 hover:bg-red-700 disabled:opacity-50 rounded"
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

/// Previous/next controls
#[component]
fn Pagination(
    listing: Paginated<FileRecord>,
    page_size: u32,
    state: GlobalState,
) -> impl IntoView {
    let page = state.page;
    let total = listing.total_pages(page_size);
    let has_previous = listing.has_previous();
    let has_next = listing.has_next();

    let go = move |delta: i64| {
        let next = (page.get_untracked() as i64 + delta).max(1) as u32;
        state.set_page(next);
    };
    let go_back = go.clone();

    view! {
        <div class="flex items-center justify-between mt-4 text-sm">
            <span class="text-gray-400">
                {move || format!("Page {} of {}", page.get(), total.max(1))}
                " · " {listing.count} " files"
            </span>
            <div class="space-x-2">
                <button
                    on:click=move |_| go_back(-1)
                    disabled=!has_previous
                    class="px-3 py-1 bg-gray-700 hover:bg-gray-600 disabled:opacity-50 rounded"
                >
                    "Previous"
                </button>
                <button
                    on:click=move |_| go(1)
                    disabled=!has_next
                    class="px-3 py-1 bg-gray-700 hover:bg-gray-600 disabled:opacity-50 rounded"
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}

/// Page to fall back to when `page` no longer exists.
///
/// The backend answers an out-of-range page with 404; an empty page with a
/// non-zero total means the same thing.
fn step_back(page: u32, result: &Result<Paginated<FileRecord>, ClientError>) -> Option<u32> {
    if page <= 1 {
        return None;
    }
    match result {
        Err(e) if e.is_not_found() => Some(page - 1),
        Ok(listing) if listing.is_empty() && listing.count > 0 => Some(page - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_page() -> ClientError {
        ClientError::from_response(404, r#"{"detail": "Invalid page."}"#)
    }

    #[test]
    fn test_step_back_on_missing_page() {
        assert_eq!(step_back(2, &Err(invalid_page())), Some(1));
        assert_eq!(step_back(1, &Err(invalid_page())), None);
    }

    #[test]
    fn test_step_back_on_empty_page() {
        let empty = Paginated::<FileRecord> {
            count: 10,
            next: None,
            previous: Some("http://localhost:8000/api/files/search/".to_string()),
            results: Vec::new(),
        };
        assert_eq!(step_back(3, &Ok(empty)), Some(2));
        assert_eq!(step_back(3, &Ok(Paginated::empty())), None);
    }

    #[test]
    fn test_other_failures_stay() {
        let server_error = ClientError::from_response(500, r#"{"error": "boom"}"#);
        assert_eq!(step_back(2, &Err(server_error)), None);
        assert_eq!(step_back(2, &Err(ClientError::Transport("Network error".to_string()))), None);
    }
}
