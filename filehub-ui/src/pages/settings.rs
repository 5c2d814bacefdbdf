//! Settings Page
//!
//! API connection and cached data.

use leptos::*;

use crate::api;
use crate::state::global::GlobalState;

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Configure the File Hub client"</p>
            </div>

            <ApiSettings />

            <CacheSettings />

            <AboutSection />
        </div>
    }
}

/// API connection settings
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<bool>);

    // A different server means nothing cached is valid any more
    let state_for_apply = state.clone();
    let apply_url = move || {
        api::set_api_base(&api_url.get_untracked());
        state_for_apply.invalidate_after_mutation();
    };

    let state_for_test = state.clone();
    let apply_for_test = apply_url.clone();
    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);
        apply_for_test();

        let state_clone = state_for_test.clone();
        spawn_local(async move {
            match api::fetch_storage_stats().await {
                Ok(stats) => {
                    set_test_result.set(Some(true));
                    state_clone.show_success(&format!(
                        "Connection successful ({} files)",
                        stats.total_files
                    ));
                }
                Err(e) => {
                    set_test_result.set(Some(false));
                    state_clone.show_error(&format!("Connection failed: {}", e));
                }
            }
            set_testing.set(false);
        });
    };

    let state_for_save = state.clone();
    let save_url = move |_| {
        apply_url();
        set_api_url.set(api::get_api_base());
        state_for_save.show_success("API URL saved");
    };

    let reset_url = move |_| set_api_url.set(api::DEFAULT_API_BASE.to_string());

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>

            <div class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"File Hub API URL"</label>
                    <div class="flex space-x-2">
                        <input
                            type="text"
                            prop:value=move || api_url.get()
                            on:input=move |ev| set_api_url.set(event_target_value(&ev))
                            class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                        <button
                            on:click=test_connection
                            disabled=move || testing.get()
                            class="px-4 py-3 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                                   rounded-lg font-medium transition-colors"
                        >
                            {move || if testing.get() { "Testing..." } else { "Test" }}
                        </button>
                        <button
                            on:click=save_url
                            class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                                   rounded-lg font-medium transition-colors"
                        >
                            "Save"
                        </button>
                    </div>
                    <button
                        on:click=reset_url
                        class="mt-2 text-xs text-gray-500 hover:text-gray-300"
                    >
                        {format!("Reset to {}", api::DEFAULT_API_BASE)}
                    </button>
                </div>

                <div class="flex items-center space-x-2">
                    <span class="text-sm text-gray-400">"Status:"</span>
                    {move || {
                        match test_result.get() {
                            Some(true) => view! {
                                <span class="text-green-400">"✓ Connected"</span>
                            }.into_view(),
                            Some(false) => view! {
                                <span class="text-red-400">"✕ Failed"</span>
                            }.into_view(),
                            None => view! {
                                <span class="text-gray-400">"Not tested"</span>
                            }.into_view(),
                        }
                    }}
                </div>
            </div>
        </section>
    }
}

/// Cached listing pages and statistics
#[component]
fn CacheSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let cache = state.cache;
    let files_version = state.files_version;

    let cached_pages = move || {
        // Re-read whenever the listing cache turns over
        let _ = files_version.get();
        cache.with_value(|c| c.cached_pages())
    };

    let clear_cache = move |_| {
        state.invalidate_after_mutation();
        state.show_success("Cache cleared");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Cached Data"</h2>

            <div class="flex items-center justify-between">
                <p class="text-gray-300">
                    {move || format!("{} listing page(s) cached", cached_pages())}
                </p>
                <button
                    on:click=clear_cache
                    class="px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg font-medium transition-colors"
                >
                    "Clear cache"
                </button>
            </div>
        </section>
    }
}

#[component]
fn AboutSection() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"About File Hub"</h2>

            <div class="space-y-4 text-gray-300">
                <p>
                    "File Hub stores each distinct file once. "
                    "Uploading content that already exists creates a reference instead of a copy."
                </p>

                <div class="grid md:grid-cols-2 gap-4 text-sm">
                    <div class="p-4 bg-gray-700 rounded-lg">
                        <h3 class="font-medium text-white mb-2">"Built With"</h3>
                        <ul class="space-y-1 text-gray-400">
                            <li>"• Rust"</li>
                            <li>"• Leptos (WASM UI Framework)"</li>
                            <li>"• gloo-net (HTTP)"</li>
                        </ul>
                    </div>

                    <div class="p-4 bg-gray-700 rounded-lg">
                        <h3 class="font-medium text-white mb-2">"Features"</h3>
                        <ul class="space-y-1 text-gray-400">
                            <li>"• Content-hash deduplication"</li>
                            <li>"• Filtered, paginated listing"</li>
                            <li>"• Storage savings statistics"</li>
                        </ul>
                    </div>
                </div>

                <p class="text-sm text-gray-400">
                    {format!("Version {}", env!("CARGO_PKG_VERSION"))}
                </p>
            </div>
        </section>
    }
}
