//! File Upload Component
//!
//! File picker and upload button.

use filehub::{format_bytes, SelectedFile, UploadForm, UploadNotice};
use leptos::*;

use crate::api;

/// Upload widget. Reports each successful upload exactly once through
/// `on_uploaded`.
#[component]
pub fn FileUpload(
    #[prop(into)]
    on_uploaded: Callback<UploadNotice>,
) -> impl IntoView {
    let form = create_rw_signal(UploadForm::<web_sys::File>::new());
    let input_ref = create_node_ref::<html::Input>();

    let on_change = move |_| {
        let selected = input_ref
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
            .map(|file| SelectedFile {
                name: file.name(),
                mime: file.type_(),
                size: file.size() as u64,
                handle: file,
            });
        form.update(|f| f.select(selected));
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        // Without a selection the form records its inline message and nothing is sent
        let Some(Ok(selected)) = form.try_update(|f| f.begin_submit()) else {
            return;
        };

        spawn_local(async move {
            let outcome = api::upload_file(&selected.handle).await;
            if let Err(e) = &outcome {
                web_sys::console::error_1(&format!("Upload of {} failed: {}", selected.name, e).into());
            }
            let notice = form
                .try_update(|f| f.finish(outcome.as_ref().map_err(Clone::clone)))
                .flatten();

            if let Some(notice) = notice {
                if let Some(input) = input_ref.get_untracked() {
                    input.set_value("");
                }
                on_uploaded.call(notice);
            }
        });
    };

    let uploading = move || form.with(|f| f.is_uploading());

    view! {
        <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Upload a File"</h2>

            <div class="flex flex-col sm:flex-row sm:items-center gap-4">
                <input
                    type="file"
                    node_ref=input_ref
                    on:change=on_change
                    disabled=uploading
                    class="flex-1 text-sm text-gray-300
                           file:mr-4 file:px-4 file:py-2 file:rounded-lg file:border-0
                           file:bg-gray-700 file:text-white hover:file:bg-gray-600"
                />
                <button
                    type="submit"
                    disabled=uploading
                    class="px-6 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg font-medium transition-colors flex items-center space-x-2"
                >
                    {move || if uploading() {
                        view! {
                            <span class="loading-spinner w-4 h-4" />
                            <span>"Uploading..."</span>
                        }.into_view()
                    } else {
                        view! { <span>"Upload"</span> }.into_view()
                    }}
                </button>
            </div>

            // Selected file summary
            {move || form.with(|f| f.selected().map(|file| view! {
                <p class="text-sm text-gray-400 space-x-2">
                    <span>{file.name.clone()} " (" {format_bytes(file.size)} ")"</span>
                    <button
                        type="button"
                        on:click=move |_| {
                            if form.with_untracked(|f| f.is_uploading()) {
                                return;
                            }
                            form.update(|f| f.clear());
                            if let Some(input) = input_ref.get_untracked() {
                                input.set_value("");
                            }
                        }
                        class="text-xs text-gray-500 hover:text-gray-300"
                    >
                        "Clear"
                    </button>
                </p>
            }))}

            // Inline error
            {move || form.with(|f| f.error().map(|msg| view! {
                <p class="text-sm text-red-400">{msg.to_string()}</p>
            }))}
        </form>
    }
}
