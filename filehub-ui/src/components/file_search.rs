//! File Search Component
//!
//! Filter panel: filename search, type checkboxes, size range in KB and
//! upload date range. Valid filter sets are emitted after a quiet period.

use std::time::Duration;

use filehub::{Debouncer, FilterField, FilterForm, SearchFilters, DEFAULT_QUIET_PERIOD, FILE_TYPE_OPTIONS};
use gloo_timers::callback::Timeout;
use leptos::*;

/// Filter panel component
#[component]
pub fn FileSearch(
    #[prop(into)]
    on_change: Callback<SearchFilters>,
    #[prop(default = DEFAULT_QUIET_PERIOD)]
    quiet: Duration,
) -> impl IntoView {
    let form = create_rw_signal(FilterForm::new());
    let error = create_rw_signal(None::<String>);
    let debouncer = store_value(Debouncer::<SearchFilters>::new());
    let timer = store_value(None::<Timeout>);
    let quiet_ms = quiet.as_millis() as u32;

    // Pending emission dies with the panel
    on_cleanup(move || {
        timer.try_update_value(|t| t.take());
        debouncer.try_update_value(|d| d.cancel());
    });

    let cancel_pending = move || {
        debouncer.update_value(|d| d.cancel());
        timer.set_value(None);
    };

    // Validate and, if valid, emit after the quiet period
    let schedule = move || match form.with_untracked(|f| f.validate()) {
        Err(e) => {
            error.set(Some(e.to_string()));
            cancel_pending();
        }
        Ok(filters) => {
            error.set(None);
            let mut ticket = None;
            debouncer.update_value(|d| ticket = Some(d.schedule(filters)));
            let Some(ticket) = ticket else { return };

            let handle = Timeout::new(quiet_ms, move || {
                let mut ready = None;
                debouncer.update_value(|d| ready = d.fire(ticket));
                if let Some(filters) = ready {
                    on_change.call(filters);
                }
            });
            // Replacing the handle drops (and cancels) the previous timeout
            timer.set_value(Some(handle));
        }
    };

    // Clearing applies at once
    let emit_now = move || {
        cancel_pending();
        match form.with_untracked(|f| f.validate()) {
            Ok(filters) => {
                error.set(None);
                on_change.call(filters);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let clear = move |field: FilterField| {
        form.update(|f| f.clear(field));
        emit_now();
    };

    let clear_all = move |_| {
        form.update(|f| f.clear_all());
        emit_now();
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-5">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold flex items-center space-x-2">
                    <span>"Filters"</span>
                    {move || {
                        let active = form.with(|f| f.active_count());
                        (active > 0).then(|| view! {
                            <span class="px-2 py-0.5 text-xs rounded-full bg-primary-600">{active}</span>
                        })
                    }}
                </h2>
                <button
                    on:click=clear_all
                    class="text-sm text-gray-400 hover:text-white transition-colors"
                >
                    "Clear all"
                </button>
            </div>

            // Filename search
            <FilterGroup label="Filename" on_clear=move || clear(FilterField::Search)>
                <input
                    type="text"
                    placeholder="Search by name..."
                    prop:value=move || form.with(|f| f.search.clone())
                    on:input=move |ev| {
                        form.update(|f| f.set_search(event_target_value(&ev)));
                        schedule();
                    }
                    class="w-full bg-gray-700 rounded-lg px-4 py-2
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </FilterGroup>

            // File types
            <FilterGroup label="File type" on_clear=move || clear(FilterField::FileTypes)>
                <div class="grid grid-cols-2 md:grid-cols-5 gap-2">
                    {FILE_TYPE_OPTIONS.iter().map(|&(mime, label)| view! {
                        <label class="flex items-center space-x-2 text-sm text-gray-300 cursor-pointer">
                            <input
                                type="checkbox"
                                prop:checked=move || form.with(|f| f.has_file_type(mime))
                                on:change=move |_| {
                                    form.update(|f| f.toggle_file_type(mime));
                                    schedule();
                                }
                            />
                            <span>{label}</span>
                        </label>
                    }).collect_view()}
                </div>
            </FilterGroup>

            // Size range
            <FilterGroup label="Size (KB)" on_clear=move || clear(FilterField::Size)>
                <div class="flex items-center space-x-2">
                    <input
                        type="number"
                        min="0"
                        placeholder="Min"
                        prop:value=move || form.with(|f| f.min_size_kb.clone())
                        on:input=move |ev| {
                            form.update(|f| f.set_min_size_kb(event_target_value(&ev)));
                            schedule();
                        }
                        class="w-32 bg-gray-700 rounded-lg px-3 py-2 border border-gray-600"
                    />
                    <span class="text-gray-500">"to"</span>
                    <input
                        type="number"
                        min="0"
                        placeholder="Max"
                        prop:value=move || form.with(|f| f.max_size_kb.clone())
                        on:input=move |ev| {
                            form.update(|f| f.set_max_size_kb(event_target_value(&ev)));
                            schedule();
                        }
                        class="w-32 bg-gray-700 rounded-lg px-3 py-2 border border-gray-600"
                    />
                </div>
            </FilterGroup>

            // Upload date range
            <FilterGroup label="Uploaded" on_clear=move || clear(FilterField::Dates)>
                <div class="flex items-center space-x-2">
                    <input
                        type="date"
                        prop:value=move || form.with(|f| f.start_date.clone())
                        on:input=move |ev| {
                            form.update(|f| f.set_start_date(event_target_value(&ev)));
                            schedule();
                        }
                        class="bg-gray-700 rounded-lg px-3 py-2 border border-gray-600"
                    />
                    <span class="text-gray-500">"to"</span>
                    <input
                        type="date"
                        prop:value=move || form.with(|f| f.end_date.clone())
                        on:input=move |ev| {
                            form.update(|f| f.set_end_date(event_target_value(&ev)));
                            schedule();
                        }
                        class="bg-gray-700 rounded-lg px-3 py-2 border border-gray-600"
                    />
                </div>
            </FilterGroup>

            // Validation error; nothing is emitted while this is shown
            {move || error.get().map(|msg| view! {
                <p class="text-sm text-red-400">{msg}</p>
            })}
        </section>
    }
}

/// Labelled filter row with its own clear button
#[component]
fn FilterGroup<F>(
    label: &'static str,
    on_clear: F,
    children: Children,
) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <div>
            <div class="flex items-center justify-between mb-2">
                <label class="text-sm text-gray-400">{label}</label>
                <button
                    type="button"
                    on:click=move |_| on_clear()
                    class="text-xs text-gray-500 hover:text-gray-300"
                >
                    "Clear"
                </button>
            </div>
            {children()}
        </div>
    }
}
