//! Storage Statistics Component
//!
//! Deduplication summary cards, refreshed on an interval and after every
//! upload or delete.

use std::time::Duration;

use filehub::{CacheScope, StatCard, StatsSummary, DEFAULT_POLL_INTERVAL};
use gloo_timers::callback::Interval;
use leptos::*;

use crate::api;
use crate::components::loading::CardSkeleton;
use crate::state::global::GlobalState;

/// Statistics panel component
#[component]
pub fn StatsPanel(
    #[prop(default = DEFAULT_POLL_INTERVAL)]
    poll: Duration,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let summary = create_rw_signal(None::<StatsSummary>);
    let (error, set_error) = create_signal(None::<String>);

    let version = state.stats_version;
    let cache = state.cache;
    create_effect(move |_| {
        let current = version.get();

        if let Some(stats) = cache.with_value(|c| c.stats().cloned()) {
            summary.set(Some(StatsSummary::from(&stats)));
            return;
        }

        spawn_local(async move {
            let result = api::fetch_storage_stats().await;

            // A mutation or poll has started a newer fetch
            if !cache.with_value(|c| c.is_current(CacheScope::Stats, current)) {
                return;
            }

            match result {
                Ok(stats) => {
                    cache.update_value(|c| c.store_stats(stats.clone()));
                    summary.set(Some(StatsSummary::from(&stats)));
                    set_error.set(None);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to load statistics: {}", e).into());
                    set_error.set(Some(e));
                }
            }
        });
    });

    // Periodic refresh; the interval stops when the panel unmounts
    let state_for_poll = state.clone();
    let interval = Interval::new(poll.as_millis() as u32, move || {
        state_for_poll.invalidate(CacheScope::Stats);
    });
    on_cleanup(move || drop(interval));

    view! {
        <section>
            {move || error.get().map(|msg| view! {
                <p class="text-sm text-red-400 mb-2">"Statistics unavailable: " {msg}</p>
            })}

            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                {move || match summary.get() {
                    Some(summary) => summary
                        .cards()
                        .into_iter()
                        .map(|card| view! { <StatCardView card=card /> })
                        .collect_view(),
                    None => (0..4).map(|_| view! { <CardSkeleton /> }).collect_view(),
                }}
            </div>
        </section>
    }
}

#[component]
fn StatCardView(card: StatCard) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4">
            <p class="text-sm text-gray-400">{card.label}</p>
            <p class="text-2xl font-bold mt-1">{card.value}</p>
            {card.hint.map(|hint| view! {
                <p class="text-xs text-gray-500 mt-1">{hint}</p>
            })}
        </div>
    }
}
