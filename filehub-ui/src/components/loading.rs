//! Loading Placeholders
//!
//! Skeletons shown while the first response is in flight.

use leptos::*;

/// Placeholder for one statistics card
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 animate-pulse">
            <div class="h-4 bg-gray-700 rounded w-1/2 mb-3" />
            <div class="h-8 bg-gray-700 rounded w-1/3" />
        </div>
    }
}

/// Placeholder rows for the file table
#[component]
pub fn ListSkeleton(
    #[prop(default = 3)]
    count: usize,
) -> impl IntoView {
    view! {
        <div class="space-y-2 animate-pulse">
            {(0..count).map(|_| view! {
                <div class="flex items-center space-x-4 h-10">
                    <div class="flex-1 h-4 bg-gray-700 rounded" />
                    <div class="w-16 h-4 bg-gray-700 rounded" />
                    <div class="w-20 h-4 bg-gray-700 rounded" />
                    <div class="w-32 h-4 bg-gray-700 rounded" />
                </div>
            }).collect_view()}
        </div>
    }
}
