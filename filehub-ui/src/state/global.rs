//! Global Application State
//!
//! Reactive state management using Leptos signals.

use filehub::{CacheScope, QueryCache, SearchFilters};
use leptos::*;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Filters last emitted by the filter panel
    pub filters: RwSignal<SearchFilters>,
    /// Current listing page (1-based)
    pub page: RwSignal<u32>,
    /// Cached listing pages and statistics
    pub cache: StoredValue<QueryCache>,
    /// Bumped whenever the file listing cache is invalidated
    pub files_version: RwSignal<u64>,
    /// Bumped whenever the statistics cache is invalidated
    pub stats_version: RwSignal<u64>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        filters: create_rw_signal(SearchFilters::default()),
        page: create_rw_signal(1),
        cache: store_value(QueryCache::new()),
        files_version: create_rw_signal(0),
        stats_version: create_rw_signal(0),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Apply new filters; the listing restarts at page 1
    pub fn set_filters(&self, filters: SearchFilters) {
        self.page.set(1);
        self.filters.set(filters);
    }

    pub fn set_page(&self, page: u32) {
        self.page.set(page.max(1));
    }

    /// Drop one cache scope and notify whatever reads it
    pub fn invalidate(&self, scope: CacheScope) {
        self.cache.update_value(|cache| cache.invalidate(scope));
        self.sync_versions();
    }

    /// Upload and delete change both the listing and the statistics
    pub fn invalidate_after_mutation(&self) {
        self.cache.update_value(|cache| cache.invalidate_after_mutation());
        self.sync_versions();
    }

    fn sync_versions(&self) {
        let (files, stats) = self.cache.with_value(|cache| {
            (cache.version(CacheScope::Files), cache.version(CacheScope::Stats))
        });
        self.files_version.set(files);
        self.stats_version.set(stats);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        }).forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_state(test: impl FnOnce(GlobalState)) {
        let runtime = create_runtime();
        provide_global_state();
        test(use_context::<GlobalState>().expect("GlobalState not found"));
        runtime.dispose();
    }

    #[test]
    fn test_set_filters_resets_page() {
        with_state(|state| {
            state.set_page(4);
            let filters = SearchFilters {
                search: Some("report".to_string()),
                ..Default::default()
            };
            state.set_filters(filters.clone());

            assert_eq!(state.page.get_untracked(), 1);
            assert_eq!(state.filters.get_untracked(), filters);
        });
    }

    #[test]
    fn test_mutation_bumps_both_versions() {
        with_state(|state| {
            state.invalidate(CacheScope::Stats);
            assert_eq!(state.files_version.get_untracked(), 0);
            assert_eq!(state.stats_version.get_untracked(), 1);

            state.invalidate_after_mutation();
            assert_eq!(state.files_version.get_untracked(), 1);
            assert_eq!(state.stats_version.get_untracked(), 2);
        });
    }
}
