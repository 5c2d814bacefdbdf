//! Debounced Emission
//!
//! Collapses rapid repeated triggers into a single emission once a quiet
//! period has elapsed.
//!
//! [`Debouncer`] is a timer-agnostic state machine: every [`schedule`] call
//! supersedes the previous pending value and hands back a [`Ticket`]; the
//! platform's timer later presents the ticket to [`fire`], which only yields
//! the value if nothing newer was scheduled in between. The browser drives it
//! with `gloo-timers`, the native side with [`DebouncedEmitter`].
//!
//! [`schedule`]: Debouncer::schedule
//! [`fire`]: Debouncer::fire

use std::time::Duration;

/// Quiet period before filter changes are emitted
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Identifies one scheduled emission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Pending-value holder keyed by generation
#[derive(Debug)]
pub struct Debouncer<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debouncer<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }

    /// Replace any pending value; earlier tickets become stale.
    pub fn schedule(&mut self, value: T) -> Ticket {
        self.generation += 1;
        self.pending = Some(value);
        Ticket(self.generation)
    }

    /// Take the pending value if `ticket` is still the latest one.
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drop the pending value and invalidate outstanding tickets.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(feature = "native")]
pub use self::native::DebouncedEmitter;

#[cfg(feature = "native")]
mod native {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::task::JoinHandle;

    use super::Debouncer;

    /// Tokio-backed debouncer invoking a callback after the quiet period.
    ///
    /// Each [`trigger`](Self::trigger) aborts the previously spawned timer
    /// task. Dropping the emitter aborts whatever is still pending.
    pub struct DebouncedEmitter<T: Send + 'static> {
        quiet: Duration,
        state: Arc<Mutex<Debouncer<T>>>,
        emit: Arc<dyn Fn(T) + Send + Sync>,
        timer: Option<JoinHandle<()>>,
    }

    impl<T: Send + 'static> DebouncedEmitter<T> {
        pub fn new(quiet: Duration, emit: impl Fn(T) + Send + Sync + 'static) -> Self {
            Self {
                quiet,
                state: Arc::new(Mutex::new(Debouncer::new())),
                emit: Arc::new(emit),
                timer: None,
            }
        }

        /// Schedule `value`, superseding anything still pending.
        ///
        /// Must be called from within a tokio runtime.
        pub fn trigger(&mut self, value: T) {
            if let Some(timer) = self.timer.take() {
                timer.abort();
            }

            let ticket = match self.state.lock() {
                Ok(mut state) => state.schedule(value),
                Err(_) => return,
            };

            let state = Arc::clone(&self.state);
            let emit = Arc::clone(&self.emit);
            let quiet = self.quiet;

            self.timer = Some(tokio::spawn(async move {
                tokio::time::sleep(quiet).await;
                let ready = state.lock().ok().and_then(|mut s| s.fire(ticket));
                if let Some(value) = ready {
                    emit(value);
                }
            }));
        }

        /// Cancel the pending emission, if any.
        pub fn cancel(&mut self) {
            if let Some(timer) = self.timer.take() {
                timer.abort();
            }
            if let Ok(mut state) = self.state.lock() {
                state.cancel();
            }
        }

        pub fn is_pending(&self) -> bool {
            self.state.lock().map(|s| s.is_pending()).unwrap_or(false)
        }
    }

    impl<T: Send + 'static> Drop for DebouncedEmitter<T> {
        fn drop(&mut self) {
            self.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let mut debouncer = Debouncer::new();
        let first = debouncer.schedule("a");
        let second = debouncer.schedule("ab");

        assert_eq!(debouncer.fire(first), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.fire(second), Some("ab"));
        assert_eq!(debouncer.fire(second), None);
    }

    #[test]
    fn test_cancel_invalidates_ticket() {
        let mut debouncer = Debouncer::new();
        let ticket = debouncer.schedule(1);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.fire(ticket), None);
    }

    #[cfg(feature = "native")]
    mod native {
        use super::super::*;
        use std::sync::{Arc, Mutex};

        fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) + Send + Sync + 'static) {
            let seen = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&seen);
            (seen, move |v: String| sink.lock().unwrap().push(v))
        }

        #[tokio::test(start_paused = true)]
        async fn test_rapid_triggers_collapse() {
            let (seen, emit) = recorder();
            let mut emitter = DebouncedEmitter::new(DEFAULT_QUIET_PERIOD, emit);

            for text in ["r", "re", "rep", "repo"] {
                emitter.trigger(text.to_string());
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            assert!(seen.lock().unwrap().is_empty());

            tokio::time::sleep(Duration::from_millis(600)).await;
            assert_eq!(*seen.lock().unwrap(), vec!["repo".to_string()]);
            assert!(!emitter.is_pending());
        }

        #[tokio::test(start_paused = true)]
        async fn test_drop_cancels_pending() {
            let (seen, emit) = recorder();
            let mut emitter = DebouncedEmitter::new(DEFAULT_QUIET_PERIOD, emit);
            emitter.trigger("report".to_string());
            drop(emitter);

            tokio::time::sleep(Duration::from_secs(2)).await;
            assert!(seen.lock().unwrap().is_empty());
        }
    }
}
