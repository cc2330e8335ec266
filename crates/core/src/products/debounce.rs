//! Search input debouncing.
//!
//! Filtering runs on the settled search term, not on every keystroke: a new
//! term only takes effect once the input has stayed unchanged for the
//! debounce interval.

use std::time::Duration;

use tokio::{
    sync::watch,
    time::{Instant, sleep},
};

/// Interval the search box waits before applying a term.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Clock-agnostic debounce state.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    interval: Duration,
    settled: T,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(initial: T, interval: Duration) -> Self {
        Self {
            interval,
            settled: initial,
            pending: None,
        }
    }

    /// Record new input at `now`, restarting the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Promote the pending value once it has been stable for the interval.
    ///
    /// Returns `true` when the settled value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some((value, since)) if now.saturating_duration_since(since) >= self.interval => {
                self.settled = value;
                true
            }
            pending => {
                self.pending = pending;
                false
            }
        }
    }

    /// The value filtering should currently use.
    pub fn settled(&self) -> &T {
        &self.settled
    }

    /// When the pending value will settle, if any is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, since)| *since + self.interval)
    }
}

/// Forward values from `input` only after it has been quiet for `interval`.
///
/// The returned receiver starts with the input's current value. The
/// forwarding task ends when the input sender is dropped or every output
/// receiver is gone.
pub fn spawn_debounced<T>(mut input: watch::Receiver<T>, interval: Duration) -> watch::Receiver<T>
where
    T: Clone + Send + Sync + 'static,
{
    let (output, receiver) = watch::channel(input.borrow_and_update().clone());

    tokio::spawn(async move {
        let mut state = Debounce::new(input.borrow().clone(), interval);

        loop {
            let deadline = state.deadline();

            tokio::select! {
                changed = input.changed() => {
                    if changed.is_err() {
                        break;
                    }

                    state.push(input.borrow_and_update().clone(), Instant::now());
                }
                () = sleep_until_deadline(deadline) => {
                    if state.poll(Instant::now()) && output.send(state.settled().clone()).is_err() {
                        break;
                    }
                }
            }
        }
    });

    receiver
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep(deadline.saturating_duration_since(Instant::now())).await,
        None => std::future::pending().await,
    }
}
