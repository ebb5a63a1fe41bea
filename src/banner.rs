//! A confirmation banner that hides itself after a fixed delay.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use tokio::task::JoinHandle;

/// How long the "settings saved" banner stays visible.
pub const SAVED_BANNER_DURATION: Duration = Duration::from_secs(3);

/// A callback that runs once after a delay unless it is cancelled first.
///
/// Dropping the handle cancels the callback if it has not run yet.
/// Must be created from within a tokio runtime.
#[derive(Debug)]
pub struct ScheduledCallback {
    handle: JoinHandle<()>,
}

impl ScheduledCallback {
    /// Run `callback` after `delay`.
    pub fn schedule<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        // The countdown starts now, not when the task is first polled.
        let deadline = tokio::time::Instant::now() + delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            callback();
        });

        Self { handle }
    }

    /// Stop the callback from running. Has no effect if it already ran.
    pub fn cancel(self) {
        self.handle.abort();
    }

    /// Whether the callback has run or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledCallback {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug, Default)]
struct BannerState {
    visible: bool,
    /// Incremented each time the banner is shown or dismissed so that a timer
    /// from an earlier showing cannot hide a later one.
    generation: u64,
    timer: Option<ScheduledCallback>,
}

/// A banner that is shown on demand and hidden again after a fixed duration.
///
/// Clones share the same banner.
#[derive(Debug, Clone)]
pub struct TransientBanner {
    duration: Duration,
    state: Arc<Mutex<BannerState>>,
}

impl TransientBanner {
    /// Create a hidden banner that stays up for `duration` once shown.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            state: Arc::default(),
        }
    }

    /// How long the banner stays visible after [TransientBanner::show].
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Show the banner and restart its countdown.
    ///
    /// Any pending countdown from an earlier call is cancelled.
    pub fn show(&self) {
        let mut state = lock(&self.state);
        state.generation += 1;
        state.visible = true;

        let generation = state.generation;
        let shared = Arc::downgrade(&self.state);
        // Replacing the timer drops, and so cancels, the previous one.
        state.timer = Some(ScheduledCallback::schedule(self.duration, move || {
            hide_if_current(&shared, generation);
        }));
    }

    /// Hide the banner now and cancel its countdown.
    pub fn dismiss(&self) {
        let mut state = lock(&self.state);
        state.generation += 1;
        state.visible = false;

        if let Some(timer) = state.timer.take() {
            timer.cancel();
        }
    }

    /// Whether the banner is currently shown.
    pub fn is_visible(&self) -> bool {
        lock(&self.state).visible
    }
}

impl Default for TransientBanner {
    fn default() -> Self {
        Self::new(SAVED_BANNER_DURATION)
    }
}

fn hide_if_current(shared: &Weak<Mutex<BannerState>>, generation: u64) {
    let Some(state) = shared.upgrade() else {
        return;
    };

    let mut state = lock(&state);
    if state.generation == generation {
        state.visible = false;
    }
}

// The banner state stays consistent even if a holder panicked, so a poisoned
// lock is safe to reuse.
fn lock(state: &Mutex<BannerState>) -> MutexGuard<'_, BannerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
