use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Default quiet window for free-text search triggers.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(300);

/// Trailing-edge debouncer holding at most one pending action.
///
/// Each [`schedule`](Self::schedule) supersedes the previous pending action.
/// The deadline is fixed when the action is scheduled, and a generation check
/// keeps a superseded action from running even when its timer already elapsed.
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct DebounceScheduler {
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl Default for DebounceScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DELAY)
    }
}

impl DebounceScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `action` after the scheduler's default delay.
    pub fn trigger<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule(action, self.delay);
    }

    /// Cancels any pending action and arms `action` to run once `delay` passes
    /// without another call.
    pub fn schedule<F>(&mut self, action: F, delay: Duration)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let generation = self.generation.load(Ordering::Acquire);
        let current = Arc::clone(&self.generation);
        let deadline = Instant::now() + delay;

        self.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            if current.load(Ordering::Acquire) == generation {
                action();
            }
        }));
    }

    /// Prevents the pending action, if any, from firing.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for DebounceScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::time::sleep;

    type Log = Arc<Mutex<Vec<(Duration, &'static str)>>>;

    fn record(log: &Log, start: Instant, label: &'static str) -> impl FnOnce() + Send + 'static {
        let log = Arc::clone(log);
        move || log.lock().expect("log mutex poisoned").push((start.elapsed(), label))
    }

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_into_one_trailing_call() {
        let log: Log = Arc::default();
        let start = Instant::now();
        let mut scheduler = DebounceScheduler::new(Duration::from_millis(300));

        for (index, label) in ["d", "di", "dia", "diaz"].into_iter().enumerate() {
            if index > 0 {
                sleep(Duration::from_millis(50)).await;
            }
            scheduler.trigger(record(&log, start, label));
        }

        sleep(Duration::from_millis(299)).await;
        assert!(log.lock().unwrap().is_empty(), "nothing fires inside the window");
        assert!(scheduler.is_pending());

        sleep(Duration::from_millis(10)).await;
        let fired = log.lock().unwrap().clone();
        assert_eq!(fired, vec![(Duration::from_millis(450), "diaz")]);
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_pending_action() {
        let log: Log = Arc::default();
        let start = Instant::now();
        let mut scheduler = DebounceScheduler::default();

        scheduler.trigger(record(&log, start, "search"));
        scheduler.cancel();
        assert!(!scheduler.is_pending());

        sleep(Duration::from_secs(1)).await;
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_each_fire_once() {
        let log: Log = Arc::default();
        let start = Instant::now();
        let mut scheduler = DebounceScheduler::new(Duration::from_millis(100));

        scheduler.trigger(record(&log, start, "first"));
        sleep(Duration::from_millis(250)).await;
        scheduler.trigger(record(&log, start, "second"));
        sleep(Duration::from_millis(250)).await;

        let fired = log.lock().unwrap().clone();
        assert_eq!(
            fired,
            vec![
                (Duration::from_millis(100), "first"),
                (Duration::from_millis(350), "second"),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_scheduler_cancels_pending_action() {
        let log: Log = Arc::default();
        let start = Instant::now();
        {
            let mut scheduler = DebounceScheduler::default();
            scheduler.trigger(record(&log, start, "orphan"));
        }
        sleep(Duration::from_secs(1)).await;
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_delay_overrides_default() {
        let log: Log = Arc::default();
        let start = Instant::now();
        let mut scheduler = DebounceScheduler::default();

        scheduler.schedule(record(&log, start, "quick"), Duration::from_millis(20));
        sleep(Duration::from_millis(25)).await;

        let fired = log.lock().unwrap().clone();
        assert_eq!(fired, vec![(Duration::from_millis(20), "quick")]);
        assert_eq!(scheduler.delay(), DEFAULT_SEARCH_DELAY);
    }
}
