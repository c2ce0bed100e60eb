use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use async_trait::async_trait;

/// Source of time for everything that waits: retry backoff and request pacing.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    async fn sleep(&self, duration: Duration);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Virtual clock that advances instantly on `sleep` and remembers every request.
/// Clones share the same timeline.
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    state: Arc<Mutex<ManualClockState>>,
}

#[derive(Debug, Default)]
struct ManualClockState {
    elapsed: Duration,
    sleeps: Vec<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        ManualClock {
            origin: Instant::now(),
            state: Arc::new(Mutex::new(ManualClockState::default())),
        }
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, duration: Duration) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.elapsed += duration;
    }

    pub fn elapsed(&self) -> Duration {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).elapsed
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .sleeps
            .clone()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.elapsed += duration;
        state.sleeps.push(duration);
    }
}

/// Enforces a minimum interval between the starts of consecutive requests.
pub struct RequestPacer<C> {
    clock: C,
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl<C: Clock> RequestPacer<C> {
    pub fn new(clock: C, min_interval: Duration) -> Self {
        RequestPacer {
            clock,
            min_interval,
            last_request: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits out whatever remains of the interval, then marks a request as started.
    pub async fn wait_turn(&mut self) {
        if let Some(last) = self.last_request {
            let ready_at = last + self.min_interval;
            let remaining = ready_at.saturating_duration_since(self.clock.now());
            if !remaining.is_zero() {
                self.clock.sleep(remaining).await;
            }
        }
        self.last_request = Some(self.clock.now());
    }
}
