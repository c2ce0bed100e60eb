use std::time::Duration;

pub const DEFAULT_RETRY_STATUSES: [u16; 4] = [500, 502, 503, 504];

/// Exponential backoff over a fixed set of transient server statuses.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    max_retries: u32,
    backoff_factor: Duration,
    max_backoff: Duration,
    statuses: Vec<u16>,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff_factor: Duration, max_backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff_factor,
            max_backoff,
            statuses: DEFAULT_RETRY_STATUSES.to_vec(),
        }
    }

    pub fn with_statuses(mut self, statuses: Vec<u16>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn retries_status(&self, status: u16) -> bool {
        self.statuses.contains(&status)
    }

    /// Delay before retry number `retry` (1-based). The first retry goes out
    /// immediately; later ones wait factor * 2^(retry - 1), capped.
    pub fn delay(&self, retry: u32) -> Duration {
        if retry <= 1 {
            return Duration::ZERO;
        }
        let exponent = retry.saturating_sub(1).min(20);
        self.backoff_factor
            .saturating_mul(2u32.saturating_pow(exponent))
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::new(3, Duration::from_secs(5), Duration::from_secs(120))
    }
}
