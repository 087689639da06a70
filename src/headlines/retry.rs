use std::time::Duration;

use rand::Rng;

use crate::config::RetryConfig;

/// Exponential backoff: `min(base * 2^retry, max)` with a uniform jitter
/// offset of up to `jitter * delay` in either direction.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter: f64,
}

impl RetryPolicy {
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            jitter: 0.0,
        }
    }

    /// Delay before retry number `retry` (zero based), without jitter.
    pub fn base_delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    pub fn delay_for(&self, retry: u32) -> Duration {
        let delay = self.base_delay_for(retry);
        if !self.jitter.is_finite() {
            return delay;
        }

        let jitter = self.jitter.clamp(0.0, 1.0);
        if jitter == 0.0 || delay.is_zero() {
            return delay;
        }

        let spread = delay.as_secs_f64() * jitter;
        let offset = rand::thread_rng().gen_range(-spread..=spread);
        Duration::from_secs_f64((delay.as_secs_f64() + offset).max(0.0))
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            jitter: config.jitter,
        }
    }
}
