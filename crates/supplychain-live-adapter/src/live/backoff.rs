/*
[INPUT]:  Reconnect policy (base delay, ceiling, attempt cap)
[OUTPUT]: Exponential backoff delays and attempt bookkeeping
[POS]:    Live layer - reconnection pacing
[UPDATE]: When changing reconnection backoff
*/

use std::time::Duration;

pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(60);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub max_attempts: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ReconnectPolicy {
    /// `2^attempt * base_delay`, clamped to `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.min(31);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Attempt counter for the current run of failed connections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconnectState {
    attempt: u32,
    exhausted: bool,
}

impl ReconnectState {
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Claim the next attempt.
    ///
    /// Returns `None` once `max_attempts` reconnects have been handed out.
    pub fn next_delay(&mut self, policy: &ReconnectPolicy) -> Option<(u32, Duration)> {
        if self.attempt >= policy.max_attempts {
            return None;
        }
        self.attempt += 1;
        Some((self.attempt, policy.delay_for(self.attempt)))
    }

    /// Flip to exhausted; true only for the first call.
    pub fn mark_exhausted(&mut self) -> bool {
        !std::mem::replace(&mut self.exhausted, true)
    }
}
