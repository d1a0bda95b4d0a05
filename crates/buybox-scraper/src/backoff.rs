//! Delay schedules for the fetch cycle, the recovery loop, and pacing.
//!
//! | Where | Delay |
//! |-------|-------|
//! | between fetch attempts `i` | `0.7 s + i × 1.1 s + U(0, 0.6 s)` |
//! | after an empty cycle `c` | `1 s × base^c + U(0, 0.8 s)` |
//! | after a blocked cycle `c` | `1 s × base^(c+1) + U(0, 1.2 s)` |
//! | after a classified page | `0.06 s + U(0, 0.10 s)` |
//!
//! The blocked schedule is one exponent steeper than the empty one.

use std::time::Duration;

/// Tunable delay constants. [`RetryPolicy::default`] is the production
/// schedule; [`RetryPolicy::immediate`] removes every sleep.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub attempt_base: Duration,
    pub attempt_step: Duration,
    pub attempt_jitter: Duration,
    /// Multiplied by `backoff_base^k` between recovery cycles.
    pub cycle_unit: Duration,
    pub backoff_base: f64,
    pub empty_jitter: Duration,
    pub blocked_jitter: Duration,
    pub pacing_base: Duration,
    pub pacing_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempt_base: Duration::from_millis(700),
            attempt_step: Duration::from_millis(1100),
            attempt_jitter: Duration::from_millis(600),
            cycle_unit: Duration::from_secs(1),
            backoff_base: 1.8,
            empty_jitter: Duration::from_millis(800),
            blocked_jitter: Duration::from_millis(1200),
            pacing_base: Duration::from_millis(60),
            pacing_jitter: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// A policy with every delay set to zero.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            attempt_base: Duration::ZERO,
            attempt_step: Duration::ZERO,
            attempt_jitter: Duration::ZERO,
            cycle_unit: Duration::ZERO,
            backoff_base: 1.0,
            empty_jitter: Duration::ZERO,
            blocked_jitter: Duration::ZERO,
            pacing_base: Duration::ZERO,
            pacing_jitter: Duration::ZERO,
        }
    }

    /// Sleep before the attempt following attempt `attempt` of a fetch cycle.
    #[must_use]
    pub fn attempt_delay(&self, attempt: u32) -> Duration {
        self.attempt_base + self.attempt_step.saturating_mul(attempt) + jitter(self.attempt_jitter)
    }

    /// Sleep after cycle `cycle` produced no response or an empty body.
    #[must_use]
    pub fn empty_cycle_delay(&self, cycle: u32) -> Duration {
        self.scaled_unit(cycle) + jitter(self.empty_jitter)
    }

    /// Sleep after cycle `cycle` ended blocked.
    #[must_use]
    pub fn blocked_cycle_delay(&self, cycle: u32) -> Duration {
        self.scaled_unit(cycle.saturating_add(1)) + jitter(self.blocked_jitter)
    }

    /// Politeness delay after a page was classified.
    #[must_use]
    pub fn pacing_delay(&self) -> Duration {
        self.pacing_base + jitter(self.pacing_jitter)
    }

    fn scaled_unit(&self, exponent: u32) -> Duration {
        let factor = self.backoff_base.powi(i32::try_from(exponent).unwrap_or(i32::MAX));
        let secs = self.cycle_unit.as_secs_f64() * factor;
        Duration::try_from_secs_f64(secs).unwrap_or(MAX_CYCLE_DELAY)
    }
}

/// Upper bound used when the exponential schedule overflows.
const MAX_CYCLE_DELAY: Duration = Duration::from_secs(300);

/// Uniform random duration in `[0, max)`.
fn jitter(max: Duration) -> Duration {
    if max.is_zero() {
        return Duration::ZERO;
    }
    max.mul_f64(rand::random::<f64>())
}

/// Sleeps for `delay`, skipping the timer entirely for zero delays.
pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
