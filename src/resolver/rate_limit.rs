/*!
 * Rolling-window action limiter.
 *
 * A naive manual counter guarding user-initiated resolutions: at most N
 * actions per 60-second window, implemented as a plain counter reset by
 * wall-clock comparison. The window opens with the first counted action, not
 * at construction. Not a token bucket, not persisted, reset on process
 * restart. A rejected action makes no provider call at all.
 */

use std::time::{Duration, Instant};

/// Default actions allowed per window
pub const DEFAULT_LIMIT: u32 = 5;
/// Default window length
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Plain rolling-window counter
#[derive(Debug)]
pub struct ActionLimiter {
    /// Maximum actions per window
    limit: u32,
    /// Window length
    window: Duration,
    /// Start of the current window; anchored at the first counted action,
    /// not at construction
    window_start: Instant,
    /// Actions counted in the current window
    count: u32,
}

impl Default for ActionLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_WINDOW)
    }
}

impl ActionLimiter {
    /// Create a limiter allowing `limit` actions per `window`
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            window_start: Instant::now(),
            count: 0,
        }
    }

    /// Try to take one action slot now
    ///
    /// # Returns
    /// * `Ok(())` when the action may proceed
    /// * `Err(remaining)` with the time left in the window when it may not
    pub fn try_acquire(&mut self) -> Result<(), Duration> {
        self.try_acquire_at(Instant::now())
    }

    /// Try to take one action slot at an explicit point in time (used by
    /// tests to avoid sleeping through the window)
    pub fn try_acquire_at(&mut self, now: Instant) -> Result<(), Duration> {
        let elapsed = if self.count == 0 {
            Duration::ZERO
        } else {
            now.saturating_duration_since(self.window_start)
        };

        if elapsed >= self.window && self.count > 0 {
            self.count = 0;
        }

        if self.count >= self.limit {
            let remaining = self.window.saturating_sub(elapsed);
            return Err(remaining);
        }

        if self.count == 0 {
            self.window_start = now;
        }
        self.count += 1;
        Ok(())
    }

    /// Actions still available in the current window
    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.count)
    }

    /// The configured per-window limit
    pub fn limit(&self) -> u32 {
        self.limit
    }
}
