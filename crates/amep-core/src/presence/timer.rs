//! Fixed-period presence timer, driven cooperatively by the host loop.

use std::time::{Duration, Instant};

/// Default presence update period.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(100);

/// Counts whole periods of elapsed time.
///
/// The timer never runs on its own: the host calls [`PresenceTimer::poll`]
/// (wall clock) or [`PresenceTimer::advance`] (explicit elapsed time) and
/// fires the returned number of ticks. Once cancelled it reports zero ticks
/// forever.
#[derive(Debug, Clone)]
pub struct PresenceTimer {
    period: Duration,
    /// Elapsed time not yet converted into ticks.
    pending: Duration,
    last_poll: Option<Instant>,
    cancelled: bool,
    fired: u64,
}

impl Default for PresenceTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

impl PresenceTimer {
    /// Create a timer. A zero period falls back to [`DEFAULT_TICK_PERIOD`].
    pub fn new(period: Duration) -> Self {
        Self {
            period: if period.is_zero() { DEFAULT_TICK_PERIOD } else { period },
            pending: Duration::ZERO,
            last_poll: None,
            cancelled: false,
            fired: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Total ticks reported so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Add elapsed time and return how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.cancelled {
            return 0;
        }

        self.pending = self.pending.saturating_add(elapsed);
        let period = self.period.as_nanos();
        let due = self.pending.as_nanos() / period;
        let remainder = self.pending.as_nanos() % period;
        self.pending = Duration::from_nanos(u64::try_from(remainder).unwrap_or(u64::MAX));

        let due = u32::try_from(due).unwrap_or(u32::MAX);
        self.fired = self.fired.saturating_add(u64::from(due));
        due
    }

    /// Measure elapsed wall time since the previous poll.
    ///
    /// The first poll only establishes the reference point.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if self.cancelled {
            return 0;
        }
        let elapsed = self
            .last_poll
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_poll = Some(now);
        self.advance(elapsed)
    }

    /// Stop the timer permanently.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.pending = Duration::ZERO;
        self.last_poll = None;
    }
}
