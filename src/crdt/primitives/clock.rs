// model = "claude-opus-4-5"
// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! The high-water Lamport clock of a replica's log.
//!
//! The clock records the greatest operation clock the log has accepted.
//! New operations are stamped one past it, and a batch whose smallest clock
//! is strictly greater than it can be appended without reordering the log.
//!
//! Complexity:
//! - observe: O(1)
//! - next: O(1)
//! - dominated_by: O(1)

/// A Lamport clock tracking the greatest time observed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LamportClock {
    time: u64,
}

impl LamportClock {
    /// Create a new clock starting at 0.
    pub fn new() -> LamportClock {
        return LamportClock { time: 0 };
    }

    /// Get the current time.
    #[inline]
    pub fn time(&self) -> u64 {
        return self.time;
    }

    /// The time a freshly authored operation should carry.
    #[inline]
    pub fn next(&self) -> u64 {
        return self.time.saturating_add(1);
    }

    /// Record a time seen in the log. Sets local time to max(local, time).
    #[inline]
    pub fn observe(&mut self, time: u64) {
        self.time = self.time.max(time);
    }

    /// True if `time` is strictly past everything observed so far.
    #[inline]
    pub fn dominated_by(&self, time: u64) -> bool {
        return time > self.time;
    }
}
