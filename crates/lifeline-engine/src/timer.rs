//! Cancellable periodic trigger for the play loop
//!
//! The engine never spawns threads or sleeps. A host event loop asks the
//! timer whether a firing is due and the engine steps when it is. Each time
//! the timer is armed it gets a fresh [`TimerId`], so a firing the host
//! scheduled before `stop()` or `set_interval()` can be recognised as stale
//! and dropped.

use std::fmt;
use std::time::{Duration, Instant};

/// Identity of one arming of a [`PlayTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer:{}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    id: TimerId,
    interval: Duration,
    next_due: Instant,
}

/// A periodic trigger that is either armed or cancelled
#[derive(Debug, Default)]
pub struct PlayTimer {
    next_id: u64,
    armed: Option<Armed>,
}

impl PlayTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer, replacing any previous arming
    ///
    /// The first firing is due one `interval` after `now`.
    pub fn arm(&mut self, now: Instant, interval: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.armed = Some(Armed {
            id,
            interval,
            next_due: now + interval,
        });
        id
    }

    /// Cancel the timer, returning the ID it was armed with
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.armed.take().map(|armed| armed.id)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// ID of the current arming
    pub fn id(&self) -> Option<TimerId> {
        self.armed.map(|armed| armed.id)
    }

    pub fn interval(&self) -> Option<Duration> {
        self.armed.map(|armed| armed.interval)
    }

    /// When the next firing is due
    pub fn next_due(&self) -> Option<Instant> {
        self.armed.map(|armed| armed.next_due)
    }

    /// Consume a firing if one is due at `now`
    ///
    /// At most one firing is reported per call. A host that fell behind does
    /// not get a burst of catch-up ticks; the next firing is rescheduled one
    /// interval after `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match &mut self.armed {
            Some(armed) if now >= armed.next_due => {
                armed.next_due = now + armed.interval;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    #[test]
    fn test_fires_after_interval() {
        let start = Instant::now();
        let mut timer = PlayTimer::new();
        timer.arm(start, TICK);

        assert!(!timer.fire(start));
        assert!(!timer.fire(start + Duration::from_millis(99)));
        assert!(timer.fire(start + TICK));
        assert_eq!(timer.next_due(), Some(start + TICK * 2));
    }

    #[test]
    fn test_no_burst_after_stall() {
        let start = Instant::now();
        let mut timer = PlayTimer::new();
        timer.arm(start, TICK);

        let late = start + TICK * 10;
        assert!(timer.fire(late));
        assert!(!timer.fire(late));
        assert!(timer.fire(late + TICK));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timer = PlayTimer::new();
        let id = timer.arm(start, TICK);

        assert_eq!(timer.cancel(), Some(id));
        assert!(!timer.is_armed());
        assert!(!timer.fire(start + TICK * 5));
        assert_eq!(timer.cancel(), None);
    }

    #[test]
    fn test_rearm_gets_new_id() {
        let start = Instant::now();
        let mut timer = PlayTimer::new();
        let first = timer.arm(start, TICK);
        let second = timer.arm(start, Duration::from_millis(50));

        assert_ne!(first, second);
        assert_eq!(timer.id(), Some(second));
        assert_eq!(timer.interval(), Some(Duration::from_millis(50)));
        assert_eq!(format!("{}", second), format!("timer:{}", second.raw()));
    }
}
