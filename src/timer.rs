//! Countdown tick source for an in-progress session.
//!
//! The event loop polls for input with a sub-second timeout and asks the
//! ticker how many whole seconds have elapsed since it last asked. Most
//! polls the answer is zero; after a suspend or a slow redraw it can be
//! more than one, in which case the missed ticks are delivered late
//! rather than dropped. No drift correction beyond that.

use std::time::Instant;

/// Converts wall-clock time into discrete one-second ticks.
///
/// A `Ticker` exists only while a session is in progress: it is created
/// when the session starts and dropped when the session submits, so a
/// stale tick can never reach a frozen ledger.
#[derive(Debug)]
pub struct Ticker {
    last_tick: Instant,
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Number of whole seconds elapsed since the previous `poll` (or
    /// since creation). Advances the internal mark by exactly that many
    /// seconds, so fractional remainders carry over to the next poll.
    pub fn poll(&mut self) -> u32 {
        self.poll_at(Instant::now())
    }

    fn poll_at(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last_tick);
        let whole = elapsed.as_secs() as u32;
        if whole > 0 {
            self.last_tick += std::time::Duration::from_secs(u64::from(whole));
        }
        whole
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_sub_second_polls_yield_nothing() {
        let start = Instant::now();
        let mut ticker = Ticker {
            last_tick: start,
        };
        assert_eq!(ticker.poll_at(start + Duration::from_millis(400)), 0);
        assert_eq!(ticker.poll_at(start + Duration::from_millis(900)), 0);
        // The fraction carried over; at 1.1s total one tick is due.
        assert_eq!(ticker.poll_at(start + Duration::from_millis(1100)), 1);
    }

    #[test]
    fn test_batched_seconds_are_delivered_late() {
        let start = Instant::now();
        let mut ticker = Ticker {
            last_tick: start,
        };
        assert_eq!(ticker.poll_at(start + Duration::from_millis(3500)), 3);
        // The 0.5s remainder stays banked.
        assert_eq!(ticker.poll_at(start + Duration::from_millis(4000)), 1);
        assert_eq!(ticker.poll_at(start + Duration::from_millis(4200)), 0);
    }
}
