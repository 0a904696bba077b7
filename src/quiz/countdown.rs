use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);

/// A restartable whole-second countdown driven by elapsed time.
///
/// The owner feeds it elapsed wall-clock time through [`Countdown::advance`];
/// completion is reported through the return value exactly once per run.
/// `start` and `reset` discard any partial second already accumulated, so a
/// tick belonging to a previous run can never land on the new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    initial: u32,
    remaining: u32,
    active: bool,
    carry: Duration,
}

impl Countdown {
    pub fn new(initial_seconds: u32, auto_start: bool) -> Self {
        Self {
            initial: initial_seconds,
            remaining: initial_seconds,
            active: auto_start,
            carry: Duration::ZERO,
        }
    }

    /// Restore the full duration and begin ticking.
    pub fn start(&mut self) {
        self.remaining = self.initial;
        self.active = true;
        self.carry = Duration::ZERO;
    }

    /// Restore the full duration and stop ticking.
    pub fn reset(&mut self) {
        self.remaining = self.initial;
        self.active = false;
        self.carry = Duration::ZERO;
    }

    /// Feed elapsed time. Returns true when this call completed the run.
    #[must_use]
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.active {
            return false;
        }
        if self.remaining == 0 {
            self.finish();
            return true;
        }

        self.carry += elapsed;
        while self.carry >= TICK {
            self.carry -= TICK;
            self.remaining -= 1;
            if self.remaining == 0 {
                self.finish();
                return true;
            }
        }
        false
    }

    /// Advance by exactly one second.
    #[must_use]
    pub fn tick(&mut self) -> bool {
        self.advance(TICK)
    }

    fn finish(&mut self) {
        self.active = false;
        self.carry = Duration::ZERO;
    }

    pub fn time_left(&self) -> u32 {
        self.remaining
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_ticks_complete_once() {
        let mut countdown = Countdown::new(5, true);
        let completions = (0..5).filter(|_| countdown.tick()).count();

        assert_eq!(completions, 1);
        assert_eq!(countdown.time_left(), 0);
        assert!(!countdown.is_active());

        // Further ticks do nothing until restarted
        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert_eq!(countdown.time_left(), 0);
    }

    #[test]
    fn test_no_ticks_while_inactive() {
        let mut countdown = Countdown::new(4, false);
        assert!(!countdown.advance(Duration::from_secs(10)));
        assert_eq!(countdown.time_left(), 4);
        assert!(!countdown.is_active());
    }

    #[test]
    fn test_start_restores_and_activates() {
        let mut countdown = Countdown::new(3, true);
        assert!(!countdown.tick());
        assert_eq!(countdown.time_left(), 2);

        countdown.start();
        assert_eq!(countdown.time_left(), 3);
        assert!(countdown.is_active());
    }

    #[test]
    fn test_reset_restores_and_deactivates() {
        let mut countdown = Countdown::new(3, true);
        assert!(!countdown.tick());

        countdown.reset();
        assert_eq!(countdown.time_left(), 3);
        assert!(!countdown.is_active());
        assert!(!countdown.tick());
        assert_eq!(countdown.time_left(), 3);
    }

    #[test]
    fn test_restart_after_completion() {
        let mut countdown = Countdown::new(1, true);
        assert!(countdown.tick());

        countdown.start();
        assert!(countdown.tick());
        assert_eq!(countdown.time_left(), 0);
    }

    #[test]
    fn test_zero_seconds_completes_immediately() {
        let mut countdown = Countdown::new(0, true);
        assert!(countdown.advance(Duration::ZERO));
        assert!(!countdown.advance(Duration::ZERO));
    }

    #[test]
    fn test_partial_seconds_accumulate() {
        let mut countdown = Countdown::new(2, true);
        assert!(!countdown.advance(Duration::from_millis(600)));
        assert_eq!(countdown.time_left(), 2);
        assert!(!countdown.advance(Duration::from_millis(600)));
        assert_eq!(countdown.time_left(), 1);
        assert!(countdown.advance(Duration::from_millis(800)));
        assert_eq!(countdown.time_left(), 0);
    }

    #[test]
    fn test_start_discards_pending_partial_tick() {
        let mut countdown = Countdown::new(2, true);
        assert!(!countdown.advance(Duration::from_millis(900)));

        countdown.start();
        assert!(!countdown.advance(Duration::from_millis(200)));
        assert_eq!(countdown.time_left(), 2);
    }

    #[test]
    fn test_large_elapsed_stops_at_zero() {
        let mut countdown = Countdown::new(3, true);
        assert!(countdown.advance(Duration::from_secs(60)));
        assert_eq!(countdown.time_left(), 0);
    }
}
