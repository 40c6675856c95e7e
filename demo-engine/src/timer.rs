use std::time::{Duration, Instant};

/// Repeating timer driven by explicit polling.
///
/// The owner arms it against the current instant and polls it from its event
/// loop. Cancelling drops the deadline, so a cancelled timer can never fire
/// against state it was armed for.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts a fresh interval from `now`. Any pending deadline is discarded.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Fires at most once per call. Missed periods are not replayed: the next
    /// deadline is measured from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_never_fires() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        assert!(!timer.poll(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn test_fires_after_period() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.arm(t0);
        assert!(!timer.poll(t0 + Duration::from_millis(99)));
        assert!(timer.poll(t0 + Duration::from_millis(100)));
        assert!(!timer.poll(t0 + Duration::from_millis(150)));
        assert!(timer.poll(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn test_missed_periods_collapse() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.arm(t0);
        let late = t0 + Duration::from_millis(1_000);
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert_eq!(timer.next_due(), Some(late + Duration::from_millis(100)));
    }

    #[test]
    fn test_rearm_discards_elapsed_time() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.arm(t0);
        timer.arm(t0 + Duration::from_millis(90));
        assert!(!timer.poll(t0 + Duration::from_millis(120)));
        assert!(timer.poll(t0 + Duration::from_millis(190)));
    }

    #[test]
    fn test_cancel() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.arm(t0);
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.poll(t0 + Duration::from_secs(1)));
    }
}
