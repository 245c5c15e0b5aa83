use std::time::{Duration, Instant};

/// The autonomous refresh countdown.
///
/// Purely deadline-based: the event loop's tick asks `expired` and the
/// shared refresh path calls `reset`, so a manual refresh pushes the next
/// autonomous one a full period out and the two can never compound.
#[derive(Debug)]
pub struct RefreshTimer {
    period: Duration,
    deadline: Instant,
}

impl RefreshTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: Instant::now() + period,
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub fn reset(&mut self, now: Instant) {
        self.deadline = now + self.period;
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_expired_before_period() {
        let timer = RefreshTimer::new(Duration::from_secs(900));
        assert!(!timer.expired(Instant::now()));
    }

    #[test]
    fn test_expired_at_deadline() {
        let timer = RefreshTimer::new(Duration::from_secs(10));
        let now = Instant::now();
        assert!(timer.expired(now + Duration::from_secs(11)));
    }

    #[test]
    fn test_zero_period_expires_immediately() {
        let timer = RefreshTimer::new(Duration::ZERO);
        assert!(timer.expired(Instant::now()));
    }

    #[test]
    fn test_reset_pushes_deadline_forward() {
        let mut timer = RefreshTimer::new(Duration::from_secs(10));
        let now = Instant::now();

        // without the reset this instant would be past the deadline
        let later = now + Duration::from_secs(15);
        timer.reset(now + Duration::from_secs(8));
        assert!(!timer.expired(later));
        assert!(timer.expired(now + Duration::from_secs(18)));
    }
}
