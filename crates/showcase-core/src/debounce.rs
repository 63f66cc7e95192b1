use std::time::{Duration, Instant};

/// Trailing-edge debounce
///
/// Every `push` restarts the quiet period; `poll` hands back the last pushed
/// value once the quiet period has passed with no further pushes. Time is
/// passed in so callers own the clock.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Replace any pending value and restart the timer
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// When a pending value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, due)) if *due <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(200);

    #[test]
    fn test_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push("r", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(199)), None);
        assert_eq!(debouncer.poll(start + QUIET), Some("r"));
        assert_eq!(debouncer.poll(start + QUIET * 2), None);
    }

    #[test]
    fn test_keystrokes_reset_the_timer() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.push("r", start);
        debouncer.push("ru", start + Duration::from_millis(150));
        assert_eq!(debouncer.poll(start + Duration::from_millis(250)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(350))
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(350)), Some("ru"));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push(1, start);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + QUIET), None);
    }
}
