//! Trailing-edge debouncing of a changing value.

use std::time::Duration;

use tokio::time::Instant;
use tokio::time::sleep_until;

/// Holds the latest pushed value until no new value has arrived for `delay`.
///
/// Every [`push`](Self::push) restarts the window, so a burst of edits
/// yields exactly one settled value: the last one.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    /// Creates an idle debouncer.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Returns the quiescence window.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces the pending value and restarts the window.
    pub fn push(&mut self, value: T) {
        self.pending = Some((Instant::now() + self.delay, value));
    }

    /// Returns `true` if a value is waiting to settle.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value settles, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Drops the pending value, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    /// Takes the pending value if its window has elapsed at `now`.
    pub fn poll_ready(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if deadline <= now => self.cancel(),
            _ => None,
        }
    }

    /// Waits for the pending value to settle and takes it.
    ///
    /// Returns `None` at once if nothing is pending. Cancel safe: dropping
    /// the future before it completes leaves the pending value in place, and a
    /// `push` made in between simply moves the deadline.
    pub async fn settled(&mut self) -> Option<T> {
        loop {
            let deadline = self.deadline()?;
            sleep_until(deadline).await;
            if let Some(value) = self.poll_ready(Instant::now()) {
                return Some(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_burst_yields_last_value_once() {
        let mut debouncer = Debouncer::new(DELAY);
        let start = Instant::now();

        for text in ["S", "Sm", "Smi", "Smit", "Smith"] {
            debouncer.push(text.to_string());
            tokio::time::advance(Duration::from_millis(50)).await;
        }

        assert_eq!(debouncer.settled().await.as_deref(), Some("Smith"));
        // 4 × 50 ms between pushes, then the full window after the last one
        assert_eq!(Instant::now() - start, Duration::from_millis(200) + DELAY);
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.settled().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_ready_respects_window() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push(1);

        assert_eq!(debouncer.poll_ready(Instant::now()), None);
        assert!(debouncer.is_pending());

        tokio::time::advance(DELAY).await;
        assert_eq!(debouncer.poll_ready(Instant::now()), Some(1));
        assert_eq!(debouncer.poll_ready(Instant::now()), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_push_restarts_window() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push(1);
        tokio::time::advance(Duration::from_millis(250)).await;
        debouncer.push(2);
        tokio::time::advance(Duration::from_millis(250)).await;

        assert_eq!(debouncer.poll_ready(Instant::now()), None);
        tokio::time::advance(Duration::from_millis(50)).await;
        assert_eq!(debouncer.poll_ready(Instant::now()), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_keeps_value() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push("a");

        let timed_out =
            tokio::time::timeout(Duration::from_millis(100), debouncer.settled()).await;
        assert!(timed_out.is_err());
        assert!(debouncer.is_pending());

        assert_eq!(debouncer.settled().await, Some("a"));
    }

    #[test]
    fn test_cancel() {
        let mut debouncer = Debouncer::new(DELAY);
        assert_eq!(debouncer.cancel(), None::<u8>);
        debouncer.push(7);
        assert_eq!(debouncer.cancel(), Some(7));
        assert!(!debouncer.is_pending());
    }
}
