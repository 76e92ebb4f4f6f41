//! Debounce tokens
//!
//! A debounce is modelled as explicit state: every restart hands out a new
//! token, and only the timer carrying the latest token may fire.

use crate::messages::TimerToken;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Debouncer {
    last_token: TimerToken,
    pending: Option<TimerToken>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the quiet interval. Any earlier token becomes stale.
    pub fn restart(&mut self) -> TimerToken {
        self.last_token += 1;
        self.pending = Some(self.last_token);
        self.last_token
    }

    /// Consume an elapsed timer. Returns true only for the current token.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_token_fires() {
        let mut debouncer = Debouncer::new();
        let first = debouncer.restart();
        let second = debouncer.restart();

        assert!(!debouncer.fire(first));
        assert!(debouncer.is_pending());
        assert!(debouncer.fire(second));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_token_fires_once() {
        let mut debouncer = Debouncer::new();
        let token = debouncer.restart();
        assert!(debouncer.fire(token));
        assert!(!debouncer.fire(token));
    }

    #[test]
    fn test_cancel_invalidates_pending() {
        let mut debouncer = Debouncer::new();
        let token = debouncer.restart();
        debouncer.cancel();
        assert!(!debouncer.fire(token));
    }
}
