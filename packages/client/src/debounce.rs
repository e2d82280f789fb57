//! Quiescence timer for local edits.
//!
//! Pure state machine: callers pass the current instant, so the transitions
//! are testable without a runtime clock.

use std::time::Duration;

use tokio::time::Instant;

/// Default quiescence window
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending { deadline: Instant },
}

/// Collapses bursts of local mutations into a single firing.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    state: DebounceState,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: DebounceState::Idle,
        }
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Record a mutation. Idle and pending both move to a fresh deadline.
    pub fn touch(&mut self, now: Instant) {
        self.state = DebounceState::Pending {
            deadline: now + self.window,
        };
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            DebounceState::Idle => None,
            DebounceState::Pending { deadline } => Some(deadline),
        }
    }

    /// Returns `true` exactly once per quiescence window, when `now` has
    /// reached the pending deadline. The state goes back to idle.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            DebounceState::Pending { deadline } if now >= deadline => {
                self.state = DebounceState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending firing, returning whether one was pending.
    pub fn take_pending(&mut self) -> bool {
        let pending = matches!(self.state, DebounceState::Pending { .. });
        self.state = DebounceState::Idle;
        pending
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(200);

    #[test]
    fn test_new_debouncer_is_idle() {
        // テスト項目: 作成直後は Idle で、poll しても発火しない
        // given (前提条件):
        let mut debouncer = Debouncer::new(WINDOW);

        // when (操作):
        let fired = debouncer.poll(Instant::now());

        // then (期待する結果):
        assert!(!fired);
        assert_eq!(debouncer.state(), DebounceState::Idle);
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn test_touch_sets_deadline() {
        // テスト項目: touch で Pending になり、期限は now + window
        // given (前提条件):
        let mut debouncer = Debouncer::new(WINDOW);
        let now = Instant::now();

        // when (操作):
        debouncer.touch(now);

        // then (期待する結果):
        assert_eq!(
            debouncer.state(),
            DebounceState::Pending {
                deadline: now + WINDOW
            }
        );
    }

    #[test]
    fn test_does_not_fire_before_deadline() {
        // テスト項目: 期限前の poll では発火しない
        // given (前提条件):
        let mut debouncer = Debouncer::new(WINDOW);
        let now = Instant::now();
        debouncer.touch(now);

        // when (操作):
        let fired = debouncer.poll(now + Duration::from_millis(199));

        // then (期待する結果):
        assert!(!fired);
        assert!(debouncer.deadline().is_some());
    }

    #[test]
    fn test_fires_once_at_deadline() {
        // テスト項目: 期限到達で一度だけ発火し、Idle に戻る
        // given (前提条件):
        let mut debouncer = Debouncer::new(WINDOW);
        let now = Instant::now();
        debouncer.touch(now);

        // when (操作):
        let first = debouncer.poll(now + WINDOW);
        let second = debouncer.poll(now + WINDOW * 2);

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(debouncer.state(), DebounceState::Idle);
    }

    #[test]
    fn test_touch_restarts_pending_window() {
        // テスト項目: 期限前の touch はタイマーをやり直す
        // given (前提条件):
        let mut debouncer = Debouncer::new(WINDOW);
        let start = Instant::now();
        debouncer.touch(start);

        // when (操作):
        let later = start + Duration::from_millis(150);
        debouncer.touch(later);

        // then (期待する結果):
        assert!(!debouncer.poll(start + WINDOW));
        assert!(debouncer.poll(later + WINDOW));
    }

    #[test]
    fn test_take_pending() {
        // テスト項目: take_pending は保留中の発火を取り出して Idle にする
        // given (前提条件):
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.touch(Instant::now());

        // when (操作):
        let pending = debouncer.take_pending();

        // then (期待する結果):
        assert!(pending);
        assert!(!debouncer.take_pending());
        assert_eq!(debouncer.state(), DebounceState::Idle);
    }
}
