use std::time::Duration;
use tracing::debug;

/// Independent timer lanes. Each lane holds at most one pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerCategory {
    FakeOut,
    Trap,
}

/// Cancellation token for one scheduled callback.
///
/// Generations are unique for the lifetime of a scheduler, so a handle can
/// never alias a later timer in the same category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    category: TimerCategory,
    generation: u64,
}

impl TimerHandle {
    pub fn category(&self) -> TimerCategory {
        self.category
    }
}

#[derive(Debug)]
struct PendingTimer<E> {
    handle: TimerHandle,
    deadline: Duration,
    event: E,
}

/// Deadline queue keyed on a caller-supplied game clock.
///
/// Nothing fires on its own: the owner asks for due timers with
/// [`TimerScheduler::pop_due`], which keeps every callback on the owner's
/// serialized path. A cancelled timer is removed outright and can never be
/// returned.
#[derive(Debug)]
pub struct TimerScheduler<E> {
    pending: Vec<PendingTimer<E>>,
    next_generation: u64,
}

impl<E> Default for TimerScheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerScheduler<E> {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(2),
            next_generation: 1,
        }
    }

    /// Schedules `event` at `now + delay`, replacing any pending timer of the
    /// same category.
    pub fn schedule(
        &mut self,
        category: TimerCategory,
        now: Duration,
        delay: Duration,
        event: E,
    ) -> TimerHandle {
        self.cancel_category(category);

        let handle = TimerHandle {
            category,
            generation: self.next_generation,
        };
        self.next_generation += 1;

        let deadline = now + delay;
        debug!(
            "⏲️  {:?} timer #{} armed for {:?}",
            category, handle.generation, deadline
        );

        self.pending.push(PendingTimer {
            handle,
            deadline,
            event,
        });
        handle
    }

    /// Returns `true` if the timer was still pending. Cancelling a fired or
    /// already-cancelled handle is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        before != self.pending.len()
    }

    pub fn cancel_category(&mut self, category: TimerCategory) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle.category != category);
        let cancelled = before != self.pending.len();
        if cancelled {
            debug!("⏲️  {:?} timer cancelled", category);
        }
        cancelled
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    pub fn pending(&self, category: TimerCategory) -> Option<TimerHandle> {
        self.pending
            .iter()
            .find(|t| t.handle.category == category)
            .map(|t| t.handle)
    }

    pub fn deadline_of(&self, category: TimerCategory) -> Option<Duration> {
        self.pending
            .iter()
            .find(|t| t.handle.category == category)
            .map(|t| t.deadline)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|t| t.deadline).min()
    }

    /// Removes and returns the earliest timer due at `now`. Ties go to the
    /// timer scheduled first.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerHandle, E)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.handle.generation))
            .map(|(i, _)| i)?;

        let fired = self.pending.swap_remove(idx);
        Some((fired.handle, fired.event))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_same_category_replaces_previous() {
        let mut s = TimerScheduler::new();
        let first = s.schedule(TimerCategory::FakeOut, ms(0), ms(100), "first");
        let second = s.schedule(TimerCategory::FakeOut, ms(10), ms(100), "second");

        assert!(!s.is_pending(first));
        assert!(s.is_pending(second));
        assert_eq!(s.len(), 1);
        assert_eq!(s.pop_due(ms(1000)), Some((second, "second")));
        assert!(s.pop_due(ms(1000)).is_none());
    }

    #[test]
    fn test_categories_are_independent() {
        let mut s = TimerScheduler::new();
        s.schedule(TimerCategory::FakeOut, ms(0), ms(300), 1);
        s.schedule(TimerCategory::Trap, ms(0), ms(100), 2);

        assert_eq!(s.next_deadline(), Some(ms(100)));
        assert!(s.pop_due(ms(50)).is_none());
        assert_eq!(s.pop_due(ms(400)).map(|(_, e)| e), Some(2));
        assert_eq!(s.pop_due(ms(400)).map(|(_, e)| e), Some(1));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut s = TimerScheduler::new();
        let h = s.schedule(TimerCategory::Trap, ms(0), ms(10), ());
        assert!(s.cancel(h));
        assert!(!s.cancel(h));

        let h2 = s.schedule(TimerCategory::Trap, ms(0), ms(10), ());
        s.pop_due(ms(10));
        assert!(!s.cancel(h2));
        assert!(s.is_empty());
    }
}
