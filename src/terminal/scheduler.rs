//! Deterministic timer queue
//!
//! The UI loop feeds real elapsed time in; tests feed whatever they like.
//! Tasks fire in due order (ties in submission order) and each fired task
//! moves the clock to its due time, so work scheduled while handling a
//! task is relative to when that task was due, not to when the UI loop
//! happened to wake up.

use std::time::Duration;

/// Handle returned on submission, used to cancel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Task<T> {
    id: u64,
    due: Duration,
    period: Option<Duration>,
    payload: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    tasks: Vec<Task<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            tasks: Vec::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time since the scheduler was created
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run once, `delay` from now
    pub fn after(&mut self, delay: Duration, payload: T) -> TaskHandle {
        self.push(delay, None, payload)
    }

    /// Run every `period`, first time one period from now. A zero period is
    /// bumped to one millisecond so the queue always drains.
    pub fn every(&mut self, period: Duration, payload: T) -> TaskHandle {
        let period = period.max(Duration::from_millis(1));
        self.push(period, Some(period), payload)
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>, payload: T) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            due: self.now + delay,
            period,
            payload,
        });
        TaskHandle(id)
    }

    /// Returns false when the task already fired (one-shot) or was cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != handle.0);
        self.tasks.len() != before
    }

    /// Drop every pending task whose payload matches. Returns how many went.
    pub fn cancel_where<F: Fn(&T) -> bool>(&mut self, matches: F) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !matches(&t.payload));
        before - self.tasks.len()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.id == handle.0)
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Pop the earliest task due at or before `deadline`, moving the clock to
    /// its due time. Repeating tasks are re-queued one period later.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<T> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;

        let due = self.tasks[idx].due;
        if due > self.now {
            self.now = due;
        }

        match self.tasks[idx].period {
            Some(period) => {
                let task = &mut self.tasks[idx];
                task.due += period;
                Some(task.payload.clone())
            }
            None => Some(self.tasks.swap_remove(idx).payload),
        }
    }

    /// Move the clock forward without firing anything. Callers drain
    /// `pop_due` first.
    pub fn settle(&mut self, deadline: Duration) {
        if deadline > self.now {
            self.now = deadline;
        }
    }

    /// Fire everything due within `elapsed`, in order
    pub fn advance(&mut self, elapsed: Duration) -> Vec<T> {
        let deadline = self.now + elapsed;
        let mut fired = Vec::new();
        while let Some(payload) = self.pop_due(deadline) {
            fired.push(payload);
        }
        self.settle(deadline);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_in_due_order() {
        let mut sched = Scheduler::new();
        sched.after(ms(300), "late");
        sched.after(ms(100), "early");
        sched.after(ms(100), "early-second");

        assert_eq!(sched.advance(ms(50)), Vec::<&str>::new());
        assert_eq!(sched.advance(ms(300)), vec!["early", "early-second", "late"]);
        assert_eq!(sched.pending(), 0);
        assert_eq!(sched.now(), ms(350));
    }

    #[test]
    fn repeating_tasks_fire_each_period() {
        let mut sched = Scheduler::new();
        sched.every(ms(40), "frame");

        assert_eq!(sched.advance(ms(130)).len(), 3);
        assert_eq!(sched.advance(ms(10)).len(), 0);
        assert_eq!(sched.advance(ms(20)).len(), 1);
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn cancel_removes_pending_work() {
        let mut sched = Scheduler::new();
        let keep = sched.after(ms(10), 1);
        let drop = sched.after(ms(10), 2);

        assert!(sched.cancel(drop));
        assert!(!sched.cancel(drop));
        assert!(sched.is_pending(keep));
        assert_eq!(sched.advance(ms(20)), vec![1]);
        assert!(!sched.is_pending(keep));
    }

    #[test]
    fn cancel_where_filters_by_payload() {
        let mut sched = Scheduler::new();
        sched.after(ms(10), 1);
        sched.after(ms(20), 2);
        sched.every(ms(5), 3);

        assert_eq!(sched.cancel_where(|n| *n < 3), 2);
        assert_eq!(sched.pending(), 1);
        assert_eq!(sched.advance(ms(10)), vec![3, 3]);
    }

    #[test]
    fn pop_due_moves_clock_to_task_time() {
        let mut sched = Scheduler::new();
        sched.after(ms(100), ());
        assert_eq!(sched.pop_due(ms(1_000)), Some(()));
        assert_eq!(sched.now(), ms(100));

        // Scheduled from inside a handler: relative to the fired task
        sched.after(ms(50), ());
        assert_eq!(sched.pop_due(ms(1_000)), Some(()));
        assert_eq!(sched.now(), ms(150));

        sched.settle(ms(1_000));
        assert_eq!(sched.now(), ms(1_000));
    }

    #[test]
    fn zero_period_still_advances() {
        let mut sched = Scheduler::new();
        sched.every(Duration::ZERO, ());
        assert_eq!(sched.advance(ms(3)).len(), 3);
    }
}
