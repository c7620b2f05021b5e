//! Cancellable scheduled tasks driven by the host tick
//!
//! The host never calls back into us on its own; every frame it hands the
//! widget the current time and we collect whatever became due. A task is
//! identified by a [`TaskHandle`] so the owner can cancel it, or ignore it
//! when it fires after being superseded.

use std::time::Duration;

/// Opaque identifier for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Scheduled<T> {
    handle: TaskHandle,
    due: Duration,
    action: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire once `now >= due`
    pub fn schedule(&mut self, due: Duration, action: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push(Scheduled { handle, due, action });
        handle
    }

    /// Cancel a task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.handle != handle);
        self.tasks.len() != before
    }

    #[cfg(test)]
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|task| task.handle == handle)
    }

    /// Earliest deadline still outstanding
    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.iter().map(|task| task.due).min()
    }

    /// Remove and return every task due at `now`, oldest deadline first
    pub fn take_due(&mut self, now: Duration) -> Vec<(TaskHandle, T)> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|task| task.due <= now);
        self.tasks = pending;
        due.sort_by_key(|task| (task.due, task.handle.0));
        due.into_iter()
            .map(|task| (task.handle, task.action))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_tasks_fire_in_deadline_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(300), "late");
        scheduler.schedule(ms(100), "early");

        assert!(scheduler.take_due(ms(50)).is_empty());

        let fired: Vec<_> = scheduler.take_due(ms(400)).into_iter().map(|(_, a)| a).collect();
        assert_eq!(fired, vec!["early", "late"]);
        assert_eq!(scheduler.next_due(), None);
    }

    #[test]
    fn test_cancelled_task_never_fires() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(ms(100), ());
        assert!(scheduler.is_pending(handle));
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.is_pending(handle));
        assert!(scheduler.take_due(ms(1_000)).is_empty());

        // Second cancel is a no-op
        assert!(!scheduler.cancel(handle));
    }

    #[test]
    fn test_handles_are_unique() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.schedule(ms(10), 1);
        let b = scheduler.schedule(ms(10), 2);
        assert_ne!(a, b);

        let fired = scheduler.take_due(ms(10));
        assert_eq!(fired, vec![(a, 1), (b, 2)]);
    }

    #[test]
    fn test_next_due_tracks_earliest() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(500), ());
        let early = scheduler.schedule(ms(200), ());
        assert_eq!(scheduler.next_due(), Some(ms(200)));
        scheduler.cancel(early);
        assert_eq!(scheduler.next_due(), Some(ms(500)));
    }
}
