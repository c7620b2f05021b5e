//! Single vs. double click disambiguation
//!
//! A click does not act immediately. It parks a pending single-click task
//! for the disambiguation window; a second click inside the window cancels
//! that task and reports a double click instead. When the task fires it is
//! only honoured if it is still the pending one.

use std::time::Duration;

use crate::timer::{Scheduler, TaskHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
}

#[derive(Debug, Clone)]
pub struct ClickDisambiguator {
    window: Duration,
    pending: Option<TaskHandle>,
}

impl ClickDisambiguator {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    #[cfg(test)]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Register a click at `now`. Returns `Some(Double)` when it completes a
    /// double click; otherwise schedules `on_expire` and returns `None`.
    pub fn click<T>(&mut self, now: Duration, scheduler: &mut Scheduler<T>, on_expire: T) -> Option<ClickKind> {
        if let Some(pending) = self.pending.take() {
            if scheduler.cancel(pending) {
                return Some(ClickKind::Double);
            }
        }
        self.pending = Some(scheduler.schedule(now + self.window, on_expire));
        None
    }

    /// Drop the pending click so it neither fires nor pairs with a later one.
    /// Returns whether a click was pending.
    pub fn cancel<T>(&mut self, scheduler: &mut Scheduler<T>) -> bool {
        match self.pending.take() {
            Some(pending) => scheduler.cancel(pending),
            None => false,
        }
    }

    /// A pending-click task fired. Returns `Some(Single)` unless it was superseded.
    pub fn expired(&mut self, handle: TaskHandle) -> Option<ClickKind> {
        if self.pending == Some(handle) {
            self.pending = None;
            Some(ClickKind::Single)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_lone_click_becomes_single_after_window() {
        let mut scheduler = Scheduler::new();
        let mut clicks = ClickDisambiguator::new(ms(220));

        assert_eq!(clicks.click(ms(0), &mut scheduler, ()), None);
        assert!(scheduler.take_due(ms(219)).is_empty());

        let fired = scheduler.take_due(ms(220));
        assert_eq!(fired.len(), 1);
        assert_eq!(clicks.expired(fired[0].0), Some(ClickKind::Single));
        assert!(!clicks.has_pending());
    }

    #[test]
    fn test_second_click_inside_window_is_double() {
        let mut scheduler = Scheduler::new();
        let mut clicks = ClickDisambiguator::new(ms(220));

        clicks.click(ms(0), &mut scheduler, ());
        assert_eq!(clicks.click(ms(100), &mut scheduler, ()), Some(ClickKind::Double));

        // The pending single click was cancelled
        assert!(scheduler.take_due(ms(1_000)).is_empty());
        assert!(!clicks.has_pending());
    }

    #[test]
    fn test_superseded_task_is_ignored() {
        let mut scheduler = Scheduler::new();
        let mut clicks = ClickDisambiguator::new(ms(220));

        clicks.click(ms(0), &mut scheduler, ());
        let stale = scheduler.take_due(ms(300)).remove(0).0;
        assert_eq!(clicks.expired(stale), Some(ClickKind::Single));

        clicks.click(ms(400), &mut scheduler, ());
        // Replaying the old handle must not fire the new pending click
        assert_eq!(clicks.expired(stale), None);
        assert!(clicks.has_pending());
    }

    #[test]
    fn test_third_click_starts_new_pending() {
        let mut scheduler = Scheduler::new();
        let mut clicks = ClickDisambiguator::new(ms(220));

        clicks.click(ms(0), &mut scheduler, ());
        clicks.click(ms(50), &mut scheduler, ());
        assert_eq!(clicks.click(ms(100), &mut scheduler, ()), None);
        assert!(clicks.has_pending());
    }

    #[test]
    fn test_cancel_breaks_the_click_sequence() {
        let mut scheduler = Scheduler::new();
        let mut clicks = ClickDisambiguator::new(ms(220));

        clicks.click(ms(0), &mut scheduler, ());
        assert!(clicks.cancel(&mut scheduler));
        assert!(!clicks.has_pending());
        assert!(scheduler.take_due(ms(1_000)).is_empty());

        // The next click starts over instead of completing a double click
        assert_eq!(clicks.click(ms(100), &mut scheduler, ()), None);

        let mut idle = ClickDisambiguator::new(ms(220));
        assert!(!idle.cancel(&mut scheduler));
        assert_eq!(scheduler.take_due(ms(320)).len(), 1);
    }
}
