//! Slot-keyed task scheduler.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

/// Identifies one scheduled task.
///
/// A handle stays valid until its task fires, is cancelled, or is superseded
/// by a newer task in the same slot. Stale handles never affect newer tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle<S> {
    /// Slot the task was scheduled in.
    pub slot: S,
    generation: u64,
}

/// A task whose deadline has passed, removed from the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueTask<S, T> {
    /// Slot the task occupied.
    pub slot: S,
    /// When the task was due. Work triggered by the task should treat this
    /// as the current time.
    pub deadline: Duration,
    /// The task payload.
    pub task: T,
}

#[derive(Debug)]
struct Pending<T> {
    deadline: Duration,
    generation: u64,
    task: T,
}

/// Holds at most one pending task per slot.
///
/// Time is passed in explicitly, so the scheduler never reads a clock
/// itself and runs the same under a real clock or a test clock.
pub struct SlotScheduler<S, T> {
    pending: HashMap<S, Pending<T>>,
    next_generation: u64,
}

impl<S, T> SlotScheduler<S, T>
where
    S: Eq + Hash + Clone + fmt::Debug,
{
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Schedule `task` in `slot` to fire `delay` after `now`.
    ///
    /// Any task already pending in the slot is dropped.
    pub fn schedule(&mut self, slot: S, now: Duration, delay: Duration, task: T) -> TaskHandle<S> {
        let generation = self.next_generation;
        self.next_generation += 1;

        let deadline = now.saturating_add(delay);
        let previous = self.pending.insert(
            slot.clone(),
            Pending {
                deadline,
                generation,
                task,
            },
        );
        if previous.is_some() {
            tracing::trace!(?slot, "superseded pending task");
        }

        TaskHandle { slot, generation }
    }

    /// Cancel whatever is pending in a slot, returning its payload.
    pub fn cancel(&mut self, slot: &S) -> Option<T> {
        self.pending.remove(slot).map(|p| p.task)
    }

    /// Cancel the task behind a handle, if it is still the one pending.
    pub fn cancel_handle(&mut self, handle: &TaskHandle<S>) -> bool {
        if self.is_current(handle) {
            self.pending.remove(&handle.slot);
            true
        } else {
            false
        }
    }

    /// Check whether a handle's task is still pending.
    pub fn is_current(&self, handle: &TaskHandle<S>) -> bool {
        self.pending
            .get(&handle.slot)
            .is_some_and(|p| p.generation == handle.generation)
    }

    /// Check whether anything is pending in a slot.
    pub fn is_pending(&self, slot: &S) -> bool {
        self.pending.contains_key(slot)
    }

    /// Deadline of the task pending in a slot.
    pub fn deadline(&self, slot: &S) -> Option<Duration> {
        self.pending.get(slot).map(|p| p.deadline)
    }

    /// Earliest deadline across all slots.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Remove and return the earliest task due at `now`.
    ///
    /// Ties go to the task scheduled first.
    pub fn pop_due(&mut self, now: Duration) -> Option<DueTask<S, T>> {
        let slot = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .min_by_key(|(_, p)| (p.deadline, p.generation))
            .map(|(slot, _)| slot.clone())?;

        let pending = self.pending.remove(&slot)?;
        Some(DueTask {
            slot,
            deadline: pending.deadline,
            task: pending.task,
        })
    }

    /// Remove and return every task due at `now`, earliest first.
    pub fn take_due(&mut self, now: Duration) -> Vec<DueTask<S, T>> {
        let mut due = Vec::new();
        while let Some(task) = self.pop_due(now) {
            due.push(task);
        }
        due
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<S, T> Default for SlotScheduler<S, T>
where
    S: Eq + Hash + Clone + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S: fmt::Debug, T> fmt::Debug for SlotScheduler<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotScheduler")
            .field("slots", &self.pending.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_task_fires_at_deadline() {
        let mut scheduler = SlotScheduler::new();
        scheduler.schedule("toast", ms(0), ms(3000), "fade");

        assert!(scheduler.pop_due(ms(2999)).is_none());
        let due = scheduler.pop_due(ms(3000)).unwrap();
        assert_eq!(due.slot, "toast");
        assert_eq!(due.deadline, ms(3000));
        assert_eq!(due.task, "fade");
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_schedule_supersedes_slot() {
        let mut scheduler = SlotScheduler::new();
        let first = scheduler.schedule("toast", ms(0), ms(3000), 1);
        let second = scheduler.schedule("toast", ms(1000), ms(3000), 2);

        assert_eq!(scheduler.len(), 1);
        assert!(!scheduler.is_current(&first));
        assert!(scheduler.is_current(&second));

        // The superseded deadline passes without anything firing.
        assert!(scheduler.pop_due(ms(3000)).is_none());
        assert_eq!(scheduler.pop_due(ms(4000)).unwrap().task, 2);
    }

    #[test]
    fn test_stale_handle_cannot_cancel() {
        let mut scheduler = SlotScheduler::new();
        let first = scheduler.schedule("toast", ms(0), ms(100), 1);
        let second = scheduler.schedule("toast", ms(0), ms(100), 2);

        assert!(!scheduler.cancel_handle(&first));
        assert!(scheduler.is_pending(&"toast"));
        assert!(scheduler.cancel_handle(&second));
        assert!(!scheduler.is_pending(&"toast"));
    }

    #[test]
    fn test_cancel_slot() {
        let mut scheduler = SlotScheduler::new();
        scheduler.schedule("redirect", ms(0), ms(100), "home");
        assert_eq!(scheduler.cancel(&"redirect"), Some("home"));
        assert_eq!(scheduler.cancel(&"redirect"), None);
    }

    #[test]
    fn test_slots_are_independent() {
        let mut scheduler = SlotScheduler::new();
        scheduler.schedule("toast", ms(0), ms(3000), "fade");
        scheduler.schedule("redirect", ms(0), ms(100), "home");

        assert_eq!(scheduler.next_deadline(), Some(ms(100)));
        assert_eq!(scheduler.deadline(&"toast"), Some(ms(3000)));

        let due = scheduler.take_due(ms(5000));
        let order: Vec<_> = due.iter().map(|d| d.task).collect();
        assert_eq!(order, vec!["home", "fade"]);
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut scheduler = SlotScheduler::new();
        scheduler.schedule("b", ms(0), ms(50), 'b');
        scheduler.schedule("a", ms(0), ms(50), 'a');

        let order: Vec<_> = scheduler.take_due(ms(50)).into_iter().map(|d| d.task).collect();
        assert_eq!(order, vec!['b', 'a']);
    }
}
