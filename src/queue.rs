//! Bounded last-in-first-out work queue for the queue engine.
//!
//! The queue is a stack behind a single mutex. Popping the most recently pushed
//! interval keeps the traversal depth-first, which keeps the number of pending
//! entries close to the subdivision depth rather than its breadth.

use std::fmt;

use parking_lot::{Condvar, Mutex};

use crate::concurrency::{ActiveCount, StopFlag};

/// Upper bound on the storage reserved up front, whatever the capacity.
const MAX_PREALLOCATED_ENTRIES: usize = 1024;

/// Errors from queue operations. Both are fatal for the integration in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueueError {
    /// A push would take the queue past its capacity.
    CapacityExceeded { capacity: usize },
    /// `pop` was called on an empty queue.
    Empty,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { capacity } => {
                write!(f, "maximum queue size ({capacity}) exceeded")
            }
            Self::Empty => write!(f, "attempt to extract from empty queue"),
        }
    }
}

impl std::error::Error for QueueError {}

/// A fixed-capacity stack shared between worker threads.
pub struct WorkQueue<T> {
    entries: Mutex<Vec<T>>,
    capacity: usize,
    /// Signalled whenever work appears or the termination predicate may have changed.
    changed: Condvar,
}

impl<T> WorkQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::with_capacity(capacity.min(MAX_PREALLOCATED_ENTRIES))),
            capacity,
            changed: Condvar::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn push(&self, entry: T) -> Result<(), QueueError> {
        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            return Err(QueueError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        entries.push(entry);
        drop(entries);
        self.changed.notify_one();
        Ok(())
    }

    /// Pushes both entries or neither. `second` ends up on top.
    pub fn push_pair(&self, first: T, second: T) -> Result<(), QueueError> {
        let mut entries = self.entries.lock();
        if self.capacity.saturating_sub(entries.len()) < 2 {
            return Err(QueueError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        entries.push(first);
        entries.push(second);
        drop(entries);
        self.changed.notify_all();
        Ok(())
    }

    /// Removes the top entry, or returns `None` if the queue is empty.
    ///
    /// This is the polling path: an empty queue is an ordinary outcome here.
    pub fn try_pop(&self) -> Option<T> {
        self.entries.lock().pop()
    }

    /// Removes the top entry of a queue the caller knows to be non-empty.
    pub fn pop(&self) -> Result<T, QueueError> {
        self.entries.lock().pop().ok_or(QueueError::Empty)
    }

    /// Pops the top entry and claims it in `active` within one critical section.
    ///
    /// A worker therefore never holds an entry that the active count does not yet
    /// reflect, which is what makes `is_drained` a safe termination test.
    pub(crate) fn take(&self, active: &ActiveCount) -> Option<T> {
        let mut entries = self.entries.lock();
        let entry = entries.pop()?;
        active.claim();
        Some(entry)
    }

    /// Returns true if the queue is empty and no worker holds an entry.
    ///
    /// Both facts are read inside the queue's critical section, so no push can slip
    /// in between them. The active count is lock-free and is not a second lock.
    pub(crate) fn is_drained(&self, active: &ActiveCount) -> bool {
        let entries = self.entries.lock();
        entries.is_empty() && active.is_idle()
    }

    /// Parks the calling worker until work appears, the queue drains, or `stop` is raised.
    pub(crate) fn wait_for_work(&self, active: &ActiveCount, stop: &StopFlag) {
        let mut entries = self.entries.lock();
        self.changed.wait_while(&mut entries, |pending| {
            pending.is_empty() && !active.is_idle() && !stop.is_stopped()
        });
    }

    /// Wakes every parked worker so it re-checks the termination predicate.
    ///
    /// Takes the queue lock first: a waiter that has just evaluated its predicate
    /// is then guaranteed to be parked before the notification is sent.
    pub(crate) fn wake_all(&self) {
        let _entries = self.entries.lock();
        self.changed.notify_all();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::panic)]

    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn pops_in_last_in_first_out_order() {
        let queue = WorkQueue::with_capacity(8);
        queue.push(1).expect("push should succeed");
        queue.push_pair(2, 3).expect("push should succeed");
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.try_pop(), Some(3));
        assert_eq!(queue.try_pop(), Some(2));
        assert_eq!(queue.pop(), Ok(1));
        assert!(queue.is_empty());
    }

    #[test]
    fn try_pop_on_empty_queue_is_not_an_error() {
        let queue: WorkQueue<u32> = WorkQueue::with_capacity(4);
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn pop_on_empty_queue_is_a_protocol_violation() {
        let queue: WorkQueue<u32> = WorkQueue::with_capacity(4);
        assert_eq!(queue.pop(), Err(QueueError::Empty));
    }

    #[test]
    fn push_past_capacity_fails() {
        let queue = WorkQueue::with_capacity(2);
        queue.push('a').expect("push should succeed");
        queue.push('b').expect("push should succeed");
        assert_eq!(
            queue.push('c'),
            Err(QueueError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let queue = WorkQueue::with_capacity(0);
        assert_eq!(
            queue.push(()),
            Err(QueueError::CapacityExceeded { capacity: 0 })
        );
    }

    #[test]
    fn push_pair_is_all_or_nothing() {
        let queue = WorkQueue::with_capacity(3);
        queue.push(0).expect("push should succeed");
        queue.push(1).expect("push should succeed");
        assert_eq!(
            queue.push_pair(2, 3),
            Err(QueueError::CapacityExceeded { capacity: 3 })
        );
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.try_pop(), Some(1));
        queue.push_pair(2, 3).expect("pair should fit after a pop");
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn huge_capacity_does_not_preallocate() {
        let queue: WorkQueue<[u8; 64]> = WorkQueue::with_capacity(usize::MAX);
        assert_eq!(queue.capacity(), usize::MAX);
        queue.push_pair([0; 64], [1; 64]).expect("push should succeed");
    }

    #[test]
    fn take_claims_what_it_pops() {
        let queue = WorkQueue::with_capacity(4);
        let active = ActiveCount::new();
        assert_eq!(queue.take(&active), None);
        assert!(active.is_idle());

        queue.push(5).expect("push should succeed");
        assert_eq!(queue.take(&active), Some(5));
        assert_eq!(active.get(), 1);
        assert!(!queue.is_drained(&active));
        active.release();
        assert!(queue.is_drained(&active));
    }

    #[test]
    fn drained_requires_empty_queue_and_idle_workers() {
        let queue = WorkQueue::with_capacity(4);
        let active = ActiveCount::new();
        assert!(queue.is_drained(&active));

        active.claim();
        assert!(!queue.is_drained(&active));
        active.release();

        queue.push(7).expect("push should succeed");
        assert!(!queue.is_drained(&active));
    }

    #[test]
    fn parked_worker_wakes_on_push() {
        let queue = Arc::new(WorkQueue::with_capacity(4));
        let active = Arc::new(ActiveCount::new());
        let stop = Arc::new(StopFlag::new());
        let barrier = Arc::new(Barrier::new(2));
        // Someone else is "mid-split", so an empty queue must not end the wait.
        active.claim();

        let waiter = {
            let shared_queue = Arc::clone(&queue);
            let shared_active = Arc::clone(&active);
            let shared_stop = Arc::clone(&stop);
            let shared_barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                shared_barrier.wait();
                shared_queue.wait_for_work(&shared_active, &shared_stop);
                shared_queue.try_pop()
            })
        };

        barrier.wait();
        thread::sleep(Duration::from_millis(10));
        queue.push(42).expect("push should succeed");

        assert_eq!(waiter.join().expect("waiter should join"), Some(42));
    }

    #[test]
    fn parked_worker_wakes_when_work_runs_out() {
        let queue: Arc<WorkQueue<u32>> = Arc::new(WorkQueue::with_capacity(4));
        let active = Arc::new(ActiveCount::new());
        let stop = Arc::new(StopFlag::new());
        active.claim();

        let waiter = {
            let shared_queue = Arc::clone(&queue);
            let shared_active = Arc::clone(&active);
            let shared_stop = Arc::clone(&stop);
            thread::spawn(move || {
                shared_queue.wait_for_work(&shared_active, &shared_stop);
                shared_queue.is_drained(&shared_active)
            })
        };

        thread::sleep(Duration::from_millis(10));
        active.release();
        queue.wake_all();

        assert!(waiter.join().expect("waiter should join"));
    }

    #[test]
    fn parked_worker_wakes_on_stop() {
        let queue: Arc<WorkQueue<u32>> = Arc::new(WorkQueue::with_capacity(4));
        let active = Arc::new(ActiveCount::new());
        let stop = Arc::new(StopFlag::new());
        active.claim();

        let waiter = {
            let shared_queue = Arc::clone(&queue);
            let shared_active = Arc::clone(&active);
            let shared_stop = Arc::clone(&stop);
            thread::spawn(move || {
                shared_queue.wait_for_work(&shared_active, &shared_stop);
                shared_stop.is_stopped()
            })
        };

        thread::sleep(Duration::from_millis(10));
        stop.stop();
        queue.wake_all();

        assert!(waiter.join().expect("waiter should join"));
    }
}
