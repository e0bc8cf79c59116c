//! Event-loop task scheduling contracts.
//!
//! Hosts are single-threaded and cooperative. [`TaskScheduler::defer`] queues a callback for the
//! next scheduler turn so it runs strictly after the caller's synchronous work, and
//! [`TaskScheduler::spawn`] drives a future on the host executor without blocking the caller.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use futures::{
    executor::{LocalPool, LocalSpawner},
    future::LocalBoxFuture,
    task::LocalSpawnExt,
};

/// Callback queued with [`TaskScheduler::defer`].
pub type DeferredTask = Box<dyn FnOnce() + 'static>;

/// Host service for deferring callbacks and spawning local futures.
pub trait TaskScheduler {
    /// Queues `task` for the next scheduler turn. Never runs `task` before returning.
    fn defer(&self, task: DeferredTask);

    /// Starts `future` on the host executor. The caller does not wait for it.
    fn spawn(&self, future: LocalBoxFuture<'static, ()>);
}

struct ManualSchedulerState {
    deferred: RefCell<VecDeque<DeferredTask>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

#[derive(Clone)]
/// Explicitly-driven scheduler for headless hosts and deterministic tests.
///
/// Nothing runs until [`ManualTaskScheduler::run_next`] or
/// [`ManualTaskScheduler::run_until_idle`] is called, which makes "not yet applied" states
/// observable.
pub struct ManualTaskScheduler {
    inner: Rc<ManualSchedulerState>,
}

impl Default for ManualTaskScheduler {
    fn default() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            inner: Rc::new(ManualSchedulerState {
                deferred: RefCell::new(VecDeque::new()),
                pool: RefCell::new(pool),
                spawner,
            }),
        }
    }
}

impl std::fmt::Debug for ManualTaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualTaskScheduler")
            .field("pending_tasks", &self.pending_tasks())
            .finish_non_exhaustive()
    }
}

impl ManualTaskScheduler {
    /// Number of deferred callbacks waiting for a turn.
    pub fn pending_tasks(&self) -> usize {
        self.inner.deferred.borrow().len()
    }

    /// Polls spawned futures until none can make progress.
    pub fn run_spawned(&self) {
        self.inner.pool.borrow_mut().run_until_stalled();
    }

    /// Runs the oldest deferred callback. Returns `false` when the queue was empty.
    pub fn run_next(&self) -> bool {
        // The queue borrow ends before the task runs so tasks may defer more work.
        let next = self.inner.deferred.borrow_mut().pop_front();
        match next {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Alternates between spawned futures and deferred callbacks until both are drained.
    ///
    /// Returns how many deferred callbacks ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            self.run_spawned();
            if !self.run_next() {
                break;
            }
            ran += 1;
        }
        ran
    }
}

impl TaskScheduler for ManualTaskScheduler {
    fn defer(&self, task: DeferredTask) {
        self.inner.deferred.borrow_mut().push_back(task);
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        // Spawning only fails once the pool is gone, and the pool lives in the same state.
        let _ = self.inner.spawner.spawn_local(future);
    }
}
