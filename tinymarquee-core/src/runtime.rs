//! Scheduling seam between the engine and the host's UI execution context.
//!
//! All engine work runs on one thread: tasks are local (`!Send`) futures that
//! the host polls on its main loop.

use std::future::Future;

use futures::future::{AbortHandle, Abortable, LocalBoxFuture};

/// Spawns futures on the host UI thread
pub trait Spawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}

/// A scheduled work item.
///
/// Aborting it guarantees the task is never polled again, so nothing it would
/// do after its current suspension point happens. Dropping the handle does
/// not abort the task.
#[derive(Debug)]
pub struct TaskHandle {
    abort: AbortHandle,
}

impl TaskHandle {
    pub fn abort(&self) {
        self.abort.abort();
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_aborted()
    }
}

/// Spawns `task` through `spawner` and returns the handle that cancels it
pub fn spawn_abortable<F>(spawner: &dyn Spawner, task: F) -> TaskHandle
where
    F: Future<Output = ()> + 'static,
{
    let (abort, registration) = AbortHandle::new_pair();
    let task = Abortable::new(task, registration);
    spawner.spawn_local(Box::pin(async move {
        // Err only means the task was aborted
        let _ = task.await;
    }));
    TaskHandle { abort }
}

/// Spawns on the current [`tokio::task::LocalSet`].
///
/// Panics (like [`tokio::task::spawn_local`]) when used outside of a `LocalSet`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSpawner;

impl Spawner for TokioSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}
