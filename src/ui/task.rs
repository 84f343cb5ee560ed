use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{self, AbortHandle, Abortable, BoxFuture};

/// Work a handler asks the runtime to do on its behalf. Each future resolves
/// to at most one message that is fed back into `update`; aborted futures
/// resolve to nothing.
#[must_use = "a Task does nothing unless handed to the runtime"]
pub struct Task<M> {
    futures: Vec<BoxFuture<'static, Option<M>>>,
}

impl<M: Send + 'static> Task<M> {
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// A task that immediately produces `message`.
    pub fn done(message: M) -> Self {
        Self {
            futures: vec![future::ready(Some(message)).boxed()],
        }
    }

    pub fn perform<T, F>(future: F, f: impl FnOnce(T) -> M + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            futures: vec![future.map(|output| Some(f(output))).boxed()],
        }
    }

    pub fn batch(tasks: impl IntoIterator<Item = Task<M>>) -> Self {
        Self {
            futures: tasks.into_iter().flat_map(|t| t.futures).collect(),
        }
    }

    pub fn map<N: Send + 'static>(self, f: impl Fn(M) -> N + Send + Sync + 'static) -> Task<N> {
        let f = Arc::new(f);
        Task {
            futures: self
                .futures
                .into_iter()
                .map(|future| {
                    let f = f.clone();
                    future.map(move |message| message.map(|m| f(m))).boxed()
                })
                .collect(),
        }
    }

    /// Makes the task cancellable through the returned [`Handle`].
    pub fn abortable(self) -> (Self, Handle) {
        let mut handles = Vec::with_capacity(self.futures.len());
        let futures = self
            .futures
            .into_iter()
            .map(|future| {
                let (handle, registration) = AbortHandle::new_pair();
                handles.push(handle);
                Abortable::new(future, registration)
                    .map(|result| result.ok().flatten())
                    .boxed()
            })
            .collect();

        (Self { futures }, Handle { handles })
    }

    pub fn is_none(&self) -> bool {
        self.futures.is_empty()
    }

    pub(crate) fn into_futures(self) -> Vec<BoxFuture<'static, Option<M>>> {
        self.futures
    }
}

impl<M> std::fmt::Debug for Task<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("futures", &self.futures.len())
            .finish()
    }
}

/// Cancels an abortable [`Task`].
#[derive(Debug, Clone)]
pub struct Handle {
    handles: Vec<AbortHandle>,
}

impl Handle {
    pub fn abort(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.handles.iter().all(AbortHandle::is_aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::join_all;

    async fn run<M: Send + 'static>(task: Task<M>) -> Vec<Option<M>> {
        join_all(task.into_futures()).await
    }

    #[tokio::test]
    async fn test_batch_and_map() {
        let task = Task::batch([
            Task::done(1),
            Task::none(),
            Task::perform(async { 20 }, |n| n + 1),
        ])
        .map(|n: i32| n * 2);

        assert_eq!(run(task).await, vec![Some(2), Some(42)]);
    }

    #[tokio::test]
    async fn test_aborted_task_yields_nothing() {
        let (task, handle) = Task::perform(std::future::pending::<()>(), |_| "late").abortable();
        handle.abort();
        assert!(handle.is_aborted());
        assert_eq!(run(task).await, vec![None]);
    }

    #[test]
    fn test_none_is_empty() {
        assert!(Task::<()>::none().is_none());
        assert!(!Task::done(()).is_none());
    }
}
