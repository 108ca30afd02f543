//! Deferred work produced by domain updates.
//!
//! An update never awaits the data service itself. It returns a [`Task`]
//! holding the pending requests, each of which resolves into the message
//! that reports its outcome. The [`crate::runtime::Runtime`] executes tasks
//! and feeds the resulting messages back into the domain.

use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;

pub struct Task<M> {
    futures: Vec<BoxFuture<'static, M>>,
}

impl<M: Send + 'static> Task<M> {
    /// A task that does nothing.
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// Run `future` and map its output into a message.
    pub fn perform<T, F, Map>(future: F, map: Map) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        Map: FnOnce(T) -> M + Send + 'static,
    {
        Self {
            futures: vec![future.map(map).boxed()],
        }
    }

    /// A task that immediately yields `message`.
    pub fn done(message: M) -> Self {
        Self {
            futures: vec![futures::future::ready(message).boxed()],
        }
    }

    /// Combine several tasks; their futures keep the given order.
    pub fn batch(tasks: impl IntoIterator<Item = Task<M>>) -> Self {
        Self {
            futures: tasks.into_iter().flat_map(|task| task.futures).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.futures.is_empty()
    }

    /// Number of pending futures.
    pub fn len(&self) -> usize {
        self.futures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.futures.is_empty()
    }

    pub fn into_futures(self) -> Vec<BoxFuture<'static, M>> {
        self.futures
    }
}

impl<M: Send + 'static> Default for Task<M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<M> std::fmt::Debug for Task<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("pending", &self.futures.len())
            .finish()
    }
}
