//! Bounded worker pool.

use std::future::Future;

use futures::stream::{self, StreamExt};

/// Default number of concurrent downloads.
pub const DEFAULT_WIDTH: usize = 5;

/// Runs independent tasks with at most `width` in flight.
///
/// Results are handed to a single aggregation callback as tasks complete, in
/// completion order.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    width: usize,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl WorkerPool {
    /// Create a pool. A width of zero is treated as one.
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    /// A pool that runs one task at a time, in submission order.
    pub fn sequential() -> Self {
        Self::new(1)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Run `task` for every item, feeding each result to `aggregate`.
    pub async fn run<T, R, I, F, Fut, A>(&self, items: I, task: F, mut aggregate: A)
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> Fut,
        Fut: Future<Output = R>,
        A: FnMut(R),
    {
        let mut results = stream::iter(items).map(task).buffer_unordered(self.width);

        while let Some(result) = results.next().await {
            aggregate(result);
        }
    }
}
