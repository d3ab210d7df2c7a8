//! Bounded fan-out for per-item work.
//!
//! Both the discovery and the render stage run one independent task per
//! item; [`WorkerPool::map`] is the single place that does it.

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder, prelude::*};

/// A fixed-size rayon pool owned by one build.
pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    /// `jobs == 0` sizes the pool to the available parallelism.
    pub fn new(jobs: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|i| format!("quire-worker-{i}"))
            .build()?;
        Ok(Self { pool })
    }

    /// Apply `f` to every item, at most one per pool thread at a time.
    ///
    /// Results keep the order of `items`. The first failure observed stops
    /// the remaining work from being scheduled and is returned.
    pub fn map<T, R, E, F>(&self, items: &[T], f: F) -> Result<Vec<R>, E>
    where
        T: Sync,
        R: Send,
        E: Send,
        F: Fn(&T) -> Result<R, E> + Sync + Send,
    {
        self.pool
            .install(|| items.par_iter().map(&f).collect::<Result<Vec<_>, E>>())
    }
}
