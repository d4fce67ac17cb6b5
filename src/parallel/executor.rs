use anyhow::{Context, Result};
use crossbeam::channel::{Receiver, Sender, bounded};

use super::partition::Partition;

/// Calculate how many worker threads the runtime may use
///
/// # Algorithm
/// ```text
/// 1. Detect available CPU cores: num_cpus::get()
/// 2. Apply percentage: cores * thread_percentage / 100
/// 3. Apply config limit: min(max_threads, percentage_result) if max_threads > 0
/// 4. Ensure minimum: max(1, final_result)
/// ```
///
/// # Examples
/// ```rust
/// use parspeed::parallel::optimal_workers;
///
/// let workers = optimal_workers(0, 100);
/// assert!(workers >= 1);
///
/// let workers = optimal_workers(2, 100);
/// assert!(workers <= 2);
/// ```
pub fn optimal_workers(max_threads: usize, thread_percentage: u8) -> usize {
    let available_cores = num_cpus::get();

    let workers_by_percentage =
        std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

    // 0 means "no explicit limit"
    if max_threads > 0 {
        std::cmp::min(max_threads, workers_by_percentage)
    } else {
        workers_by_percentage
    }
}

/// Build the shared work-stealing runtime used for per-row and per-cell fan-out
///
/// Logical units (one per row or cell) are queued as rayon tasks, so an `n²`-cell
/// matrix never turns into `n²` OS threads.
pub fn build_pool(workers: usize) -> Result<rayon::ThreadPool> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|i| format!("parspeed-worker-{i}"))
        .build()
        .context("Failed to build worker thread pool")?;
    tracing::debug!(workers = pool.current_num_threads(), "worker pool ready");
    Ok(pool)
}

/// Bounded worker pool that processes items and tags every result with its input index
pub struct ParallelExecutor {
    max_workers: usize,
    buffer_size: usize,
}

/// Context for worker threads to avoid too many function parameters
struct WorkerContext<'items, 'f, T, R, F> {
    worker_id: usize,
    work_rx: Receiver<(usize, &'items T)>,
    result_tx: Sender<(usize, R)>,
    processor: &'f F,
}

impl ParallelExecutor {
    pub fn new(max_workers: usize) -> Self {
        let max_workers = max_workers.max(1);
        Self {
            max_workers,
            buffer_size: max_workers * 2,
        }
    }

    /// Execute `processor` on every item using a producer/consumer pipeline
    ///
    /// Results arrive in completion order, each paired with the index of the item that
    /// produced it. Merge them with [`super::aggregate::place_indexed`] to restore input order.
    /// A panicking worker fails the whole call.
    pub fn execute_indexed<T, R, F>(
        &self,
        work_items: &[T],
        processor: F,
    ) -> Result<Vec<(usize, R)>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        if work_items.is_empty() {
            return Ok(Vec::new());
        }

        let actual_workers = std::cmp::min(self.max_workers, work_items.len());
        let total_items = work_items.len();

        tracing::debug!(workers = actual_workers, items = total_items, "starting worker pool");

        crossbeam::thread::scope(|s| {
            let (work_tx, work_rx) = bounded::<(usize, &T)>(self.buffer_size);
            let (result_tx, result_rx) = bounded::<(usize, R)>(self.buffer_size);

            for worker_id in 0..actual_workers {
                let ctx = WorkerContext {
                    worker_id,
                    work_rx: work_rx.clone(),
                    result_tx: result_tx.clone(),
                    processor: &processor,
                };
                s.spawn(move |_| Self::worker_thread(ctx));
            }

            // Only workers may hold the work receiver: once they are all gone the
            // producer's send fails instead of blocking forever
            drop(work_rx);
            drop(result_tx);

            // Producer thread: send work to workers
            s.spawn(move |_| {
                for item in work_items.iter().enumerate() {
                    if work_tx.send(item).is_err() {
                        break; // Workers dropped
                    }
                }
            });

            Self::collect_results(result_rx, total_items)
        })
        .map_err(|_| anyhow::anyhow!("Thread panic occurred during parallel execution"))
    }

    fn worker_thread<T, R, F>(ctx: WorkerContext<'_, '_, T, R, F>)
    where
        F: Fn(&T) -> R,
    {
        let mut processed = 0usize;
        while let Ok((index, item)) = ctx.work_rx.recv() {
            let result = (ctx.processor)(item);
            if ctx.result_tx.send((index, result)).is_err() {
                break; // Receiver dropped
            }
            processed += 1;
        }
        tracing::trace!(worker = ctx.worker_id, processed, "worker drained queue");
    }

    fn collect_results<R>(result_rx: Receiver<(usize, R)>, total_items: usize) -> Vec<(usize, R)> {
        let mut results = Vec::with_capacity(total_items);

        while let Ok(result) = result_rx.recv() {
            results.push(result);
            if results.len() >= total_items {
                break;
            }
        }

        results
    }
}

/// Launch one thread per item and route `(index, result)` pairs through a channel
///
/// The channel holds exactly `items.len()` results, so no producer ever blocks on the
/// handoff and the consumer can drain while producers are still running. The channel
/// closes when the last producer drops its sender.
pub fn fan_in<T, R, F>(items: &[T], processor: F) -> Result<Vec<(usize, R)>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let (result_tx, result_rx) = bounded::<(usize, R)>(items.len().max(1));

    tracing::debug!(units = items.len(), "fan-in: one unit per task");

    crossbeam::thread::scope(|s| {
        for (index, item) in items.iter().enumerate() {
            let result_tx = result_tx.clone();
            let processor = &processor;
            s.spawn(move |_| {
                // A send only fails if the consumer is gone, which cannot happen inside the scope
                let _ = result_tx.send((index, processor(item)));
            });
        }
        drop(result_tx);

        result_rx.iter().collect::<Vec<_>>()
    })
    .map_err(|_| anyhow::anyhow!("Thread panic occurred during fan-in"))
}

/// Launch one thread per partition and wait for all of them (join-all barrier)
pub fn spawn_per_partition<R, F>(partitions: &[Partition], processor: F) -> Result<Vec<(usize, R)>>
where
    R: Send,
    F: Fn(&Partition) -> R + Sync,
{
    crossbeam::thread::scope(|s| {
        let handles: Vec<_> = partitions
            .iter()
            .map(|partition| {
                let processor = &processor;
                s.spawn(move |_| (partition.index, processor(partition)))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<std::thread::Result<Vec<_>>>()
    })
    .and_then(|joined| joined)
    .map_err(|_| anyhow::anyhow!("Thread panic occurred while joining partitions"))
}
