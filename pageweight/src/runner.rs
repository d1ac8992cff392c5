use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};

/// One line of human readable text describing a finished job.
pub trait Summarize {
    /// Render the completion summary shown in progress output.
    fn summary(&self) -> String;
}

/// Receives one notification per completed job, in completion order.
///
/// The sink is injectable so tests can record the emitted sequence instead
/// of asserting on console text.
pub trait ProgressSink: Send + Sync {
    /// Called once per finished job with the 1 based completion count and
    /// the job total.
    fn completed(&self, completed: usize, total: usize, summary: &str);
}

/// Prints progress lines to stdout as `(<completed>/<total>) <summary>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn completed(&self, completed: usize, total: usize, summary: &str) {
        println!("({completed}/{total}) {summary}");
    }
}

/// Bounded concurrent executor for a finite batch of independent jobs.
///
/// At most `capacity` jobs run inside `execute` at any instant. Finished
/// jobs report over a completion channel; outcomes are collected in
/// completion order, which is unrelated to submission order.
#[derive(Debug)]
pub struct TaskPool {
    /// Maximum concurrently executing jobs.
    capacity: usize,
    /// Semaphore bounding the active workers.
    semaphore: Arc<Semaphore>,
}

impl TaskPool {
    /// Create a pool with a fixed worker capacity. Zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            semaphore: Arc::new(Semaphore::new(capacity)),
        }
    }

    /// The fixed worker capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Execute every job and return one outcome per job in completion order.
    ///
    /// A progress notification fires immediately as each job finishes, with
    /// a 1 based counter. `execute` owns its failures: it must map them into
    /// the outcome it returns. The pool catches nothing on its behalf; a
    /// panic inside `execute` resumes here and fails the whole run.
    pub async fn run<J, R, F, Fut>(
        &self,
        jobs: Vec<J>,
        execute: F,
        progress: &dyn ProgressSink,
    ) -> Vec<R>
    where
        J: Send + 'static,
        R: Summarize + Send + 'static,
        F: Fn(J) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let total = jobs.len();
        if total == 0 {
            return Vec::new();
        }

        let (tx, mut rx) = mpsc::channel(total);
        let mut handles = Vec::with_capacity(total);

        for job in jobs {
            let semaphore = self.semaphore.clone();
            let execute = execute.clone();
            let tx = tx.clone();

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire().await.ok();
                let outcome = execute(job).await;
                let _ = tx.send(outcome).await;
            }));
        }
        drop(tx);

        let mut results = Vec::with_capacity(total);
        let mut completed = 0;

        while let Some(outcome) = rx.recv().await {
            completed += 1;
            progress.completed(completed, total, &outcome.summary());
            results.push(outcome);
        }

        for handle in handles {
            if let Err(err) = handle.await {
                if err.is_panic() {
                    std::panic::resume_unwind(err.into_panic());
                }
            }
        }

        results
    }
}
