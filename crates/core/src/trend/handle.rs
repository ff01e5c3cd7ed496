use tokio::sync::mpsc;

use super::TrendJob;
use crate::catalog::Movie;
use crate::metrics;

/// Handle for recording searches.
///
/// This is cheaply cloneable and can be shared across tasks.
/// Jobs are sent through a bounded channel to be written by the TrendWriter.
#[derive(Clone)]
pub struct TrendHandle {
    tx: mpsc::Sender<TrendJob>,
}

impl TrendHandle {
    /// Create a new trend handle from a channel sender
    pub fn new(tx: mpsc::Sender<TrendJob>) -> Self {
        Self { tx }
    }

    /// Queue one search to be counted.
    ///
    /// Never blocks. If the queue is full or the writer is gone the job is
    /// dropped and logged. Returns true if the job was queued.
    pub fn record(&self, search_term: &str, movie: &Movie) -> bool {
        let job = TrendJob {
            search_term: search_term.to_string(),
            movie: movie.clone(),
        };
        match self.tx.try_send(job) {
            Ok(()) => true,
            Err(e) => {
                metrics::TREND_JOBS_DROPPED.inc();
                tracing::error!("Failed to queue trend record for '{}': {}", search_term, e);
                false
            }
        }
    }
}
