use std::sync::Arc;

use tokio::sync::mpsc;

use super::{TrendHandle, TrendJob, TrendStore};
use crate::metrics;

/// Background task that receives trend jobs and writes them to storage
pub struct TrendWriter {
    rx: mpsc::Receiver<TrendJob>,
    store: Arc<dyn TrendStore>,
}

impl TrendWriter {
    /// Create a new trend writer
    pub fn new(rx: mpsc::Receiver<TrendJob>, store: Arc<dyn TrendStore>) -> Self {
        Self { rx, store }
    }

    /// Run the writer, consuming jobs until every handle is dropped.
    ///
    /// This should be spawned as a background task.
    pub async fn run(mut self) {
        tracing::info!("Trend writer started");

        while let Some(job) = self.rx.recv().await {
            match self.store.record_search(&job.search_term, &job.movie) {
                Ok(record) => {
                    metrics::TREND_RECORDS_WRITTEN.inc();
                    tracing::debug!(
                        "Recorded search '{}' (count {})",
                        record.search_term,
                        record.count
                    );
                }
                Err(e) => {
                    metrics::TREND_RECORDS_FAILED.inc();
                    tracing::error!("Failed to record search '{}': {}", job.search_term, e);
                }
            }
        }

        tracing::info!("Trend writer shutting down");
    }
}

/// Create a complete trend recording system
///
/// Returns:
/// - `TrendHandle` - for recording searches (clone this to share across tasks)
/// - `TrendWriter` - spawn this as a background task with `tokio::spawn(writer.run())`
///
/// # Arguments
/// * `store` - The trend store to write records to
/// * `buffer_size` - Size of the job queue (jobs are dropped when full)
pub fn create_trend_system(
    store: Arc<dyn TrendStore>,
    buffer_size: usize,
) -> (TrendHandle, TrendWriter) {
    let (tx, rx) = mpsc::channel(buffer_size);
    let handle = TrendHandle::new(tx);
    let writer = TrendWriter::new(rx, store);
    (handle, writer)
}
