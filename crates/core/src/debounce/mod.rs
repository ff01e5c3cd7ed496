//! Debounced text input.
//!
//! Converts a rapidly changing input value into a settled value that is only
//! published after the input has stayed unchanged for a quiet period.
//!
//! ```rust,ignore
//! let (input, debouncer) = create_debouncer(Duration::from_millis(1000));
//! let mut settled = debouncer.subscribe();
//! tokio::spawn(debouncer.run());
//!
//! input.set("dune");
//! settled.changed().await?;
//! assert_eq!(*settled.borrow(), "dune");
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

/// Write side of the debouncer: the live, unsettled input.
///
/// Cheaply cloneable; the debouncer stops once every clone is dropped.
#[derive(Clone)]
pub struct DebounceInput {
    tx: Arc<watch::Sender<String>>,
}

impl DebounceInput {
    /// Replace the live input value.
    ///
    /// Setting the value it already holds does not restart the quiet period.
    pub fn set(&self, value: impl Into<String>) {
        let value = value.into();
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }
}

/// Background task publishing settled input values.
pub struct Debouncer {
    delay: Duration,
    input: watch::Receiver<String>,
    settled: watch::Sender<String>,
}

impl Debouncer {
    /// Subscribe to settled values.
    ///
    /// The receiver starts at the empty string, whatever the input holds,
    /// and is only notified when a settle changes the published value.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.settled.subscribe()
    }

    /// Run the debouncer until every `DebounceInput` is dropped.
    ///
    /// This should be spawned as a background task.
    pub async fn run(mut self) {
        debug!("Debouncer started (delay {:?})", self.delay);

        // The initial input counts as a change so the first settle happens
        // one quiet period after start.
        let mut pending = Some(self.input.borrow_and_update().clone());

        loop {
            match pending.take() {
                None => {
                    if self.input.changed().await.is_err() {
                        break;
                    }
                    pending = Some(self.input.borrow_and_update().clone());
                }
                Some(value) => {
                    tokio::select! {
                        _ = tokio::time::sleep(self.delay) => {
                            self.publish(value);
                        }
                        changed = self.input.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            // Previous pending value is dropped, wait restarts.
                            pending = Some(self.input.borrow_and_update().clone());
                        }
                    }
                }
            }
        }

        debug!("Debouncer shutting down");
    }

    fn publish(&self, value: String) {
        let changed = self.settled.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value.clone();
                true
            }
        });
        if changed {
            debug!("Input settled on '{}'", value);
        }
    }
}

/// Create a debouncer with the given quiet period.
///
/// Returns:
/// - `DebounceInput` - for forwarding typed input
/// - `Debouncer` - subscribe first, then spawn with `tokio::spawn(debouncer.run())`
pub fn create_debouncer(delay: Duration) -> (DebounceInput, Debouncer) {
    let (input_tx, input_rx) = watch::channel(String::new());
    let (settled_tx, _) = watch::channel(String::new());

    let input = DebounceInput {
        tx: Arc::new(input_tx),
    };
    let debouncer = Debouncer {
        delay,
        input: input_rx,
        settled: settled_tx,
    };

    (input, debouncer)
}
