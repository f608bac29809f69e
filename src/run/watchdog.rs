use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Deadline monitor for one bounded run.
///
/// The background thread wakes once per `timeout` interval and fires the
/// one-shot cancellation signal when the run is past its deadline. Dropping
/// the watchdog disconnects its exit channel and the thread returns on its
/// next wake.
pub(crate) struct Watchdog {
    _exit: Sender<()>,
    cancelled: Receiver<()>,
}

impl Watchdog {
    pub(crate) fn arm(start: Instant, timeout: Duration) -> Self {
        let (exit_tx, exit_rx) = bounded::<()>(1);
        let (cancel_tx, cancel_rx) = bounded::<()>(1);

        thread::spawn(move || loop {
            match exit_rx.recv_timeout(timeout) {
                Err(RecvTimeoutError::Timeout) => {
                    let elapsed = start.elapsed();
                    if elapsed > timeout {
                        tracing::debug!(
                            elapsed_ms = elapsed.as_millis() as u64,
                            timeout_ms = timeout.as_millis() as u64,
                            "watchdog deadline exceeded"
                        );
                        let _ = cancel_tx.send(());
                        return;
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
            }
        });

        Self {
            _exit: exit_tx,
            cancelled: cancel_rx,
        }
    }

    /// Becomes ready once the deadline has passed.
    pub(crate) fn cancelled(&self) -> &Receiver<()> {
        &self.cancelled
    }
}
