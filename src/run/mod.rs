//! Bounded execution of user code.
//!
//! User procedures run on their own threads while the caller waits against a
//! wall-clock deadline. Timeouts are cooperative: a procedure that overruns
//! is never killed, it is abandoned and keeps running in the background
//! until it returns on its own. That leak is accepted because the embedding
//! process discards the run (and usually exits) shortly afterwards. Sends
//! from an abandoned procedure fail once the harness drops the receiving
//! end, so they never block.
mod watchdog;

use crate::config::HarnessConfig;
use crate::input::LineSender;
use crate::output::Output;
use crossbeam_channel::{bounded, select, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use watchdog::Watchdog;

/// Result of one bounded program run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Lines captured before completion or cancellation, in emission order.
    pub output: Vec<String>,
    pub elapsed: Duration,
    pub completed: bool,
}

impl RunOutcome {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn timed_out(&self) -> bool {
        !self.completed
    }
}

/// Runs user procedures against the configured deadline.
#[derive(Debug, Clone)]
pub struct BoundedRunner {
    timeout: Duration,
    buffer: usize,
    output: Output,
}

impl BoundedRunner {
    pub fn new(config: &HarnessConfig, output: Output) -> Self {
        Self {
            timeout: config.timeout,
            buffer: config.buffer.max(1),
            output,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `procedure` and report whether it finished within the timeout.
    ///
    /// Once the deadline has passed no completion is honored, even one that
    /// raced the deadline.
    pub fn run_function<F>(&self, procedure: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let (done_tx, done_rx) = bounded::<()>(1);
        let start = Instant::now();
        thread::spawn(move || {
            procedure();
            let _ = done_tx.send(());
        });

        let received = done_rx.recv_timeout(self.timeout);
        let elapsed = start.elapsed();
        match received {
            Ok(()) if elapsed <= self.timeout => {
                tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "function completed");
                true
            }
            Err(RecvTimeoutError::Disconnected) => {
                tracing::warn!("bounded function panicked");
                false
            }
            Ok(()) | Err(RecvTimeoutError::Timeout) => {
                self.output.report_timeout(self.timeout.as_secs_f64());
                false
            }
        }
    }

    /// Run `execute` while draining the lines it emits.
    ///
    /// `execute` owns the sink; dropping it (usually by returning) signals
    /// the end of output. Draining stops at that point or when the watchdog
    /// cancels the run, whichever comes first, and lines captured so far are
    /// kept either way.
    pub fn run_program<E>(&self, execute: E) -> RunOutcome
    where
        E: FnOnce(LineSender) + Send + 'static,
    {
        let (line_tx, line_rx) = bounded::<String>(self.buffer);
        let (done_tx, done_rx) = bounded::<Duration>(1);
        let start = Instant::now();
        thread::spawn(move || {
            execute(line_tx);
            let _ = done_tx.send(start.elapsed());
        });

        let watchdog = Watchdog::arm(start, self.timeout);
        let mut output = Vec::new();
        let mut cancelled = false;
        loop {
            select! {
                recv(watchdog.cancelled()) -> _ => {
                    cancelled = true;
                    break;
                }
                recv(line_rx) -> line => match line {
                    Ok(line) => output.push(line),
                    Err(_) => break,
                },
            }
        }
        drop(watchdog);
        drop(line_rx);

        let mut panicked = false;
        let reported = if cancelled {
            None
        } else {
            let remaining = self.timeout.saturating_sub(start.elapsed());
            match done_rx.recv_timeout(remaining) {
                Ok(elapsed) => Some(elapsed),
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::warn!(lines = output.len(), "bounded program panicked");
                    panicked = true;
                    None
                }
                Err(RecvTimeoutError::Timeout) => None,
            }
        };

        match reported {
            Some(elapsed) if elapsed <= self.timeout => {
                tracing::debug!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    lines = output.len(),
                    "program completed"
                );
                RunOutcome {
                    output,
                    elapsed,
                    completed: true,
                }
            }
            _ => {
                if !panicked {
                    self.output.report_timeout(self.timeout.as_secs_f64());
                }
                RunOutcome {
                    output,
                    elapsed: start.elapsed(),
                    completed: false,
                }
            }
        }
    }
}
