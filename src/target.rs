//! Turn-based driving of pluggable target programs.
//!
//! A target program owns a simulation. Each turn the loop asks it for fresh
//! input, runs the user's update step as a bounded program, and feeds the
//! captured lines back so the simulation can advance and judge the result.
use crate::config::HarnessConfig;
use crate::input::{open_lines, LineReceiver, LineSender};
use crate::output::Output;
use crate::run::BoundedRunner;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

/// Simulation driven by [`TurnLoop`].
pub trait TargetProgram: Send + 'static {
    /// Consume the initial data file, including any user initialization.
    fn parse_initial_data(&mut self, input: &LineReceiver);
    /// Input lines for the next update step.
    fn input(&self) -> LineReceiver;
    /// Run one user update step.
    fn update(&mut self, input: &LineReceiver, output: &LineSender);
    /// Apply the captured update output and return a trace message.
    fn set_output(&mut self, output: &[String]) -> String;
    fn lose_condition(&self) -> bool;
    fn win_condition(&self) -> bool;
}

/// The user side of a target program: one-time setup plus a per-turn step.
pub trait UserProgram: Send + 'static {
    fn initialize(&mut self, _input: &LineReceiver) {}
    fn update(&mut self, input: &LineReceiver, output: &LineSender);
}

/// Adapts a closure into a [`UserProgram`] with no initialization step.
pub struct UpdateFn<F>(pub F);

impl<F> UserProgram for UpdateFn<F>
where
    F: FnMut(&LineReceiver, &LineSender) + Send + 'static,
{
    fn update(&mut self, input: &LineReceiver, output: &LineSender) {
        (self.0)(input, output)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Initializing,
    Running,
    Won,
    Lost,
    TimedOut,
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TurnState::Initializing => "initializing",
            TurnState::Running => "running",
            TurnState::Won => "won",
            TurnState::Lost => "lost",
            TurnState::TimedOut => "timed out",
        };
        f.write_str(label)
    }
}

/// Terminal result of one turn loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnOutcome {
    pub state: TurnState,
    pub turns: usize,
    /// Sum of the elapsed time of every update step.
    pub elapsed: Duration,
}

impl TurnOutcome {
    pub fn passed(&self) -> bool {
        self.state == TurnState::Won
    }
}

/// Drives a [`TargetProgram`] from its initial data to a terminal state.
pub struct TurnLoop<'a> {
    runner: &'a BoundedRunner,
    output: &'a Output,
    config: &'a HarnessConfig,
    trace: bool,
}

impl<'a> TurnLoop<'a> {
    pub fn new(
        runner: &'a BoundedRunner,
        output: &'a Output,
        config: &'a HarnessConfig,
        trace: bool,
    ) -> Self {
        Self {
            runner,
            output,
            config,
            trace,
        }
    }

    pub fn run<P: TargetProgram>(&self, input_path: &Path, program: P) -> TurnOutcome {
        let program = Arc::new(Mutex::new(program));
        let mut state = TurnState::Initializing;
        tracing::debug!(path = %input_path.display(), %state, "parsing initial data");

        let lines = open_lines(input_path, self.config.buffer);
        let shared = Arc::clone(&program);
        let initialized = self.runner.run_function(move || {
            lock(&shared).parse_initial_data(&lines);
        });
        if !initialized {
            tracing::info!(path = %input_path.display(), "initialization timed out");
            return TurnOutcome {
                state: TurnState::TimedOut,
                turns: 0,
                elapsed: Duration::ZERO,
            };
        }

        state = TurnState::Running;
        let mut turns = 0;
        let mut elapsed = Duration::ZERO;
        while state == TurnState::Running {
            let input = lock(&program).input();
            let shared = Arc::clone(&program);
            let outcome = self.runner.run_program(move |out| {
                lock(&shared).update(&input, &out);
            });
            turns += 1;
            elapsed += outcome.elapsed;

            if !outcome.completed {
                state = TurnState::TimedOut;
                break;
            }

            let (message, won, lost) = {
                let mut program = lock(&program);
                let message = program.set_output(&outcome.output);
                (message, program.win_condition(), program.lose_condition())
            };

            if self.trace {
                for line in &outcome.output {
                    self.output.trace(line);
                }
                self.output.printf(format_args!("\n{message}\n\n"));
            }

            thread::sleep(self.config.frame_delay);

            if won {
                self.output.report_result(true, elapsed.as_secs_f64());
                state = TurnState::Won;
            } else if lost {
                self.output.report_result(false, elapsed.as_secs_f64());
                state = TurnState::Lost;
            }
        }

        tracing::info!(
            path = %input_path.display(),
            %state,
            turns,
            elapsed_ms = elapsed.as_millis() as u64,
            "target program finished"
        );
        TurnOutcome {
            state,
            turns,
            elapsed,
        }
    }
}

fn lock<P>(program: &Mutex<P>) -> MutexGuard<'_, P> {
    program.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
