//! Batch entry points.
//!
//! A `Harness` pairs one configuration with one output sink and runs user
//! programs against input files, one run at a time. Failures of individual
//! runs are reported through the sink and never abort a batch.
use crate::config::HarnessConfig;
use crate::input::{open_lines, LineReceiver, LineSender};
use crate::output::Output;
use crate::run::BoundedRunner;
use crate::target::{TargetProgram, TurnLoop, TurnOutcome};
use crate::validate::find_mismatch;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

/// Pass count for a batch of runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub passed: usize,
    pub total: usize,
}

impl BatchSummary {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        }
    }
}

/// Input and expected-output lists of different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchMismatch {
    pub inputs: usize,
    pub expected: usize,
}

impl fmt::Display for BatchMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Amount of input files ({}) doesn't match amount of test files ({}).",
            self.inputs, self.expected
        )
    }
}

impl std::error::Error for BatchMismatch {}

#[derive(Debug, Clone)]
pub struct Harness {
    config: HarnessConfig,
    output: Output,
    runner: BoundedRunner,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(HarnessConfig::default(), Output::default())
    }
}

impl Harness {
    pub fn new(config: HarnessConfig, output: Output) -> Self {
        let runner = BoundedRunner::new(&config, output.clone());
        Self {
            config,
            output,
            runner,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn runner(&self) -> &BoundedRunner {
        &self.runner
    }

    /// Run `main` on `input` without a deadline, echoing its lines as they arrive.
    pub fn run_manual_program<M>(&self, input: &Path, main: M)
    where
        M: FnOnce(LineReceiver, LineSender) + Send + 'static,
    {
        let lines = open_lines(input, self.config.buffer);
        let (tx, rx) = crossbeam_channel::bounded(self.config.buffer.max(1));
        thread::spawn(move || main(lines, tx));
        for line in rx.iter() {
            self.output.trace(&line);
        }
    }

    pub fn run_manual_programs<M>(&self, inputs: &[PathBuf], main: M)
    where
        M: Fn(LineReceiver, LineSender) + Send + Sync + 'static,
    {
        let main = Arc::new(main);
        for input in inputs {
            let main = Arc::clone(&main);
            self.run_manual_program(input, move |lines, out| main(lines, out));
            self.output.print("\n");
        }
    }

    /// Run `main` on `input` under the deadline and check it against `expected`.
    ///
    /// A run that times out is a failure; its partial output is still echoed
    /// when `echo` is set.
    pub fn run_and_validate_manual_program<M>(
        &self,
        input: &Path,
        expected: &Path,
        echo: bool,
        main: M,
    ) -> bool
    where
        M: FnOnce(LineReceiver, LineSender) + Send + 'static,
    {
        let lines = open_lines(input, self.config.buffer);
        let outcome = self.runner.run_program(move |out| main(lines, out));

        if echo {
            for line in &outcome.output {
                self.output.trace(line);
            }
        }
        if !outcome.completed {
            return false;
        }

        let mismatch = find_mismatch(expected, &outcome.output);
        if let Some(mismatch) = &mismatch {
            tracing::info!(
                input = %input.display(),
                expected = %expected.display(),
                %mismatch,
                "output mismatch"
            );
        }
        let correct = mismatch.is_none();
        self.output.report_result(correct, outcome.elapsed_seconds());
        correct
    }

    /// Validate every `(inputs[i], expected[i])` pair.
    ///
    /// Lists of different lengths are reported and nothing is run.
    pub fn run_and_validate_manual_programs<M>(
        &self,
        inputs: &[PathBuf],
        expected: &[PathBuf],
        echo: bool,
        main: M,
    ) -> Result<BatchSummary, BatchMismatch>
    where
        M: Fn(LineReceiver, LineSender) + Send + Sync + 'static,
    {
        if inputs.len() != expected.len() {
            let mismatch = BatchMismatch {
                inputs: inputs.len(),
                expected: expected.len(),
            };
            self.output.trace(&mismatch.to_string());
            return Err(mismatch);
        }

        let main = Arc::new(main);
        let mut summary = BatchSummary::default();
        for (input, expected) in inputs.iter().zip(expected) {
            let main = Arc::clone(&main);
            let passed =
                self.run_and_validate_manual_program(input, expected, echo, move |lines, out| {
                    main(lines, out)
                });
            summary.record(passed);
            self.output.print("\n");
        }
        self.report_total(&summary);
        Ok(summary)
    }

    /// Drive `program` from the initial data in `input` to a terminal state.
    pub fn run_target_program<P: TargetProgram>(
        &self,
        input: &Path,
        trace: bool,
        program: P,
    ) -> TurnOutcome {
        TurnLoop::new(&self.runner, &self.output, &self.config, trace).run(input, program)
    }

    /// Run a fresh program from `make` against each input.
    pub fn run_target_programs<P, F>(
        &self,
        inputs: &[PathBuf],
        trace: bool,
        mut make: F,
    ) -> BatchSummary
    where
        P: TargetProgram,
        F: FnMut() -> P,
    {
        let mut summary = BatchSummary::default();
        for input in inputs {
            let outcome = self.run_target_program(input, trace, make());
            summary.record(outcome.passed());
            self.output.print("\n");
        }
        self.report_total(&summary);
        summary
    }

    pub fn report_total(&self, summary: &BatchSummary) {
        self.output.printf(format_args!(
            "{}/{} programs passed.\n",
            summary.passed, summary.total
        ));
    }
}

#[cfg(test)]
#[path = "harness_tests.rs"]
mod tests;
