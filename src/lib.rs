//! Bounded-run harness for line-oriented puzzle programs.
//!
//! A user program reads lines from a channel and writes answers to another.
//! The harness feeds it input files, bounds every run by a wall-clock
//! timeout, validates captured output against reference files, and drives
//! turn-based target programs to a win, loss, or timeout.
pub mod config;
pub mod harness;
pub mod input;
pub mod map;
pub mod output;
pub mod programs;
pub mod run;
pub mod target;
pub mod validate;

pub use config::HarnessConfig;
pub use harness::{BatchMismatch, BatchSummary, Harness};
pub use input::{LineReceiver, LineSender};
pub use output::Output;
pub use run::{BoundedRunner, RunOutcome};
pub use target::{TargetProgram, TurnOutcome, TurnState, UserProgram};
