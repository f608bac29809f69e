//! CLI argument parsing for the `cgh` front end.
//!
//! The CLI only resolves settings and picks a built-in program; all run
//! semantics live in the library.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "cgh",
    version,
    about = "Bounded-run harness for line-oriented puzzle programs",
    after_help = "Commands:\n  ragnarok <INPUT>...                      Run the greedy grid navigator\n  kirk <INPUT>...                          Run the fire-at-tallest artillery solver\n  echo <INPUT>... [--expected <FILE>...]   Echo input lines, validated when expected files are given\n\nExamples:\n  cgh ragnarok levels/ragnarok-*.txt\n  cgh kirk --trace --fps 10 levels/kirk-1.txt\n  cgh echo in/1.txt in/2.txt --expected out/1.txt out/2.txt",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Log filter directive for diagnostics on stderr (e.g. `debug`, `cg_harness=trace`)
    #[arg(long, global = true, value_name = "FILTER", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Ragnarok(TargetArgs),
    Kirk(TargetArgs),
    Echo(EchoArgs),
}

/// Settings shared by every subcommand; flags override the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct RunFlags {
    /// JSON harness config (buffer, frame_rate, frame_delay_ms, timeout_seconds)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Per-run timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<f64>,

    /// Turn pacing in frames per second (0 disables pacing)
    #[arg(long, value_name = "FPS")]
    pub fps: Option<u32>,

    /// Channel capacity for line sources and output sinks
    #[arg(long, value_name = "LINES", value_parser = clap::value_parser!(u64).range(1..))]
    pub buffer: Option<u64>,
}

/// Inputs for a turn-based target program.
#[derive(Args, Debug)]
#[command(about = "Run a built-in solver against target-program input files")]
pub struct TargetArgs {
    /// Initial-data files, one run each
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Print the rendered map and state after every turn
    #[arg(long)]
    pub trace: bool,

    #[command(flatten)]
    pub flags: RunFlags,
}

/// Inputs for the echo program.
#[derive(Args, Debug)]
#[command(about = "Copy input lines to output, optionally validating against expected files")]
pub struct EchoArgs {
    /// Input files, one run each
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Reference output files, paired with inputs by position
    #[arg(long, value_name = "FILE", num_args = 1..)]
    pub expected: Vec<PathBuf>,

    /// Echo captured output before the verdict when validating
    #[arg(long)]
    pub echo: bool,

    #[command(flatten)]
    pub flags: RunFlags,
}
