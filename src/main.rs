use anyhow::{Context, Result};
use cg_harness::config::{load_config, HarnessConfig};
use cg_harness::harness::Harness;
use cg_harness::input::{LineReceiver, LineSender};
use cg_harness::output::Output;
use cg_harness::programs::kirk::{run_kirk_programs, FireAtTallest};
use cg_harness::programs::ragnarok::{run_ragnarok_programs, GreedyNavigator};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Command, EchoArgs, RootArgs, RunFlags, TargetArgs};

fn main() -> Result<ExitCode> {
    let args = RootArgs::parse();
    init_logging(&args.log_level);

    let passed = match args.command {
        Command::Ragnarok(args) => cmd_ragnarok(args)?,
        Command::Kirk(args) => cmd_kirk(args)?,
        Command::Echo(args) => cmd_echo(args)?,
    };
    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
}

/// Layer the config file, then explicit flags, over `base`.
fn resolve_config(base: HarnessConfig, flags: &RunFlags) -> Result<HarnessConfig> {
    let mut config = base;
    if let Some(path) = &flags.config {
        config = load_config(path)?.apply(config)?;
    }
    if let Some(buffer) = flags.buffer {
        config = config.with_buffer(usize::try_from(buffer).context("--buffer out of range")?);
    }
    if let Some(fps) = flags.fps {
        config = config.with_frame_rate(fps);
    }
    if let Some(seconds) = flags.timeout {
        config = config.with_timeout_seconds(seconds).context("--timeout")?;
    }
    tracing::debug!(
        buffer = config.buffer,
        timeout_ms = config.timeout.as_millis() as u64,
        frame_delay_ms = config.frame_delay.as_millis() as u64,
        "resolved harness config"
    );
    Ok(config)
}

fn cmd_ragnarok(args: TargetArgs) -> Result<bool> {
    let config = resolve_config(HarnessConfig::default(), &args.flags)?;
    let harness = Harness::new(config, Output::stdout());
    let summary = run_ragnarok_programs(
        &harness,
        &args.inputs,
        args.trace,
        GreedyNavigator::default,
    );
    Ok(summary.all_passed())
}

fn cmd_kirk(args: TargetArgs) -> Result<bool> {
    let config = resolve_config(HarnessConfig::default(), &args.flags)?;
    let harness = Harness::new(config, Output::stdout());
    let summary = run_kirk_programs(&harness, &args.inputs, args.trace, || FireAtTallest);
    Ok(summary.all_passed())
}

fn cmd_echo(args: EchoArgs) -> Result<bool> {
    let config = resolve_config(HarnessConfig::default(), &args.flags)?;
    let harness = Harness::new(config, Output::stdout());

    if args.expected.is_empty() {
        harness.run_manual_programs(&args.inputs, echo_lines);
        return Ok(true);
    }

    match harness.run_and_validate_manual_programs(
        &args.inputs,
        &args.expected,
        args.echo,
        echo_lines,
    ) {
        Ok(summary) => Ok(summary.all_passed()),
        Err(mismatch) => {
            tracing::warn!(%mismatch, "no programs were run");
            Ok(false)
        }
    }
}

/// Copy every input line to the output channel.
fn echo_lines(lines: LineReceiver, out: LineSender) {
    for line in lines.iter() {
        if out.send(line).is_err() {
            break;
        }
    }
}
