//! Harness configuration.
//!
//! A `HarnessConfig` is built once at the entry point and handed to the
//! harness by value; runs only ever read it.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default channel capacity for line sources and output sinks.
pub const DEFAULT_BUFFER: usize = 2048;
/// Default wall-clock budget for one bounded run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Resolved settings read by every bounded run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarnessConfig {
    pub buffer: usize,
    pub frame_delay: Duration,
    pub timeout: Duration,
    timeout_set: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_BUFFER,
            frame_delay: Duration::ZERO,
            timeout: DEFAULT_TIMEOUT,
            timeout_set: false,
        }
    }
}

impl HarnessConfig {
    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.timeout_set = true;
        self
    }

    /// Use `timeout` unless one was chosen explicitly.
    pub fn with_default_timeout(self, timeout: Duration) -> Self {
        if self.timeout_set {
            return self;
        }
        Self { timeout, ..self }
    }

    /// Whether the timeout came from a builder, a config file, or a flag.
    pub fn timeout_is_explicit(&self) -> bool {
        self.timeout_set
    }

    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    /// Pace turns at `fps` frames per second; zero disables pacing.
    pub fn with_frame_rate(self, fps: u32) -> Self {
        self.with_frame_delay(frame_delay_for(fps))
    }

    /// Convert a fractional-second timeout, rejecting negative or non-finite values.
    pub fn with_timeout_seconds(self, seconds: f64) -> Result<Self> {
        Ok(self.with_timeout(timeout_from_seconds(seconds)?))
    }
}

/// Millisecond delay between turns for a frame rate (`1000 / fps`).
pub fn frame_delay_for(fps: u32) -> Duration {
    if fps == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(u64::from(1000 / fps))
}

fn timeout_from_seconds(seconds: f64) -> Result<Duration> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(anyhow!(
            "timeout_seconds must be a non-negative number (got {seconds})"
        ));
    }
    Duration::try_from_secs_f64(seconds)
        .map_err(|err| anyhow!("timeout_seconds out of range (got {seconds}): {err}"))
}

/// On-disk configuration, every field optional.
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<f64>,
}

/// Load a JSON config file.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: ConfigFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse harness config JSON {}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Reject values the harness cannot honor.
pub fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.buffer == Some(0) {
        return Err(anyhow!("buffer must be > 0"));
    }
    if config.frame_rate.is_some() && config.frame_delay_ms.is_some() {
        return Err(anyhow!(
            "frame_rate and frame_delay_ms are mutually exclusive"
        ));
    }
    if let Some(seconds) = config.timeout_seconds {
        timeout_from_seconds(seconds)?;
    }
    Ok(())
}

impl ConfigFile {
    /// Layer file values over `base`.
    pub fn apply(&self, base: HarnessConfig) -> Result<HarnessConfig> {
        validate_config(self)?;
        let mut config = base;
        if let Some(buffer) = self.buffer {
            config = config.with_buffer(buffer);
        }
        if let Some(fps) = self.frame_rate {
            config = config.with_frame_rate(fps);
        }
        if let Some(ms) = self.frame_delay_ms {
            config = config.with_frame_delay(Duration::from_millis(ms));
        }
        if let Some(seconds) = self.timeout_seconds {
            config = config.with_timeout_seconds(seconds)?;
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
