//! Report and trace text sink.
//!
//! Every user-visible message (verdicts, echoed program output, trace maps)
//! goes through an `Output`, so embedders can redirect it. Diagnostics use
//! `tracing` instead and never pass through here.
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

type WriteFn = dyn Fn(&str) + Send + Sync;

/// Pluggable formatted-text writer.
#[derive(Clone)]
pub struct Output {
    write: Arc<WriteFn>,
}

impl Default for Output {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output").finish_non_exhaustive()
    }
}

impl Output {
    /// Write to process stdout, flushing after every chunk.
    pub fn stdout() -> Self {
        Self::from_fn(|text| {
            let mut stdout = std::io::stdout().lock();
            let _ = stdout.write_all(text.as_bytes());
            let _ = stdout.flush();
        })
    }

    pub fn from_fn<F>(write: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            write: Arc::new(write),
        }
    }

    /// Collect everything written into a shared buffer.
    pub fn capture() -> (Self, CapturedText) {
        let buffer = CapturedText::default();
        let sink = buffer.clone();
        let output = Self::from_fn(move |text| sink.push(text));
        (output, buffer)
    }

    pub fn print(&self, text: &str) {
        (self.write)(text);
    }

    pub fn printf(&self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(text) => self.print(text),
            None => self.print(&args.to_string()),
        }
    }

    /// Emit `msg` followed by a newline.
    pub fn trace(&self, msg: &str) {
        self.printf(format_args!("{msg}\n"));
    }

    pub fn tracef(&self, args: fmt::Arguments<'_>) {
        self.trace(&args.to_string());
    }

    /// Emit a verdict line for a finished run.
    pub fn report_result(&self, correct: bool, seconds: f64) {
        if correct {
            self.printf(format_args!(
                "Your program finished in {seconds:.6}s and is correct! :)\n"
            ));
        } else {
            self.printf(format_args!(
                "Your program finished in {seconds:.6}s and is incorrect. :(\n"
            ));
        }
    }

    pub fn report_timeout(&self, timeout_seconds: f64) {
        self.printf(format_args!(
            "Your program timed out after {timeout_seconds:.6}s! :(\n"
        ));
    }
}

/// Text collected by [`Output::capture`].
#[derive(Clone, Default, Debug)]
pub struct CapturedText {
    inner: Arc<Mutex<String>>,
}

impl CapturedText {
    fn push(&self, text: &str) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_str(text);
    }

    pub fn contents(&self) -> String {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
