//! File-backed line sources and the channel types user code reads and writes.
use crossbeam_channel::{bounded, Receiver, Sender};
use std::fs;
use std::path::Path;
use std::thread;

/// Lines flowing into a user program.
pub type LineReceiver = Receiver<String>;
/// Lines a user program emits.
pub type LineSender = Sender<String>;

/// Open `path` as a lazy sequence of its non-empty lines.
///
/// The file is read up front; a background producer feeds the lines through
/// a channel bounded at `buffer` and closes it when done. An unreadable file
/// yields an already-closed, empty sequence.
pub fn open_lines(path: &Path, buffer: usize) -> LineReceiver {
    let (tx, rx) = bounded(buffer.max(1));
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "input unreadable; treating as empty");
            return rx;
        }
    };
    thread::spawn(move || {
        for line in contents.split('\n').filter(|line| !line.is_empty()) {
            if tx.send(line.to_string()).is_err() {
                break;
            }
        }
    });
    rx
}

/// A closed channel pre-filled with `lines`.
pub fn lines_from<I, S>(lines: I) -> LineReceiver
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
    let (tx, rx) = bounded(lines.len().max(1));
    for line in lines {
        // Capacity covers every line and `rx` is still alive.
        let _ = tx.send(line);
    }
    rx
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
