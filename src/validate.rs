//! Captured-output validation against expected-output files.
use std::fs;
use std::path::Path;

/// First disagreement between captured output and the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// Reference file could not be read.
    MissingReference,
    /// Captured line differs from the reference line at `index`.
    Line {
        index: usize,
        expected: String,
        observed: String,
    },
    /// Captured output has a line at `index` the reference lacks.
    Extra { index: usize, observed: String },
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mismatch::MissingReference => write!(f, "reference file unreadable"),
            Mismatch::Line {
                index,
                expected,
                observed,
            } => write!(
                f,
                "line {index}: expected {expected:?}, observed {observed:?}"
            ),
            Mismatch::Extra { index, observed } => {
                write!(f, "line {index}: unexpected extra line {observed:?}")
            }
        }
    }
}

/// Check `captured` against the lines of `reference_path`.
pub fn validate(reference_path: &Path, captured: &[String]) -> bool {
    find_mismatch(reference_path, captured).is_none()
}

/// Locate the first captured line that disagrees with the reference.
///
/// The reference is split on `\n` as-is, so a trailing newline contributes a
/// final empty line. Reference lines past the end of `captured` are not
/// checked.
pub fn find_mismatch(reference_path: &Path, captured: &[String]) -> Option<Mismatch> {
    let reference = match fs::read_to_string(reference_path) {
        Ok(reference) => reference,
        Err(err) => {
            tracing::debug!(path = %reference_path.display(), %err, "reference unreadable");
            return Some(Mismatch::MissingReference);
        }
    };
    compare_lines(&reference, captured)
}

fn compare_lines(reference: &str, captured: &[String]) -> Option<Mismatch> {
    let expected: Vec<&str> = reference.split('\n').collect();
    for (index, observed) in captured.iter().enumerate() {
        match expected.get(index) {
            Some(line) if *line == observed.as_str() => {}
            Some(line) => {
                return Some(Mismatch::Line {
                    index,
                    expected: (*line).to_string(),
                    observed: observed.clone(),
                })
            }
            None => {
                return Some(Mismatch::Extra {
                    index,
                    observed: observed.clone(),
                })
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
