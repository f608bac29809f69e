use super::*;

fn lines(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn temp_reference(name: &str, contents: &str) -> std::path::PathBuf {
    let root = std::env::temp_dir().join(format!("cgh-validate-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&root).expect("create temp root");
    let path = root.join("expected.txt");
    std::fs::write(&path, contents.as_bytes()).expect("write reference");
    path
}

#[test]
fn exact_match_passes() {
    assert_eq!(compare_lines("a\nb\n", &lines(&["a", "b"])), None);
}

#[test]
fn empty_capture_passes_trivially() {
    assert_eq!(compare_lines("a\nb", &[]), None);
}

#[test]
fn extra_reference_lines_are_ignored() {
    assert_eq!(compare_lines("a\nb\nc", &lines(&["a"])), None);
}

#[test]
fn trailing_newline_yields_final_empty_line() {
    assert_eq!(compare_lines("a\n", &lines(&["a", ""])), None);
    assert_eq!(
        compare_lines("a", &lines(&["a", ""])),
        Some(Mismatch::Extra {
            index: 1,
            observed: String::new(),
        })
    );
}

#[test]
fn first_differing_line_is_reported() {
    let mismatch = compare_lines("N\nE\nS", &lines(&["N", "W", "X"])).expect("mismatch");
    assert_eq!(
        mismatch,
        Mismatch::Line {
            index: 1,
            expected: "E".to_string(),
            observed: "W".to_string(),
        }
    );
    assert_eq!(mismatch.to_string(), "line 1: expected \"E\", observed \"W\"");
}

#[test]
fn validate_reads_reference_from_disk() {
    let path = temp_reference("disk", "1 2\n3 4\n");
    assert!(validate(&path, &lines(&["1 2", "3 4"])));
    assert!(!validate(&path, &lines(&["1 2", "4 3"])));
}

#[test]
fn missing_reference_fails() {
    let path = Path::new("/definitely/not/expected.txt");
    assert!(!validate(path, &[]));
    assert_eq!(
        find_mismatch(path, &lines(&["a"])),
        Some(Mismatch::MissingReference)
    );
}
