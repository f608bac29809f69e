mod common;

use common::Fixture;

#[test]
fn echo_without_expected_copies_lines() {
    let fixture = Fixture::new();
    fixture.write("a.in", "1 2\n\n3\n");

    let run = fixture.cgh(&["echo", "a.in"]);

    assert!(run.success, "{run:?}");
    assert_eq!(run.stdout, "1 2\n3\n\n");
}

#[test]
fn echo_validation_passes_and_reports_total() {
    let fixture = Fixture::new();
    fixture.write("a.in", "N\nE\n");
    fixture.write("a.out", "N\nE\n");

    let run = fixture.cgh(&["echo", "a.in", "--expected", "a.out"]);

    assert!(run.success, "{run:?}");
    assert!(run.stdout.contains("and is correct! :)\n"), "{}", run.stdout);
    assert!(run.stdout.ends_with("1/1 programs passed.\n"), "{}", run.stdout);
}

#[test]
fn echo_validation_failure_exits_nonzero() {
    let fixture = Fixture::new();
    fixture.write("a.in", "N\nW\n");
    fixture.write("a.out", "N\nE\n");

    let run = fixture.cgh(&["echo", "a.in", "--expected", "a.out", "--echo"]);

    assert_eq!(run.code, Some(1), "{run:?}");
    assert!(run.stdout.starts_with("N\nW\n"), "{}", run.stdout);
    assert!(run.stdout.contains("and is incorrect. :(\n"));
    assert!(run.stdout.ends_with("0/1 programs passed.\n"));
}

#[test]
fn mismatched_expected_list_runs_nothing() {
    let fixture = Fixture::new();
    fixture.write("a.in", "x\n");
    fixture.write("b.in", "y\n");
    fixture.write("a.out", "x\n");

    let run = fixture.cgh(&["echo", "a.in", "b.in", "--expected", "a.out"]);

    assert_eq!(run.code, Some(1), "{run:?}");
    assert_eq!(
        run.stdout,
        "Amount of input files (2) doesn't match amount of test files (1).\n"
    );
}

#[test]
fn ragnarok_solver_wins() {
    let fixture = Fixture::new();
    fixture.write("level.txt", "5 4 0 0 10 3 2\n");

    let run = fixture.cgh(&["ragnarok", "level.txt"]);

    assert!(run.success, "{run:?}");
    assert!(run.stdout.contains("and is correct! :)"));
    assert!(run.stdout.ends_with("1/1 programs passed.\n"));
}

#[test]
fn ragnarok_out_of_energy_fails() {
    let fixture = Fixture::new();
    fixture.write("level.txt", "5 4 0 0 2 4 3\n");

    let run = fixture.cgh(&["ragnarok", "level.txt"]);

    assert_eq!(run.code, Some(1), "{run:?}");
    assert!(run.stdout.contains("and is incorrect. :("));
}

#[test]
fn kirk_trace_prints_ship_state() {
    let fixture = Fixture::new();
    fixture.write("level.txt", "4\n2\n0\n0\n0\n0\n0\n0\n0\n");

    let run = fixture.cgh(&["kirk", "--trace", "level.txt"]);

    assert!(run.success, "{run:?}");
    assert!(run.stdout.contains("FIRE\n"));
    assert!(run.stdout.contains("Ship fired and did 2 damage.\n"));
}

#[test]
fn config_file_is_layered_under_flags() {
    let fixture = Fixture::new();
    fixture.write("a.in", "x\n");
    fixture.write("a.out", "x\n");
    fixture.write("harness.json", r#"{"timeout_seconds": 2.5, "buffer": 16}"#);

    let run = fixture.cgh(&[
        "echo",
        "a.in",
        "--expected",
        "a.out",
        "--config",
        "harness.json",
        "--timeout",
        "1.5",
        "--log-level",
        "debug",
    ]);

    assert!(run.success, "{run:?}");
    assert!(run.stderr.contains("resolved harness config"), "{}", run.stderr);
    assert!(run.stderr.contains("timeout_ms=1500"), "{}", run.stderr);
    assert!(run.stderr.contains("buffer=16"), "{}", run.stderr);
}

#[test]
fn invalid_config_is_an_error() {
    let fixture = Fixture::new();
    fixture.write("a.in", "x\n");
    fixture.write("harness.json", r#"{"frame_rate": 10, "frame_delay_ms": 5}"#);

    let run = fixture.cgh(&["echo", "a.in", "--config", "harness.json"]);

    assert!(!run.success);
    assert!(run.stderr.contains("mutually exclusive"), "{}", run.stderr);
    assert!(run.stdout.is_empty());
}
