//! End-to-end tests driving the built `paralix` binary.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn paralix(dir: &Path, args: &[&str]) -> Output {
    let scratch = dir.join("scratch");
    Command::new(env!("CARGO_BIN_EXE_paralix"))
        .current_dir(dir)
        .args(args)
        .arg("--scratch-dir")
        .arg(&scratch)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run paralix binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn echo_three_values_writes_sorted_report() {
    let dir = TempDir::new().unwrap();
    let output = paralix(
        dir.path(),
        &["command", "-e", "echo <NAME>", "-p", "NAME={C, A, B}", "-o", "out.txt"],
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let report = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert_eq!(report, "A\nA\n\nB\nB\n\nC\nC\n\n");
    // The report is echoed to stdout.
    assert_eq!(stdout(&output), report);
    assert!(stderr(&output).contains("all 3 units succeeded"));
    assert!(!dir.path().join("scratch").exists());
}

#[test]
fn both_sources_conflict_and_leave_output_untouched() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("NAME"), "A\n").unwrap();
    std::fs::write(dir.path().join("out.txt"), "previous").unwrap();

    let output = paralix(
        dir.path(),
        &[
            "command", "-e", "touch ran-<NAME>", "-p", "NAME={A}", "-f", "NAME", "-o", "out.txt",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("can't use both"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("out.txt")).unwrap(),
        "previous"
    );
    assert!(!dir.path().join("ran-A").exists());
}

#[test]
fn missing_open_brace_fails_without_running() {
    let dir = TempDir::new().unwrap();
    let output = paralix(
        dir.path(),
        &["command", "-e", "touch ran-<NAME>", "-p", "NAME=A,B}", "-o", "out.txt"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("values should be in the format"));
    assert!(!dir.path().join("ran-A").exists());
}

#[test]
fn unmatched_key_names_the_placeholder() {
    let dir = TempDir::new().unwrap();
    let output = paralix(
        dir.path(),
        &["command", "-e", "echo <NAME>", "-p", "OTHER={A}", "-o", "out.txt"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("<OTHER> is missing in the command"));
}

#[test]
fn input_file_runs_one_unit_per_line() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("word"), "delta\nalpha\ncharlie\n").unwrap();

    let output = paralix(
        dir.path(),
        &["--quiet", "command", "-e", "echo <word>", "-f", "word", "-o", "out.txt"],
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());
    let report = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert_eq!(report, "alpha\nalpha\n\ncharlie\ncharlie\n\ndelta\ndelta\n\n");
}

#[test]
fn failing_unit_keeps_sibling_output_and_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let output = paralix(
        dir.path(),
        &[
            "--quiet",
            "command",
            "-e",
            "echo <V>; if [ <V> = bad ]; then echo broken >&2; exit 4; fi",
            "-p",
            "V={good,bad,fine}",
            "-o",
            "out.txt",
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("1 of 3 units failed"));
    assert!(stderr(&output).contains("Error: command for 'bad' exited with exit code 4"));
    let report = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert!(report.contains("good\ngood\n"));
    assert!(report.contains("fine\nfine\n"));
    assert!(report.contains("bad\nbad\n"));
    assert!(report.contains("broken\n"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let args = [
        "--quiet",
        "command",
        "-e",
        "sleep 0.0<N>; echo <N>",
        "-p",
        "N={9,3,7,1,5}",
        "-o",
        "out.txt",
    ];

    assert_eq!(paralix(dir.path(), &args).status.code(), Some(0));
    let first = std::fs::read(dir.path().join("out.txt")).unwrap();
    assert_eq!(paralix(dir.path(), &args).status.code(), Some(0));
    let second = std::fs::read(dir.path().join("out.txt")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn json_summary_is_printed() {
    let dir = TempDir::new().unwrap();
    let output = paralix(
        dir.path(),
        &[
            "--quiet", "command", "-e", "echo <N>", "-p", "N={1,2}", "-o", "out.txt", "--json",
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["key"], "N");
    assert_eq!(summary["total_units"], 2);
    assert_eq!(summary["failed_units"], 0);
}

#[test]
fn json_summary_is_not_mixed_with_the_report() {
    let dir = TempDir::new().unwrap();
    let output = paralix(
        dir.path(),
        &[
            "command", "-e", "echo <N>; [ <N> != 2 ]", "-p", "N={1,2}", "-o", "out.txt", "--json",
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["failed_units"], 1);
    assert_eq!(summary["failures"][0]["value"], "2");
    assert_eq!(
        summary["failures"][0]["reason"],
        "command for '2' exited with exit code 1"
    );
}

#[test]
fn long_value_does_not_lose_sibling_output() {
    let dir = TempDir::new().unwrap();
    let long = "x".repeat(300);
    let inline = format!("V={{a,{}}}", long);
    let output = paralix(
        dir.path(),
        &["--quiet", "command", "-e", "echo <V>", "-p", &inline, "-o", "out.txt"],
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let report = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert_eq!(report, format!("a\na\n\n{long}\n{long}\n\n"));
}

#[test]
fn scratch_root_contents_are_kept() {
    let dir = TempDir::new().unwrap();
    let scratch = dir.path().join("scratch");
    std::fs::create_dir_all(&scratch).unwrap();
    std::fs::write(scratch.join("notes.txt"), "keep me").unwrap();

    let output = paralix(
        dir.path(),
        &["--quiet", "command", "-e", "echo <N>", "-p", "N={1}", "-o", "out.txt"],
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(std::fs::read_to_string(scratch.join("notes.txt")).unwrap(), "keep me");
}

#[test]
fn config_file_sets_report_order() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("paralix.yaml"), "report_order: input\necho_report: false\n")
        .unwrap();

    let output = paralix(
        dir.path(),
        &["command", "-e", "echo <N>", "-p", "N={b,a}", "-o", "out.txt"],
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());
    let report = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert_eq!(report, "b\nb\n\na\na\n\n");
}

#[test]
fn placeholders_lists_names() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_paralix"))
        .current_dir(dir.path())
        .args(["placeholders", "-e", "scp <FILE> <HOST>:/srv/<FILE>"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "FILE\nHOST\n");
}

#[test]
fn usage_error_exits_with_user_error() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_paralix"))
        .current_dir(dir.path())
        .args(["command", "-e", "echo <N>"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}
