use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use ndarray::Array2;
use parfilter::io::{load_grayscale, save_grayscale};

fn write_sample(path: &Path) {
    let img = Array2::from_shape_fn((40, 30), |(y, x)| if x > 10 && y > 12 { 220 } else { 30 });
    save_grayscale(path, img.view()).unwrap();
}

fn run_cli(args: &[&Path], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_parfilter"))
        .args(args)
        .env("PARFILTER_BANDS", "3")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // The child may exit before reading (e.g. unreadable input), closing the pipe
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().unwrap()
}

#[test]
fn data_mode_writes_outputs_and_timings() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let edges = dir.path().join("edge.png");
    let blurred = dir.path().join("blur.png");
    write_sample(&input);

    let output = run_cli(&[&input, &edges, &blurred], "2\n");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Choose parallelism method:"));
    assert!(stdout.contains("Data parallelism time: "));
    assert!(stdout.contains("Sequential time: "));
    assert!(!stdout.contains("Task parallelism time: "));

    assert_eq!(load_grayscale(&edges).unwrap().dim(), (40, 30));
    assert_eq!(load_grayscale(&blurred).unwrap().dim(), (40, 30));
}

#[test]
fn both_mode_reports_three_phases() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let edges = dir.path().join("edge.png");
    let blurred = dir.path().join("blur.png");
    write_sample(&input);

    let output = run_cli(&[&input, &edges, &blurred], "3\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let task = stdout.find("Task parallelism time: ").unwrap();
    let data = stdout.find("Data parallelism time: ").unwrap();
    let seq = stdout.find("Sequential time: ").unwrap();
    assert!(task < data && data < seq);
}

#[test]
fn invalid_mode_fails_without_writing_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let edges = dir.path().join("edge.png");
    let blurred = dir.path().join("blur.png");
    write_sample(&input);

    let output = run_cli(&[&input, &edges, &blurred], "9\n");

    assert!(!output.status.success());
    #[cfg(unix)]
    assert_eq!(output.status.code(), Some(255));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid choice"));
    assert!(!edges.exists());
    assert!(!blurred.exists());
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nope.png");
    let edges = dir.path().join("edge.png");
    let blurred = dir.path().join("blur.png");

    let output = run_cli(&[&input, &edges, &blurred], "1\n");

    assert!(!output.status.success());
    assert!(!edges.exists());
}
