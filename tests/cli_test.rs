use std::fs;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const IO_WARNING: &str = "some avg10=15.00 avg60=5.00 avg300=1.00 total=100\n\
                          full avg10=2.00 avg60=1.00 avg300=0.00 total=50\n";

fn pressure_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

fn check_psi(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_check_psi"))
        .args(args)
        .arg("--pressure-dir")
        .arg(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cpu_idle_is_ok() {
    let dir = pressure_dir(&[("cpu", "some avg10=0.00 avg60=0.00 avg300=0.00 total=0\n")]);
    let output = check_psi(&dir, &["cpu"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "OK cpu pressure - all values within thresholds | \
         some_avg10=0.00;5.00;10.00 some_avg60=0.00;3.00;7.00 some_avg300=0.00;2.00;5.00\n"
    );
}

#[test]
fn test_io_warning() {
    let dir = pressure_dir(&[("io", IO_WARNING)]);
    let output = check_psi(&dir, &["io"]);

    assert_eq!(output.status.code(), Some(1));
    let line = stdout(&output);
    assert!(line.starts_with("WARNING io pressure - some_avg10 is 15.00 (warn at 10.00) | "));
    assert!(line.contains(
        "| some_avg10=15.00;10.00;20.00 some_avg60=5.00;7.00;15.00 some_avg300=1.00;5.00;10.00 \
         full_avg10=2.00;5.00;10.00 full_avg60=1.00;3.00;7.00 full_avg300=0.00;1.00;3.00"
    ));
}

#[test]
fn test_io_critical() {
    let contents = IO_WARNING.replace("some avg10=15.00", "some avg10=25.00");
    let dir = pressure_dir(&[("io", contents.as_str())]);
    let output = check_psi(&dir, &["io"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).starts_with("CRITICAL io pressure - some_avg10 is 25.00 (crit at 20.00)"));
}

#[test]
fn test_unrecognized_qualifier_is_unknown() {
    let dir = pressure_dir(&[("memory", "bogus avg10=1.00\n")]);
    let output = check_psi(&dir, &["memory"]);

    assert_eq!(output.status.code(), Some(3));
    let line = stdout(&output);
    assert!(line.starts_with("UNKNOWN memory pressure - "));
    assert!(line.contains("unrecognized qualifier"));
    assert!(!line.contains('|'));
}

#[test]
fn test_missing_source_is_unknown() {
    let dir = pressure_dir(&[]);
    let output = check_psi(&dir, &["cpu"]);

    assert_eq!(output.status.code(), Some(3));
    let line = stdout(&output);
    assert!(line.starts_with("UNKNOWN cpu pressure - cannot read cpu pressure"));
}

#[test]
fn test_bad_threshold_exits_unknown_before_reading() {
    let dir = pressure_dir(&[]);
    let output = check_psi(&dir, &["cpu", "--some-avg10", "10"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("expected WARN:CRIT"));
}

#[test]
fn test_override_changes_status() {
    let dir = pressure_dir(&[("io", IO_WARNING)]);
    let output = check_psi(&dir, &["io", "--some-avg10", "20:30"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("some_avg10=15.00;20.00;30.00"));
}

#[test]
fn test_json_output() {
    let dir = pressure_dir(&[("io", IO_WARNING)]);
    let output = check_psi(&dir, &["io", "--output", "json"]);

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "WARNING");
    assert_eq!(json["resource"], "io");
    assert_eq!(json["perfdata"].as_array().unwrap().len(), 6);
}

#[test]
fn test_help_exits_zero() {
    let output = Command::new(env!("CARGO_BIN_EXE_check_psi"))
        .arg("--help")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("memory"));
}

#[test]
fn test_unwritable_stdout_exits_unknown() {
    let dev_full = match fs::OpenOptions::new().write(true).open("/dev/full") {
        Ok(file) => file,
        Err(_) => return,
    };
    let dir = pressure_dir(&[("cpu", "some avg10=0.00 avg60=0.00 avg300=0.00 total=0\n")]);
    let output = Command::new(env!("CARGO_BIN_EXE_check_psi"))
        .args(["cpu", "--pressure-dir"])
        .arg(dir.path())
        .env_remove("RUST_LOG")
        .stdout(Stdio::from(dev_full))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to"));
}
