use std::process::Command;

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_ev-charge-sim"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("ev-charge-sim process should run")
}

fn summary_line<'a>(stdout: &'a str, label: &str) -> &'a str {
    stdout
        .lines()
        .find(|l| l.starts_with(label))
        .map(|l| l[label.len()..].trim())
        .unwrap_or_else(|| panic!("missing `{label}` in output:\n{stdout}"))
}

#[test]
fn scenario_files_run_via_cli() {
    let output = run_cli(&["--scenario", "scenarios/baseline.toml"]);
    assert!(
        output.status.success(),
        "baseline run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert!(stdout.contains("--- Session Summary ---"));
    assert_eq!(summary_line(&stdout, "Full at:"), "13:06");

    let output = run_cli(&["--scenario", "scenarios/lunch_break.toml"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert_eq!(summary_line(&stdout, "Full at:"), "not reached");
    assert_eq!(summary_line(&stdout, "Peak power:"), "7.40 kW");
}

#[test]
fn presets_produce_distinct_sessions() {
    let top_up = run_cli(&["--preset", "evening_top_up"]);
    let fast = run_cli(&["--preset", "fast_ac"]);
    assert!(top_up.status.success() && fast.status.success());

    let top_up = String::from_utf8(top_up.stdout).expect("valid UTF-8");
    let fast = String::from_utf8(fast.stdout).expect("valid UTF-8");
    assert_eq!(summary_line(&top_up, "Peak power:"), "11.00 kW");
    assert_eq!(summary_line(&fast, "Peak power:"), "22.00 kW");
}

#[test]
fn overrides_are_validated() {
    let output = run_cli(&["--preset", "baseline", "--soc", "1.5"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("battery.initial_soc"), "stderr={stderr}");

    let output = run_cli(&["--connect", "2025-01-31 07:00"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("session.connection"), "stderr={stderr}");
}

#[test]
fn unknown_preset_fails() {
    let output = run_cli(&["--preset", "nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}
