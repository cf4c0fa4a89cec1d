use std::process::Command;

fn overlay_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_host-overlay"))
}

#[test]
fn missing_handle_prints_usage_and_exits_1() {
    let output = overlay_bin()
        .env_remove("HOST_OVERLAY_CONFIG")
        .output()
        .expect("failed to spawn host-overlay");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.to_lowercase().contains("usage"), "stderr: {}", stderr);
}

#[test]
fn malformed_handle_exits_1() {
    let output = overlay_bin()
        .arg("not-a-handle")
        .env_remove("HOST_OVERLAY_CONFIG")
        .output()
        .expect("failed to spawn host-overlay");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn unreadable_config_exits_1() {
    let missing = std::env::temp_dir().join("host-overlay-no-such-config.json");
    let output = overlay_bin()
        .arg("12345")
        .arg("--config")
        .arg(&missing)
        .output()
        .expect("failed to spawn host-overlay");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Config error"), "stderr: {}", stderr);
}

#[test]
fn help_exits_0() {
    let output = overlay_bin()
        .arg("--help")
        .output()
        .expect("failed to spawn host-overlay");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("HWND"));
}
