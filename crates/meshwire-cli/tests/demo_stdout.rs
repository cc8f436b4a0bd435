use std::process::Command;

fn meshwire() -> Command {
    Command::new(env!("CARGO_BIN_EXE_meshwire"))
}

#[test]
fn demo_stdout_is_pure_json_lines() {
    let output = meshwire()
        .args(["demo", "animation"])
        .env("RUST_LOG", "debug")
        .output()
        .expect("failed to spawn meshwire demo");

    assert!(output.status.success(), "demo failed: {:?}", output.status);

    let stdout = String::from_utf8(output.stdout).expect("stdout not utf-8");
    assert!(
        !stdout.contains('\u{1b}'),
        "stdout contaminated with ANSI escape codes: {stdout:?}"
    );

    let lines: Vec<&str> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), 2, "expected two commands, got: {stdout:?}");

    let kinds: Vec<String> = lines
        .iter()
        .map(|line| {
            let value: serde_json::Value =
                serde_json::from_str(line).expect("stdout line is not valid JSON");
            value["type"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(kinds, vec!["set_object", "set_animation"]);
}

#[test]
fn demo_box_writes_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("box.jsonl");

    let status = meshwire()
        .args(["demo", "box", "--frames", "3", "--output"])
        .arg(&out)
        .status()
        .expect("failed to spawn meshwire demo");
    assert!(status.success());

    let contents = std::fs::read_to_string(&out).unwrap();
    assert_eq!(contents.lines().count(), 5);
}

#[test]
fn config_changes_animation_options() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("meshwire.toml");
    std::fs::write(
        &config,
        "[animation]\ndefault_framerate = 12\n\n[playback]\nplay = false\nrepetitions = 5\n",
    )
    .unwrap();

    let output = meshwire()
        .args(["--config"])
        .arg(&config)
        .args(["demo", "animation"])
        .output()
        .expect("failed to spawn meshwire demo");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let last: serde_json::Value = serde_json::from_str(stdout.lines().last().unwrap()).unwrap();
    assert_eq!(last["options"]["play"], false);
    assert_eq!(last["options"]["repetitions"], 5);
    assert_eq!(last["animations"][0]["clip"]["fps"], 12);
}

#[test]
fn export_refuses_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.mp4");
    std::fs::write(&out, b"old").unwrap();

    let output = meshwire()
        .args(["export"])
        .arg(dir.path().join("frames.tar"))
        .arg("--output")
        .arg(&out)
        .output()
        .expect("failed to spawn meshwire export");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists"), "stderr: {stderr}");
}
