use std::path::PathBuf;
use std::process::Command;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_unveil")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) { "unveil.exe" } else { "unveil" });
            p
        })
}

#[test]
fn cli_sample_then_validate_round_trips() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let data_path = dir.join("wedding.json");
    let _ = std::fs::remove_file(&data_path);

    let status = Command::new(exe())
        .args(["sample", "--out"])
        .arg(&data_path)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(data_path.exists());

    let status = Command::new(exe())
        .args(["validate", "--in"])
        .arg(&data_path)
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn cli_reveal_prints_the_full_timeline() {
    let out = Command::new(exe())
        .args(["reveal", "--gesture", "press", "--at-ms", "0"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    for needle in [
        "stage=opening",
        "stage=extracting",
        "stage=zooming",
        "stage=revealing",
        "open",
        "stage=finished",
    ] {
        assert!(stdout.contains(needle), "missing '{needle}' in:\n{stdout}");
    }
}

#[test]
fn cli_tour_replays_a_layout_snapshot() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let layout_path = dir.join("layout.json");

    // Only the first sample anchor exists on this layout; the second step
    // must be reported as skipped.
    std::fs::write(
        &layout_path,
        r#"{
            "viewport": { "width": 320.0, "scrollY": 0.0 },
            "anchors": {
                "lang-switch": { "x0": 140.0, "y0": 10.0, "x1": 180.0, "y1": 40.0 }
            }
        }"#,
    )
    .unwrap();

    let out = Command::new(exe())
        .args(["tour", "--layout"])
        .arg(&layout_path)
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("step 0: shown"), "{stdout}");
    assert!(stdout.contains("step 1: anchor not visible, skipped"), "{stdout}");
    assert!(stdout.contains("tour complete"), "{stdout}");
}
