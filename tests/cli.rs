use std::fs;
use std::process::Command;

fn depmap() -> Command {
    Command::new(env!("CARGO_BIN_EXE_depmap"))
}

#[test]
fn redirected_logs_carry_no_colour_codes() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("a.gs"), "class Alpha {}\n").unwrap();
    fs::write(dir.path().join("b.gs"), "new Alpha();\n").unwrap();

    let output = depmap()
        .current_dir(dir.path())
        .args(["-vv", "graph", "--file", "a.gs", "--file", "b.gs"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("dependency graph built"));
    assert!(!stderr.contains('\u{1b}'));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "digraph dependency_map {\n  \"b.gs\" -> \"a.gs\" [label=\"Alpha\"];\n}\n"
    );
}

#[test]
fn unreadable_file_is_reported_at_default_verbosity() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::create_dir(dir.path().join("locked.gs")).unwrap();
    fs::write(dir.path().join("b.gs"), "new Hidden();\n").unwrap();

    let output = depmap()
        .current_dir(dir.path())
        .args(["graph", "-f", "json-compact", "--file", "locked.gs", "--file", "b.gs"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to load source file"));

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["files"][0]["status"], "failed");
    assert_eq!(v["files"][1]["status"], "loaded");
}
