use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar(extra: &[&str]) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_rosterd");
    let mut child = Command::new(exe)
        .arg("--offline")
        .args(extra)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn rosterd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn code(value: &serde_json::Value) -> Option<&str> {
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
}

fn is_ok(value: &serde_json::Value) -> bool {
    value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false)
}

#[test]
fn dashboard_methods_require_a_session() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar(&[]);

    for (i, method) in [
        "students.list",
        "students.create",
        "table.view",
        "chart.marks",
        "calendar.window",
    ]
    .iter()
    .enumerate()
    {
        let resp = request(&mut stdin, &mut reader, &i.to_string(), method, json!({}));
        assert_eq!(code(&resp), Some("unauthenticated"), "{method}");
    }

    let bad = request(
        &mut stdin,
        &mut reader,
        "login-bad",
        "auth.login",
        json!({ "username": "teacher", "password": "" }),
    );
    assert_eq!(code(&bad), Some("bad_params"));
    let status = request(&mut stdin, &mut reader, "s1", "auth.status", json!({}));
    assert_eq!(status["result"]["authenticated"].as_bool(), Some(false));

    let good = request(
        &mut stdin,
        &mut reader,
        "login",
        "auth.login",
        json!({ "username": "teacher", "password": "pw" }),
    );
    assert!(is_ok(&good));
    assert_eq!(good["result"]["username"].as_str(), Some("teacher"));
    let list = request(&mut stdin, &mut reader, "list", "students.list", json!({}));
    assert!(is_ok(&list));

    let _ = request(&mut stdin, &mut reader, "out", "auth.logout", json!({}));
    let after = request(&mut stdin, &mut reader, "after", "table.view", json!({}));
    assert_eq!(code(&after), Some("unauthenticated"));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn chart_covers_whole_store_and_placeholder_when_empty() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar(&["--page-size", "2"]);
    let _ = request(
        &mut stdin,
        &mut reader,
        "login",
        "auth.login",
        json!({ "username": "t", "password": "p" }),
    );

    let chart = request(&mut stdin, &mut reader, "1", "chart.marks", json!({}));
    let chart = &chart["result"]["chart"];
    assert_eq!(chart["kind"].as_str(), Some("pie"));
    let slices = chart["slices"].as_array().cloned().unwrap_or_default();
    assert_eq!(slices.len(), 7, "chart ignores the table page size");
    assert_eq!(slices[0]["label"].as_str(), Some("Aarav Sharma (101)"));
    assert_eq!(slices[0]["value"].as_f64(), Some(91.0));
    let share_sum: f64 = slices.iter().filter_map(|s| s["share"].as_f64()).sum();
    assert!((share_sum - 1.0).abs() < 1e-9);

    drop(stdin);
    let _ = child.wait();

    let dir = temp_dir("rosterd-chart-empty");
    let fallback = dir.join("empty.json");
    std::fs::write(&fallback, "[]").expect("write fallback");
    let fallback_arg = fallback.to_string_lossy().to_string();
    let (mut child, mut stdin, mut reader) =
        spawn_sidecar(&["--fallback-file", fallback_arg.as_str()]);
    let _ = request(
        &mut stdin,
        &mut reader,
        "login",
        "auth.login",
        json!({ "username": "t", "password": "p" }),
    );
    let empty = request(&mut stdin, &mut reader, "2", "chart.marks", json!({}));
    assert_eq!(empty["result"]["chart"]["kind"].as_str(), Some("placeholder"));
    assert_eq!(
        empty["result"]["chart"]["message"].as_str(),
        Some("No records yet. Add some students!")
    );

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn calendar_offers_weekdays_in_window_only() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar(&[]);
    let _ = request(
        &mut stdin,
        &mut reader,
        "login",
        "auth.login",
        json!({ "username": "t", "password": "p" }),
    );

    let window = request(&mut stdin, &mut reader, "1", "calendar.window", json!({}));
    assert_eq!(window["result"]["start"].as_str(), Some("2025-07-01"));
    assert_eq!(window["result"]["end"].as_str(), Some("2025-07-05"));
    assert_eq!(
        window["result"]["selectable"],
        json!(["2025-07-01", "2025-07-02", "2025-07-03", "2025-07-04"])
    );
    assert!(window["result"]["selected"].is_null());

    let weekend = request(
        &mut stdin,
        &mut reader,
        "2",
        "calendar.select",
        json!({ "date": "2025-07-05" }),
    );
    assert_eq!(code(&weekend), Some("validation_failed"));
    let outside = request(
        &mut stdin,
        &mut reader,
        "3",
        "calendar.select",
        json!({ "date": "2025-08-01" }),
    );
    assert_eq!(code(&outside), Some("validation_failed"));

    let picked = request(
        &mut stdin,
        &mut reader,
        "4",
        "calendar.select",
        json!({ "date": "2025-07-03" }),
    );
    assert_eq!(picked["result"]["selected"].as_str(), Some("2025-07-03"));

    // The picked date does not narrow the table.
    let view = request(&mut stdin, &mut reader, "5", "table.view", json!({}));
    assert_eq!(view["result"]["totalRows"].as_u64(), Some(7));

    let cleared = request(
        &mut stdin,
        &mut reader,
        "6",
        "calendar.select",
        json!({ "date": null }),
    );
    assert!(cleared["result"]["selected"].is_null());

    drop(stdin);
    let _ = child.wait();
}
