// Integration tests for the `roster-sync` binary.
// Run with: cargo test -p roster-cli --test sync_tests

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use httpmock::prelude::*;

const REPORT: &str = "\
Account Name,Website,MeetUp Link,Github URL,Brigade Location,Organization Twitter,Facebook Page URL,Brigade Type
Code for Boston,http://www.codeforboston.org,,,\"Boston, MA\",@codeforboston,,Partner
New City Brigade,https://oldcity.org,,,,,,
Code for Anchorage,,,,\"Anchorage, AK\",,,
";

const ROSTER: &str = r#"[
  {
    "name": "Code for Boston",
    "website": "http://www.codeforboston.org",
    "events_url": null,
    "projects_list_url": null,
    "city": "Boston, MA",
    "latitude": "42.3584",
    "longitude": "-71.0598",
    "type": "Brigade, Code for America, Official",
    "tags": [
      "Brigade",
      "Code for America",
      "Official"
    ],
    "social_profiles": {}
  },
  {
    "name": "Ghost Brigade",
    "website": null,
    "events_url": null,
    "projects_list_url": null,
    "city": null,
    "latitude": null,
    "longitude": null,
    "type": "Brigade, Code for America, Official",
    "tags": [
      "Brigade",
      "Code for America",
      "Official"
    ],
    "social_profiles": {}
  },
  {
    "name": "Old City Brigade",
    "website": "http://oldcity.org",
    "events_url": null,
    "projects_list_url": null,
    "city": null,
    "latitude": null,
    "longitude": null,
    "type": "Brigade, Code for America, Official",
    "tags": [
      "Brigade",
      "Code for America",
      "Official"
    ],
    "social_profiles": {}
  }
]
"#;

fn roster_sync() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_roster-sync"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd.env_remove("ROSTER_SYNC_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write the report and roster fixtures into `dir`.
fn write_inputs(dir: &Path, report: &str) -> (PathBuf, PathBuf) {
    let report_path = dir.join("report.csv");
    let roster_path = dir.join("organizations.json");
    std::fs::write(&report_path, report).unwrap();
    std::fs::write(&roster_path, ROSTER).unwrap();
    (report_path, roster_path)
}

fn run(args: &[&str]) -> Output {
    roster_sync().args(args).output().expect("failed to run roster-sync")
}

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

fn assert_code(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit {code}, got {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

fn read_roster(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn find<'a>(roster: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
    roster
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["name"] == name)
        .unwrap_or_else(|| panic!("no record named {name}"))
}

// ===========================================================================
// Usage
// ===========================================================================

#[test]
fn no_arguments_exits_2() {
    let output = run(&[]);
    assert_code(&output, 2);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn one_argument_exits_2() {
    let output = run(&["report.csv"]);
    assert_code(&output, 2);
}

#[test]
fn three_arguments_exits_2() {
    let output = run(&["report.csv", "organizations.json", "extra.json"]);
    assert_code(&output, 2);
}

#[test]
fn oversized_indent_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let (report, roster) = write_inputs(dir.path(), REPORT);
    let output = run(&[path_str(&report), path_str(&roster), "--indent", "20"]);
    assert_code(&output, 2);
    assert_eq!(std::fs::read_to_string(&roster).unwrap(), ROSTER);
}

// ===========================================================================
// Full run
// ===========================================================================

#[test]
fn sync_rewrites_roster() {
    let dir = tempfile::tempdir().unwrap();
    let (report, roster) = write_inputs(dir.path(), REPORT);

    let output = run(&[path_str(&report), path_str(&roster), "--no-geocode"]);
    assert_code(&output, 0);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Renamed: 1\n  - Old City Brigade -> New City Brigade"), "{stdout}");
    assert!(stdout.contains("Added: 1\n  - Code for Anchorage"), "{stdout}");
    assert!(stdout.contains("Removed from official list: 1\n  - Ghost Brigade"), "{stdout}");
    assert!(stdout.contains("Tags updated: 1\n  - Code for Boston"), "{stdout}");

    let written = std::fs::read_to_string(&roster).unwrap();
    assert!(written.lines().all(|l| l == l.trim_end()));

    let value = read_roster(&roster);
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["Code for Anchorage", "Code for Boston", "Ghost Brigade", "New City Brigade"]
    );

    assert_eq!(find(&value, "Ghost Brigade")["type"], "Brigade");
    assert_eq!(find(&value, "New City Brigade")["previous_names"], serde_json::json!(["Old City Brigade"]));
    assert_eq!(find(&value, "Code for Anchorage")["latitude"], serde_json::Value::Null);
    assert_eq!(
        find(&value, "Code for Boston")["type"],
        "Brigade, Code for America, Code for America Partner Brigade, Official"
    );
}

#[test]
fn dry_run_leaves_roster_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let (report, roster) = write_inputs(dir.path(), REPORT);

    let output = run(&[path_str(&report), path_str(&roster), "--no-geocode", "--dry-run"]);
    assert_code(&output, 0);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Dry run"));
    assert_eq!(std::fs::read_to_string(&roster).unwrap(), ROSTER);
}

#[test]
fn json_summary_is_single_value() {
    let dir = tempfile::tempdir().unwrap();
    let (report, roster) = write_inputs(dir.path(), REPORT);

    let output = run(&[path_str(&report), path_str(&roster), "--no-geocode", "--json", "--dry-run"]);
    assert_code(&output, 0);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let summary: serde_json::Value = serde_json::from_str(stdout.trim())
        .unwrap_or_else(|e| panic!("stdout must be JSON: {e}\n{stdout}"));
    assert_eq!(summary["added"], serde_json::json!(["Code for Anchorage"]));
    assert_eq!(
        summary["renamed"],
        serde_json::json!([{ "old_name": "Old City Brigade", "new_name": "New City Brigade" }])
    );
    assert_eq!(summary["meta"]["report_rows"], 3);

    // Progress lines move to stderr in JSON mode.
    assert!(String::from_utf8_lossy(&output.stderr).contains("Reading report"));
}

#[test]
fn indent_flag_controls_output() {
    let dir = tempfile::tempdir().unwrap();
    let (report, roster) = write_inputs(dir.path(), REPORT);

    let output = run(&[path_str(&report), path_str(&roster), "--no-geocode", "--indent", "4"]);
    assert_code(&output, 0);

    let written = std::fs::read_to_string(&roster).unwrap();
    assert!(written.starts_with("[\n    {\n        \"name\": \"Code for Anchorage\""), "{written}");
}

#[test]
fn geocoder_from_config_fills_coordinates() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search").query_param("q", "Anchorage, AK");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!([{ "lat": "61.2181", "lon": "-149.9003" }]));
    });

    let dir = tempfile::tempdir().unwrap();
    let (report, roster) = write_inputs(dir.path(), REPORT);
    let config = dir.path().join("roster-sync.toml");
    std::fs::write(
        &config,
        format!("[geocoder]\nendpoint = \"{}\"\ntimeout_secs = 5\n", server.url("/search")),
    )
    .unwrap();

    let output = run(&[path_str(&report), path_str(&roster), "--config", path_str(&config)]);
    assert_code(&output, 0);

    let value = read_roster(&roster);
    let anchorage = find(&value, "Code for Anchorage");
    assert_eq!(anchorage["latitude"], "61.2181");
    assert_eq!(anchorage["longitude"], "-149.9003");
    assert_eq!(anchorage["city"], "Anchorage, AK");
}

#[test]
fn geocoder_outage_does_not_abort() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(503);
    });

    let dir = tempfile::tempdir().unwrap();
    let (report, roster) = write_inputs(dir.path(), REPORT);
    let config = dir.path().join("roster-sync.toml");
    std::fs::write(&config, format!("[geocoder]\nendpoint = \"{}\"\n", server.url("/search"))).unwrap();

    let output = run(&[path_str(&report), path_str(&roster), "--config", path_str(&config)]);
    assert_code(&output, 0);
    assert!(String::from_utf8_lossy(&output.stderr).contains("geocoding 'Anchorage, AK' failed"));

    let value = read_roster(&roster);
    assert_eq!(find(&value, "Code for Anchorage")["latitude"], serde_json::Value::Null);
}

// ===========================================================================
// Failures
// ===========================================================================

#[test]
fn missing_column_exits_3_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let (report, roster) = write_inputs(dir.path(), "Account Name,Website\nCode for Boston,\n");

    let output = run(&[path_str(&report), path_str(&roster), "--no-geocode"]);
    assert_code(&output, 3);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing column 'MeetUp Link'"), "{stderr}");
    assert!(stderr.contains("hint:"), "{stderr}");
    assert_eq!(std::fs::read_to_string(&roster).unwrap(), ROSTER);
}

#[test]
fn missing_roster_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let (report, _) = write_inputs(dir.path(), REPORT);
    let absent = dir.path().join("absent.json");

    let output = run(&[path_str(&report), path_str(&absent), "--no-geocode"]);
    assert_code(&output, 3);
    assert!(!absent.exists());
}

#[test]
fn invalid_config_exits_4() {
    let dir = tempfile::tempdir().unwrap();
    let (report, roster) = write_inputs(dir.path(), REPORT);
    let config = dir.path().join("roster-sync.toml");
    std::fs::write(&config, "[geocoder]\ntimeout_secs = 0\n").unwrap();

    let output = run(&[path_str(&report), path_str(&roster), "--config", path_str(&config)]);
    assert_code(&output, 4);
    assert_eq!(std::fs::read_to_string(&roster).unwrap(), ROSTER);
}
