//! End-to-end tests for the `wl` binary.
//!
//! Tests the full pipeline: fetch (against a mock GitHub) → events file →
//! compress → sessions file.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EVENTS_HEADER: &str = "type,created_at,actor,repo,name\n";
const SESSIONS_HEADER: &str = "name,start,end,repo,type,dur\n";

/// Builds a `wl` invocation isolated from the caller's environment.
fn wl(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_wl"));
    command.env_clear().env("HOME", dir).current_dir(dir);
    command
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_events(dir: &Path, rows: &str) {
    fs::write(dir.join("evs.csv"), format!("{EVENTS_HEADER}{rows}")).unwrap();
}

fn github_event(
    id: &str,
    kind: &str,
    created_at: &str,
    payload: serde_json::Value,
) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "type": kind,
        "actor": {"login": "alice", "display_login": "alice"},
        "repo": {"name": "acme/repo1"},
        "payload": payload,
        "created_at": created_at
    })
}

#[test]
fn test_compress_end_to_end_is_idempotent() {
    let temp = TempDir::new().unwrap();
    write_events(
        temp.path(),
        "IssuesEvent,2024-01-01T11:00,alice,repo1,New feature\n\
         PullRequestEvent,2024-01-01T09:00,alice,repo1,Fix bug\n\
         PullRequestEvent,2024-01-01T10:30,alice,repo1,Fix bug\n",
    );

    let first = wl(temp.path()).arg("compress").output().unwrap();
    assert!(first.status.success(), "compress failed: {}", stderr(&first));
    assert!(stderr(&first).contains("Wrote 1 sessions from 3 events"));
    let first_output = fs::read_to_string(temp.path().join("evs_sorted.csv")).unwrap();
    assert_eq!(
        first_output,
        format!(
            "{SESSIONS_HEADER}Fix bug,2024-01-01T09:00:00Z,2024-01-01T11:00:00Z,repo1,IssuesEvent,2.0\n"
        )
    );

    let second = wl(temp.path()).arg("compress").output().unwrap();
    assert!(second.status.success(), "compress failed: {}", stderr(&second));
    let second_output = fs::read_to_string(temp.path().join("evs_sorted.csv")).unwrap();
    assert_eq!(first_output, second_output);
}

#[test]
fn test_compress_day_boundary_record() {
    let temp = TempDir::new().unwrap();
    write_events(
        temp.path(),
        "PullRequestEvent,2024-01-01T10:00:00Z,alice,repo1,x\n\
         PullRequestEvent,2024-01-02T09:00:00Z,alice,repo2,x\n",
    );

    let output = wl(temp.path()).arg("compress").output().unwrap();
    assert!(output.status.success(), "compress failed: {}", stderr(&output));
    assert!(stderr(&output).contains("(1 day boundaries)"), "{}", stderr(&output));

    let sessions = fs::read_to_string(temp.path().join("evs_sorted.csv")).unwrap();
    assert_eq!(
        sessions,
        format!(
            "{SESSIONS_HEADER}x,2024-01-01T10:00:00Z,2024-01-01T10:00:00Z,repo2,PullRequestEvent,0.0\n"
        )
    );
}

#[test]
fn test_compress_rejects_malformed_timestamp() {
    let temp = TempDir::new().unwrap();
    write_events(temp.path(), "PullRequestEvent,soon,alice,repo1,Fix bug\n");

    let output = wl(temp.path()).arg("compress").output().unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid row 1"), "{}", stderr(&output));
    assert!(!temp.path().join("evs_sorted.csv").exists());
}

#[test]
fn test_compress_uses_config_file() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("events.csv"),
        format!("{EVENTS_HEADER}PullRequestEvent,2024-01-01T09:00:00Z,alice,repo1,Solo\n"),
    )
    .unwrap();
    let config = temp.path().join("wl.toml");
    fs::write(
        &config,
        "events_path = \"data/events.csv\"\n\
         sessions_path = \"data/sessions.csv\"\n\
         flush_trailing = true\n",
    )
    .unwrap();

    let output = wl(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("compress")
        .output()
        .unwrap();
    assert!(output.status.success(), "compress failed: {}", stderr(&output));

    let sessions = fs::read_to_string(data.join("sessions.csv")).unwrap();
    assert_eq!(
        sessions,
        format!(
            "{SESSIONS_HEADER}Solo,2024-01-01T09:00:00Z,2024-01-01T09:00:00Z,repo1,PullRequestEvent,0.0\n"
        )
    );
}

#[test]
fn test_fetch_without_credentials_fails_before_io() {
    let temp = TempDir::new().unwrap();

    let output = wl(temp.path())
        .env("GH_USERNAME", "alice")
        .arg("fetch")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = stderr(&output);
    assert!(stderr.contains("missing required configuration"), "{stderr}");
    assert!(stderr.contains("GH_TOK"), "{stderr}");
    assert!(stderr.contains("CLIENTS"), "{stderr}");
    assert!(!temp.path().join("evs.csv").exists());
}

#[test]
fn test_credentials_from_dotenv() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".env"),
        "GH_TOK=ghp_from_dotenv\nGH_USERNAME=alice\nCLIENTS=acme\nWL_API_URL=http://127.0.0.1:9\n",
    )
    .unwrap();

    // Credentials are complete, so the run gets as far as the network.
    let output = wl(temp.path()).arg("fetch").output().unwrap();

    assert!(!output.status.success());
    let stderr = stderr(&output);
    assert!(!stderr.contains("missing required configuration"), "{stderr}");
    assert!(stderr.contains("failed to fetch events from GitHub"), "{stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pipeline_against_mock_github() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/alice/events/orgs/acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            github_event(
                "2",
                "PullRequestEvent",
                "2024-01-01T10:30:00Z",
                serde_json::json!({"pull_request": {"title": "Fix bug"}})
            ),
            github_event(
                "1",
                "PullRequestEvent",
                "2024-01-01T09:00:00Z",
                serde_json::json!({"pull_request": {"title": "Fix bug"}})
            ),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/alice/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            github_event(
                "3",
                "IssuesEvent",
                "2024-01-01T11:00:00Z",
                serde_json::json!({"issue": {"title": "New feature"}})
            ),
            github_event(
                "4",
                "PushEvent",
                "2024-01-01T11:05:00Z",
                serde_json::json!({"ref": "refs/heads/main"})
            ),
            github_event(
                "2",
                "PullRequestEvent",
                "2024-01-01T10:30:00Z",
                serde_json::json!({"pull_request": {"title": "Fix bug"}})
            ),
        ])))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let output = wl(temp.path())
        .env("GH_TOK", "ghp_token")
        .env("GH_USERNAME", "alice")
        .env("CLIENTS", "acme")
        .env("WL_API_URL", server.uri())
        .output()
        .unwrap();
    assert!(output.status.success(), "wl failed: {}", stderr(&output));
    assert!(stderr(&output).contains("Fetched 3 events for alice"));

    let events = fs::read_to_string(temp.path().join("evs.csv")).unwrap();
    assert_eq!(
        events,
        format!(
            "{EVENTS_HEADER}\
             PullRequestEvent,2024-01-01T10:30:00Z,alice,acme/repo1,Fix bug\n\
             PullRequestEvent,2024-01-01T09:00:00Z,alice,acme/repo1,Fix bug\n\
             IssuesEvent,2024-01-01T11:00:00Z,alice,acme/repo1,New feature\n"
        )
    );

    let sessions = fs::read_to_string(temp.path().join("evs_sorted.csv")).unwrap();
    assert_eq!(
        sessions,
        format!(
            "{SESSIONS_HEADER}Fix bug,2024-01-01T09:00:00Z,2024-01-01T11:00:00Z,acme/repo1,IssuesEvent,2.0\n"
        )
    );
}
