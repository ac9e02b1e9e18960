use assert_cmd::Command;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::{Value, json};
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated config and session paths for one test.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.yml"), "api:\n  timeout_secs: 5\n").unwrap();
        Self { dir }
    }

    fn session_path(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    fn signed_in(self) -> Self {
        std::fs::write(
            self.session_path(),
            r#"{"token":"tok-123","identity":"me@example.com"}"#,
        )
        .unwrap();
        self
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("taskora"));
        cmd.env_remove("TASKORA_API_URL")
            .env_remove("TASKORA_SESSION_FILE")
            .env_remove("TASKORA_PASSWORD")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("--config")
            .arg(self.dir.path().join("config.yml"))
            .arg("--session-file")
            .arg(self.session_path());
        cmd
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer tok-123")
}

fn task_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": "Write report",
        "dueDate": "2026-05-01T12:00:00Z",
        "estimatedMinutes": 90,
        "priority": "HIGH",
        "status": status
    })
}

/// Serve a small fake task service on a background thread; returns its base URL.
fn spawn_server() -> String {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let app = Router::new()
                .route(
                    "/auth/login",
                    post(|Json(body): Json<Value>| async move {
                        if body["password"] == "secret" {
                            Json(json!({ "data": { "token": "tok-123", "email": body["email"].clone() } }))
                                .into_response()
                        } else {
                            (StatusCode::BAD_REQUEST, Json(json!({ "message": "Invalid credentials" })))
                                .into_response()
                        }
                    }),
                )
                .route(
                    "/tasks",
                    get(|headers: HeaderMap| async move {
                        if !authorized(&headers) {
                            return StatusCode::UNAUTHORIZED.into_response();
                        }
                        Json(json!({ "data": [task_json("t1", "PENDING")] })).into_response()
                    }),
                )
                .route(
                    "/tasks/{id}",
                    put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                        let status = body["status"].as_str().unwrap_or("PENDING").to_string();
                        Json(json!({ "data": task_json(&id, &status) }))
                    }),
                )
                .route(
                    "/notifications",
                    get(|| async {
                        Json(json!({
                            "data": {
                                "notifications": [{
                                    "id": "n1",
                                    "type": "OVERDUE",
                                    "message": "Report is overdue",
                                    "read": false,
                                    "createdAt": "2026-05-01T12:00:00Z"
                                }],
                                "totalCount": 1
                            }
                        }))
                    }),
                )
                .route("/notifications/read-all", put(|| async { StatusCode::OK }));

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    let addr = rx.recv().unwrap();
    format!("http://{}", addr)
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    Sandbox::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("task manager"));
}

#[test]
fn test_version() {
    Sandbox::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("taskora"));
}

#[test]
fn test_missing_config_file_fails() {
    let sandbox = Sandbox::new();
    Command::new(assert_cmd::cargo::cargo_bin!("taskora"))
        .arg("--config")
        .arg(sandbox.dir.path().join("missing.yml"))
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_invalid_api_url_fails() {
    Sandbox::new()
        .cmd()
        .args(["--api-url", "not a url", "whoami"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid API URL"));
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn test_whoami_without_session() {
    Sandbox::new()
        .cmd()
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_whoami_reads_session_file() {
    Sandbox::new()
        .signed_in()
        .cmd()
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("me@example.com"));
}

#[test]
fn test_logout_removes_session_file() {
    let sandbox = Sandbox::new().signed_in();
    sandbox
        .cmd()
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    assert!(!sandbox.session_path().exists());

    sandbox
        .cmd()
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_data_commands_require_session() {
    Sandbox::new()
        .cmd()
        .arg("tasks")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

// =============================================================================
// Validation happens before any request
// =============================================================================

#[test]
fn test_add_rejects_zero_estimate() {
    Sandbox::new()
        .signed_in()
        .cmd()
        .args(["add", "Write report", "--due", "2026-05-01", "--estimate", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Estimated minutes must be a positive number"));
}

#[test]
fn test_add_rejects_bad_due_date() {
    Sandbox::new()
        .signed_in()
        .cmd()
        .args(["add", "Write report", "--due", "next week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid due date"));
}

#[test]
fn test_snooze_rejects_zero_minutes() {
    Sandbox::new()
        .signed_in()
        .cmd()
        .args(["snooze", "n1", "--minutes", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Snooze duration"));
}

#[test]
fn test_toggle_rejects_path_like_id() {
    Sandbox::new()
        .signed_in()
        .cmd()
        .args(["toggle", "../admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ID cannot contain"));
}

#[test]
fn test_unreachable_server_fails() {
    Sandbox::new()
        .signed_in()
        .cmd()
        .args(["--api-url", "http://127.0.0.1:9", "tasks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to refresh"));
}

// =============================================================================
// Against a running server
// =============================================================================

#[test]
fn test_login_then_list_and_toggle() {
    let base = spawn_server();
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["--api-url", &base, "login", "me@example.com", "--password", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as me@example.com"));
    assert!(sandbox.session_path().exists());

    sandbox
        .cmd()
        .args(["--api-url", &base, "tasks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t1").and(predicate::str::contains("Write report")));

    sandbox
        .cmd()
        .args(["--api-url", &base, "tasks", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"estimatedMinutes\": 90"));

    sandbox
        .cmd()
        .args(["--api-url", &base, "toggle", "t1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t1 is now completed"));
}

#[test]
fn test_login_with_wrong_password_keeps_session_empty() {
    let base = spawn_server();
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["--api-url", &base, "login", "me@example.com", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
    assert!(!sandbox.session_path().exists());
}

#[test]
fn test_rejected_token_is_reported_and_kept() {
    let base = spawn_server();
    let sandbox = Sandbox::new();
    std::fs::write(
        sandbox.session_path(),
        r#"{"token":"stale","identity":"me@example.com"}"#,
    )
    .unwrap();

    sandbox
        .cmd()
        .args(["--api-url", &base, "tasks"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("Authentication required")
                .and(predicate::str::contains("Run `taskora login <email>` to sign in again")),
        );
    assert!(sandbox.session_path().exists());
}

#[test]
fn test_notifications_and_read_all() {
    let base = spawn_server();
    let sandbox = Sandbox::new().signed_in();

    sandbox
        .cmd()
        .args(["--api-url", &base, "notifications"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report is overdue").and(predicate::str::contains("1 unread")));

    sandbox
        .cmd()
        .args(["--api-url", &base, "read-all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked 1 notification(s) read"));
}
