use ttelgo_probe::cli::{App, run};

use clap::Parser;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Integration tests for the command layer against a mocked ttelgo API
// ============================================================================

const TOKEN_PATH: &str = "/api/v1/auth/test/token";
const BUNDLES_PATH: &str = "/api/v1/bundles";

/// Header `{"alg":"HS512"}`, claims `{"userId":1,"email":"test@ttelgo.com","type":"access"}`.
const TEST_JWT: &str = "eyJhbGciOiJIUzUxMiJ9.eyJ1c2VySWQiOjEsImVtYWlsIjoidGVzdEB0dGVsZ28uY29tIiwidHlwZSI6ImFjY2VzcyJ9.c2ln";

async fn mock_api(token: &str, bundle_count: usize) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "accessToken": token,
                "userId": 1,
                "email": "test@ttelgo.com",
                "expiresIn": 86400
            }
        })))
        .mount(&server)
        .await;
    let bundles: Vec<Value> = (0..bundle_count).map(|i| json!({"name": i})).collect();
    Mock::given(method("GET"))
        .and(path(BUNDLES_PATH))
        .and(header("Authorization", format!("Bearer {token}").as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": {"bundles": bundles}})),
        )
        .mount(&server)
        .await;
    server
}

async fn run_with(args: &[&str]) -> (Result<bool, ttelgo_probe::error::CliError>, String) {
    let app = App::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let result = run(&app, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

/// **VALUE**: Tests the default command end to end: config resolution, probe, text report.
///
/// **WHY THIS MATTERS**: This is the path a deploy smoke test takes. It exercises the same
/// wiring as the binary, minus process exit.
///
/// **BUG THIS CATCHES**: Would catch if `--base-url` stops reaching the client, or if the
/// report stops printing the bundle count.
#[tokio::test]
async fn given_healthy_api_when_running_default_command_then_reports_success() {
    // GIVEN: A mock API with two bundles and an empty config dir
    let server = mock_api("abc.def.ghi", 2).await;
    let config_dir = TempDir::new().unwrap();
    let base_url = server.uri();
    let dir_arg = config_dir.path().to_str().unwrap().to_string();

    // WHEN: Running with no subcommand
    let (result, output) = run_with(&[
        "ttelgo-probe",
        "--base-url",
        &base_url,
        "--config-dir",
        &dir_arg,
    ])
    .await;

    // THEN: Success and the endpoint summary
    assert!(result.unwrap());
    assert!(output.contains("Found 2 bundles"));
    assert!(output.contains(&format!("POST {base_url}/api/v1/auth/test/token")));
}

#[tokio::test]
async fn given_rejecting_api_when_running_then_returns_false_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "invalid role"})),
        )
        .mount(&server)
        .await;
    let config_dir = TempDir::new().unwrap();
    let base_url = server.uri();
    let dir_arg = config_dir.path().to_str().unwrap().to_string();

    let (result, output) = run_with(&[
        "ttelgo-probe",
        "probe",
        "--base-url",
        &base_url,
        "--config-dir",
        &dir_arg,
    ])
    .await;

    assert!(!result.unwrap());
    assert!(output.contains("Failed to get token: invalid role"));
}

#[tokio::test]
async fn given_healthy_api_when_running_token_command_then_prints_full_token_and_result() {
    let server = mock_api("abc.def.ghi", 1).await;
    let config_dir = TempDir::new().unwrap();
    let base_url = server.uri();
    let dir_arg = config_dir.path().to_str().unwrap().to_string();

    let (result, output) = run_with(&[
        "ttelgo-probe",
        "token",
        "--base-url",
        &base_url,
        "--config-dir",
        &dir_arg,
    ])
    .await;

    assert!(result.unwrap());
    assert!(output.contains("Authorization: Bearer abc.def.ghi"));
    assert!(output.contains("86400 seconds (1.0 days)"));
    assert!(output.contains("Found 1 bundles"));
}

/// **VALUE**: Tests that `inspect` decodes the issued JWT before the report.
///
/// **WHY THIS MATTERS**: The inspect command exists for diagnosing 401s on the listing call;
/// it is only useful if the decoded claims actually show up.
#[tokio::test]
async fn given_jwt_token_when_running_inspect_then_prints_decoded_claims() {
    let server = mock_api(TEST_JWT, 1).await;
    let config_dir = TempDir::new().unwrap();
    let base_url = server.uri();
    let dir_arg = config_dir.path().to_str().unwrap().to_string();

    let (result, output) = run_with(&[
        "ttelgo-probe",
        "inspect",
        "--base-url",
        &base_url,
        "--config-dir",
        &dir_arg,
    ])
    .await;

    assert!(result.unwrap());
    assert!(output.contains("Token algorithm: HS512"));
    assert!(output.contains("Token email: test@ttelgo.com"));
    assert!(output.contains("Token type: access"));
}

#[tokio::test]
async fn given_json_format_when_running_then_prints_machine_readable_report() {
    let server = mock_api("abc.def.ghi", 3).await;
    let config_dir = TempDir::new().unwrap();
    let base_url = server.uri();
    let dir_arg = config_dir.path().to_str().unwrap().to_string();

    let (result, output) = run_with(&[
        "ttelgo-probe",
        "--base-url",
        &base_url,
        "--config-dir",
        &dir_arg,
        "--format",
        "json",
    ])
    .await;

    assert!(result.unwrap());
    let report: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["outcome"], "succeeded");
    assert_eq!(report["item_count"], 3);
}

/// **VALUE**: Verifies that `inspect --format json` carries the decoded token next to the
/// probe outcome.
///
/// **WHY THIS MATTERS**: Scripts call `inspect` for the claims. If the JSON form dropped
/// them, `inspect` and `probe` would print the same thing and the claims would be lost.
#[tokio::test]
async fn given_json_format_when_running_inspect_then_report_includes_decoded_claims() {
    let server = mock_api(TEST_JWT, 1).await;
    let config_dir = TempDir::new().unwrap();
    let base_url = server.uri();
    let dir_arg = config_dir.path().to_str().unwrap().to_string();

    let (result, output) = run_with(&[
        "ttelgo-probe",
        "inspect",
        "--base-url",
        &base_url,
        "--config-dir",
        &dir_arg,
        "--format",
        "json",
    ])
    .await;

    assert!(result.unwrap());
    let report: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["outcome"], "succeeded");
    assert_eq!(report["item_count"], 1);
    assert_eq!(report["jwt"]["algorithm"], "HS512");
    assert_eq!(report["jwt"]["email"], "test@ttelgo.com");
    assert_eq!(report["jwt"]["token_type"], "access");
}

#[tokio::test]
async fn given_opaque_token_when_running_inspect_as_json_then_jwt_is_null() {
    let server = mock_api("abc.def.ghi", 0).await;
    let config_dir = TempDir::new().unwrap();
    let base_url = server.uri();
    let dir_arg = config_dir.path().to_str().unwrap().to_string();

    let (result, output) = run_with(&[
        "ttelgo-probe",
        "inspect",
        "--base-url",
        &base_url,
        "--config-dir",
        &dir_arg,
        "--format",
        "json",
    ])
    .await;

    assert!(result.unwrap());
    let report: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["outcome"], "succeeded");
    assert!(report["jwt"].is_null());
}
