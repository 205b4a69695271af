use assert_cmd::Command;
use httpmock::prelude::*;

#[tokio::test]
async fn status_command_prints_raw_report() {
    let server = MockServer::start_async().await;
    let _m = server
        .mock_async(|when, then| {
            when.method(GET).path("/status");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"status":"running","openai_api":"OK","model":"gpt-3.5-turbo","active_calls":2}"#);
        })
        .await;

    Command::new(assert_cmd::cargo::cargo_bin!("callwatch"))
        .args(["--url", &server.base_url(), "status"])
        .assert()
        .success()
        .stdout(predicates::str::contains("OK"))
        .stdout(predicates::str::contains("gpt-3.5-turbo"))
        .stdout(predicates::str::contains("2"));
}

#[tokio::test]
async fn status_command_reports_offline_without_failing() {
    // Use a port that's not listening; offline is a rendered state,
    // not a CLI failure.
    Command::new(assert_cmd::cargo::cargo_bin!("callwatch"))
        .args(["--url", "http://127.0.0.1:59999", "status"])
        .assert()
        .success()
        .stderr(predicates::str::contains("service offline"));
}
