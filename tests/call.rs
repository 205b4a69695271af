use assert_cmd::Command;
use httpmock::prelude::*;

#[tokio::test]
async fn call_command_prints_message_with_call_id() {
    let server = MockServer::start_async().await;
    let _m = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/callme")
                .query_param("number", "+15551234567");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"status":"success","message":"Calling now.","call_sid":"CA123"}"#);
        })
        .await;

    Command::new(assert_cmd::cargo::cargo_bin!("callwatch"))
        .args([
            "--url",
            &server.base_url(),
            "--no-color",
            "call",
            "+15551234567",
        ])
        .assert()
        .success()
        .stdout(predicates::str::contains("Calling now. Call ID: CA123"));
}

#[tokio::test]
async fn call_command_rejects_number_without_plus_locally() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET).path("/callme");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"status":"success","message":"Calling now.","call_sid":"CA123"}"#);
        })
        .await;

    Command::new(assert_cmd::cargo::cargo_bin!("callwatch"))
        .args([
            "--url",
            &server.base_url(),
            "--no-color",
            "call",
            "5551234567",
        ])
        .assert()
        .failure()
        .stdout(predicates::str::contains(
            "Phone number must start with + and include country code",
        ));

    // Validation failures never reach the network.
    assert_eq!(m.hits_async().await, 0);
}

#[tokio::test]
async fn unverified_number_error_includes_console_link() {
    let server = MockServer::start_async().await;
    let _m = server
        .mock_async(|when, then| {
            when.method(GET).path("/callme");
            then.status(400)
                .header("content-type", "application/json")
                .body(r#"{"status":"error","message":"This phone number is not verified with your Twilio trial account. Please verify it in your Twilio console first.","code":"verification_required"}"#);
        })
        .await;

    Command::new(assert_cmd::cargo::cargo_bin!("callwatch"))
        .args([
            "--url",
            &server.base_url(),
            "--no-color",
            "call",
            "+15551234567",
        ])
        .assert()
        .failure()
        .stdout(predicates::str::contains("not verified"))
        .stdout(predicates::str::contains(
            "twilio.com/console/phone-numbers/verified",
        ));
}

#[tokio::test]
async fn call_command_fails_on_unreachable_server() {
    Command::new(assert_cmd::cargo::cargo_bin!("callwatch"))
        .args([
            "--url",
            "http://127.0.0.1:59999",
            "--no-color",
            "call",
            "+15551234567",
        ])
        .assert()
        .failure()
        .stdout(predicates::str::contains("Failed to initiate call"));
}
