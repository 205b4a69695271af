use crate::types::{CallReceipt, StatusReport};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

/// Network seam for the two service endpoints. The widget only talks
/// to this trait, so tests can swap in an in-memory implementation.
#[async_trait]
pub trait VoiceServiceApi: Send + Sync {
    /// `GET /status`. Any transport failure or non-2xx is an error;
    /// the caller renders the offline state from it.
    async fn fetch_status(&self) -> Result<StatusReport>;

    /// `GET /callme?number=...`. Returns `Ok` whenever the body
    /// decodes as a receipt, even on a non-2xx status: the server
    /// explains failures (including unverified numbers) in a JSON
    /// body carried on 400/500 responses. Errors are transport-level.
    async fn request_call(&self, number: &str) -> Result<CallReceipt>;
}

#[derive(Clone)]
pub struct HttpVoiceService {
    client: Client,
    base: Url,
}

impl HttpVoiceService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url).context("invalid service base URL")?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url.set_query(None);
        url
    }
}

#[async_trait]
impl VoiceServiceApi for HttpVoiceService {
    async fn fetch_status(&self) -> Result<StatusReport> {
        let resp = self
            .client
            .get(self.endpoint("/status"))
            .send()
            .await
            .context("status request failed")?;
        if !resp.status().is_success() {
            return Err(anyhow!("status check returned {}", resp.status()));
        }
        resp.json().await.context("failed to parse status response")
    }

    async fn request_call(&self, number: &str) -> Result<CallReceipt> {
        let mut url = self.endpoint("/callme");
        url.query_pairs_mut().append_pair("number", number);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .context("call request failed")?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .context("failed to read call response")?;
        match serde_json::from_slice::<CallReceipt>(&body) {
            Ok(receipt) => Ok(receipt),
            Err(err) if status.is_success() => {
                Err(anyhow::Error::new(err).context("failed to parse call response"))
            }
            Err(_) => Err(anyhow!("call request returned {status}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn service(base_url: &str) -> HttpVoiceService {
        HttpVoiceService::new(base_url, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn fetch_status_parses_report() {
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(GET).path("/status");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"status":"running","openai_api":"OK","model":"gpt-3.5-turbo","active_calls":2}"#);
            })
            .await;

        let report = service(&server.base_url()).fetch_status().await.unwrap();
        assert_eq!(report.openai_api, "OK");
        assert_eq!(report.active_calls, 2);
        assert_eq!(report.model.as_deref(), Some("gpt-3.5-turbo"));
    }

    #[tokio::test]
    async fn fetch_status_treats_http_error_as_offline() {
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(GET).path("/status");
                then.status(500);
            })
            .await;

        let err = service(&server.base_url()).fetch_status().await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn request_call_encodes_the_number() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/callme")
                    .query_param("number", "+15551234567");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"status":"success","message":"Calling now.","call_sid":"CA123"}"#);
            })
            .await;

        let receipt = service(&server.base_url())
            .request_call("+15551234567")
            .await
            .unwrap();
        m.assert_async().await;
        assert!(receipt.is_success());
        assert_eq!(receipt.call_sid.as_deref(), Some("CA123"));
    }

    #[tokio::test]
    async fn request_call_surfaces_error_body_on_400() {
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(GET).path("/callme");
                then.status(400)
                    .header("content-type", "application/json")
                    .body(r#"{"status":"error","message":"This phone number is not verified with your Twilio trial account. Please verify it in your Twilio console first.","code":"verification_required"}"#);
            })
            .await;

        let receipt = service(&server.base_url())
            .request_call("+15551234567")
            .await
            .unwrap();
        assert!(!receipt.is_success());
        assert!(receipt.message.contains("not verified"));
        assert_eq!(receipt.code.as_deref(), Some("verification_required"));
    }

    #[tokio::test]
    async fn request_call_without_json_body_is_transport_error() {
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(GET).path("/callme");
                then.status(502).body("bad gateway");
            })
            .await;

        let err = service(&server.base_url())
            .request_call("+15551234567")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("502"));
    }
}
