use crate::client::VoiceServiceApi;
use crate::config::Config;
use crate::health::{self, ApiHealth, Badge, Severity};
use crate::types::{CallOutcome, StatusReport};
use crate::view::{ConsoleLink, StatusPanel};
use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::time::MissedTickBehavior;

const VALIDATION_ERROR: &str = "Phone number must start with + and include country code";
const VERIFY_LINK_LABEL: &str = "Verify this number in your Twilio console";

/// Status poller plus call trigger, rendering into a [`StatusPanel`].
///
/// The poll loop and any call action run as independent futures; both
/// only touch the shared panel, and each writes its own slots.
pub struct StatusAndCallWidget<A, P> {
    api: Arc<A>,
    panel: Arc<Mutex<P>>,
    poll_interval: Duration,
    dismiss_after: Duration,
    verify_console_url: String,
    message_seq: Arc<AtomicU64>,
}

impl<A, P> StatusAndCallWidget<A, P>
where
    A: VoiceServiceApi + 'static,
    P: StatusPanel + 'static,
{
    pub fn new(api: Arc<A>, panel: Arc<Mutex<P>>, cfg: &Config) -> Self {
        Self {
            api,
            panel,
            poll_interval: cfg.poll_interval(),
            dismiss_after: cfg.dismiss_after(),
            verify_console_url: cfg.verify_console_url.clone(),
            message_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Poll until `shutdown` flips to true. The first poll fires
    /// immediately, then every `poll_interval`.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "[poll] polling service status every {}s",
            self.poll_interval.as_secs()
        );
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => self.poll_once().await,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("[poll] stopping status poll");
                        break;
                    }
                }
            }
        }
    }

    /// Single status refresh. Failures degrade the panel to the
    /// offline state; the next tick is the only retry.
    pub async fn poll_once(&self) {
        match self.api.fetch_status().await {
            Ok(report) => {
                debug!(
                    "[poll] service online: api={} active_calls={}",
                    report.openai_api, report.active_calls
                );
                self.render_online(&report).await;
            }
            Err(err) => {
                warn!("[poll] status check failed: {err:#}");
                self.render_offline().await;
            }
        }
    }

    async fn render_online(&self, report: &StatusReport) {
        let api_health = ApiHealth::parse(&report.openai_api);
        let mut panel = self.panel.lock().await;
        panel.set_service(Badge::new("Service Online", Severity::Ok));
        panel.set_server(Badge::new("Online", Severity::Ok));
        panel.set_api(
            api_health.badge(),
            api_health.detail().map(str::to_string),
        );
        if let Some(model) = &report.model {
            panel.set_model(health::model_badge(model));
        }
        panel.set_active_calls(health::active_calls_badge(report.active_calls));
        panel.flush();
    }

    async fn render_offline(&self) {
        let mut panel = self.panel.lock().await;
        panel.set_service(Badge::new("Service Offline", Severity::Danger));
        panel.set_server(Badge::new("Offline", Severity::Danger));
        panel.set_api(
            Badge::new("Unavailable", Severity::Danger),
            Some(health::OFFLINE_DETAIL.to_string()),
        );
        panel.set_model(Badge::new("Unavailable", Severity::Muted));
        panel.set_active_calls(Badge::new("-", Severity::Muted));
        panel.flush();
    }

    /// Trigger an outbound call. Numbers without a leading `+` are
    /// rejected locally and never reach the network.
    pub async fn place_call(&self, raw_number: &str) -> CallOutcome {
        let number = raw_number.trim();
        if !number.starts_with('+') {
            debug!("[call] rejected number without leading +");
            self.show_message(Severity::Danger, VALIDATION_ERROR.to_string())
                .await;
            return CallOutcome::Rejected {
                reason: VALIDATION_ERROR.to_string(),
            };
        }

        info!("[call] requesting outbound call to {number}");
        {
            let mut panel = self.panel.lock().await;
            panel.set_call_in_flight(true);
            panel.flush();
        }
        let result = self.api.request_call(number).await;
        {
            let mut panel = self.panel.lock().await;
            panel.set_call_in_flight(false);
        }

        match result {
            Ok(receipt) if receipt.is_success() => {
                let message = match &receipt.call_sid {
                    Some(sid) => format!("{} Call ID: {sid}", receipt.message),
                    None => receipt.message.clone(),
                };
                info!("[call] placed: {message}");
                self.show_message(Severity::Ok, message.clone()).await;
                CallOutcome::Placed {
                    message,
                    call_sid: receipt.call_sid,
                }
            }
            Ok(receipt) => {
                warn!("[call] service refused call: {}", receipt.message);
                let verification = self
                    .show_message(Severity::Danger, receipt.message.clone())
                    .await;
                CallOutcome::Failed {
                    message: receipt.message,
                    verification,
                }
            }
            Err(err) => {
                warn!("[call] request failed: {err:#}");
                let message = format!("Failed to initiate call: {err:#}");
                let verification = self.show_message(Severity::Danger, message.clone()).await;
                CallOutcome::Failed {
                    message,
                    verification,
                }
            }
        }
    }

    /// Show a call-status message and schedule its dismissal. Returns
    /// whether the verification-console link was attached. The timer
    /// is sequence-guarded so an old timer never clears a newer
    /// message.
    async fn show_message(&self, severity: Severity, text: String) -> bool {
        let link = (severity == Severity::Danger && text.contains("not verified")).then(|| {
            ConsoleLink {
                label: VERIFY_LINK_LABEL.to_string(),
                url: self.verify_console_url.clone(),
            }
        });
        let attached = link.is_some();
        let seq = self.message_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut panel = self.panel.lock().await;
            panel.show_call_message(severity, text, link);
            panel.flush();
        }

        let panel = Arc::clone(&self.panel);
        let message_seq = Arc::clone(&self.message_seq);
        let dismiss_after = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            if message_seq.load(Ordering::SeqCst) == seq {
                let mut panel = panel.lock().await;
                panel.clear_call_message();
                panel.flush();
            }
        });
        attached
    }
}
