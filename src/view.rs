use crate::health::{Badge, Severity};
use colored::{ColoredString, Colorize};

/// Link offered next to a failure message, pointing at the telephony
/// provider's verification console.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleLink {
    pub label: String,
    pub url: String,
}

/// The widget's output slots. This stands in for the fixed set of DOM
/// elements the dashboard writes to: each method owns one slot, and
/// the widget never renders directly.
///
/// `flush` marks the end of an update pass; buffered implementations
/// redraw there, immediate ones can ignore it.
pub trait StatusPanel: Send {
    fn set_service(&mut self, badge: Badge);
    fn set_server(&mut self, badge: Badge);
    fn set_api(&mut self, badge: Badge, detail: Option<String>);
    fn set_model(&mut self, badge: Badge);
    fn set_active_calls(&mut self, badge: Badge);
    fn set_call_in_flight(&mut self, in_flight: bool);
    fn show_call_message(&mut self, severity: Severity, text: String, link: Option<ConsoleLink>);
    fn clear_call_message(&mut self);
    fn flush(&mut self) {}
}

struct CallMessage {
    severity: Severity,
    text: String,
    link: Option<ConsoleLink>,
}

/// Colored terminal rendering of the panel. Slots are buffered and the
/// whole block is reprinted on `flush`, stamped with the local time.
pub struct TerminalPanel {
    color: bool,
    service: Option<Badge>,
    server: Option<Badge>,
    api: Option<Badge>,
    api_detail: Option<String>,
    model: Option<Badge>,
    active_calls: Option<Badge>,
    call_in_flight: bool,
    call_message: Option<CallMessage>,
}

impl TerminalPanel {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            service: None,
            server: None,
            api: None,
            api_detail: None,
            model: None,
            active_calls: None,
            call_in_flight: false,
            call_message: None,
        }
    }

    fn paint(&self, badge: &Badge) -> ColoredString {
        if self.color {
            badge.severity.paint(&badge.text)
        } else {
            badge.text.normal()
        }
    }

    fn paint_with(&self, severity: Severity, text: &str) -> ColoredString {
        if self.color {
            severity.paint(text)
        } else {
            text.normal()
        }
    }

    fn print_slot(&self, label: &str, badge: &Option<Badge>) {
        if let Some(badge) = badge {
            println!("  {:<13} {}", label, self.paint(badge));
        }
    }
}

impl StatusPanel for TerminalPanel {
    fn set_service(&mut self, badge: Badge) {
        self.service = Some(badge);
    }

    fn set_server(&mut self, badge: Badge) {
        self.server = Some(badge);
    }

    fn set_api(&mut self, badge: Badge, detail: Option<String>) {
        self.api = Some(badge);
        self.api_detail = detail;
    }

    fn set_model(&mut self, badge: Badge) {
        self.model = Some(badge);
    }

    fn set_active_calls(&mut self, badge: Badge) {
        self.active_calls = Some(badge);
    }

    fn set_call_in_flight(&mut self, in_flight: bool) {
        self.call_in_flight = in_flight;
    }

    fn show_call_message(&mut self, severity: Severity, text: String, link: Option<ConsoleLink>) {
        self.call_message = Some(CallMessage {
            severity,
            text,
            link,
        });
    }

    fn clear_call_message(&mut self) {
        self.call_message = None;
    }

    fn flush(&mut self) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        let header = if self.color {
            "Voice Service".bold().cyan()
        } else {
            "Voice Service".normal()
        };
        println!();
        println!("{header}  {stamp}");
        self.print_slot("Service", &self.service);
        self.print_slot("Server", &self.server);
        self.print_slot("OpenAI API", &self.api);
        if let Some(detail) = &self.api_detail {
            let severity = self
                .api
                .as_ref()
                .map(|badge| badge.severity)
                .unwrap_or(Severity::Muted);
            println!("  {}", self.paint_with(severity, &format!("→ {detail}")));
        }
        self.print_slot("Model", &self.model);
        self.print_slot("Active calls", &self.active_calls);
        if self.call_in_flight {
            println!("  {}", self.paint_with(Severity::Muted, "Placing call..."));
        }
        if let Some(message) = &self.call_message {
            println!("  {}", self.paint_with(message.severity, &message.text));
            if let Some(link) = &message.link {
                println!("  {}: {}", link.label, link.url);
            }
        }
    }
}
