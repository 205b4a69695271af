use colored::{Color, ColoredString, Colorize};

const FALLBACK_DETAIL: &str =
    "Primary model (GPT-4o) is unavailable. Using GPT-3.5-turbo as fallback.";
const QUOTA_DETAIL: &str = "The OpenAI API quota has been exceeded. Voice calls will not receive AI responses until the quota resets.";
const RATE_LIMIT_DETAIL: &str =
    "The OpenAI API is currently rate limited. Calls may experience delays or errors.";
const ALL_MODELS_DETAIL: &str =
    "Both GPT-4o and GPT-3.5-turbo models are unavailable. Voice functionality will not work.";
const MISSING_KEY_DETAIL: &str =
    "No OpenAI API key is configured on the server. Voice calls will not receive AI responses.";
const GENERIC_ISSUE_DETAIL: &str =
    "The OpenAI API is experiencing issues. Voice functionality may be limited.";

/// Detail shown when the service itself cannot be reached.
pub const OFFLINE_DETAIL: &str =
    "Server connection lost. Please check if the server is running.";

/// Visual classification carried by every badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Info,
    Warning,
    Danger,
    Muted,
}

impl Severity {
    fn color(&self) -> Color {
        match self {
            Self::Ok => Color::Green,
            Self::Info => Color::Cyan,
            Self::Warning => Color::Yellow,
            Self::Danger => Color::Red,
            Self::Muted => Color::BrightBlack,
        }
    }

    pub fn paint(&self, text: &str) -> ColoredString {
        text.color(self.color())
    }
}

/// One rendered output slot: a short label plus its severity.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub text: String,
    pub severity: Severity,
}

impl Badge {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// Parsed form of the `openai_api` status string.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiHealth {
    Ok,
    FallbackMode,
    QuotaExceeded,
    RateLimited,
    AllModelsUnavailable,
    MissingApiKey,
    Other(String),
}

impl ApiHealth {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "OK" => Self::Ok,
            "FALLBACK MODE" => Self::FallbackMode,
            "QUOTA EXCEEDED" => Self::QuotaExceeded,
            "RATE LIMITED" => Self::RateLimited,
            "ALL MODELS UNAVAILABLE" => Self::AllModelsUnavailable,
            "MISSING API KEY" => Self::MissingApiKey,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Ok => "Connected".to_string(),
            Self::FallbackMode => "Using Fallback".to_string(),
            Self::QuotaExceeded => "Quota Exceeded".to_string(),
            Self::RateLimited => "Rate Limited".to_string(),
            Self::AllModelsUnavailable => "All Models Unavailable".to_string(),
            Self::MissingApiKey => "Missing API Key".to_string(),
            Self::Other(raw) => format!("Issue: {raw}"),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Ok => Severity::Ok,
            Self::FallbackMode | Self::RateLimited | Self::Other(_) => Severity::Warning,
            Self::QuotaExceeded | Self::AllModelsUnavailable | Self::MissingApiKey => {
                Severity::Danger
            }
        }
    }

    /// Explanatory text for the detail slot. `Ok` clears it.
    pub fn detail(&self) -> Option<&'static str> {
        match self {
            Self::Ok => None,
            Self::FallbackMode => Some(FALLBACK_DETAIL),
            Self::QuotaExceeded => Some(QUOTA_DETAIL),
            Self::RateLimited => Some(RATE_LIMIT_DETAIL),
            Self::AllModelsUnavailable => Some(ALL_MODELS_DETAIL),
            Self::MissingApiKey => Some(MISSING_KEY_DETAIL),
            Self::Other(_) => Some(GENERIC_ISSUE_DETAIL),
        }
    }

    pub fn badge(&self) -> Badge {
        Badge::new(self.label(), self.severity())
    }
}

/// Model name rendered verbatim; known chat models read as healthy,
/// anything else is shown muted.
pub fn model_badge(model: &str) -> Badge {
    let severity = if model.contains("gpt-4o") || model.contains("gpt-3.5") {
        Severity::Ok
    } else {
        Severity::Muted
    };
    Badge::new(model, severity)
}

pub fn active_calls_badge(count: u64) -> Badge {
    Badge::new(count.to_string(), Severity::Info)
}
