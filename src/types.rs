use serde::Deserialize;

/// Body of `GET /status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusReport {
    pub openai_api: String,
    pub active_calls: u64,
    #[serde(default)]
    pub model: Option<String>,
    /// The server also reports its own liveness ("running"); reaching
    /// the endpoint at all already tells us that.
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `GET /callme`.
#[derive(Debug, Clone, Deserialize)]
pub struct CallReceipt {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub call_sid: Option<String>,
    /// Set to "verification_required" when a trial account rejects an
    /// unverified number.
    #[serde(default)]
    pub code: Option<String>,
}

impl CallReceipt {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Result of a call trigger as surfaced to the panel and the CLI.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// The service accepted the request and handed back a call SID.
    Placed {
        message: String,
        call_sid: Option<String>,
    },
    /// Local validation failed; no request was made.
    Rejected { reason: String },
    /// The request was made and failed, either at the transport level
    /// or as a well-formed error payload.
    Failed {
        message: String,
        /// The failure message names an unverified number, so the
        /// panel should attach the telephony console link.
        verification: bool,
    },
}

impl CallOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }
}
