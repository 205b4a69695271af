pub mod client;
pub mod config;
pub mod health;
pub mod types;
pub mod view;
pub mod widget;

pub use client::{HttpVoiceService, VoiceServiceApi};
pub use config::Config;
pub use health::{ApiHealth, Badge, Severity};
pub use types::{CallOutcome, CallReceipt, StatusReport};
pub use view::{ConsoleLink, StatusPanel, TerminalPanel};
pub use widget::StatusAndCallWidget;
