//! Environment-driven configuration for the shell.
//!
//! The client is deliberately thin: everything it needs to know is the
//! service address and, optionally, an explicit session id to present.

use vidscribe_api::{ApiSettings, SessionContext};

use super::logging::LogDestination;

const BASE_URL_VAR: &str = "VIDSCRIBE_BASE_URL";
const SESSION_ID_VAR: &str = "VIDSCRIBE_SESSION_ID";
const LOG_VAR: &str = "VIDSCRIBE_LOG";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub session: SessionContext,
    pub log_destination: LogDestination,
}

/// Loads configuration from `.env` (when present) and the process
/// environment.
pub fn load() -> AppConfig {
    let _ = dotenvy::dotenv();
    from_env(|var| std::env::var(var).ok())
}

fn from_env(get: impl Fn(&str) -> Option<String>) -> AppConfig {
    let api = match get(BASE_URL_VAR) {
        Some(base_url) => ApiSettings { base_url },
        None => ApiSettings::default(),
    };

    let session = match get(SESSION_ID_VAR) {
        Some(session_id) if !session_id.trim().is_empty() => {
            SessionContext::new(session_id.trim().to_string())
        }
        _ => SessionContext::default(),
    };

    let log_destination = match get(LOG_VAR).as_deref() {
        Some("terminal") => LogDestination::Terminal,
        Some("both") => LogDestination::Both,
        _ => LogDestination::File,
    };

    AppConfig {
        api,
        session,
        log_destination,
    }
}
