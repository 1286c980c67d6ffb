//! Environment/config surface.
//!
//! Settings come from the process environment, with a `.env` file loaded
//! first if one exists (missing `.env` is not an error). Nothing here
//! panics: unset variables fall back to project-local defaults, and the
//! assistant credential is simply absent when not configured.

use std::path::PathBuf;

/// Default catalog document path, relative to the working directory.
const DEFAULT_MENU_PATH: &str = "menu_data.json";

/// Default reservation ledger path, relative to the working directory.
const DEFAULT_RESERVATIONS_PATH: &str = "reservations.json";

/// Model used for the hosted-assistant fallback.
const DEFAULT_MODEL_NAME: &str = "gpt-4o";

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the read-only menu catalog document.
    pub menu_path: PathBuf,
    /// Path to the file-backed reservation ledger.
    pub reservations_path: PathBuf,
    /// API credential for the hosted assistant. `None` disables the
    /// assistant fallback entirely.
    pub api_key: Option<String>,
    /// Model identifier sent to the hosted assistant.
    pub model_name: String,
}

impl Config {
    /// Load configuration from `.env` (if present) and the process
    /// environment.
    pub fn from_env() -> Self {
        // Missing or unreadable .env just means "environment only".
        let _ = dotenvy::dotenv();

        Config {
            menu_path: env_path("MENU_DATA_PATH", DEFAULT_MENU_PATH),
            reservations_path: env_path("RESERVATIONS_PATH", DEFAULT_RESERVATIONS_PATH),
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model_name: std::env::var("MODEL_NAME")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
        }
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
