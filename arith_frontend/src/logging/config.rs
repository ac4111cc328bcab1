//! Runtime logging preferences
//!
//! Preferences are set once at startup; readers fall back to the
//! environment-derived defaults when nothing was installed.

use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences (only the first call takes effect)
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime logging preferences already initialized".to_string())
}

fn with_preferences<R>(f: impl FnOnce(&LoggingPreferences) -> R) -> R {
    match RUNTIME_PREFERENCES.get() {
        Some(preferences) => f(preferences),
        None => f(&LoggingPreferences::default()),
    }
}

/// Get minimum log level
pub fn get_min_log_level() -> LogLevel {
    with_preferences(|p| p.min_log_level)
}

/// Check if structured logging is enabled
pub fn use_structured_logging() -> bool {
    with_preferences(|p| p.use_structured_logging)
}

/// Check if console logging is enabled
pub fn use_console_logging() -> bool {
    with_preferences(|p| p.enable_console_logging)
}

/// Summarize the active configuration for diagnostics
pub fn get_config_summary() -> String {
    with_preferences(|p| {
        format!(
            "Logging: level={}, structured={}, console={}",
            p.min_log_level.as_str(),
            p.use_structured_logging,
            p.enable_console_logging
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_summary_mentions_level() {
        let summary = get_config_summary();
        assert!(summary.contains(get_min_log_level().as_str()));
    }
}
