//! Tunable constants for the page chrome.
//!
//! Every field has a default, so a page only needs to override what it
//! changes. The browser host reads overrides as JSON from the root
//! `data-chrome-config` attribute, e.g.
//! `<html data-chrome-config='{"mobileBreakpointPx": 768}'>`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ALERT_AUTO_DISMISS_MS, ALERT_FADE_MS, MOBILE_BREAKPOINT_PX, SIDEBAR_STORAGE_KEY, THEME_STORAGE_KEY,
};
use crate::sidebar::DesktopMode;
use crate::theme::Theme;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Error returned by [`ChromeConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The attribute is not valid JSON or has fields of the wrong type.
    #[error("failed to parse chrome config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The JSON parsed but a field is out of range.
    #[error("invalid chrome config: {0}")]
    Invalid(String),
}

/// Runtime configuration shared by all controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ChromeConfig {
    /// Widths strictly below this use the mobile layout.
    pub mobile_breakpoint_px: f64,
    /// Theme used when neither server nor storage provides a valid one.
    pub default_theme: Theme,
    /// Desktop sidebar mode used when storage holds no valid mode.
    pub default_desktop_mode: DesktopMode,
    pub theme_storage_key: String,
    pub sidebar_storage_key: String,
    /// Delay before auto-dismiss alerts start fading.
    pub alert_auto_dismiss_ms: u32,
    /// Fade length before a dismissed alert is detached.
    pub alert_fade_ms: u32,
    /// Minimum console log level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
            default_theme: Theme::Dark,
            default_desktop_mode: DesktopMode::Icons,
            theme_storage_key: THEME_STORAGE_KEY.to_owned(),
            sidebar_storage_key: SIDEBAR_STORAGE_KEY.to_owned(),
            alert_auto_dismiss_ms: ALERT_AUTO_DISMISS_MS,
            alert_fade_ms: ALERT_FADE_MS,
            log_level: "info".to_owned(),
        }
    }
}

impl ChromeConfig {
    /// Parse and validate a JSON override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.mobile_breakpoint_px.is_finite() || self.mobile_breakpoint_px <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "mobileBreakpointPx must be a positive number, got {}",
                self.mobile_breakpoint_px
            )));
        }
        if self.theme_storage_key.is_empty() || self.sidebar_storage_key.is_empty() {
            return Err(ConfigError::Invalid("storage keys must not be empty".to_owned()));
        }
        if self.theme_storage_key == self.sidebar_storage_key {
            return Err(ConfigError::Invalid("theme and sidebar storage keys must differ".to_owned()));
        }
        if log::Level::from_str(&self.log_level).is_err() {
            return Err(ConfigError::Invalid(format!("unknown logLevel {:?}", self.log_level)));
        }
        Ok(())
    }

    /// Parsed [`ChromeConfig::log_level`], `Info` if unrecognized.
    #[must_use]
    pub fn level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Info)
    }
}
