//! Gateway configuration loaded from embedded JSON.
use serde::{Deserialize, Serialize};

/// Settings that shape transport detection and dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// File name the desktop shell loads the landing page from.
    pub landing_page: String,
    /// Path prefix of the HTTP API, relative to the page origin.
    pub api_prefix: String,
    /// Message type posted when no start-game call site is attached.
    pub start_signal: String,
    /// Delay before the start signal is posted.
    pub signal_delay_ms: u32,
    /// Fixed seed for mock progress values; `None` lets the host pick one.
    #[serde(default)]
    pub mock_seed: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            landing_page: String::from("continental_quest_landing.html"),
            api_prefix: String::from("/api"),
            start_signal: String::from("START_GLOBE"),
            signal_delay_ms: 100,
            mock_seed: None,
        }
    }
}

impl GatewayConfig {
    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json_str: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| format!("JSON parse error: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.landing_page.trim().is_empty() {
            return Err("landing_page must not be empty".to_string());
        }
        if !self.api_prefix.starts_with('/') {
            return Err(format!(
                "api_prefix must start with '/': {}",
                self.api_prefix
            ));
        }
        if self.start_signal.trim().is_empty() {
            return Err("start_signal must not be empty".to_string());
        }
        Ok(())
    }

    /// Embedded configuration, falling back to built-in defaults.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(include_str!("../data/gateway.json")).unwrap_or_default()
    }

    #[must_use]
    pub fn with_mock_seed(mut self, seed: u64) -> Self {
        self.mock_seed = Some(seed);
        self
    }

    /// API prefix without a trailing slash.
    #[must_use]
    pub fn api_root(&self) -> &str {
        self.api_prefix.trim_end_matches('/')
    }
}
