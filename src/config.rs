//! Client configuration.
//!
//! Everything the client needs is carried by an explicit [`ClientConfig`];
//! there is no process-wide state. [`ClientConfig::from_env`] is a convenience
//! for binaries and reads the variables below.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TOOLCALL_BASE_URL` | `http://localhost:1234/v1` |
//! | `TOOLCALL_MODEL` | `mistral-nemo-instruct-2407` |
//! | `TOOLCALL_API_KEY` (or `GROQ_API_KEY`) | unset |
//! | `TOOLCALL_TIMEOUT_SECS` | `120` |
//! | `TOOLCALL_SYSTEM_PROMPT` | weather assistant persona |

use crate::{Error, ErrorContext, Result};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:1234/v1";
pub const DEFAULT_MODEL: &str = "mistral-nemo-instruct-2407";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful weather assistant that can get weather data for any city.";

const ENV_BASE_URL: &str = "TOOLCALL_BASE_URL";
const ENV_MODEL: &str = "TOOLCALL_MODEL";
const ENV_API_KEY: &str = "TOOLCALL_API_KEY";
const ENV_API_KEY_FALLBACK: &str = "GROQ_API_KEY";
const ENV_TIMEOUT_SECS: &str = "TOOLCALL_TIMEOUT_SECS";
const ENV_SYSTEM_PROMPT: &str = "TOOLCALL_SYSTEM_PROMPT";

#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the OpenAI-compatible API, without the `/chat/completions` suffix.
    pub base_url: String,
    pub model: String,
    /// Sent as a bearer token when present.
    pub api_key: Option<String>,
    /// Per-request timeout for chat endpoint calls.
    pub timeout: Duration,
    /// Persona text placed in the system message of every query.
    pub system_prompt: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Build from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, `.env` map, test fixture).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        if let Some(base_url) = get(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(model) = get(ENV_MODEL) {
            config.model = model;
        }
        config.api_key = get(ENV_API_KEY).or_else(|| get(ENV_API_KEY_FALLBACK));
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs = raw.parse::<u64>().map_err(|e| {
                Error::configuration_with_context(
                    "timeout must be a whole number of seconds",
                    ErrorContext::new()
                        .with_field_path(ENV_TIMEOUT_SECS)
                        .with_details(format!("{raw:?}: {e}"))
                        .with_source("config_env"),
                )
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(prompt) = get(ENV_SYSTEM_PROMPT) {
            config.system_prompt = prompt;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check values that would otherwise only fail at request time.
    pub fn validate(&self) -> Result<()> {
        self.chat_completions_url()?;
        if self.model.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "model identifier is empty",
                ErrorContext::new().with_field_path("model"),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::configuration_with_context(
                "timeout must be greater than zero",
                ErrorContext::new().with_field_path("timeout"),
            ));
        }
        Ok(())
    }

    /// Full URL of the chat completion endpoint.
    pub fn chat_completions_url(&self) -> Result<Url> {
        let invalid = |details: String| {
            Error::configuration_with_context(
                "invalid base URL",
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(details),
            )
        };
        let base = Url::parse(&self.base_url).map_err(|e| invalid(format!("{}: {e}", self.base_url)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
        }
        let joined = format!("{}/chat/completions", base.as_str().trim_end_matches('/'));
        Url::parse(&joined).map_err(|e| invalid(e.to_string()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("system_prompt", &self.system_prompt)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TOOLCALL_BASE_URL", "https://api.groq.com/openai/v1"),
            ("TOOLCALL_MODEL", "llama-3.3-70b-versatile"),
            ("GROQ_API_KEY", "gsk_test"),
            ("TOOLCALL_TIMEOUT_SECS", "30"),
            ("TOOLCALL_SYSTEM_PROMPT", "You are a finance assistant."),
        ]))
        .unwrap();
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.system_prompt, "You are a finance assistant.");
        assert_eq!(
            config.chat_completions_url().unwrap().as_str(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn explicit_key_wins_over_fallback() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TOOLCALL_API_KEY", "primary"),
            ("GROQ_API_KEY", "fallback"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("TOOLCALL_TIMEOUT_SECS", "soon")])).unwrap_err();
        let ctx = err.context().unwrap();
        assert_eq!(ctx.field_path.as_deref(), Some("TOOLCALL_TIMEOUT_SECS"));

        assert!(ClientConfig::from_lookup(lookup(&[("TOOLCALL_TIMEOUT_SECS", "0")])).is_err());
    }

    #[test]
    fn rejects_bad_base_url() {
        assert!(ClientConfig::new("localhost:1234", "m").validate().is_err());
        assert!(ClientConfig::new("ftp://example.com", "m").validate().is_err());
        assert!(ClientConfig::new("http://localhost:1234/v1/", "m").validate().is_ok());
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let config = ClientConfig::new("http://localhost:1234/v1/", "m");
        assert_eq!(
            config.chat_completions_url().unwrap().as_str(),
            "http://localhost:1234/v1/chat/completions"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ClientConfig::default().with_api_key("secret-key");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
