use crate::config::ClientConfig;
use crate::protocol::ChatRequest;
use crate::transport::TransportError;
use crate::Result;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;
use tracing::debug;

/// Longest slice of an error body kept in [`TransportError::Status`].
const ERROR_BODY_LIMIT: usize = 512;

pub struct HttpTransport {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = config.chat_completions_url()?.to_string();

        let client = Client::builder()
            .timeout(config.timeout)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one chat request and return the raw response body.
    ///
    /// Non-2xx statuses and timeouts become [`TransportError`]; body validation is
    /// left to [`crate::protocol::parse`] so an empty 200 can be retried by the caller.
    pub fn post_chat(&self, request: &ChatRequest<'_>) -> std::result::Result<String, TransportError> {
        let mut req = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, concat!("toolcall-agent/", env!("CARGO_PKG_VERSION")))
            .json(request);

        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let start = std::time::Instant::now();
        let response = req.send().map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.text().map_err(|e| self.classify(e))?;

        debug!(
            http_status = status.as_u16(),
            body_len = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "chat endpoint responded"
        );

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }
        Ok(body)
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Http(err)
        }
    }
}

fn truncate(body: &str, limit: usize) -> String {
    let body = body.trim();
    if body.len() <= limit {
        return body.to_string();
    }
    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        // 'é' is two bytes; cutting at byte 2 would split it.
        assert_eq!(truncate("aé", 2), "a...");
    }

    #[test]
    fn endpoint_is_derived_from_config() {
        let transport = HttpTransport::new(&ClientConfig::new("http://127.0.0.1:1234/v1", "m")).unwrap();
        assert_eq!(transport.endpoint(), "http://127.0.0.1:1234/v1/chat/completions");
    }
}
