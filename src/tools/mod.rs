//! Built-in tools.
//!
//! | Tool | Source |
//! |------|--------|
//! | `get_current_date` | local clock |
//! | `get_coordinates` | Nominatim search API |
//! | `get_weather` | Open-Meteo forecast API |
//! | `get_company_symbol` | static ticker table |
//!
//! Each module exposes a `schema()` and a handler type implementing
//! [`ToolHandler`](crate::ToolHandler). The `register_*` helpers wire a matching
//! set into a client.

pub mod date;
pub mod finance;
pub mod geocoding;
pub mod weather;

use crate::client::ToolCallingChatClient;
use crate::transport::TransportError;
use crate::{Error, Result};
use anyhow::{anyhow, Context};
use reqwest::blocking::Client;
use serde_json::{Map, Value};
use std::time::Duration;

pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.open-meteo.com";
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 10;

/// Settings for the data-source tools.
#[derive(Debug, Clone)]
pub struct ToolsConfig {
    pub geocoding_base_url: String,
    pub weather_base_url: String,
    /// Nominatim rejects requests without an identifying agent.
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: DEFAULT_GEOCODING_BASE_URL.to_string(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            user_agent: concat!("toolcall-agent/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
        }
    }
}

impl ToolsConfig {
    pub(crate) fn http_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))
    }
}

/// Register `get_current_date`, `get_coordinates` and `get_weather`.
pub fn register_weather_tools(client: &mut ToolCallingChatClient, config: &ToolsConfig) -> Result<()> {
    let http = config.http_client()?;
    client.register_tool(date::schema(), date::CurrentDate)?;
    client.register_tool(
        geocoding::schema(),
        geocoding::Geocoder::new(http.clone(), &config.geocoding_base_url),
    )?;
    client.register_tool(
        weather::schema(),
        weather::CurrentWeather::new(http, &config.weather_base_url),
    )?;
    Ok(())
}

/// Register `get_current_date` and `get_company_symbol`.
pub fn register_finance_tools(client: &mut ToolCallingChatClient) -> Result<()> {
    client.register_tool(date::schema(), date::CurrentDate)?;
    client.register_tool(finance::schema(), finance::CompanySymbol)?;
    Ok(())
}

pub(crate) fn required_str<'a>(args: &'a Map<String, Value>, key: &str) -> anyhow::Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("missing string argument '{key}'"))
}

pub(crate) fn required_f64(args: &Map<String, Value>, key: &str) -> anyhow::Result<f64> {
    let value = args
        .get(key)
        .ok_or_else(|| anyhow!("missing argument '{key}'"))?;
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| anyhow!("argument '{key}' is out of range")),
        // Only reachable through non-strict schemas.
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .with_context(|| format!("argument '{key}' is not a number")),
        other => Err(anyhow!("argument '{key}' is not a number: {other}")),
    }
}
