use super::required_f64;
use crate::client::ToolHandler;
use crate::types::tool::{ParameterType, ToolSchema};
use anyhow::{anyhow, Context};
use chrono::{Local, NaiveDateTime};
use reqwest::blocking::Client;
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const NAME: &str = "get_weather";

const CURRENT_FIELDS: &str = "temperature_2m,wind_speed_10m";
/// Readings older or newer than this get a `time_warning` note.
const STALE_AFTER_SECS: i64 = 3600;

pub fn schema() -> ToolSchema {
    ToolSchema::new(NAME, "Get current weather data for provided coordinates.")
        .param("latitude", ParameterType::Number)
        .param("longitude", ParameterType::Number)
}

/// Current conditions from the Open-Meteo forecast API.
pub struct CurrentWeather {
    client: Client,
    forecast_url: String,
}

impl CurrentWeather {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            forecast_url: format!("{}/v1/forecast", base_url.trim_end_matches('/')),
        }
    }

    /// The `current` object of the forecast response.
    pub fn fetch(&self, latitude: f64, longitude: f64) -> anyhow::Result<Map<String, Value>> {
        debug!(latitude, longitude, "fetching weather");
        let body: Value = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .context("weather request failed")?
            .error_for_status()
            .context("weather service returned an error")?
            .json()
            .context("unexpected weather response")?;

        let mut current = match body.get("current") {
            Some(Value::Object(current)) => current.clone(),
            _ => return Err(anyhow!("weather response has no current conditions")),
        };
        if let Some(note) = staleness_note(&current, Local::now().naive_local()) {
            warn!(%note, "weather reading is not current");
            current.insert("time_warning".to_string(), Value::String(note));
        }
        Ok(current)
    }
}

/// Note for readings whose local `time` is more than an hour away from `now`.
fn staleness_note(current: &Map<String, Value>, now: NaiveDateTime) -> Option<String> {
    let time = current.get("time")?.as_str()?;
    let reading = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M").ok()?;
    if (now - reading).num_seconds().abs() <= STALE_AFTER_SECS {
        return None;
    }
    Some(format!(
        "Note: Weather data is from {} (current system time is {})",
        reading.format("%Y-%m-%d %H:%M"),
        now.format("%Y-%m-%d %H:%M")
    ))
}

impl ToolHandler for CurrentWeather {
    fn call(&self, args: &Map<String, Value>) -> anyhow::Result<Value> {
        let latitude = required_f64(args, "latitude")?;
        let longitude = required_f64(args, "longitude")?;
        Ok(Value::Object(self.fetch(latitude, longitude)?))
    }
}
