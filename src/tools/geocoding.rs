use super::required_str;
use crate::client::ToolHandler;
use crate::types::tool::{ParameterType, ToolSchema};
use anyhow::{anyhow, Context};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

pub const NAME: &str = "get_coordinates";

pub fn schema() -> ToolSchema {
    ToolSchema::new(NAME, "Get latitude and longitude for a city name.").param_described(
        "city",
        ParameterType::String,
        "City name, optionally with country (e.g. \"Paris, France\").",
    )
}

/// Nominatim returns coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// City geocoding through the Nominatim search API.
pub struct Geocoder {
    client: Client,
    search_url: String,
}

impl Geocoder {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            search_url: format!("{}/search", base_url.trim_end_matches('/')),
        }
    }

    /// Coordinates of the best match, or `None` when nothing matched.
    pub fn locate(&self, city: &str) -> anyhow::Result<Option<(f64, f64)>> {
        debug!(city, "fetching coordinates");
        let places: Vec<Place> = self
            .client
            .get(&self.search_url)
            .query(&[("format", "json"), ("q", city)])
            .send()
            .context("geocoding request failed")?
            .error_for_status()
            .context("geocoding service returned an error")?
            .json()
            .context("unexpected geocoding response")?;

        let Some(place) = places.first() else {
            warn!(city, "no coordinates found");
            return Ok(None);
        };
        let lat = place.lat.parse::<f64>().context("invalid latitude")?;
        let lon = place.lon.parse::<f64>().context("invalid longitude")?;
        info!(city, latitude = lat, longitude = lon, "resolved coordinates");
        Ok(Some((lat, lon)))
    }
}

impl ToolHandler for Geocoder {
    fn call(&self, args: &Map<String, Value>) -> anyhow::Result<Value> {
        let city = required_str(args, "city")?;
        let (latitude, longitude) = self
            .locate(city)?
            .ok_or_else(|| anyhow!("could not get coordinates for city '{city}'"))?;
        Ok(json!({ "latitude": latitude, "longitude": longitude }))
    }
}
