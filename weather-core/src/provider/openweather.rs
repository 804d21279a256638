use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{Location, Units, WeatherError, WeatherReading};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const UNKNOWN_LOCATION: &str = "Unknown location";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;
        let base_url = base_url.trim_end_matches('/');

        Ok(Self {
            api_key: api_key.into(),
            endpoint: format!("{base_url}{CURRENT_WEATHER_PATH}"),
            http,
        })
    }

    fn query_params(&self, location: &Location, units: Units) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("appid", self.api_key.clone()),
            ("units", units.as_str().to_string()),
        ];

        match location {
            Location::Place(name) => params.push(("q", name.trim().to_string())),
            Location::Coordinates { lat, lon } => {
                // Debug keeps the decimal point, e.g. `-74.0`.
                params.push(("lat", format!("{lat:?}")));
                params.push(("lon", format!("{lon:?}")));
            }
        }

        params
    }
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(location = %location, units = %units))]
    async fn fetch_raw(&self, location: &Location, units: Units) -> Result<Value, WeatherError> {
        location.validate()?;

        debug!(endpoint = %self.endpoint, "Requesting current weather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&self.query_params(location, units))
            .send()
            .await
            .map_err(|e| {
                let err = WeatherError::from(e);
                warn!(error = %err, "OpenWeather request could not be sent");
                err
            })?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(%status, "OpenWeather returned an error status");
            let detail = error_detail(&body);
            return Err(WeatherError::RequestFailed(format!("{status}: {detail}")));
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedResponse(format!("body is not valid JSON: {e}")))
    }

    async fn fetch_readable(
        &self,
        location: &Location,
        units: Units,
    ) -> Result<WeatherReading, WeatherError> {
        let raw = self.fetch_raw(location, units).await?;
        readable_from_json(&raw)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: Option<String>,
    dt: Option<i64>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

/// Flatten an OpenWeather "current weather" body into a [`WeatherReading`].
pub fn readable_from_json(data: &Value) -> Result<WeatherReading, WeatherError> {
    let parsed: OwCurrentResponse = serde_path_to_error::deserialize(data)
        .map_err(|e| WeatherError::MalformedResponse(e.to_string()))?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| missing("weather[0]"))?;

    let location = parsed
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

    Ok(WeatherReading {
        location,
        temperature: parsed.main.temp,
        feels_like: parsed.main.feels_like,
        humidity: parsed.main.humidity,
        conditions: title_case(&condition.description),
        wind_speed: parsed.wind.speed,
        icon: condition.icon,
        observed_at: parsed.dt.and_then(unix_to_utc),
    })
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}

fn missing(path: &str) -> WeatherError {
    WeatherError::MalformedResponse(format!("missing field '{path}'"))
}

/// Prefer the provider's own `message`, e.g. `city not found`.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| truncate_body(body))
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
