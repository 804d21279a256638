use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Measurement system used both for the request and for display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }

    /// `C` or `F`, without the degree sign.
    pub fn temperature_unit(&self) -> &'static str {
        match self {
            Units::Metric => "C",
            Units::Imperial => "F",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn wind_speed_label(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }

    /// Human label used by the unit selector.
    pub fn scale_name(&self) -> &'static str {
        match self {
            Units::Metric => "Celsius",
            Units::Imperial => "Fahrenheit",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: metric, imperial."
            )),
        }
    }
}

/// A place to look up: free-text name or a latitude/longitude pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Place(String),
    Coordinates { lat: f64, lon: f64 },
}

impl Location {
    /// Checks the location can be sent to the provider.
    pub fn validate(&self) -> Result<(), WeatherError> {
        match self {
            Location::Place(name) if name.trim().is_empty() => {
                let reason = "place name is empty".to_string();
                Err(WeatherError::InvalidLocation(reason))
            }
            Location::Place(_) => Ok(()),
            Location::Coordinates { lat, lon } => {
                if !(-90.0..=90.0).contains(lat) || !(-180.0..=180.0).contains(lon) {
                    return Err(WeatherError::InvalidLocation(
                        "latitude must be within [-90, 90] and longitude within [-180, 180]"
                            .to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Place(name) => f.write_str(name),
            Location::Coordinates { lat, lon } => write!(f, "{lat:?},{lon:?}"),
        }
    }
}

/// Normalized current conditions for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub conditions: String,
    pub wind_speed: f64,
    pub icon: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
}
