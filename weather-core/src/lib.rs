//! Core library for the weather app.
//!
//! This crate defines:
//! - The OpenWeather client and response normalization
//! - Location input parsing and measurement units
//! - Condition icon download and decoding
//! - Configuration & credentials handling
//!
//! It is used by `weather-gui` and `weather-cli`.

pub mod config;
pub mod error;
pub mod icon;
pub mod location;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::WeatherError;
pub use icon::{Icon, IconFetcher};
pub use location::{LocationInputError, parse_location};
pub use model::{Location, Units, WeatherReading};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
