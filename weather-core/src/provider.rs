use crate::{
    Config, Location, Units, WeatherError, WeatherReading, config::API_KEY_ENV,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Issue the request and return the provider's JSON body untouched.
    async fn fetch_raw(
        &self,
        location: &Location,
        units: Units,
    ) -> Result<serde_json::Value, WeatherError>;

    /// Fetch and normalize into a [`WeatherReading`].
    async fn fetch_readable(
        &self,
        location: &Location,
        units: Units,
    ) -> Result<WeatherReading, WeatherError>;
}

/// Construct the OpenWeather provider from config and the process environment.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let from_env = std::env::var(API_KEY_ENV).ok();
    provider_with_env_key(config, from_env.as_deref())
}

/// Construct the OpenWeather provider, with `from_env` standing in for
/// the environment override.
pub fn provider_with_env_key(
    config: &Config,
    from_env: Option<&str>,
) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.resolve_api_key(from_env)?;
    OpenWeatherProvider::new(api_key, &config.base_url, config.timeout())
}
