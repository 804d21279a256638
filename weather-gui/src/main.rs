//! Binary crate for the `weather-app` desktop window.
//!
//! One fixed-size window: type a place name or `lat,lon`, pick the units
//! and press Search.

use iced::{Size, Task};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use weather_core::Config;

mod app;
mod view;
mod window;

use app::WeatherApp;

fn main() -> iced::Result {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::load().unwrap_or_else(|err| {
        warn!(error = %format!("{err:#}"), "Falling back to default configuration");
        Config::default()
    });

    iced::application(app::TITLE, WeatherApp::update, WeatherApp::view)
        .window_size(Size::new(500.0, 600.0))
        .resizable(false)
        .position(iced::window::Position::Centered)
        .run_with(move || (WeatherApp::new(&config), Task::none()))
}
