use std::sync::Arc;

use iced::{Element, Task, widget::image};
use tracing::{info, warn};
use weather_core::{
    Config, Icon, IconFetcher, OpenWeatherProvider, Units, WeatherError, WeatherProvider,
    WeatherReading, provider::provider_from_config,
};

use crate::{
    view,
    window::{DisplayedReading, Query, WeatherWindow},
};

pub const TITLE: &str = "Weather App";

#[derive(Debug, Clone)]
pub enum Message {
    LocationChanged(String),
    UnitsSelected(Units),
    Search,
    Loaded(Result<Loaded, WeatherError>),
    DismissDialog,
}

/// Result of a successful query, icon included when it could be fetched.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub reading: WeatherReading,
    pub units: Units,
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone)]
struct Services {
    provider: Arc<OpenWeatherProvider>,
    icons: Arc<IconFetcher>,
}

impl Services {
    fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            provider: Arc::new(provider_from_config(config)?),
            icons: Arc::new(IconFetcher::new(&config.icon_base_url, config.timeout())?),
        })
    }
}

#[derive(Debug)]
pub struct WeatherApp {
    window: WeatherWindow,
    // Setup errors are reported on the first search instead of at startup.
    services: Result<Services, String>,
}

impl WeatherApp {
    pub fn new(config: &Config) -> Self {
        let services = Services::from_config(config).map_err(|err| {
            warn!(error = %err, "Weather lookups are unavailable");
            err.to_string()
        });

        Self {
            window: WeatherWindow::new(config.units),
            services,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LocationChanged(value) => self.window.set_location_input(value),
            Message::UnitsSelected(units) => self.window.set_units(units),
            Message::Search => {
                let Some(query) = self.window.submit() else {
                    return Task::none();
                };

                let services = match &self.services {
                    Ok(services) => services.clone(),
                    Err(setup_error) => {
                        self.window.fail(setup_error.clone());
                        return Task::none();
                    }
                };

                info!(location = %query.location, units = %query.units, "Looking up weather");
                return Task::perform(load(services, query), Message::Loaded);
            }
            Message::Loaded(outcome) => {
                if let Err(err) = &outcome {
                    warn!(error = %err, "Weather lookup failed");
                }
                self.window.finish(outcome.map(displayed));
            }
            Message::DismissDialog => self.window.dismiss_dialog(),
        }

        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::window(&self.window)
    }
}

async fn load(services: Services, query: Query) -> Result<Loaded, WeatherError> {
    let reading = services
        .provider
        .fetch_readable(&query.location, query.units)
        .await?;

    let icon = match reading.icon.as_deref() {
        Some(code) => services.icons.fetch_best_effort(code).await,
        None => None,
    };

    Ok(Loaded {
        reading,
        units: query.units,
        icon,
    })
}

fn displayed(loaded: Loaded) -> DisplayedReading {
    let icon = loaded
        .icon
        .map(|icon| image::Handle::from_rgba(icon.width, icon.height, icon.rgba));

    DisplayedReading {
        reading: loaded.reading,
        units: loaded.units,
        icon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{DialogKind, Phase};

    fn unconfigured_app() -> WeatherApp {
        WeatherApp {
            window: WeatherWindow::default(),
            services: Err("No OpenWeather API key configured.".to_string()),
        }
    }

    fn sample_loaded(icon: Option<Icon>) -> Loaded {
        Loaded {
            reading: WeatherReading {
                location: "Oslo".into(),
                temperature: -3.0,
                feels_like: -7.5,
                humidity: 80,
                conditions: "Snow".into(),
                wind_speed: 5.2,
                icon: Some("13d".into()),
                observed_at: None,
            },
            units: Units::Metric,
            icon,
        }
    }

    #[test]
    fn missing_credentials_surface_as_error_dialog() {
        let mut app = unconfigured_app();

        let _ = app.update(Message::LocationChanged("Oslo".into()));
        let _ = app.update(Message::Search);

        let dialog = app.window.dialog().expect("error shown");
        assert_eq!(dialog.kind, DialogKind::Error);
        assert!(dialog.message.contains("API key"));
    }

    #[test]
    fn loaded_reading_without_icon_is_displayed() {
        let mut app = unconfigured_app();
        let _ = app.update(Message::Loaded(Ok(sample_loaded(None))));

        assert_eq!(app.window.phase(), Phase::Displaying);
        assert!(app.window.display().is_some_and(|d| d.icon.is_none()));
    }

    #[test]
    fn decoded_icon_becomes_image_handle() {
        let icon = Icon {
            width: 1,
            height: 1,
            rgba: vec![0, 0, 0, 255],
        };
        let shown = displayed(sample_loaded(Some(icon)));

        assert!(shown.icon.is_some());
        assert_eq!(shown.temperature_text(), "-3.0°C");
    }

    #[test]
    fn failed_lookup_shows_error() {
        let mut app = unconfigured_app();
        let err = WeatherError::RequestFailed("request timed out".into());
        let _ = app.update(Message::Loaded(Err(err)));

        assert_eq!(app.window.phase(), Phase::Error);
        assert_eq!(
            app.window.dialog().map(|d| d.message.as_str()),
            Some("API request failed: request timed out")
        );
    }

    mod lookup {
        use std::time::Duration;

        use weather_core::{Location, OpenWeatherProvider};
        use wiremock::{
            Mock, MockServer, ResponseTemplate,
            matchers::{method, path},
        };

        use super::*;

        fn services(server: &MockServer) -> Services {
            let timeout = Duration::from_secs(5);
            let provider = OpenWeatherProvider::new("TEST_KEY", &server.uri(), timeout);
            let icons = IconFetcher::new(&server.uri(), timeout);
            Services {
                provider: Arc::new(provider.unwrap()),
                icons: Arc::new(icons.unwrap()),
            }
        }

        async fn mount_weather(server: &MockServer) {
            let body = serde_json::json!({
                "name": "Oslo",
                "main": { "temp": -3.0, "feels_like": -7.5, "humidity": 80 },
                "weather": [{ "description": "light snow", "icon": "13d" }],
                "wind": { "speed": 5.2 }
            });

            Mock::given(method("GET"))
                .and(path("/data/2.5/weather"))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(server)
                .await;
        }

        fn query() -> Query {
            Query {
                location: Location::Place("Oslo".into()),
                units: Units::Imperial,
            }
        }

        #[tokio::test]
        async fn missing_icon_still_yields_reading() {
            let server = MockServer::start().await;
            mount_weather(&server).await;
            Mock::given(method("GET"))
                .and(path("/img/wn/13d@2x.png"))
                .respond_with(ResponseTemplate::new(404))
                .expect(1)
                .mount(&server)
                .await;

            let loaded = load(services(&server), query()).await.unwrap();

            assert!(loaded.icon.is_none());
            assert_eq!(loaded.reading.location, "Oslo");
            assert_eq!(loaded.reading.conditions, "Light Snow");
            assert_eq!(loaded.units, Units::Imperial);
        }

        #[tokio::test]
        async fn undecodable_icon_still_yields_reading() {
            let server = MockServer::start().await;
            mount_weather(&server).await;
            Mock::given(method("GET"))
                .and(path("/img/wn/13d@2x.png"))
                .respond_with(ResponseTemplate::new(200).set_body_string("not an image"))
                .mount(&server)
                .await;

            let loaded = load(services(&server), query()).await.unwrap();
            assert!(loaded.icon.is_none());

            let mut app = WeatherApp {
                window: WeatherWindow::default(),
                services: Ok(services(&server)),
            };
            let _ = app.update(Message::Loaded(Ok(loaded)));
            assert_eq!(app.window.phase(), Phase::Displaying);
        }

        #[tokio::test]
        async fn weather_failure_is_reported() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(500))
                .mount(&server)
                .await;

            let err = load(services(&server), query()).await.unwrap_err();
            assert!(matches!(err, WeatherError::RequestFailed(_)));
        }
    }

    #[test]
    fn unit_selection_is_applied() {
        let mut app = unconfigured_app();
        let _ = app.update(Message::UnitsSelected(Units::Imperial));

        assert_eq!(app.window.units(), Units::Imperial);
    }
}
