//! Window state and the query cycle, independent of rendering.

use iced::widget::image;
use weather_core::{
    Location, LocationInputError, Units, WeatherError, WeatherReading, parse_location,
};

pub const STATUS_FETCHING: &str = "Fetching weather data...";
pub const STATUS_FAILED: &str = "Error fetching weather data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    Displaying,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Warning,
    Error,
}

/// Modal message that blocks the window until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: &'static str,
    pub message: String,
}

/// A validated request, ready to hand to the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub location: Location,
    pub units: Units,
}

/// A reading as shown, with the units it was requested in.
#[derive(Debug, Clone)]
pub struct DisplayedReading {
    pub reading: WeatherReading,
    pub units: Units,
    pub icon: Option<image::Handle>,
}

impl DisplayedReading {
    pub fn temperature_text(&self) -> String {
        let symbol = self.units.temperature_symbol();
        format!("{:.1}{symbol}", self.reading.temperature)
    }

    pub fn conditions_text(&self) -> String {
        format!("Conditions: {}", self.reading.conditions)
    }

    pub fn feels_like_text(&self) -> String {
        let symbol = self.units.temperature_symbol();
        format!("Feels like: {:.1}{symbol}", self.reading.feels_like)
    }

    pub fn humidity_text(&self) -> String {
        format!("Humidity: {}%", self.reading.humidity)
    }

    pub fn wind_text(&self) -> String {
        let label = self.units.wind_speed_label();
        format!("Wind Speed: {} {label}", self.reading.wind_speed)
    }
}

#[derive(Debug)]
pub struct WeatherWindow {
    location_input: String,
    units: Units,
    phase: Phase,
    status: String,
    dialog: Option<Dialog>,
    display: Option<DisplayedReading>,
}

impl Default for WeatherWindow {
    fn default() -> Self {
        Self::new(Units::default())
    }
}

impl WeatherWindow {
    pub fn new(units: Units) -> Self {
        Self {
            location_input: String::new(),
            units,
            phase: Phase::Idle,
            status: String::new(),
            dialog: None,
            display: None,
        }
    }

    pub fn location_input(&self) -> &str {
        &self.location_input
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn display(&self) -> Option<&DisplayedReading> {
        self.display.as_ref()
    }

    pub fn is_fetching(&self) -> bool {
        self.phase == Phase::Fetching
    }

    pub fn set_location_input(&mut self, value: String) {
        self.location_input = value;
    }

    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    /// Start a query from the current input.
    ///
    /// Returns `None` when nothing should be fetched: a query is already in
    /// flight, a dialog is open, or the input was rejected.
    pub fn submit(&mut self) -> Option<Query> {
        if self.is_fetching() || self.dialog.is_some() {
            return None;
        }

        match parse_location(&self.location_input) {
            Ok(location) => {
                self.phase = Phase::Fetching;
                self.status = STATUS_FETCHING.to_string();
                Some(Query {
                    location,
                    units: self.units,
                })
            }
            Err(err @ LocationInputError::Empty) => {
                self.dialog = Some(Dialog {
                    kind: DialogKind::Warning,
                    title: "Input Error",
                    message: err.to_string(),
                });
                None
            }
            Err(err @ LocationInputError::InvalidCoordinates) => {
                self.fail(err.to_string());
                None
            }
        }
    }

    /// Apply the outcome of the query started by [`Self::submit`].
    pub fn finish(&mut self, outcome: Result<DisplayedReading, WeatherError>) {
        match outcome {
            Ok(display) => {
                let location = &display.reading.location;
                self.status = format!("Weather data for {location} loaded successfully");
                self.display = Some(display);
                self.phase = Phase::Displaying;
            }
            Err(err) => self.fail(err.to_string()),
        }
    }

    /// Show an error dialog; any reading already on screen is left alone.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = Phase::Error;
        self.status = STATUS_FAILED.to_string();
        self.dialog = Some(Dialog {
            kind: DialogKind::Error,
            title: "Error",
            message: message.into(),
        });
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
        if self.phase == Phase::Error {
            self.phase = if self.display.is_some() {
                Phase::Displaying
            } else {
                Phase::Idle
            };
        }
    }
}
