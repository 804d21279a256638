use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use weather_core::{
    Config, Units, WeatherProvider, WeatherReading, parse_location, provider::provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default units.
    Configure,

    /// Show current weather for a place name or "lat,lon".
    Show {
        /// Place name, e.g. "London", or coordinates, e.g. "40.7,-74.0".
        location: String,

        /// "metric" or "imperial"; defaults to the configured units.
        #[arg(long, value_parser = parse_units)]
        units: Option<Units>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, units } => show(&location, units).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }
    config.set_api_key(api_key);

    let options = Units::all().to_vec();
    let cursor = options
        .iter()
        .position(|u| *u == config.units)
        .unwrap_or(0);
    config.units = Select::new("Default units:", options)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read units")?;

    config.save()?;
    let path = Config::config_file_path()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(input: &str, units: Option<Units>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let location = parse_location(input)?;
    let units = units.unwrap_or(config.units);

    let provider = provider_from_config(&config)?;
    let reading = provider.fetch_readable(&location, units).await?;

    print!("{}", render(&reading, units));
    Ok(())
}

fn render(reading: &WeatherReading, units: Units) -> String {
    let symbol = units.temperature_symbol();
    let mut out = format!(
        "{}\n  {:.1}{symbol}, {}\n  Feels like: {:.1}{symbol}\n  Humidity:   {}%\n  Wind:       {} {}\n",
        reading.location,
        reading.temperature,
        reading.conditions,
        reading.feels_like,
        reading.humidity,
        reading.wind_speed,
        units.wind_speed_label(),
    );

    if let Some(observed_at) = reading.observed_at {
        let observed_at = observed_at.format("%Y-%m-%d %H:%M UTC");
        out.push_str(&format!("  Observed:   {observed_at}\n"));
    }

    out
}

fn parse_units(value: &str) -> Result<Units, String> {
    Units::try_from(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn reading() -> WeatherReading {
        WeatherReading {
            location: "Reykjavik".into(),
            temperature: 2.44,
            feels_like: -1.96,
            humidity: 87,
            conditions: "Light Snow".into(),
            wind_speed: 7.2,
            icon: Some("13n".into()),
            observed_at: DateTime::from_timestamp(1_700_000_000, 0),
        }
    }

    #[test]
    fn show_accepts_units_flag() {
        let args = ["weather", "show", "40.7,-74.0", "--units", "imperial"];
        let cli = Cli::try_parse_from(args).expect("valid args");

        match cli.command {
            Command::Show { location, units } => {
                assert_eq!(location, "40.7,-74.0");
                assert_eq!(units, Some(Units::Imperial));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_rejects_unknown_units() {
        let args = ["weather", "show", "Paris", "--units", "kelvin"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn render_uses_selected_units() {
        let text = render(&reading(), Units::Metric);

        assert!(text.starts_with("Reykjavik\n"));
        assert!(text.contains("2.4°C, Light Snow"));
        assert!(text.contains("Feels like: -2.0°C"));
        assert!(text.contains("Humidity:   87%"));
        assert!(text.contains("Wind:       7.2 m/s"));
        assert!(text.contains("Observed:   2023-11-14 22:13 UTC"));
    }

    #[test]
    fn render_imperial_labels() {
        let text = render(&reading(), Units::Imperial);

        assert!(text.contains("°F"));
        assert!(text.contains("mph"));
    }

    #[test]
    fn render_skips_unknown_observation_time() {
        let mut reading = reading();
        reading.observed_at = None;

        assert!(!render(&reading, Units::Metric).contains("Observed"));
    }
}
