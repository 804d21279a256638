//! Condition icons: download, decode and scale.
//!
//! Icons are decoration. [`IconFetcher::fetch_best_effort`] logs failures and
//! returns `None` so a reading is always shown, with or without its icon.

use std::time::Duration;

use anyhow::Context;
use image::imageops::FilterType;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::WeatherError;

pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org";

/// Icons are scaled to a square of this many pixels.
pub const ICON_SIZE: u32 = 100;

/// Decoded RGBA8 pixels, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Icon {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Icon")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct IconFetcher {
    base_url: String,
    http: Client,
}

impl IconFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for weather icons")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn icon_url(&self, code: &str) -> String {
        format!("{}/img/wn/{code}@2x.png", self.base_url)
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self, code: &str) -> Result<Icon, WeatherError> {
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            let reason = format!("invalid icon code '{code}'");
            return Err(WeatherError::IconUnavailable(reason));
        }

        let res = self
            .http
            .get(self.icon_url(code))
            .send()
            .await
            .map_err(|e| WeatherError::IconUnavailable(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::IconUnavailable(format!("HTTP {status}")));
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|e| WeatherError::IconUnavailable(e.to_string()))?;
        decode_icon(&bytes)
    }

    pub async fn fetch_best_effort(&self, code: &str) -> Option<Icon> {
        match self.fetch(code).await {
            Ok(icon) => Some(icon),
            Err(err) => {
                debug!(%code, error = %err, "Skipping weather icon");
                None
            }
        }
    }
}

pub fn decode_icon(bytes: &[u8]) -> Result<Icon, WeatherError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| WeatherError::IconUnavailable(format!("cannot decode image: {e}")))?
        .resize_exact(ICON_SIZE, ICON_SIZE, FilterType::Lanczos3)
        .to_rgba8();

    Ok(Icon {
        width: img.width(),
        height: img.height(),
        rgba: img.into_raw(),
    })
}
