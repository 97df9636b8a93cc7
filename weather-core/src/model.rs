use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timestamp layout used by the forecast endpoint's `dt_txt` field.
pub const FORECAST_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A city name as typed by the user, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn parse(input: &str) -> Result<Self, ErrorKind> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ErrorKind::BlankInput);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CityQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location_name: String,
    pub country_code: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub condition_icon: String,
    pub condition_description: String,
}

/// One 3-hour slot of the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Raw `YYYY-MM-DD HH:MM:SS` text as delivered by the API.
    pub timestamp: String,
    pub temperature_c: f64,
    pub condition_icon: String,
    pub condition_description: String,
}

impl ForecastEntry {
    pub fn date(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, FORECAST_TIMESTAMP_FORMAT).ok()
    }
}

/// Failures the user gets to see. `Display` is the banner text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Please enter a city name.")]
    BlankInput,

    #[error("Invalid API key. Check your configuration.")]
    InvalidApiKey,

    #[error("City not found. Try again.")]
    CityNotFound,

    #[error("Unable to fetch weather data.")]
    Generic,
}
