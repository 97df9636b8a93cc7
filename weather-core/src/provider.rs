use crate::model::{CityQuery, CurrentWeather, ErrorKind, ForecastEntry};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Message the service puts in its error envelope for an unknown city.
pub const CITY_NOT_FOUND: &str = "city not found";

/// Source of weather data for the view.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions, or the classified failure to show the user.
    async fn fetch_current(&self, city: &CityQuery) -> Result<CurrentWeather, ErrorKind>;

    /// Noon snapshots of the multi-day forecast. Failures yield an empty list.
    async fn fetch_forecast(&self, city: &CityQuery) -> Vec<ForecastEntry>;
}

/// Low-level failure of a single request, kept for diagnostics.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    /// HTTP 200 whose body is an error envelope rather than a payload.
    #[error("service reported error {code}: {message}")]
    SoftError { code: String, message: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Map to the user-facing category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Status { status, .. } if *status == StatusCode::UNAUTHORIZED => {
                ErrorKind::InvalidApiKey
            }
            Self::Status {
                message: Some(m), ..
            } if m == CITY_NOT_FOUND => ErrorKind::CityNotFound,
            Self::SoftError { message, .. } if message == CITY_NOT_FOUND => {
                ErrorKind::CityNotFound
            }
            _ => ErrorKind::Generic,
        }
    }
}
