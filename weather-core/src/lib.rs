//! Core library for the `weather` display.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherProvider` trait
//! - Shared domain models (city query, current weather, forecast entries)
//! - View state and search orchestration
//!
//! It is used by `weather-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod view;

pub use config::Config;
pub use forecast::noon_snapshots;
pub use model::{CityQuery, CurrentWeather, ErrorKind, ForecastEntry};
pub use provider::{FetchError, OpenWeatherClient, WeatherProvider};
pub use view::{Search, ViewState, WeatherApp};
