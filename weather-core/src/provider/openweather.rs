use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    config::{Config, DEFAULT_BASE_URL},
    forecast::noon_snapshots,
    model::{CityQuery, CurrentWeather, ErrorKind, ForecastEntry},
};

use super::{FetchError, WeatherProvider};

/// Client for the OpenWeather current-weather and 5-day/3-hour forecast endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_base_url(config.api_key().to_string(), &config.base_url)
    }

    pub async fn try_fetch_current(&self, city: &CityQuery) -> Result<CurrentWeather, FetchError> {
        let parsed: OwCurrentResponse = self.get("weather", city).await?;
        Ok(parsed.into())
    }

    /// Full 3-hourly forecast, before the noon filter.
    pub async fn try_fetch_forecast(
        &self,
        city: &CityQuery,
    ) -> Result<Vec<ForecastEntry>, FetchError> {
        let parsed: OwForecastResponse = self.get("forecast", city).await?;
        Ok(parsed.list.into_iter().map(Into::into).collect())
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, city: &CityQuery) -> Result<T, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, city = %city, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<OwErrorBody>(&body)
                .ok()
                .and_then(|e| e.message);
            debug!(%status, body = %truncate_body(&body), "OpenWeather returned an error status");
            return Err(FetchError::Status { status, message });
        }

        let value: Value = serde_json::from_str(&body)?;
        if let Some(err) = soft_error(&value) {
            return Err(err);
        }

        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip_all, fields(city = %city))]
    async fn fetch_current(&self, city: &CityQuery) -> Result<CurrentWeather, ErrorKind> {
        self.try_fetch_current(city).await.map_err(|err| {
            warn!(error = %err, "current weather request failed");
            err.kind()
        })
    }

    #[instrument(skip_all, fields(city = %city))]
    async fn fetch_forecast(&self, city: &CityQuery) -> Vec<ForecastEntry> {
        match self.try_fetch_forecast(city).await {
            Ok(entries) => noon_snapshots(entries),
            Err(err) => {
                warn!(error = %err, "forecast request failed");
                Vec::new()
            }
        }
    }
}

/// Large icon for the current-conditions panel.
pub fn icon_url(icon_base_url: &str, code: &str) -> String {
    format!("{}/{code}@2x.png", icon_base_url.trim_end_matches('/'))
}

/// Small icon for a forecast day card.
pub fn small_icon_url(icon_base_url: &str, code: &str) -> String {
    format!("{}/{code}.png", icon_base_url.trim_end_matches('/'))
}

/// Detect the `{"cod": "404", "message": "..."}` envelope some configurations
/// deliver with HTTP 200.
fn soft_error(value: &Value) -> Option<FetchError> {
    let code = match value.get("cod")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if code == "200" {
        return None;
    }

    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(FetchError::SoftError { code, message })
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default)]
    icon: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    sys: OwSys,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastItem {
    dt_txt: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastItem>,
}

fn condition(weather: Vec<OwWeather>) -> (String, String) {
    weather
        .into_iter()
        .next()
        .map(|w| (w.icon, w.description))
        .unwrap_or_else(|| (String::new(), "Unknown".to_string()))
}

impl From<OwCurrentResponse> for CurrentWeather {
    fn from(r: OwCurrentResponse) -> Self {
        let (condition_icon, condition_description) = condition(r.weather);
        Self {
            location_name: r.name,
            country_code: r.sys.country,
            temperature_c: r.main.temp,
            feels_like_c: r.main.feels_like,
            humidity_pct: r.main.humidity,
            wind_speed_mps: r.wind.speed,
            condition_icon,
            condition_description,
        }
    }
}

impl From<OwForecastItem> for ForecastEntry {
    fn from(item: OwForecastItem) -> Self {
        let (condition_icon, condition_description) = condition(item.weather);
        Self {
            timestamp: item.dt_txt,
            temperature_c: item.main.temp,
            condition_icon,
            condition_description,
        }
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
