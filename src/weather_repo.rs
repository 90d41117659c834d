// Outdoor weather over HTTP (OpenWeatherMap response shape).

use crate::config::WeatherConfig;
use crate::error::TelemetryError;
use crate::models::WeatherSnapshot;
use crate::units::Scale;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Pluggable weather data source.
pub trait WeatherSource: Send + Sync {
    fn fetch(
        &self,
    ) -> impl std::future::Future<Output = Result<WeatherReport, TelemetryError>> + Send;
}

/// The fields of the weather response the widget uses. Temperatures in Celsius.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherReport {
    pub main: MainReading,
    /// Metres.
    #[serde(default)]
    pub visibility: f64,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReading {
    pub temp: f64,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub pressure: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub icon: String,
}

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass abbreviation for a bearing in degrees.
pub fn compass_abbr(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return "";
    }
    let idx = ((degrees.rem_euclid(360.0) / 22.5).round() as usize) % COMPASS.len();
    COMPASS[idx]
}

impl WeatherReport {
    pub fn into_snapshot(self, scale: Scale) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: scale.from_celsius(self.main.temp),
            scale,
            humidity_percent: self.main.humidity,
            pressure_hpa: self.main.pressure,
            visibility_km: self.visibility / 1000.0,
            wind_speed_ms: self.wind.speed,
            wind_direction: compass_abbr(self.wind.deg).to_string(),
            icon: self
                .weather
                .into_iter()
                .next()
                .map(|c| c.icon)
                .unwrap_or_default(),
        }
    }
}

pub struct OpenWeatherRepo {
    client: Client,
    url: String,
    city: String,
    api_key: String,
}

impl OpenWeatherRepo {
    pub fn new(config: &WeatherConfig) -> Result<Self, TelemetryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TelemetryError::configuration(format!("weather http client: {}", e)))?;
        Ok(Self {
            client,
            url: config.url.clone(),
            city: config.city.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl WeatherSource for OpenWeatherRepo {
    async fn fetch(&self) -> Result<WeatherReport, TelemetryError> {
        let unavailable = |e: reqwest::Error| TelemetryError::sensor(format!("weather: {}", e));
        self.client
            .get(&self.url)
            .query(&[
                ("q", self.city.as_str()),
                ("APPID", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json::<WeatherReport>()
            .await
            .map_err(unavailable)
    }
}
