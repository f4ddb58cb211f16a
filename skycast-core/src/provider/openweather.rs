use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{TransportError, WeatherError},
    model::{CurrentConditions, ForecastSample, LocationQuery, Units, WeatherSnapshot},
};

use super::WeatherProvider;

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_URL)
    }

    /// Point the client somewhere else, e.g. a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn location_params(query: &LocationQuery) -> Vec<(&'static str, String)> {
        match query {
            LocationQuery::City(name) => vec![("q", name.clone())],
            LocationQuery::Coords { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        }
    }

    async fn get_body(
        &self,
        endpoint: &str,
        query: &LocationQuery,
        units: Units,
    ) -> Result<String, TransportError> {
        let mut params = Self::location_params(query);
        params.push(("units", units.as_query().to_string()));
        params.push(("appid", self.api_key.clone()));

        let url = format!("{}/{endpoint}", self.base_url);
        let res = self.http.get(&url).query(&params).send().await?;
        debug!(endpoint, status = %res.status(), "openweather response");

        Ok(res.text().await?)
    }

    async fn fetch_current(
        &self,
        query: &LocationQuery,
        units: Units,
    ) -> Result<CurrentConditions, WeatherError> {
        let body = self.get_body("weather", query, units).await?;

        // The provider signals unresolved locations in-band: a `cod` field
        // that is not 200 (an integer on success, a string on failure).
        let status: OwStatus = serde_json::from_str(&body).map_err(TransportError::from)?;
        if let Some(cod) = status.cod {
            if cod.as_i64() != 200 {
                return Err(WeatherError::LocationNotFound {
                    message: status
                        .message
                        .unwrap_or_else(|| "city not found".to_string()),
                });
            }
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(TransportError::from)?;
        Ok(parsed.into_conditions())
    }

    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
        units: Units,
    ) -> Result<Vec<ForecastSample>, WeatherError> {
        let body = self.get_body("forecast", query, units).await?;

        // A body without `list` is an empty forecast, not an error.
        let parsed: OwForecastResponse =
            serde_json::from_str(&body).map_err(TransportError::from)?;
        Ok(parsed
            .list
            .into_iter()
            .map(OwForecastEntry::into_sample)
            .collect())
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    /// Two independent requests, current conditions first; the forecast is
    /// only attempted once the city resolved.
    async fn fetch(
        &self,
        query: &LocationQuery,
        units: Units,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let current = self.fetch_current(query, units).await?;
        let samples = self.fetch_forecast(query, units).await?;

        Ok(WeatherSnapshot { current, samples })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCod {
    Num(i64),
    Text(String),
}

impl OwCod {
    fn as_i64(&self) -> i64 {
        match self {
            OwCod::Num(n) => *n,
            OwCod::Text(s) => s.parse().unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwStatus {
    cod: Option<OwCod>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    #[serde(default)]
    timezone: i64,
    main: OwMain,
    wind: OwWind,
    sys: OwSys,
    weather: Vec<OwWeather>,
}

impl OwCurrentResponse {
    fn into_conditions(self) -> CurrentConditions {
        let (condition, description) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        CurrentConditions {
            place: self.name,
            country: self.sys.country.unwrap_or_default(),
            observed_at: self.dt,
            tz_offset: self.timezone,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            pressure: self.main.pressure,
            sunrise: self.sys.sunrise,
            sunset: self.sys.sunset,
            condition,
            description,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

impl OwForecastEntry {
    fn into_sample(self) -> ForecastSample {
        let (condition, icon) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.icon))
            .unwrap_or_default();

        ForecastSample {
            dt: self.dt,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            condition,
            icon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}
