use crate::{
    Config,
    error::WeatherError,
    model::{LocationQuery, Units, WeatherSnapshot},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Seam between the dashboard and a concrete weather backend. The backend
/// is an opaque collaborator: given a location and a unit system it either
/// produces a full snapshot or one of the [`WeatherError`] conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(
        &self,
        query: &LocationQuery,
        units: Units,
    ) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the OpenWeather client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `skycast configure` and enter your OpenWeather API key."
        )
    })?;

    Ok(OpenWeatherClient::new(api_key.to_owned()))
}
