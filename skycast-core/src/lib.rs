//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind a provider abstraction
//! - The transformation layer: forecast rollup, scene selection, wall-clock
//!   formatting for a remote location
//! - A dashboard controller driven through a display port
//!
//! It is used by `skycast-cli`, but can also drive other display surfaces.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod locate;
pub mod model;
pub mod provider;
pub mod scene;
pub mod timefmt;

pub use config::Config;
pub use dashboard::{
    CurrentView, DashboardController, DisplayPort, ERROR_DISPLAY, ForecastCard,
};
pub use error::{TransportError, WeatherError};
pub use model::{
    CurrentConditions, DaySummary, ForecastSample, LocationQuery, Units, WeatherSnapshot,
};
pub use provider::{WeatherProvider, client_from_config, openweather::OpenWeatherClient};
pub use scene::{SceneMode, SceneState};
