//! The dashboard controller: wires the provider, the forecast rollup, the
//! scene mapping and the time formatting together behind a display port,
//! so any front end that can show text and opacities can host it.

use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::{
    error::WeatherError,
    forecast,
    model::{CurrentConditions, DaySummary, LocationQuery, Units, WeatherSnapshot},
    provider::WeatherProvider,
    scene::{self, SceneState},
    timefmt,
};

/// How long a persistent display surface keeps a surfaced error visible
/// before dismissing it.
pub const ERROR_DISPLAY: Duration = Duration::from_millis(4200);

const EMPTY_INPUT_MESSAGE: &str = "Enter a city";
const TRANSPORT_MESSAGE: &str =
    "Unable to fetch weather. Check your connection or try another city.";

/// Display-ready fields for the current-conditions panel. All strings are
/// fully formatted; ports render them verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub place: String,
    pub local_time: String,
    pub temperature: String,
    pub feels_like: String,
    pub description: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub sunrise: String,
    pub sunset: String,
    pub icon: &'static str,
}

/// One forecast card: a weekday label, a terminal glyph, the provider's
/// image glyph for surfaces that can show it, and the day's bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub label: String,
    pub icon: &'static str,
    pub icon_url: String,
    pub max: i32,
    pub min: i32,
}

/// Everything a front end must provide to host the dashboard. Keeping the
/// controller behind this seam keeps the transformation layer testable
/// without a live display surface.
pub trait DisplayPort {
    fn show_current(&mut self, view: &CurrentView);
    fn show_forecast(&mut self, cards: &[ForecastCard]);
    fn apply_scene(&mut self, state: &SceneState);
    /// Errors are transient; surfaces with a persistent error area should
    /// dismiss after [`ERROR_DISPLAY`].
    fn show_error(&mut self, message: &str);
    fn clear_error(&mut self);
}

pub struct DashboardController<P, D> {
    provider: P,
    display: D,
    units: Units,
    active_location: String,
}

impl<P: WeatherProvider, D: DisplayPort> DashboardController<P, D> {
    pub fn new(provider: P, display: D) -> Self {
        Self {
            provider,
            display,
            units: Units::default(),
            active_location: String::new(),
        }
    }

    pub fn units(&self) -> Units {
        self.units
    }

    /// Seed the unit system without triggering a refresh.
    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    /// Resolved place name of the last successful fetch; empty before one.
    pub fn active_location(&self) -> &str {
        &self.active_location
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Fetch and render one frame. Failures never propagate: they surface
    /// through the display port and leave the prior rendered state alone.
    pub async fn refresh(&mut self, query: &LocationQuery) {
        self.display.clear_error();

        if let LocationQuery::City(name) = query {
            if name.trim().is_empty() {
                self.display.show_error(EMPTY_INPUT_MESSAGE);
                return;
            }
        }

        match self.provider.fetch(query, self.units).await {
            Ok(snapshot) => self.render(&snapshot),
            Err(err) => {
                debug!(%err, "refresh failed");
                self.display.show_error(&error_message(&err));
            }
        }
    }

    /// Geolocation entry point. This path runs unprompted, so failures are
    /// swallowed and nothing reaches the display.
    pub async fn refresh_from_coords(&mut self, lat: f64, lon: f64) {
        let query = LocationQuery::Coords { lat, lon };
        match self.provider.fetch(&query, self.units).await {
            Ok(snapshot) => {
                self.display.clear_error();
                self.render(&snapshot);
            }
            Err(err) => debug!(%err, "silent location refresh failed"),
        }
    }

    /// Flip the unit system. The provider returns values pre-converted, so
    /// an active location is re-fetched rather than converted in place.
    pub async fn toggle_units(&mut self) {
        self.units = self.units.toggled();
        if !self.active_location.is_empty() {
            let query = LocationQuery::City(self.active_location.clone());
            self.refresh(&query).await;
        }
    }

    fn render(&mut self, snapshot: &WeatherSnapshot) {
        let current = &snapshot.current;
        let visuals = scene::classify(&current.condition);
        let is_day = scene::is_daylight(
            current.observed_at,
            current.sunrise,
            current.sunset,
            current.tz_offset,
        );

        self.display
            .show_current(&current_view(current, self.units, visuals.icon));
        self.display
            .apply_scene(&scene::scene_state(visuals.mode, Some(is_day)));

        let days = forecast::group_by_day(&snapshot.samples);
        let today = Utc::now().date_naive();
        let cards: Vec<ForecastCard> = forecast::upcoming_days(&days, today)
            .iter()
            .map(forecast_card)
            .collect();
        self.display.show_forecast(&cards);

        self.active_location = current.place.clone();
    }
}

fn error_message(err: &WeatherError) -> String {
    match err {
        WeatherError::EmptyInput => EMPTY_INPUT_MESSAGE.to_string(),
        WeatherError::LocationNotFound { message } => message.clone(),
        WeatherError::Transport(_) => TRANSPORT_MESSAGE.to_string(),
    }
}

fn current_view(current: &CurrentConditions, units: Units, icon: &'static str) -> CurrentView {
    let tz = current.tz_offset;

    CurrentView {
        place: format!("{}, {}", current.place, current.country),
        local_time: timefmt::local_date_time(current.observed_at, tz),
        temperature: format!("{}{}", current.temperature.round() as i32, units.temp_suffix()),
        feels_like: format!("{}{}", current.feels_like.round() as i32, units.temp_suffix()),
        description: current.description.clone(),
        humidity: format!("{}%", current.humidity),
        wind: format!("{} {}", current.wind_speed, units.wind_suffix()),
        pressure: format!("{} hPa", current.pressure),
        sunrise: timefmt::local_time(current.sunrise, tz),
        sunset: timefmt::local_time(current.sunset, tz),
        icon,
    }
}

fn forecast_card(day: &DaySummary) -> ForecastCard {
    ForecastCard {
        label: day.date.format("%a").to_string(),
        icon: scene::classify(&day.condition).icon,
        icon_url: scene::icon_url(&day.icon),
        max: day.max,
        min: day.min,
    }
}
