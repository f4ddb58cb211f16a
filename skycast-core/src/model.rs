use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unit system understood by the provider; the value is passed through as
/// the `units` query parameter and the provider returns figures
/// pre-converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_query(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temp_suffix(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn wind_suffix(self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Units::Metric => Units::Imperial,
            Units::Imperial => Units::Metric,
        }
    }
}

/// What the user asked for: a free-text city name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coords { lat: f64, lon: f64 },
}

/// Immutable snapshot of current conditions at a place, one per fetch.
/// Timestamps are UTC seconds; `tz_offset` is the location's UTC offset in
/// seconds, used to shift instants to local wall-clock time for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub place: String,
    pub country: String,
    pub observed_at: i64,
    pub tz_offset: i64,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub pressure: u32,
    pub sunrise: i64,
    pub sunset: i64,
    pub condition: String,
    pub description: String,
}

/// One 3-hour forecast window as delivered by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub dt: i64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub condition: String,
    pub icon: String,
}

/// Per-calendar-day rollup of forecast samples. Derived on every fetch,
/// never persisted. The date is the provider's own (UTC) day boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub min: i32,
    pub max: i32,
    pub condition: String,
    pub icon: String,
}

/// Result of one refresh cycle: current conditions plus the flat forecast
/// sample list, both for the same location and unit system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub samples: Vec<ForecastSample>,
}
