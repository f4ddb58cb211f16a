use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use skycast_core::{
    CurrentConditions, CurrentView, DashboardController, DisplayPort, ForecastCard,
    ForecastSample, LocationQuery, SceneState, TransportError, Units, WeatherError,
    WeatherProvider, WeatherSnapshot,
};

#[derive(Debug, Default)]
struct RecordingPort {
    current: Option<CurrentView>,
    cards: Vec<ForecastCard>,
    scenes: Vec<SceneState>,
    errors: Vec<String>,
    clears: usize,
}

impl DisplayPort for RecordingPort {
    fn show_current(&mut self, view: &CurrentView) {
        self.current = Some(view.clone());
    }

    fn show_forecast(&mut self, cards: &[ForecastCard]) {
        self.cards = cards.to_vec();
    }

    fn apply_scene(&mut self, state: &SceneState) {
        self.scenes.push(*state);
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn clear_error(&mut self) {
        self.clears += 1;
    }
}

#[derive(Debug, Clone, Default)]
struct ScriptedProvider {
    responses: Arc<Mutex<VecDeque<Result<WeatherSnapshot, WeatherError>>>>,
    calls: Arc<Mutex<Vec<(LocationQuery, Units)>>>,
}

impl ScriptedProvider {
    fn push_ok(&self, snapshot: WeatherSnapshot) {
        self.responses.lock().unwrap().push_back(Ok(snapshot));
    }

    fn push_err(&self, err: WeatherError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    fn calls(&self) -> Vec<(LocationQuery, Units)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for ScriptedProvider {
    async fn fetch(
        &self,
        query: &LocationQuery,
        units: Units,
    ) -> Result<WeatherSnapshot, WeatherError> {
        self.calls.lock().unwrap().push((query.clone(), units));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(WeatherError::LocationNotFound {
                message: "no scripted response".to_string(),
            }))
    }
}

fn midday_timestamp(date: NaiveDate) -> i64 {
    date.and_hms_opt(12, 0, 0)
        .expect("valid time")
        .and_utc()
        .timestamp()
}

fn sample_on(date: NaiveDate, temp: f64) -> ForecastSample {
    ForecastSample {
        dt: midday_timestamp(date),
        temp_min: temp - 2.0,
        temp_max: temp + 2.0,
        condition: "Clouds".to_string(),
        icon: "03d".to_string(),
    }
}

fn paris_snapshot(samples: Vec<ForecastSample>) -> WeatherSnapshot {
    let now = Utc::now().timestamp();

    WeatherSnapshot {
        current: CurrentConditions {
            place: "Paris".to_string(),
            country: "FR".to_string(),
            observed_at: now,
            tz_offset: 3600,
            temperature: 12.3,
            feels_like: 10.1,
            humidity: 82,
            wind_speed: 4.1,
            pressure: 1007,
            sunrise: now - 3600,
            sunset: now + 3600,
            condition: "Rain".to_string(),
            description: "light rain".to_string(),
        },
        samples,
    }
}

fn transport_error() -> WeatherError {
    let parse = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
    WeatherError::Transport(TransportError::Parse(parse))
}

#[tokio::test]
async fn city_query_renders_five_future_days_excluding_today() {
    let today = Utc::now().date_naive();
    let samples: Vec<ForecastSample> = (0..6)
        .map(|i| sample_on(today + Duration::days(i), 10.0))
        .collect();

    let provider = ScriptedProvider::default();
    provider.push_ok(paris_snapshot(samples));

    let mut controller = DashboardController::new(provider.clone(), RecordingPort::default());
    controller
        .refresh(&LocationQuery::City("Paris".to_string()))
        .await;

    let port = controller.display();
    assert_eq!(port.cards.len(), 5);

    let expected: Vec<String> = (1..=5)
        .map(|i| (today + Duration::days(i)).format("%a").to_string())
        .collect();
    let labels: Vec<String> = port.cards.iter().map(|c| c.label.clone()).collect();
    assert_eq!(labels, expected);

    let view = port.current.as_ref().expect("current rendered");
    assert_eq!(view.place, "Paris, FR");
    assert!(port.errors.is_empty());
    assert_eq!(controller.active_location(), "Paris");
}

#[tokio::test]
async fn provider_message_surfaces_and_previous_render_stays() {
    let today = Utc::now().date_naive();
    let provider = ScriptedProvider::default();
    provider.push_ok(paris_snapshot(vec![sample_on(
        today + Duration::days(1),
        10.0,
    )]));
    provider.push_err(WeatherError::LocationNotFound {
        message: "city not found".to_string(),
    });

    let mut controller = DashboardController::new(provider.clone(), RecordingPort::default());
    controller
        .refresh(&LocationQuery::City("Paris".to_string()))
        .await;
    controller
        .refresh(&LocationQuery::City("Atlantis".to_string()))
        .await;

    let port = controller.display();
    assert_eq!(port.errors, vec!["city not found".to_string()]);
    // The last successful frame is still what the port holds.
    assert_eq!(
        port.current.as_ref().expect("previous frame").place,
        "Paris, FR"
    );
    assert_eq!(controller.active_location(), "Paris");
}

#[tokio::test]
async fn transport_failure_surfaces_a_generic_message() {
    let provider = ScriptedProvider::default();
    provider.push_err(transport_error());

    let mut controller = DashboardController::new(provider, RecordingPort::default());
    controller
        .refresh(&LocationQuery::City("Paris".to_string()))
        .await;

    assert_eq!(
        controller.display().errors,
        vec!["Unable to fetch weather. Check your connection or try another city.".to_string()]
    );
}

#[tokio::test]
async fn blank_city_is_rejected_before_any_fetch() {
    let provider = ScriptedProvider::default();

    let mut controller = DashboardController::new(provider.clone(), RecordingPort::default());
    controller
        .refresh(&LocationQuery::City("   ".to_string()))
        .await;

    let port = controller.display();
    // refresh always starts by clearing whatever error was on screen
    assert_eq!(port.clears, 1);
    assert_eq!(port.errors, vec!["Enter a city".to_string()]);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn toggling_units_refetches_the_active_location() {
    let today = Utc::now().date_naive();
    let provider = ScriptedProvider::default();
    provider.push_ok(paris_snapshot(vec![sample_on(
        today + Duration::days(1),
        10.0,
    )]));
    provider.push_ok(paris_snapshot(vec![sample_on(
        today + Duration::days(1),
        50.0,
    )]));

    let mut controller = DashboardController::new(provider.clone(), RecordingPort::default());
    controller
        .refresh(&LocationQuery::City("Paris".to_string()))
        .await;
    controller.toggle_units().await;

    assert_eq!(controller.units(), Units::Imperial);
    let calls = provider.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        (LocationQuery::City("Paris".to_string()), Units::Imperial)
    );

    // Values come back pre-converted; only the suffix proves the switch.
    let view = controller.display().current.as_ref().expect("frame");
    assert!(view.temperature.ends_with("°F"));
}

#[tokio::test]
async fn toggling_units_without_an_active_location_stays_offline() {
    let provider = ScriptedProvider::default();

    let mut controller = DashboardController::new(provider.clone(), RecordingPort::default());
    controller.toggle_units().await;

    assert_eq!(controller.units(), Units::Imperial);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn coordinate_refresh_failures_stay_silent() {
    let provider = ScriptedProvider::default();
    provider.push_err(WeatherError::LocationNotFound {
        message: "nothing here".to_string(),
    });

    let mut controller = DashboardController::new(provider.clone(), RecordingPort::default());
    controller.refresh_from_coords(48.85, 2.35).await;

    let port = controller.display();
    assert!(port.errors.is_empty());
    assert!(port.current.is_none());
}

#[tokio::test]
async fn coordinate_refresh_success_renders_like_any_other() {
    let today = Utc::now().date_naive();
    let provider = ScriptedProvider::default();
    provider.push_ok(paris_snapshot(vec![sample_on(
        today + Duration::days(1),
        10.0,
    )]));

    let mut controller = DashboardController::new(provider.clone(), RecordingPort::default());
    controller.refresh_from_coords(48.85, 2.35).await;

    assert_eq!(
        provider.calls()[0].0,
        LocationQuery::Coords { lat: 48.85, lon: 2.35 }
    );
    assert_eq!(controller.active_location(), "Paris");
    assert!(controller.display().current.is_some());
}

#[tokio::test]
async fn daytime_rain_scene_reaches_the_port() {
    let today = Utc::now().date_naive();
    let provider = ScriptedProvider::default();
    // observed_at sits inside [sunrise, sunset) in the fixture, so this is day.
    provider.push_ok(paris_snapshot(vec![sample_on(
        today + Duration::days(1),
        10.0,
    )]));

    let mut controller = DashboardController::new(provider, RecordingPort::default());
    controller
        .refresh(&LocationQuery::City("Paris".to_string()))
        .await;

    let scene = controller
        .display()
        .scenes
        .last()
        .expect("scene applied");
    assert_eq!(scene.ambient_dark, Some(false));
    assert_eq!(scene.rain_opacity, 0.92);
    assert_eq!(scene.sun_opacity, 0.18);
}
