//! Mapping from weather conditions to the visual state of the dashboard:
//! a glyph, an ambient day/night tone and layer opacities.

/// Visual mode a condition renders as. Several conditions share a mode
/// (mist and fog render as clouds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneMode {
    Clear,
    Clouds,
    Rain,
    Thunder,
    Snow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visuals {
    pub icon: &'static str,
    pub mode: SceneMode,
}

/// Ambient scene parameters. `ambient_dark` is tri-state: `None` means the
/// day/night signal was unknown and the prior ambient state stays as it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneState {
    pub ambient_dark: Option<bool>,
    pub rain_opacity: f32,
    pub sun_opacity: f32,
}

/// Case-insensitive substring match against a priority-ordered table;
/// first match wins, anything unmatched (including empty input) is clear
/// sky.
pub fn classify(condition: &str) -> Visuals {
    let lower = condition.to_lowercase();

    if lower.contains("cloud") {
        Visuals { icon: "☁️", mode: SceneMode::Clouds }
    } else if lower.contains("rain") || lower.contains("drizzle") {
        Visuals { icon: "🌧️", mode: SceneMode::Rain }
    } else if lower.contains("thunder") {
        Visuals { icon: "⛈️", mode: SceneMode::Thunder }
    } else if lower.contains("snow") {
        Visuals { icon: "❄️", mode: SceneMode::Snow }
    } else if lower.contains("mist") || lower.contains("fog") {
        Visuals { icon: "🌫️", mode: SceneMode::Clouds }
    } else {
        Visuals { icon: "☀️", mode: SceneMode::Clear }
    }
}

/// Rain washes the scene out and all but hides the sun; clouds dim it;
/// every other mode gets full sun and a dry rain layer.
pub fn scene_state(mode: SceneMode, is_day: Option<bool>) -> SceneState {
    let rain_opacity = if mode == SceneMode::Rain { 0.92 } else { 0.0 };
    let sun_opacity = match mode {
        SceneMode::Rain => 0.18,
        SceneMode::Clouds => 0.48,
        SceneMode::Clear | SceneMode::Thunder | SceneMode::Snow => 1.0,
    };

    SceneState {
        ambient_dark: is_day.map(|day| !day),
        rain_opacity,
        sun_opacity,
    }
}

/// A moment is day when its location-local instant falls within
/// `[sunrise, sunset)`. All three timestamps are shifted by the same
/// offset before comparing.
pub fn is_daylight(observed_at: i64, sunrise: i64, sunset: i64, tz_offset: i64) -> bool {
    let local = observed_at.saturating_add(tz_offset);
    local >= sunrise.saturating_add(tz_offset) && local < sunset.saturating_add(tz_offset)
}

/// Provider glyph for a forecast card, for display surfaces that can show
/// images.
pub fn icon_url(icon_code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon_code}@2x.png")
}
