use skycast_core::{CurrentView, DisplayPort, ForecastCard, SceneState};

/// Plain-text display port. A frame is buffered as the controller pushes
/// its pieces and printed once the forecast lands, so the scene's ambient
/// tone is already known.
#[derive(Debug, Default)]
pub struct TerminalDisplay {
    dark: bool,
    current: Option<CurrentView>,
    cards: Vec<ForecastCard>,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manual light/dark override, independent of the automatic day/night
    /// scene. Re-renders the last frame when one exists.
    pub fn toggle_theme(&mut self) {
        self.dark = !self.dark;
        self.render();
    }

    fn render(&self) {
        let Some(view) = &self.current else { return };

        let badge = if self.dark { "☾" } else { "☀" };
        println!();
        println!("{badge}  {}  ·  {}", view.place, view.local_time);
        println!(
            "   {}  {}  {}   feels like {}",
            view.icon, view.temperature, view.description, view.feels_like
        );
        println!(
            "   humidity {}  ·  wind {}  ·  pressure {}",
            view.humidity, view.wind, view.pressure
        );
        println!("   sunrise {}  ·  sunset {}", view.sunrise, view.sunset);

        if !self.cards.is_empty() {
            println!();
            for card in &self.cards {
                println!(
                    "   {}  {}  {}° / {}°",
                    card.label, card.icon, card.max, card.min
                );
            }
        }
    }
}

impl DisplayPort for TerminalDisplay {
    fn show_current(&mut self, view: &CurrentView) {
        self.current = Some(view.clone());
    }

    fn show_forecast(&mut self, cards: &[ForecastCard]) {
        self.cards = cards.to_vec();
        self.render();
    }

    fn apply_scene(&mut self, state: &SceneState) {
        if let Some(dark) = state.ambient_dark {
            self.dark = dark;
        }
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("⚠  {message}");
    }

    fn clear_error(&mut self) {}
}
