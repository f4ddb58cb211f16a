use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{InquireError, Select, Text};
use tracing::debug;

use skycast_core::{
    Config, DashboardController, LocationQuery, OpenWeatherClient, Units, client_from_config,
    locate,
};

use crate::display::TerminalDisplay;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitsArg {
    Metric,
    Imperial,
}

impl From<UnitsArg> for Units {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::Metric => Units::Metric,
            UnitsArg::Imperial => Units::Imperial,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and preferred units.
    Configure,

    /// Render one dashboard frame for a city and exit.
    Show {
        /// City name, e.g. "Paris".
        city: String,

        #[arg(long, value_enum)]
        units: Option<UnitsArg>,
    },

    /// Render one dashboard frame for the current (IP-derived) location.
    Here {
        #[arg(long, value_enum)]
        units: Option<UnitsArg>,
    },

    /// Interactive dashboard prompt loop.
    Dash {
        /// Optional city to load before the first prompt.
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, units } => show(city, units).await,
            Command::Here { units } => here(units).await,
            Command::Dash { city } => dash(city).await,
        }
    }
}

type Controller = DashboardController<OpenWeatherClient, TerminalDisplay>;

fn build_controller(units_flag: Option<UnitsArg>) -> Result<Controller> {
    let config = Config::load()?;
    let client = client_from_config(&config)?;

    let mut controller = DashboardController::new(client, TerminalDisplay::new());
    let units = units_flag.map_or_else(|| config.default_units(), Units::from);
    controller.set_units(units);

    Ok(controller)
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeather API key:").prompt()?;
    config.set_api_key(api_key.trim().to_string());

    let units = Select::new("Default units:", vec!["metric", "imperial"]).prompt()?;
    config.set_default_units(if units == "imperial" {
        Units::Imperial
    } else {
        Units::Metric
    });

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn show(city: String, units: Option<UnitsArg>) -> Result<()> {
    let mut controller = build_controller(units)?;
    controller.refresh(&LocationQuery::City(city)).await;
    Ok(())
}

async fn here(units: Option<UnitsArg>) -> Result<()> {
    let mut controller = build_controller(units)?;

    match locate::detect_coords().await {
        Some((lat, lon)) => controller.refresh_from_coords(lat, lon).await,
        // This path runs without being asked for; stay quiet.
        None => debug!("geoip lookup failed; nothing to render"),
    }

    Ok(())
}

async fn dash(city: Option<String>) -> Result<()> {
    let mut controller = build_controller(None)?;

    match city {
        Some(city) => controller.refresh(&LocationQuery::City(city)).await,
        None => {
            if let Some((lat, lon)) = locate::detect_coords().await {
                controller.refresh_from_coords(lat, lon).await;
            }
        }
    }

    loop {
        let line = match Text::new("skycast›")
            .with_help_message("city name · :units · :here · :theme · :quit")
            .prompt()
        {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match line.trim() {
            ":quit" | ":q" => break,
            ":units" | ":u" => controller.toggle_units().await,
            ":here" | ":l" => {
                if let Some((lat, lon)) = locate::detect_coords().await {
                    controller.refresh_from_coords(lat, lon).await;
                }
            }
            ":theme" | ":t" => controller.display_mut().toggle_theme(),
            city => {
                controller
                    .refresh(&LocationQuery::City(city.to_string()))
                    .await;
            }
        }
    }

    Ok(())
}
