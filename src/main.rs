//! # ShoreSquad Weather Entry Point
//!
//! This binary wires the weather widget together: it loads configuration,
//! builds the client, presenter, toast and overlay explicitly, runs the
//! fetch-fallback-render pipeline once and prints the resulting grid.

// Test modules
#[cfg(test)]
mod tests;

mod cli;

use clap::Parser;
use shoresquad::{
    config::Config,
    pipeline::WeatherManager,
    presenter::{CardGrid, Presenter},
    pulse::Pulse,
    ui::{LoadingOverlay, Toast},
    weather_data::WeatherClient,
};
use std::time::Duration;
use tracing::{debug, info};

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    if let Some(url) = args.forecast_url {
        config.weather.forecast_url = url;
    }
    if let Some(url) = args.reading_url {
        config.weather.reading_url = url;
    }

    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let client = WeatherClient::new(&config.weather)?;
        let presenter = Presenter::new(
            Some(CardGrid::new()),
            &config.display,
            &config.weather.provider_name,
        );
        let toast = Toast::new(Duration::from_millis(config.display.toast_duration_ms));
        let mut manager = WeatherManager::new(client, presenter, toast, LoadingOverlay::new());

        let state = manager.run().await;
        info!(?state, "weather widget ready");
        print_grid(manager.presenter(), args.html);

        if let Some(secs) = args.hold {
            hold_with_pulse(&mut manager, &config, Duration::from_secs(secs)).await;
        }

        anyhow::Ok(())
    })
}

fn print_grid(presenter: &Presenter<CardGrid>, html: bool) {
    if let Some(grid) = presenter.region() {
        if html {
            print!("{}", grid.render_html());
        } else {
            print!("{}", grid.render_ascii());
        }
    }
}

/// Keep the rendered grid around and apply opacity pulses until `hold` elapses.
async fn hold_with_pulse(
    manager: &mut WeatherManager<CardGrid, Toast>,
    config: &Config,
    hold: Duration,
) {
    let (handle, mut opacity) = Pulse::from_config(&config.display).spawn();
    let deadline = tokio::time::sleep(hold);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            changed = opacity.changed() => {
                if changed.is_err() {
                    break;
                }
                let value = *opacity.borrow_and_update();
                if let Some(grid) = manager.presenter_mut().region_mut() {
                    grid.set_opacity(value);
                    debug!(opacity = value, "weather grid pulse");
                }
            }
        }
    }

    handle.abort();
    let active = manager.notifier_mut().active().len();
    debug!(active_toasts = active, "hold finished");
}
