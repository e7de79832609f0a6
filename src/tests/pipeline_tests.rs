//! # Weather Pipeline Scenarios
//!
//! These tests run the full fetch-fallback-render chain against a wiremock
//! server standing in for both data.gov.sg endpoints. Mock expectations are
//! verified when the server drops, so `.expect(n)` doubles as a call counter.

use chrono::NaiveDate;
use serde_json::json;
use shoresquad::{
    config::Config,
    pipeline::{PipelineState, WeatherManager},
    presenter::{CardGrid, DisplayRegion, Presenter},
    ui::{LoadingOverlay, Notifier, Severity},
    Card, DisplayCard, ErrorCard,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FORECAST_PATH: &str = "/v1/environment/4-day-weather-forecast";
const READING_PATH: &str = "/v1/environment/air-temperature";

/// Notifier that just remembers what it was asked to show.
#[derive(Default)]
struct RecordingNotifier {
    seen: Vec<(Severity, String)>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        self.seen.push((severity, message.to_string()));
    }
}

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.weather.forecast_url = format!("{}{}", server.uri(), FORECAST_PATH);
    config.weather.reading_url = format!("{}{}", server.uri(), READING_PATH);
    config
}

fn manager_with_grid(
    config: &Config,
    grid: CardGrid,
) -> WeatherManager<CardGrid, RecordingNotifier> {
    let client = shoresquad::weather_data::WeatherClient::new(&config.weather)
        .expect("client should build");
    let presenter = Presenter::new(Some(grid), &config.display, &config.weather.provider_name);
    WeatherManager::new(
        client,
        presenter,
        RecordingNotifier::default(),
        LoadingOverlay::new(),
    )
}

fn manager(config: &Config) -> WeatherManager<CardGrid, RecordingNotifier> {
    manager_with_grid(config, CardGrid::new())
}

fn forecast_body(days: &[(&str, &str)]) -> serde_json::Value {
    let forecasts: Vec<_> = days
        .iter()
        .map(|(date, text)| {
            json!({
                "date": date,
                "forecast": text,
                "relative_humidity": { "low": 60, "high": 90 },
                "temperature": { "low": 25, "high": 33 }
            })
        })
        .collect();
    json!({ "items": [{ "update_timestamp": "2026-10-16T05:30:00+08:00", "forecasts": forecasts }] })
}

fn weather_cards(grid: &CardGrid) -> Vec<&DisplayCard> {
    grid.cards()
        .iter()
        .map(|card| match card {
            Card::Weather(c) => c,
            other => panic!("expected weather card, got {:?}", other),
        })
        .collect()
}

fn grid_of<N: Notifier>(manager: &WeatherManager<CardGrid, N>) -> &CardGrid {
    manager.presenter().region().expect("grid should exist")
}

/// Four well-formed forecast days render four cards labelled by date.
#[tokio::test]
async fn forecast_success_renders_four_dated_cards() {
    let server = MockServer::start().await;
    let days = [
        ("2026-10-16", "Thundery showers"),
        ("2026-10-17", "Partly cloudy"),
        ("2026-10-18", "Fair and warm"),
        ("2026-10-19", "Windy"),
    ];

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(&days)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(READING_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut manager = manager(&config);
    let state = manager.run().await;

    assert_eq!(state, PipelineState::RenderedForecast);
    let cards = weather_cards(grid_of(&manager));
    assert_eq!(cards.len(), 4);
    for (card, (date, text)) in cards.iter().zip(days.iter()) {
        let expected = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .format(&config.display.date_format)
            .to_string();
        assert_eq!(card.day_label, expected);
        assert_eq!(card.primary_text, *text);
        assert_eq!(card.secondary_text, "Humidity: 60-90%");
    }
    assert!(manager.notifier().seen.is_empty());
    assert!(!manager.overlay().is_visible());
}

/// Fewer than four forecast days are shown as-is.
#[tokio::test]
async fn short_forecast_renders_fewer_cards() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(&[
            ("2026-10-16", "Fair"),
            ("2026-10-17", "Showers"),
        ])))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut manager = manager(&config);

    assert_eq!(manager.run().await, PipelineState::RenderedForecast);
    assert_eq!(grid_of(&manager).cards().len(), 2);
}

/// A primary HTTP 500 triggers exactly one fallback call and no primary retry.
#[tokio::test]
async fn primary_failure_calls_fallback_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(READING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "readings": [{ "station_id": "S109", "value": 31.6 }] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut manager = manager(&config);

    assert_eq!(manager.run().await, PipelineState::RenderedReading);

    let seen = &manager.notifier().seen;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, Severity::Warning);
    let cards = weather_cards(grid_of(&manager));
    assert!(cards.iter().all(|c| c.primary_text == "32°C"));
}

/// Malformed primary body falls back to station S81 at 29.4°C.
#[tokio::test]
async fn malformed_forecast_falls_back_to_station_reading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "api_info": { "status": "healthy" } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(READING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metadata": { "reading_unit": "deg C" },
            "items": [{
                "timestamp": "2026-10-16T14:00:00+08:00",
                "readings": [
                    { "station_id": "S50", "value": 30.1 },
                    { "station_id": "S81", "value": 29.4 }
                ]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut manager = manager(&config);

    assert_eq!(manager.run().await, PipelineState::RenderedReading);

    let cards = weather_cards(grid_of(&manager));
    let labels: Vec<_> = cards.iter().map(|c| c.day_label.as_str()).collect();
    assert_eq!(labels, ["Today", "Tomorrow", "Day 3", "Day 4"]);
    assert!(cards.iter().all(|c| c.primary_text == "29°C"));
    assert!(cards.iter().all(|c| c.secondary_text == "Station S81"));
}

/// Both endpoints returning 503 leave a single error card and nothing else.
#[tokio::test]
async fn both_sources_down_renders_single_error_card() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(READING_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    // Start from a grid that still holds a stale card
    let mut stale = CardGrid::new();
    stale.append(Card::Weather(DisplayCard {
        day_label: "Yesterday".to_string(),
        icon: "?".to_string(),
        primary_text: "old".to_string(),
        secondary_text: "old".to_string(),
    }));

    let config = config_for(&server);
    let mut manager = manager_with_grid(&config, stale);

    assert_eq!(manager.run().await, PipelineState::RenderedError);

    let cards = grid_of(&manager).cards();
    assert_eq!(cards.len(), 1);
    assert!(matches!(&cards[0], Card::Error(ErrorCard { message }) if message.contains("NEA Singapore")));

    let severities: Vec<_> = manager.notifier().seen.iter().map(|(s, _)| *s).collect();
    assert_eq!(severities, [Severity::Warning, Severity::Error]);
    assert!(manager.notifier().seen[1].1.contains("503"));
    assert!(!manager.overlay().is_visible());
}

/// An empty reading list is treated as a bad payload, not a crash.
#[tokio::test]
async fn empty_readings_render_error_card() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(READING_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "items": [{ "readings": [] }] })),
        )
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut manager = manager(&config);

    assert_eq!(manager.run().await, PipelineState::RenderedError);
    assert_eq!(grid_of(&manager).cards().len(), 1);
}

/// Transport failures go down the same fallback path as HTTP errors.
#[tokio::test]
async fn unreachable_primary_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(READING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "readings": [{ "station_id": "S24", "value": 27.2 }] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.weather.forecast_url = "http://127.0.0.1:1/unreachable".to_string();
    let mut manager = manager(&config);

    assert_eq!(manager.run().await, PipelineState::RenderedReading);
    let cards = weather_cards(grid_of(&manager));
    assert!(cards.iter().all(|c| c.secondary_text == "Station S24"));
}

/// A finished pipeline does not fetch again.
#[tokio::test]
async fn second_run_stays_terminal_without_refetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(forecast_body(&[("2026-10-16", "Fair")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut manager = manager(&config);

    assert_eq!(manager.run().await, PipelineState::RenderedForecast);
    assert_eq!(manager.run().await, PipelineState::RenderedForecast);
    assert_eq!(grid_of(&manager).cards().len(), 1);
}

/// Without a grid the pipeline still runs, it just has nowhere to draw.
#[tokio::test]
async fn missing_region_still_completes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(READING_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = shoresquad::weather_data::WeatherClient::new(&config.weather).unwrap();
    let presenter: Presenter<CardGrid> =
        Presenter::new(None, &config.display, &config.weather.provider_name);
    let mut manager = WeatherManager::new(
        client,
        presenter,
        RecordingNotifier::default(),
        LoadingOverlay::new(),
    );

    assert_eq!(manager.run().await, PipelineState::RenderedError);
    assert!(manager.presenter().region().is_none());
    assert_eq!(manager.notifier().seen.len(), 2);
}
