//! # Weather Card Rendering
//!
//! This module turns validated weather data into the cards shown in the
//! weather grid, and renders the grid either as ASCII for the terminal or as
//! an HTML fragment for the site's `#weather-grid` container.
//!
//! Every render clears the region first, so the grid always holds the output
//! of exactly one render: up to four forecast cards, four reading cards, or a
//! single error card.

use crate::{config::DisplayConfig, Card, DisplayCard, ErrorCard, ForecastDay, PointReading};
use chrono::NaiveDate;
use std::fmt::Write;
use tracing::debug;

/// Maximum number of cards in the grid
pub const CARD_COUNT: usize = 4;

/// Day labels for the fallback path, which only has a current reading
const READING_DAY_LABELS: [&str; CARD_COUNT] = ["Today", "Tomorrow", "Day 3", "Day 4"];

const ICON_RAIN: &str = "\u{1F327}\u{FE0F}";
const ICON_CLOUD: &str = "\u{2601}\u{FE0F}";
const ICON_SUN: &str = "\u{2600}\u{FE0F}";
const ICON_WIND: &str = "\u{1F4A8}";
const ICON_PARTLY_SUNNY: &str = "\u{26C5}";
const ICON_PARTLY_CLOUDY: &str = "\u{1F324}\u{FE0F}";
const ICON_WAVE: &str = "\u{1F30A}";

/// Glyph rotation for the fallback path, indexed by card position mod 4
const READING_ICONS: [&str; CARD_COUNT] = [ICON_SUN, ICON_PARTLY_CLOUDY, ICON_PARTLY_SUNNY, ICON_WAVE];

/// Keyword groups checked in priority order against the lowercased condition
const ICON_RULES: [(&[&str], &str); 4] = [
    (&["rain", "thundery"], ICON_RAIN),
    (&["cloud", "overcast"], ICON_CLOUD),
    (&["fair", "clear"], ICON_SUN),
    (&["wind", "strong"], ICON_WIND),
];

const NO_DATA: &str = "N/A";

/// Pick a glyph for a free-text condition.
///
/// # Example
/// ```
/// use shoresquad::presenter::icon_for;
///
/// assert_eq!(icon_for("Rainy and windy"), icon_for("rain"));
/// ```
pub fn icon_for(condition: &str) -> &'static str {
    let lowered = condition.to_lowercase();
    ICON_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, icon)| *icon)
        .unwrap_or(ICON_PARTLY_SUNNY)
}

/// Format a forecast date, falling back to ISO form if the format string is bad.
fn day_label(date: NaiveDate, date_format: &str) -> String {
    let mut label = String::new();
    if write!(label, "{}", date.format(date_format)).is_err() {
        return date.to_string();
    }
    label
}

/// Build cards for the first four forecast days.
pub fn forecast_cards(days: &[ForecastDay], date_format: &str) -> Vec<DisplayCard> {
    days.iter()
        .take(CARD_COUNT)
        .map(|day| DisplayCard {
            day_label: day_label(day.date, date_format),
            icon: icon_for(&day.condition).to_string(),
            primary_text: day.condition.clone(),
            secondary_text: match &day.humidity {
                Some(h) => format!("Humidity: {}", h),
                None => format!("Humidity: {}", NO_DATA),
            },
        })
        .collect()
}

/// Build the four placeholder cards for a single station reading.
pub fn reading_cards(reading: &PointReading) -> Vec<DisplayCard> {
    let temperature = format!("{}°C", reading.value_celsius.round() as i64);
    READING_DAY_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| DisplayCard {
            day_label: label.to_string(),
            icon: READING_ICONS[i % READING_ICONS.len()].to_string(),
            primary_text: temperature.clone(),
            secondary_text: format!("Station {}", reading.station_id),
        })
        .collect()
}

/// A container the presenter writes cards into.
pub trait DisplayRegion {
    /// Remove every card.
    fn clear(&mut self);
    /// Add a card after the existing ones.
    fn append(&mut self, card: Card);
    /// Cards currently in the region, in display order.
    fn cards(&self) -> &[Card];
}

/// In-memory weather grid.
#[derive(Debug, Clone)]
pub struct CardGrid {
    cards: Vec<Card>,
    opacity: f32,
}

impl Default for CardGrid {
    fn default() -> Self {
        Self {
            cards: Vec::with_capacity(CARD_COUNT),
            opacity: 1.0,
        }
    }
}

impl DisplayRegion for CardGrid {
    fn clear(&mut self) {
        self.cards.clear();
    }

    fn append(&mut self, card: Card) {
        self.cards.push(card);
    }

    fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl CardGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set grid opacity, clamped to `0.0..=1.0`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Render the grid as plain text, one card per line.
    pub fn render_ascii(&self) -> String {
        let mut out = String::new();
        for card in &self.cards {
            match card {
                Card::Weather(c) => {
                    out.push_str(&format!(
                        "{:<12} {}  {:<28} {}\n",
                        c.day_label, c.icon, c.primary_text, c.secondary_text
                    ));
                }
                Card::Error(e) => {
                    let rule = "─".repeat(e.message.chars().count() + 2);
                    out.push_str(&format!("┌{}┐\n│ {} │\n└{}┘\n", rule, e.message, rule));
                }
            }
        }
        out
    }

    /// Render the grid as the HTML fragment placed inside `#weather-grid`.
    pub fn render_html(&self) -> String {
        let mut out = String::with_capacity(256 * self.cards.len().max(1));
        for card in &self.cards {
            match card {
                Card::Weather(c) => {
                    out.push_str(&format!(
                        concat!(
                            "<div class=\"weather-card\" style=\"opacity: {}\">\n",
                            "  <div class=\"weather-day\">{}</div>\n",
                            "  <div class=\"weather-icon\">{}</div>\n",
                            "  <div class=\"weather-temp\">{}</div>\n",
                            "  <div class=\"weather-condition\">{}</div>\n",
                            "</div>\n"
                        ),
                        self.opacity,
                        escape_html(&c.day_label),
                        c.icon,
                        escape_html(&c.primary_text),
                        escape_html(&c.secondary_text),
                    ));
                }
                Card::Error(e) => {
                    out.push_str(&format!(
                        "<div class=\"weather-card weather-error\" style=\"grid-column: 1 / -1\">\n  <p>{}</p>\n</div>\n",
                        escape_html(&e.message)
                    ));
                }
            }
        }
        out
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Writes weather cards into an optional display region.
///
/// A presenter built without a region turns every render into a no-op.
#[derive(Debug)]
pub struct Presenter<R: DisplayRegion> {
    region: Option<R>,
    date_format: String,
    error_message: String,
}

impl<R: DisplayRegion> Presenter<R> {
    pub fn new(region: Option<R>, display: &DisplayConfig, provider_name: &str) -> Self {
        Self {
            region,
            date_format: display.date_format.clone(),
            error_message: format!(
                "Sorry, weather data is unavailable right now. Data courtesy of {}.",
                provider_name
            ),
        }
    }

    pub fn region(&self) -> Option<&R> {
        self.region.as_ref()
    }

    pub fn region_mut(&mut self) -> Option<&mut R> {
        self.region.as_mut()
    }

    pub fn into_region(self) -> Option<R> {
        self.region
    }

    /// Replace the grid with cards for the first four forecast days.
    pub fn render_forecast(&mut self, days: &[ForecastDay]) {
        let cards = forecast_cards(days, &self.date_format);
        self.replace(cards.into_iter().map(Card::Weather));
    }

    /// Replace the grid with four cards showing one station reading.
    pub fn render_reading(&mut self, reading: &PointReading) {
        let cards = reading_cards(reading);
        self.replace(cards.into_iter().map(Card::Weather));
    }

    /// Replace the grid with the single error card.
    pub fn render_error(&mut self) {
        let card = Card::Error(ErrorCard {
            message: self.error_message.clone(),
        });
        self.replace(std::iter::once(card));
    }

    fn replace(&mut self, cards: impl IntoIterator<Item = Card>) {
        let Some(region) = self.region.as_mut() else {
            debug!("no weather region, skipping render");
            return;
        };
        region.clear();
        for card in cards {
            region.append(card);
        }
        debug!(cards = region.cards().len(), "weather region rendered");
    }
}
