//! Turns a [`UiState`] into the text frame shown in the terminal.

use chrono::NaiveDate;

use crate::{condition::classify, controller::UiState, model::WeatherResult};

pub const TITLE: &str = "☁️ Weather App";
pub const PLACEHOLDER: &str = "Enter city name...";
const MISSING: &str = "--";

/// Render the whole screen: search control, then error banner or result card.
pub fn render(state: &UiState) -> String {
    let mut lines = vec![TITLE.to_string(), search_line(state)];

    if let Some(error) = &state.error {
        lines.push(String::new());
        lines.push(format!("! {error}"));
    }

    if let Some(result) = &state.result {
        lines.push(String::new());
        lines.extend(card(result));
    }

    let mut frame = lines.join("\n");
    frame.push('\n');
    frame
}

fn search_line(state: &UiState) -> String {
    let query = if state.query.is_empty() { PLACEHOLDER } else { state.query.as_str() };
    let button = if state.loading { "[ ... ]" } else { "[ Search ]" };
    format!("> {query:<32} {button}")
}

fn card(result: &WeatherResult) -> Vec<String> {
    let location = &result.location;
    let current = &result.current;
    let icon = classify(result.condition_text());

    let place = [location.name.as_deref(), location.country.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![if place.is_empty() { MISSING.to_string() } else { place }];
    if let Some(localtime) = location.localtime.as_deref() {
        lines.push(long_date(localtime));
    }

    lines.push(String::new());
    lines.push(format!("  {}", icon.glyph()));
    lines.push(format!("  {}", temperature(current.temp_c)));
    lines.push(format!("  {}", result.condition_text().unwrap_or(MISSING)));
    lines.push(format!("  Feels like {}", temperature(current.feelslike_c)));
    lines.push(String::new());

    let tiles = [
        ("Wind", metric(current.wind_kph, " km/h")),
        ("Humidity", metric(current.humidity, "%")),
        ("Visibility", metric(current.vis_km, " km")),
        ("Pressure", metric(current.pressure_mb, " mb")),
    ];
    lines.extend(tiles.iter().map(|(label, value)| format!("  {label:<12}{value}")));

    lines
}

/// Formats the date part of a weatherapi local time (`2024-01-15 12:00`) as
/// `Monday, January 15, 2024`. Unparseable input is shown verbatim.
pub fn long_date(localtime: &str) -> String {
    localtime
        .split_whitespace()
        .next()
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .map(|date| date.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|| localtime.to_string())
}

fn temperature(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}°C", round_half_up(v)),
        None => format!("{MISSING}°C"),
    }
}

fn metric(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => format!("{MISSING}{unit}"),
    }
}

/// Rounds halves towards positive infinity, so `-2.5` becomes `-2`.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    // -0.0 prints as "-0"
    rounded + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{condition::IconCategory, controller::FETCH_FAILED_MESSAGE};

    fn london() -> WeatherResult {
        serde_json::from_value(serde_json::json!({
            "location": {"name": "London", "country": "UK", "localtime": "2024-01-15 9:05"},
            "current": {
                "temp_c": 18, "feelslike_c": 17.5,
                "condition": {"text": "Partly cloudy"},
                "wind_kph": 12.5, "humidity": 62, "vis_km": 10.0, "pressure_mb": 1011.0
            }
        }))
        .expect("valid result")
    }

    #[test]
    fn renders_result_card() {
        let state = UiState {
            query: "London".into(),
            result: Some(london()),
            ..UiState::default()
        };

        let frame = render(&state);
        assert!(frame.contains("London, UK"));
        assert!(frame.contains("Monday, January 15, 2024"));
        assert!(frame.contains(IconCategory::Cloud.glyph()));
        assert!(frame.contains("18°C"));
        assert!(frame.contains("Feels like 18°C"));
        assert!(frame.contains("Partly cloudy"));
        assert!(frame.contains("12.5 km/h"));
        assert!(frame.contains("62%"));
        assert!(frame.contains("10 km"));
        assert!(frame.contains("1011 mb"));
        assert!(frame.contains("[ Search ]"));
        assert!(!frame.contains("! "));
    }

    #[test]
    fn renders_error_banner_without_card() {
        let state = UiState {
            query: "Nowhereville".into(),
            error: Some(FETCH_FAILED_MESSAGE.to_string()),
            ..UiState::default()
        };

        let frame = render(&state);
        assert!(frame.contains(FETCH_FAILED_MESSAGE));
        assert!(!frame.contains("°C"));
    }

    #[test]
    fn loading_disables_search_and_shows_nothing_else() {
        let state = UiState { query: "Mumbai".into(), loading: true, ..UiState::default() };

        let frame = render(&state);
        assert!(frame.contains("[ ... ]"));
        assert!(!frame.contains("[ Search ]"));
        assert_eq!(frame.lines().count(), 2);
    }

    #[test]
    fn empty_query_shows_placeholder() {
        let frame = render(&UiState::default());
        assert!(frame.contains(PLACEHOLDER));
    }

    #[test]
    fn missing_fields_render_as_dashes() {
        let state = UiState { result: Some(WeatherResult::default()), ..UiState::default() };

        let frame = render(&state);
        assert!(frame.contains("--°C"));
        assert!(frame.contains("-- km/h"));
        assert!(frame.contains(IconCategory::Cloud.glyph()));
    }

    #[test]
    fn rounds_like_a_browser() {
        assert_eq!(round_half_up(18.0), 18.0);
        assert_eq!(round_half_up(17.5), 18.0);
        assert_eq!(round_half_up(17.49), 17.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.51), -3.0);
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
    }

    #[test]
    fn rounding_never_prints_negative_zero() {
        assert_eq!(temperature(Some(-0.4)), "0°C");
        assert_eq!(temperature(Some(-0.0)), "0°C");
    }

    #[test]
    fn huge_temperatures_are_not_clamped() {
        assert_eq!(temperature(Some(1e20)), "100000000000000000000°C");
    }

    #[test]
    fn unparseable_date_is_shown_verbatim() {
        assert_eq!(long_date("yesterday"), "yesterday");
        assert_eq!(long_date("2024-02-29 23:59"), "Thursday, February 29, 2024");
    }
}
