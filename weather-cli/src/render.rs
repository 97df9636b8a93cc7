//! Text rendering of the view state. Pure: same state in, same frame out.

use std::fmt::Write as _;

use weather_core::{
    ViewState,
    model::{CurrentWeather, ForecastEntry},
    provider::openweather::{icon_url, small_icon_url},
};

pub const TITLE: &str = "Weather App";

/// Renders a whole frame: title, error banner, current panel, forecast strip.
pub fn render(state: &ViewState, icon_base_url: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));

    if let Some(error) = &state.error {
        let _ = writeln!(out, "\n! {error}");
    }

    if let Some(current) = &state.current {
        out.push('\n');
        render_current(&mut out, current, icon_base_url);
    }

    if !state.forecast.is_empty() {
        out.push('\n');
        render_forecast(&mut out, &state.forecast, icon_base_url);
    }

    out
}

fn render_current(out: &mut String, w: &CurrentWeather, icon_base_url: &str) {
    let _ = writeln!(out, "{}, {}", w.location_name, w.country_code);
    let _ = writeln!(
        out,
        "  {}°C  {}",
        round_half_up(w.temperature_c),
        capitalize_words(&w.condition_description)
    );
    let _ = writeln!(
        out,
        "  Feels like: {}°C | Humidity: {}% | Wind: {} m/s",
        round_half_up(w.feels_like_c),
        w.humidity_pct,
        w.wind_speed_mps
    );
    let _ = writeln!(out, "  Icon: {}", icon_url(icon_base_url, &w.condition_icon));
}

fn render_forecast(out: &mut String, days: &[ForecastEntry], icon_base_url: &str) {
    let _ = writeln!(out, "5-Day Forecast");
    for day in days {
        let _ = writeln!(
            out,
            "  {:<12} {:>4}°C  {:<20} {}",
            day_label(day),
            round_half_up(day.temperature_c),
            capitalize_words(&day.condition_description),
            small_icon_url(icon_base_url, &day.condition_icon)
        );
    }
}

/// "Mon, Jan 1"; falls back to the raw timestamp if it doesn't parse.
pub fn day_label(entry: &ForecastEntry) -> String {
    entry
        .date()
        .map(|d| d.format("%a, %b %-d").to_string())
        .unwrap_or_else(|| entry.timestamp.clone())
}

/// Rounds .5 towards positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Upper-cases the first letter of every word.
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICONS: &str = "https://openweathermap.org/img/wn";

    fn kaduna() -> CurrentWeather {
        CurrentWeather {
            location_name: "Kaduna".into(),
            country_code: "NG".into(),
            temperature_c: 31.5,
            feels_like_c: 29.4,
            humidity_pct: 12,
            wind_speed_mps: 4.12,
            condition_icon: "01d".into(),
            condition_description: "clear sky".into(),
        }
    }

    fn entry(ts: &str, temp: f64) -> ForecastEntry {
        ForecastEntry {
            timestamp: ts.into(),
            temperature_c: temp,
            condition_icon: "02d".into(),
            condition_description: "few clouds".into(),
        }
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_half_up(31.5), 32);
        assert_eq!(round_half_up(31.49), 31);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize_words("light rain"), "Light Rain");
        assert_eq!(capitalize_words("overcast clouds"), "Overcast Clouds");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn day_label_formats_weekday_month_day() {
        assert_eq!(day_label(&entry("2024-01-01 12:00:00", 0.0)), "Mon, Jan 1");
        assert_eq!(day_label(&entry("2024-02-15 12:00:00", 0.0)), "Thu, Feb 15");
        assert_eq!(day_label(&entry("garbage", 0.0)), "garbage");
    }

    #[test]
    fn empty_state_renders_only_title() {
        assert_eq!(render(&ViewState::new(), ICONS), "Weather App\n===========\n");
    }

    #[test]
    fn current_panel_contents() {
        let mut state = ViewState::new();
        state.current = Some(kaduna());

        let frame = render(&state, ICONS);
        assert!(frame.contains("Kaduna, NG"));
        assert!(frame.contains("32°C  Clear Sky"));
        assert!(frame.contains("Feels like: 29°C | Humidity: 12% | Wind: 4.12 m/s"));
        assert!(frame.contains("https://openweathermap.org/img/wn/01d@2x.png"));
        assert!(!frame.contains("5-Day Forecast"));
        assert!(!frame.contains('!'));
    }

    #[test]
    fn error_banner_without_current_panel() {
        let mut state = ViewState::new();
        state.error = Some("City not found. Try again.".into());

        let frame = render(&state, ICONS);
        assert!(frame.contains("! City not found. Try again."));
        assert!(!frame.contains("Feels like"));
    }

    #[test]
    fn forecast_strip_lists_cards_in_order() {
        let mut state = ViewState::new();
        state.forecast = vec![
            entry("2024-01-01 12:00:00", 30.5),
            entry("2024-01-02 12:00:00", 28.2),
        ];

        let frame = render(&state, ICONS);
        assert!(frame.contains("5-Day Forecast"));

        let first = frame.find("Mon, Jan 1").expect("first card");
        let second = frame.find("Tue, Jan 2").expect("second card");
        assert!(first < second);
        assert!(frame.contains("31°C"));
        assert!(frame.contains("28°C"));
        assert!(frame.contains("https://openweathermap.org/img/wn/02d.png"));
    }
}
