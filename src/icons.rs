//! Weather icon codes mapped to terminal glyphs
//!
//! The backend speaks OpenWeatherMap icon codes (`"01d"`, `"10n"`, ...): two
//! digits for the condition, a trailing `d`/`n` for day or night.

use ratatui::style::Color;

/// Where the browser version loads icon images from
pub const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherCondition {
    ClearSky,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Map an icon code to its condition
    pub fn from_icon(code: &str) -> Self {
        match code.get(..2) {
            Some("01") => WeatherCondition::ClearSky,
            Some("02") => WeatherCondition::PartlyCloudy,
            Some("03") | Some("04") => WeatherCondition::Cloudy,
            Some("09") => WeatherCondition::Drizzle,
            Some("10") => WeatherCondition::Rain,
            Some("11") => WeatherCondition::Thunderstorm,
            Some("13") => WeatherCondition::Snow,
            Some("50") => WeatherCondition::Fog,
            _ => WeatherCondition::Unknown,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            WeatherCondition::ClearSky => "\u{2600}\u{fe0f}",
            WeatherCondition::PartlyCloudy => "\u{26c5}",
            WeatherCondition::Cloudy | WeatherCondition::Unknown => "\u{2601}\u{fe0f}",
            WeatherCondition::Fog => "\u{1f32b}\u{fe0f}",
            WeatherCondition::Drizzle => "\u{1f326}\u{fe0f}",
            WeatherCondition::Rain => "\u{1f327}\u{fe0f}",
            WeatherCondition::Snow => "\u{2744}\u{fe0f}",
            WeatherCondition::Thunderstorm => "\u{26c8}\u{fe0f}",
        }
    }

    pub fn color(self) -> Color {
        match self {
            WeatherCondition::ClearSky => Color::Yellow,
            WeatherCondition::PartlyCloudy => Color::Rgb(230, 220, 150),
            WeatherCondition::Cloudy | WeatherCondition::Unknown => Color::Rgb(200, 200, 210),
            WeatherCondition::Fog => Color::Gray,
            WeatherCondition::Drizzle | WeatherCondition::Rain => Color::Rgb(100, 160, 255),
            WeatherCondition::Snow => Color::White,
            WeatherCondition::Thunderstorm => Color::Rgb(180, 140, 255),
        }
    }
}

fn is_night(code: &str) -> bool {
    code.ends_with('n')
}

/// Glyph for an icon code; clear nights get a moon.
pub fn icon_glyph(code: &str) -> &'static str {
    match WeatherCondition::from_icon(code) {
        WeatherCondition::ClearSky if is_night(code) => "\u{1f319}",
        condition => condition.emoji(),
    }
}

/// Image URL the browser dashboard would load for an icon code
pub fn icon_url(code: &str) -> String {
    format!("{ICON_BASE_URL}/{code}@2x.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_from_icon() {
        assert_eq!(WeatherCondition::from_icon("01d"), WeatherCondition::ClearSky);
        assert_eq!(WeatherCondition::from_icon("04n"), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::from_icon("10d"), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_icon("50d"), WeatherCondition::Fog);
        assert_eq!(WeatherCondition::from_icon(""), WeatherCondition::Unknown);
        assert_eq!(WeatherCondition::from_icon("x"), WeatherCondition::Unknown);
    }

    #[test]
    fn test_night_glyph() {
        assert_eq!(icon_glyph("01d"), "\u{2600}\u{fe0f}");
        assert_eq!(icon_glyph("01n"), "\u{1f319}");
        assert_eq!(icon_glyph("10n"), WeatherCondition::Rain.emoji());
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            icon_url("02d"),
            "https://openweathermap.org/img/wn/02d@2x.png"
        );
    }
}
