//! Report → display fields
//!
//! Every value is copied from the payload as-is; only unit labels are added.
//! A fresh [`ReportFields`] is built on each render, so a new report replaces
//! every field and every forecast card.

use crate::icons::{WeatherCondition, icon_glyph, icon_url};
use crate::state::{ForecastDay, WeatherReport};

/// What the browser version put into an `<img>`: source and alt text, plus
/// the glyph drawn in the terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconRef {
    pub src: String,
    pub alt: String,
    pub glyph: &'static str,
    pub condition: WeatherCondition,
}

impl IconRef {
    fn new(code: &str, description: &str) -> Self {
        Self {
            src: icon_url(code),
            alt: description.to_string(),
            glyph: icon_glyph(code),
            condition: WeatherCondition::from_icon(code),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForecastCard {
    pub date: String,
    pub icon: IconRef,
    pub temps: String,
    pub description: String,
}

impl From<&ForecastDay> for ForecastCard {
    fn from(day: &ForecastDay) -> Self {
        Self {
            date: day.date.clone(),
            icon: IconRef::new(&day.icon, &day.description),
            temps: format!("{}° / {}°", day.temp_max, day.temp_min),
            description: day.description.clone(),
        }
    }
}

/// One slot per display node of the dashboard
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportFields {
    pub city_name: String,
    pub temperature: String,
    pub description: String,
    pub feels_like: String,
    pub icon: IconRef,
    pub humidity: String,
    pub wind_speed: String,
    pub pressure: String,
    pub visibility: String,
    pub sunrise: String,
    pub sunset: String,
    pub forecast: Vec<ForecastCard>,
}

impl From<&WeatherReport> for ReportFields {
    fn from(report: &WeatherReport) -> Self {
        Self {
            city_name: format!("{}, {}", report.city, report.country),
            temperature: report.temperature.to_string(),
            description: report.description.clone(),
            feels_like: report.feels_like.to_string(),
            icon: IconRef::new(&report.icon, &report.description),
            humidity: format!("{}%", report.humidity),
            wind_speed: format!("{} m/s", report.wind_speed),
            pressure: format!("{} hPa", report.pressure),
            visibility: format!("{} km", report.visibility),
            sunrise: report.sunrise.clone(),
            sunset: report.sunset.clone(),
            forecast: report.forecast.iter().map(ForecastCard::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> WeatherReport {
        WeatherReport {
            city: "London".into(),
            country: "United Kingdom".into(),
            temperature: 12.0,
            description: "Overcast".into(),
            feels_like: 10.0,
            icon: "04d".into(),
            humidity: 81.0,
            wind_speed: 3.5,
            pressure: 1012.0,
            visibility: 10.0,
            sunrise: "06:12".into(),
            sunset: "19:40".into(),
            forecast: vec![ForecastDay {
                date: "Tue, Jun 03".into(),
                icon: "10d".into(),
                description: "Slight rain".into(),
                temp_max: 17.0,
                temp_min: 9.0,
            }],
        }
    }

    #[test]
    fn test_fields_copy_payload_verbatim() {
        let fields = ReportFields::from(&london());

        assert_eq!(fields.city_name, "London, United Kingdom");
        assert_eq!(fields.temperature, "12");
        assert_eq!(fields.description, "Overcast");
        assert_eq!(fields.feels_like, "10");
        assert_eq!(fields.icon.src, "https://openweathermap.org/img/wn/04d@2x.png");
        assert_eq!(fields.icon.alt, "Overcast");
        assert_eq!(fields.humidity, "81%");
        assert_eq!(fields.wind_speed, "3.5 m/s");
        assert_eq!(fields.pressure, "1012 hPa");
        assert_eq!(fields.visibility, "10 km");
        assert_eq!(fields.sunrise, "06:12");
        assert_eq!(fields.sunset, "19:40");
    }

    #[test]
    fn test_forecast_cards_keep_order() {
        let mut report = london();
        report.forecast.push(ForecastDay {
            date: "Wed, Jun 04".into(),
            icon: "01d".into(),
            description: "Clear sky".into(),
            temp_max: 21.0,
            temp_min: -2.5,
        });

        let cards = ReportFields::from(&report).forecast;

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].date, "Tue, Jun 03");
        assert_eq!(cards[0].temps, "17° / 9°");
        assert_eq!(cards[1].temps, "21° / -2.5°");
        assert_eq!(cards[1].icon.alt, "Clear sky");
    }
}
