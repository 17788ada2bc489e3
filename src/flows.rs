//! Request flows - run one effect's HTTP call and turn the outcome into an action
//!
//! Failures are logged here; the reducer only sees the resulting action.

use crate::action::Action;
use crate::api::DashboardClient;

pub async fn suggestions(client: &DashboardClient, seq: u64, query: String) -> Action {
    tracing::debug!(seq, query = %query, "suggestion lookup");
    match client.search_suggestions(&query).await {
        Ok(cities) => {
            tracing::debug!(seq, count = cities.len(), "suggestions loaded");
            Action::SuggestionsDidLoad { seq, cities }
        }
        Err(e) => {
            tracing::warn!(seq, query = %query, error = %e, "error fetching suggestions");
            Action::SuggestionsDidError {
                seq,
                error: e.to_string(),
            }
        }
    }
}

pub async fn weather(client: &DashboardClient, seq: u64, city: String) -> Action {
    tracing::info!(seq, city = %city, "weather search");
    match client.fetch_weather(&city).await {
        Ok(report) => {
            tracing::info!(
                seq,
                city = %report.city,
                country = %report.country,
                forecast_days = report.forecast.len(),
                "weather loaded"
            );
            Action::WeatherDidLoad { seq, report }
        }
        Err(e) => {
            tracing::error!(seq, city = %city, error = %e, "error fetching weather");
            Action::WeatherDidError {
                seq,
                error: e.to_string(),
            }
        }
    }
}
