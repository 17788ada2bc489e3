//! Backend client for the suggestion and weather endpoints

use serde::Deserialize;

use crate::state::WeatherReport;

/// Message used when a failed weather response carries no `error` field
pub const WEATHER_NOT_FOUND: &str = "Weather data not found";

/// Errors from either endpoint
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("response parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error body returned alongside non-2xx weather responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client bound to one backend base URL
#[derive(Clone, Debug)]
pub struct DashboardClient {
    base_url: String,
    http: reqwest::Client,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn suggestions_url(&self, query: &str) -> String {
        format!(
            "{}/search-suggestions/{}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    pub fn weather_url(&self, city: &str) -> String {
        format!("{}/weather/{}", self.base_url, urlencoding::encode(city))
    }

    /// City names matching a partial query, in backend order.
    ///
    /// The status code is not inspected: any body that is not a JSON array of
    /// strings is reported as an error.
    pub async fn search_suggestions(&self, query: &str) -> Result<Vec<String>, ApiError> {
        let response = self.http.get(self.suggestions_url(query)).send().await?;
        let cities = response.json::<Vec<String>>().await?;
        Ok(cities)
    }

    /// Current weather and forecast for a city.
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, ApiError> {
        let response = self.http.get(self.weather_url(city)).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&body)?);
        }

        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| WEATHER_NOT_FOUND.to_string());
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
