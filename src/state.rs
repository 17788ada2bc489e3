//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Current conditions plus forecast, as served by `/weather/{city}`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub description: String,
    pub feels_like: f64,
    /// OpenWeatherMap-style icon code, e.g. `"01d"`
    pub icon: String,
    pub humidity: f64,
    pub wind_speed: f64,
    pub pressure: f64,
    pub visibility: f64,
    pub sunrise: String,
    pub sunset: String,
    pub forecast: Vec<ForecastDay>,
}

/// One future day's summary
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastDay {
    pub date: String,
    pub icon: String,
    pub description: String,
    pub temp_max: f64,
    pub temp_min: f64,
}

/// Which of the three body views is on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiState {
    Loading,
    Content,
    Error,
}

/// City searched on startup when none is given
pub const DEFAULT_CITY: &str = "London";

/// Queries shorter than this (in chars) never hit the suggestion endpoint.
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

/// Spinner tick interval for the loading view.
pub const LOADING_ANIM_TICK_MS: u64 = 15;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Search input ---
    /// Live value of the city input
    #[debug(section = "Search", label = "Query")]
    pub query: String,

    /// Suggestions for the current query, in backend order
    #[debug(section = "Search", label = "Suggestions", debug_fmt)]
    pub suggestions: Vec<String>,

    /// Whether the suggestion dropdown is shown
    #[debug(section = "Search", label = "Dropdown open")]
    pub suggestions_visible: bool,

    /// Highlighted suggestion (keyboard navigation)
    #[debug(skip)]
    pub suggestion_selected: usize,

    // --- Weather ---
    /// Report lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Report", debug_fmt)]
    pub weather: DataResource<WeatherReport>,

    // --- Request sequencing ---
    /// Seq of the latest suggestion request; older responses are dropped
    #[debug(section = "Requests", label = "Suggestion seq")]
    pub suggestion_seq: u64,

    /// Seq of the latest weather request; older responses are dropped
    #[debug(section = "Requests", label = "Weather seq")]
    pub weather_seq: u64,

    // --- Animation internals (skipped) ---
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    /// Create state with the input preset to `city`
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            query: city.into(),
            suggestions: Vec::new(),
            suggestions_visible: false,
            suggestion_selected: 0,
            weather: DataResource::Empty,
            suggestion_seq: 0,
            weather_seq: 0,
            tick_count: 0,
        }
    }

    /// Body view derived from the weather resource. Before the first result the
    /// dashboard is loading, so there is always exactly one view.
    pub fn ui_state(&self) -> UiState {
        match &self.weather {
            DataResource::Loaded(_) => UiState::Content,
            DataResource::Failed(_) => UiState::Error,
            DataResource::Empty | DataResource::Loading => UiState::Loading,
        }
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.weather.data()
    }

    /// Dropdown is drawn only when open and non-empty
    pub fn showing_suggestions(&self) -> bool {
        self.suggestions_visible && !self.suggestions.is_empty()
    }

    /// Close the dropdown and invalidate any suggestion request still in flight.
    pub fn hide_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestions_visible = false;
        self.suggestion_selected = 0;
        self.suggestion_seq += 1;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_CITY)
    }
}
