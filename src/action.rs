//! Actions - user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherReport;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Search category =====
    /// City input text changed (may trigger a suggestion lookup)
    SearchInput(String),

    /// Search the weather for the current input (Enter / search button)
    SearchSubmit,

    // ===== Suggestions category =====
    /// Result: suggestion list for request `seq`
    SuggestionsDidLoad { seq: u64, cities: Vec<String> },

    /// Result: suggestion lookup `seq` failed
    SuggestionsDidError { seq: u64, error: String },

    /// Move the dropdown highlight to an index
    SuggestionsHighlight(usize),

    /// Activate a suggestion: fill the input and search it
    SuggestionsPick(usize),

    /// Close the dropdown (click outside, Esc)
    SuggestionsDismiss,

    // ===== Weather category =====
    /// Result: report for weather request `seq`
    WeatherDidLoad { seq: u64, report: WeatherReport },

    /// Result: weather request `seq` failed
    WeatherDidError { seq: u64, error: String },

    // ===== Uncategorized (global) =====
    /// Force a re-render (cursor movement)
    Render,

    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
