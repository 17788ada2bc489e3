//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Look up city suggestions for a partial query
    FetchSuggestions { seq: u64, query: String },
    /// Fetch current weather and forecast for a city
    FetchWeather { seq: u64, city: String },
}
