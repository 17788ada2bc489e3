//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, MIN_SUGGESTION_QUERY_LEN, UiState};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search actions =====
        Action::SearchInput(query) => {
            state.query = query;
            if state.query.chars().count() < MIN_SUGGESTION_QUERY_LEN {
                state.hide_suggestions();
                return DispatchResult::changed();
            }
            state.suggestion_seq += 1;
            DispatchResult::changed_with(Effect::FetchSuggestions {
                seq: state.suggestion_seq,
                query: state.query.clone(),
            })
        }

        Action::SearchSubmit => start_weather_search(state),

        // ===== Suggestion actions =====
        Action::SuggestionsDidLoad { seq, cities } => {
            if seq != state.suggestion_seq {
                return DispatchResult::unchanged();
            }
            if cities.is_empty() {
                state.suggestions.clear();
                state.suggestions_visible = false;
            } else {
                state.suggestions = cities;
                state.suggestions_visible = true;
            }
            state.suggestion_selected = 0;
            DispatchResult::changed()
        }

        // Failed lookups are logged by the effect handler; the dropdown keeps
        // whatever it showed before.
        Action::SuggestionsDidError { .. } => DispatchResult::unchanged(),

        Action::SuggestionsHighlight(index) => {
            if index < state.suggestions.len() && index != state.suggestion_selected {
                state.suggestion_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SuggestionsPick(index) => {
            let Some(city) = state.suggestions.get(index).cloned() else {
                return DispatchResult::unchanged();
            };
            state.query = city;
            state.hide_suggestions();
            start_weather_search(state)
        }

        Action::SuggestionsDismiss => {
            if !state.suggestions_visible {
                return DispatchResult::unchanged();
            }
            state.hide_suggestions();
            DispatchResult::changed()
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad { seq, report } => {
            if seq != state.weather_seq {
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Loaded(report);
            DispatchResult::changed()
        }

        Action::WeatherDidError { seq, error } => {
            if seq != state.weather_seq {
                return DispatchResult::unchanged();
            }
            state.weather = DataResource::Failed(error);
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        // Animate whenever the loading view is on screen, including before
        // the first search has been issued
        Action::Tick => {
            if state.ui_state() == UiState::Loading {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Enter Loading and request the trimmed query. Blank input is a no-op.
fn start_weather_search(state: &mut AppState) -> DispatchResult<Effect> {
    let city = state.query.trim().to_string();
    if city.is_empty() {
        return DispatchResult::unchanged();
    }

    state.weather = DataResource::Loading;
    state.weather_seq += 1;
    state.tick_count = 0;
    DispatchResult::changed_with(Effect::FetchWeather {
        seq: state.weather_seq,
        city,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WeatherReport;

    fn report(city: &str) -> WeatherReport {
        WeatherReport {
            city: city.into(),
            country: "United Kingdom".into(),
            temperature: 12.0,
            description: "Overcast".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_short_query_hides_without_request() {
        let mut state = AppState {
            suggestions: vec!["Paris".into()],
            suggestions_visible: true,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::SearchInput("P".into()));

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert!(!state.suggestions_visible);
        assert!(state.suggestions.is_empty());
        assert_eq!(state.query, "P");
    }

    #[test]
    fn test_query_length_counts_chars_not_bytes() {
        let mut state = AppState::default();

        // one char, two bytes
        let result = reducer(&mut state, Action::SearchInput("Ö".into()));
        assert!(result.effects.is_empty());

        let result = reducer(&mut state, Action::SearchInput("Ös".into()));
        assert_eq!(result.effects.len(), 1);
    }

    #[test]
    fn test_query_issues_sequenced_request() {
        let mut state = AppState::default();

        let first = reducer(&mut state, Action::SearchInput("Pa".into()));
        let second = reducer(&mut state, Action::SearchInput("Par".into()));

        assert_eq!(
            first.effects,
            vec![Effect::FetchSuggestions {
                seq: 1,
                query: "Pa".into()
            }]
        );
        assert_eq!(
            second.effects,
            vec![Effect::FetchSuggestions {
                seq: 2,
                query: "Par".into()
            }]
        );
    }

    #[test]
    fn test_stale_suggestions_are_dropped() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchInput("Pa".into()));
        reducer(&mut state, Action::SearchInput("Par".into()));

        let result = reducer(
            &mut state,
            Action::SuggestionsDidLoad {
                seq: 1,
                cities: vec!["Pakistan".into()],
            },
        );

        assert!(!result.changed);
        assert!(state.suggestions.is_empty());
        assert!(!state.suggestions_visible);
    }

    #[test]
    fn test_empty_suggestions_hide_dropdown() {
        let mut state = AppState {
            suggestions: vec!["Paris".into()],
            suggestions_visible: true,
            ..Default::default()
        };
        reducer(&mut state, Action::SearchInput("Pxq".into()));

        let seq = state.suggestion_seq;
        reducer(
            &mut state,
            Action::SuggestionsDidLoad {
                seq,
                cities: Vec::new(),
            },
        );

        assert!(!state.showing_suggestions());
    }

    #[test]
    fn test_suggestion_error_keeps_previous_list() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchInput("Par".into()));
        reducer(
            &mut state,
            Action::SuggestionsDidLoad {
                seq: 1,
                cities: vec!["Paris".into()],
            },
        );
        reducer(&mut state, Action::SearchInput("Pari".into()));

        let result = reducer(
            &mut state,
            Action::SuggestionsDidError {
                seq: 2,
                error: "connection refused".into(),
            },
        );

        assert!(!result.changed);
        assert_eq!(state.suggestions, vec!["Paris".to_string()]);
        assert!(state.suggestions_visible);
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut state = AppState::new("   ");

        let result = reducer(&mut state, Action::SearchSubmit);

        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert!(state.weather.is_empty());
    }

    #[test]
    fn test_submit_trims_and_enters_loading() {
        let mut state = AppState {
            weather: DataResource::Failed("boom".into()),
            tick_count: 9,
            ..AppState::new("  Paris ")
        };

        let result = reducer(&mut state, Action::SearchSubmit);

        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                seq: 1,
                city: "Paris".into()
            }]
        );
        assert_eq!(state.ui_state(), UiState::Loading);
        assert!(state.weather.error().is_none());
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn test_pick_fills_input_and_searches() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchInput("Par".into()));
        reducer(
            &mut state,
            Action::SuggestionsDidLoad {
                seq: 1,
                cities: vec!["Paris".into(), "Paris-XII".into()],
            },
        );

        let result = reducer(&mut state, Action::SuggestionsPick(1));

        assert_eq!(state.query, "Paris-XII");
        assert!(!state.suggestions_visible);
        assert!(state.weather.is_loading());
        assert!(matches!(
            &result.effects[..],
            [Effect::FetchWeather { city, .. }] if city == "Paris-XII"
        ));
    }

    #[test]
    fn test_pick_out_of_range_is_ignored() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::SuggestionsPick(3));

        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_late_suggestions_after_pick_are_dropped() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchInput("Par".into()));
        let in_flight = state.suggestion_seq;
        reducer(
            &mut state,
            Action::SuggestionsDidLoad {
                seq: in_flight,
                cities: vec!["Paris".into()],
            },
        );
        reducer(&mut state, Action::SuggestionsPick(0));

        let result = reducer(
            &mut state,
            Action::SuggestionsDidLoad {
                seq: in_flight,
                cities: vec!["Paris".into()],
            },
        );

        assert!(!result.changed);
        assert!(!state.suggestions_visible);
    }

    #[test]
    fn test_weather_results_follow_latest_request() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit);
        state.query = "Paris".into();
        reducer(&mut state, Action::SearchSubmit);

        // response to the London request arrives late
        let stale = reducer(
            &mut state,
            Action::WeatherDidLoad {
                seq: 1,
                report: report("London"),
            },
        );
        assert!(!stale.changed);
        assert_eq!(state.ui_state(), UiState::Loading);

        reducer(
            &mut state,
            Action::WeatherDidLoad {
                seq: 2,
                report: report("Paris"),
            },
        );
        assert_eq!(state.ui_state(), UiState::Content);
        assert_eq!(state.report().map(|r| r.city.as_str()), Some("Paris"));
    }

    #[test]
    fn test_weather_error_enters_error_state() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit);

        reducer(
            &mut state,
            Action::WeatherDidError {
                seq: 1,
                error: "not found".into(),
            },
        );

        assert_eq!(state.ui_state(), UiState::Error);
        assert_eq!(state.weather.error(), Some("not found"));
    }

    #[test]
    fn test_dismiss_only_changes_when_open() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::SuggestionsDismiss).changed);

        state.suggestions = vec!["Paris".into()];
        state.suggestions_visible = true;
        assert!(reducer(&mut state, Action::SuggestionsDismiss).changed);
        assert!(!state.suggestions_visible);
    }

    #[test]
    fn test_tick_rerenders_only_while_loading() {
        let mut state = AppState::default();
        state.weather = DataResource::Loading;
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);

        state.weather = DataResource::Loaded(report("London"));
        assert!(!reducer(&mut state, Action::Tick).changed);

        state.weather = DataResource::Failed("City not found".into());
        assert!(!reducer(&mut state, Action::Tick).changed);
    }

    #[test]
    fn test_tick_animates_before_first_search() {
        // Blank startup city: no request goes out, but the loading view shows
        let mut state = AppState::new("");
        assert!(!reducer(&mut state, Action::SearchSubmit).changed);
        assert_eq!(state.ui_state(), UiState::Loading);

        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);
    }
}
