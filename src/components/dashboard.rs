use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::search_bar::SEARCH_BAR_HEIGHT;
use super::{Component, ReportBody, ReportBodyProps, SearchBar, SearchBarLayout, SearchBarProps};
use crate::action::Action;
use crate::state::AppState;

/// Props for Dashboard - read-only view of state
pub struct DashboardProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Search bar on top, report below, key hints at the bottom.
///
/// Suggestion items are activated through the action constructors handed to
/// the search bar, never through a shared handle to the dashboard.
#[derive(Default)]
pub struct Dashboard {
    search: SearchBar,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search bar geometry from the last render
    pub fn search_layout(&self) -> SearchBarLayout {
        self.search.layout()
    }

    fn search_props(state: &AppState, is_focused: bool) -> SearchBarProps<'_> {
        SearchBarProps {
            query: &state.query,
            suggestions: &state.suggestions,
            selected: state.suggestion_selected,
            show_suggestions: state.showing_suggestions(),
            is_focused,
            on_query_change: Action::SearchInput,
            on_submit: || Action::SearchSubmit,
            on_highlight: Action::SuggestionsHighlight,
            on_pick: Action::SuggestionsPick,
            on_dismiss: || Action::SuggestionsDismiss,
        }
    }
}

impl Component<Action> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let search_props = Self::search_props(props.state, props.is_focused);
        self.search
            .handle_event(event, search_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DashboardProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Search bar + report
            Constraint::Length(1), // Help bar
        ])
        .split(area);
        let main = Layout::vertical([
            Constraint::Length(SEARCH_BAR_HEIGHT),
            Constraint::Min(0),
        ])
        .split(chunks[0]);

        let mut body = ReportBody;
        body.render(frame, main[1], ReportBodyProps { state: props.state });

        // Drawn after the body so the dropdown overlays it
        let search_props = Self::search_props(props.state, props.is_focused);
        self.search.render(frame, chunks[0], search_props);

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "search"),
                    StatusBarHint::new("\u{2191}\u{2193}", "select"),
                    StatusBarHint::new("tab", "pick"),
                    StatusBarHint::new("esc", "close/quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn state_with_suggestions() -> AppState {
        AppState {
            query: "Par".into(),
            suggestions: vec!["Paris".into(), "Paris-XII".into()],
            suggestions_visible: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_enter_submits_search() {
        let mut component = Dashboard::new();
        let state = AppState::default();
        let props = DashboardProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&press(KeyCode::Enter), props)
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::SearchSubmit);
    }

    #[test]
    fn test_esc_dismisses_open_dropdown() {
        let mut component = Dashboard::new();
        let state = state_with_suggestions();
        let props = DashboardProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&press(KeyCode::Esc), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::SuggestionsDismiss);
    }

    #[test]
    fn test_esc_quits_without_dropdown() {
        let mut component = Dashboard::new();
        let state = AppState::default();
        let props = DashboardProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&press(KeyCode::Esc), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_tab_picks_highlighted_suggestion() {
        let mut component = Dashboard::new();
        let mut state = state_with_suggestions();
        state.suggestion_selected = 1;
        let props = DashboardProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&press(KeyCode::Tab), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::SuggestionsPick(1));
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut component = Dashboard::new();
        let state = AppState::default();
        let props = DashboardProps {
            state: &state,
            is_focused: false,
        };

        let actions: Vec<_> = component
            .handle_event(&press(KeyCode::Enter), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_loading() {
        let mut render = RenderHarness::new(60, 24);
        let mut component = Dashboard::new();
        let state = AppState::default();

        let output = render.render_to_string_plain(|frame| {
            let props = DashboardProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Loading weather"));
        assert!(output.contains("Search"));
    }
}
