use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, ScrollbarStyle, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle, TextInput, TextInputProps, TextInputStyle,
    highlight_substring,
};

use super::Component;
use crate::action::Action;

/// Height of the input row (padding above and below the text)
pub const SEARCH_BAR_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 12;
const PLACEHOLDER: &str = "Enter city name...";

/// Where the interactive parts were drawn last frame, for mouse hit-testing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchBarLayout {
    pub input: Rect,
    pub button: Rect,
    /// Dropdown outline, when drawn
    pub dropdown: Option<Rect>,
    /// Suggestion index shown on the dropdown's first row
    pub first_visible: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Input,
    Button,
    Suggestion(usize),
    Outside,
}

impl SearchBarLayout {
    /// Resolve a click position. Clicks on the dropdown border, or on an empty
    /// row below the last suggestion, count as part of the dropdown but select
    /// nothing (`None`).
    pub fn click_target(&self, column: u16, row: u16, count: usize) -> Option<ClickTarget> {
        let pos = Position::new(column, row);
        if self.button.contains(pos) {
            return Some(ClickTarget::Button);
        }
        if self.input.contains(pos) {
            return Some(ClickTarget::Input);
        }
        if let Some(dropdown) = self.dropdown {
            if dropdown.contains(pos) {
                let inner = Block::bordered().inner(dropdown);
                if !inner.contains(pos) {
                    return None;
                }
                let index = self.first_visible + (row - inner.y) as usize;
                return (index < count).then_some(ClickTarget::Suggestion(index));
            }
        }
        Some(ClickTarget::Outside)
    }
}

/// City input, search button and suggestion dropdown
pub struct SearchBar {
    input: TextInput,
    list: SelectList,
    layout: SearchBarLayout,
    scroll_offset: usize,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub suggestions: &'a [String],
    pub selected: usize,
    pub show_suggestions: bool,
    pub is_focused: bool,
    // Action constructors
    pub on_query_change: fn(String) -> Action,
    pub on_submit: fn() -> Action,
    pub on_highlight: fn(usize) -> Action,
    pub on_pick: fn(usize) -> Action,
    pub on_dismiss: fn() -> Action,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            list: SelectList::new(),
            layout: SearchBarLayout::default(),
            scroll_offset: 0,
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(&self) -> SearchBarLayout {
        self.layout
    }

    fn suggestion_items(suggestions: &[String], query: &str) -> Vec<Line<'static>> {
        let base = Style::default().fg(Color::Reset);
        let highlight = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        suggestions
            .iter()
            .map(|city| highlight_substring(city, query, base, highlight))
            .collect()
    }

    fn list_style() -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::default(),
                bg: None,
                fg: None,
            },
            selection: SelectionStyle::default(),
            scrollbar: ScrollbarStyle::default(),
        }
    }

    fn handle_key(
        &mut self,
        event: &EventKind,
        code: KeyCode,
        modifiers: KeyModifiers,
        props: &SearchBarProps<'_>,
    ) -> Vec<Action> {
        let dropdown_open = props.show_suggestions && !props.suggestions.is_empty();

        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::Esc if dropdown_open => return vec![(props.on_dismiss)()],
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Enter => return vec![(props.on_submit)()],
            KeyCode::Tab => {
                if dropdown_open {
                    return vec![(props.on_pick)(props.selected)];
                }
                return Vec::new();
            }
            // Up/down navigate the dropdown while it is open
            KeyCode::Down | KeyCode::Up => {
                if !dropdown_open {
                    return Vec::new();
                }
                let items = Self::suggestion_items(props.suggestions, props.query);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: props.selected,
                    is_focused: true,
                    style: Self::list_style(),
                    behavior: SelectListBehavior::default(),
                    on_select: props.on_highlight,
                    render_item: &|item| item.clone(),
                };
                return self
                    .list
                    .handle_event(event, list_props)
                    .into_iter()
                    .collect();
            }
            _ => {}
        }

        // All other keys go to the input
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::all(1),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_query_change,
            on_submit: |_| Action::SearchSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn handle_click(&self, column: u16, row: u16, props: &SearchBarProps<'_>) -> Vec<Action> {
        let count = if props.show_suggestions {
            props.suggestions.len()
        } else {
            0
        };
        match self.layout.click_target(column, row, count) {
            // The button lies outside the dropdown, so an open one closes too
            Some(ClickTarget::Button) if props.show_suggestions => {
                vec![(props.on_dismiss)(), (props.on_submit)()]
            }
            Some(ClickTarget::Button) => vec![(props.on_submit)()],
            Some(ClickTarget::Suggestion(index)) => vec![(props.on_pick)(index)],
            Some(ClickTarget::Outside) if props.show_suggestions => vec![(props.on_dismiss)()],
            _ => Vec::new(),
        }
    }

    fn render_dropdown(&mut self, frame: &mut Frame, below: Rect, props: &SearchBarProps<'_>) {
        let available = below.height.saturating_sub(2);
        if available == 0 {
            return;
        }
        let rows = (props.suggestions.len() as u16).min(available);
        let area = Rect {
            x: self.layout.input.x,
            y: below.y,
            width: self.layout.input.width,
            height: rows + 2,
        };
        self.layout.dropdown = Some(area);

        let visible = rows as usize;
        let offset = scroll_to_show(
            self.scroll_offset,
            props.selected,
            visible,
            props.suggestions.len(),
        );
        self.scroll_offset = offset;
        self.layout.first_visible = offset;

        frame.render_widget(Clear, area);
        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(Color::Rgb(35, 35, 45)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Only the rows that fit are handed to the list, so it never scrolls on
        // its own and row N of the dropdown is always suggestion offset + N
        let end = (offset + visible).min(props.suggestions.len());
        let items = Self::suggestion_items(&props.suggestions[offset..end], props.query);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected.saturating_sub(offset),
            is_focused: props.is_focused,
            style: Self::list_style(),
            behavior: SelectListBehavior::default(),
            on_select: props.on_highlight,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, inner, list_props);
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        match event {
            EventKind::Key(key) => self.handle_key(event, key.code, key.modifiers, &props),
            EventKind::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.handle_click(mouse.column, mouse.row, &props)
                }
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// `area` covers the input row and everything the dropdown may overlay.
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let rows = Layout::vertical([
            Constraint::Length(SEARCH_BAR_HEIGHT), // Input + button
            Constraint::Min(0),                    // Dropdown space
        ])
        .split(area);
        let cols = Layout::horizontal([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)])
            .split(rows[0]);

        self.layout = SearchBarLayout {
            input: cols[0],
            button: cols[1],
            dropdown: None,
            first_visible: 0,
        };

        // Input with lighter background
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::all(1),
                    bg: Some(Color::Rgb(50, 50, 60)),
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_query_change,
            on_submit: |_| Action::SearchSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, cols[0], input_props);

        let button = Paragraph::new(vec![
            Line::default(),
            Line::from("Search"),
            Line::default(),
        ])
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(button, cols[1]);

        if props.show_suggestions && !props.suggestions.is_empty() {
            self.render_dropdown(frame, rows[1], &props);
        } else {
            self.scroll_offset = 0;
        }
    }
}

/// First visible index after moving the window the least needed to keep
/// `selected` in view
fn scroll_to_show(offset: usize, selected: usize, visible: usize, len: usize) -> usize {
    if visible == 0 {
        return 0;
    }
    let offset = if selected < offset {
        selected
    } else if selected >= offset + visible {
        selected + 1 - visible
    } else {
        offset
    };
    offset.min(len.saturating_sub(visible))
}
