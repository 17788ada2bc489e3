use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{Component, ForecastRow, ForecastRowProps};
use super::forecast::CARD_HEIGHT;
use crate::action::Action;
use crate::display::ReportFields;
use crate::state::{AppState, UiState, WeatherReport};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Shown in the error view regardless of what went wrong
pub const ERROR_MESSAGE: &str = "Weather data not available. Check the city name.";

pub const SPINNER: [&str; 10] = [
    "\u{280b}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283c}", "\u{2834}", "\u{2826}",
    "\u{2827}", "\u{2807}", "\u{280f}",
];

/// Ticks per spinner frame
const SPINNER_TICKS_PER_FRAME: u32 = 6;

/// Loading, content or error view - exactly one per frame
pub struct ReportBody;

pub struct ReportBodyProps<'a> {
    pub state: &'a AppState,
}

/// Upper bound on the FIGlet temperature height (terminus font)
const TEMP_CAP: u16 = 6;

impl Component<Action> for ReportBody {
    type Props<'a> = ReportBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match (props.state.ui_state(), props.state.report()) {
            (UiState::Content, Some(report)) => render_content(frame, area, report),
            (UiState::Error, _) => render_error(frame, area),
            _ => render_loading(frame, area, props.state.tick_count),
        }
    }
}

fn render_content(frame: &mut Frame, area: Rect, report: &WeatherReport) {
    let fields = ReportFields::from(report);

    let chunks = Layout::vertical([
        Constraint::Length(1), // City, country
        Constraint::Length(1), // Icon + description
        Constraint::Max(TEMP_CAP), // Temperature
        Constraint::Length(1), // Feels like
        Constraint::Length(1), // blank
        Constraint::Length(1), // Humidity, wind
        Constraint::Length(1), // Pressure, visibility
        Constraint::Length(1), // Sunrise, sunset
        Constraint::Length(1), // blank
        Constraint::Max(CARD_HEIGHT), // Forecast
    ])
    .flex(Flex::Start)
    .split(area);

    let city = Line::from(vec![Span::styled(
        fields.city_name.clone(),
        Style::default().fg(Color::White).bold(),
    )])
    .centered();
    frame.render_widget(Paragraph::new(city), chunks[0]);

    let condition = Line::from(vec![
        Span::styled(
            fields.icon.glyph,
            Style::default().fg(fields.icon.condition.color()),
        ),
        Span::raw(" "),
        Span::styled(fields.icon.alt.clone(), Style::default().fg(Color::Gray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(condition), chunks[1]);

    let temp_text = format!("{}°C", fields.temperature);
    let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(temperature_gradient(report.temperature));
    frame.render_widget(ArtBox::new(&renderer, &temp_text), chunks[2]);

    let feels = Line::from(vec![Span::styled(
        format!("Feels like {}°C", fields.feels_like),
        Style::default().fg(Color::Gray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(feels), chunks[3]);

    frame.render_widget(
        Paragraph::new(stat_line(&[
            ("Humidity", &fields.humidity),
            ("Wind", &fields.wind_speed),
        ])),
        chunks[5],
    );
    frame.render_widget(
        Paragraph::new(stat_line(&[
            ("Pressure", &fields.pressure),
            ("Visibility", &fields.visibility),
        ])),
        chunks[6],
    );
    frame.render_widget(
        Paragraph::new(stat_line(&[
            ("Sunrise", &fields.sunrise),
            ("Sunset", &fields.sunset),
        ])),
        chunks[7],
    );

    let mut forecast = ForecastRow;
    forecast.render(
        frame,
        chunks[9],
        ForecastRowProps {
            cards: &fields.forecast,
        },
    );
}

/// `Label value · Label value`, centered
fn stat_line(stats: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(stats.len() * 3);
    for (i, (label, value)) in stats.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  \u{b7}  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("{label} "),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled(value.to_string(), Style::default().fg(Color::White)));
    }
    Line::from(spans).centered()
}

fn render_loading(frame: &mut Frame, area: Rect, tick_count: u32) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let frame_index = (tick_count / SPINNER_TICKS_PER_FRAME) as usize % SPINNER.len();
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                SPINNER[frame_index],
                Style::default().fg(Color::Cyan).bold(),
            )])
            .centered(),
        ),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Loading weather...",
                Style::default().fg(Color::DarkGray),
            )])
            .centered(),
        ),
        chunks[1],
    );
}

fn render_error(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // blank
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(ERROR_ICON).centered()),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                ERROR_MESSAGE,
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        chunks[3],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to search again", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        chunks[5],
    );
}

fn temperature_gradient(celsius: f64) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (
            ArtColor::rgb(150, 200, 255),
            ArtColor::rgb(200, 230, 255),
        ),
        t if t < 15.0 => (
            ArtColor::rgb(100, 180, 255),
            ArtColor::rgb(150, 220, 200),
        ),
        t if t < 25.0 => (
            ArtColor::rgb(100, 200, 150),
            ArtColor::rgb(255, 220, 100),
        ),
        t if t < 35.0 => (
            ArtColor::rgb(255, 180, 80),
            ArtColor::rgb(255, 120, 80),
        ),
        _ => (
            ArtColor::rgb(255, 100, 80),
            ArtColor::rgb(255, 60, 60),
        ),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}
