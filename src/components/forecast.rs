use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::display::ForecastCard;

/// Row of forecast cards, one per day, redrawn from scratch every frame
pub struct ForecastRow;

pub struct ForecastRowProps<'a> {
    pub cards: &'a [ForecastCard],
}

/// Border plus date, icon, temperatures and description
pub const CARD_HEIGHT: u16 = 6;

impl Component<Action> for ForecastRow {
    type Props<'a> = ForecastRowProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.cards.is_empty() || area.height == 0 {
            return;
        }

        let slots = Layout::horizontal(vec![Constraint::Fill(1); props.cards.len()]).split(area);
        for (card, slot) in props.cards.iter().zip(slots.iter()) {
            render_card(frame, *slot, card);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &ForecastCard) {
    let block = Block::bordered().border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(card.date.clone(), Style::default().bold())),
        Line::from(Span::styled(
            card.icon.glyph,
            Style::default().fg(card.icon.condition.color()),
        )),
        Line::from(card.temps.clone()),
        Line::from(Span::styled(
            card.description.clone(),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
