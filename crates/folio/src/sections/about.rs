//! Biography and the counting statistics.

use folio_fonts::build_number_art;
use folio_fx::StatCounter;
use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
};

use super::{Row, Rows, View};
use crate::section::SectionId;
use crate::text::{Card, card_grid, paragraph, wrap};

const CARD_WIDTH: usize = 28;

/// `counters` runs parallel to `profile.stats`.
pub fn rows(view: &View, counters: &[StatCounter]) -> Vec<Row> {
    let about = &view.profile.about;
    let width = view.column();
    let mut rows = Rows::new();
    rows.heading(SectionId::About, view);

    rows.next_item();
    rows.push(
        Line::from(Span::styled(
            about.headline.clone(),
            Style::new().fg(view.theme.highlight()).bold(),
        ))
        .centered(),
    );
    rows.blank();
    for text in &about.paragraphs {
        rows.next_item();
        rows.extend(paragraph(text, width, 2, view.text_style()));
        rows.blank();
    }

    let inner = CARD_WIDTH - 4;
    let cards = view
        .profile
        .stats
        .iter()
        .enumerate()
        .map(|(i, stat)| {
            let value = counters.get(i).map_or(stat.value, StatCounter::value);
            let mut body: Vec<Line<'static>> = build_number_art(value, &stat.suffix)
                .into_iter()
                .map(|row| Line::from(Span::styled(row, view.accent_style())))
                .collect();
            body.push(Line::default());
            body.extend(
                wrap(&stat.label, inner)
                    .into_iter()
                    .map(|l| Line::from(Span::styled(l, Style::new().fg(view.theme.text()).bold()))),
            );
            body.extend(
                wrap(&stat.description, inner)
                    .into_iter()
                    .map(|l| Line::from(Span::styled(l, view.muted_style()))),
            );
            Card { title: None, body }
        })
        .collect();

    for group in card_grid(cards, CARD_WIDTH.min(width), 2, width, view.border_style()) {
        rows.next_item();
        rows.extend(group);
        rows.blank();
    }
    rows.into_rows()
}
