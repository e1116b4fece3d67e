//! Education and certification timeline.

use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
};

use super::{Row, Rows, View};
use crate::section::SectionId;
use crate::text::wrap;

pub fn rows(view: &View) -> Vec<Row> {
    let width = view.column();
    let inner = width.saturating_sub(4);
    let rail = view.border_style();
    let mut rows = Rows::new();
    rows.heading(SectionId::Education, view);

    for entry in &view.profile.education {
        rows.next_item();
        rows.push(Line::from(vec![
            Span::styled("  ● ", view.accent_style()),
            Span::styled(entry.period.clone(), Style::new().fg(view.theme.highlight()).bold()),
        ]));
        let mut push = |line: Vec<Span<'static>>| {
            let mut spans = vec![Span::styled("  │ ", rail)];
            spans.extend(line);
            rows.push(Line::from(spans));
        };
        push(vec![Span::styled(
            entry.title.clone(),
            Style::new().fg(view.theme.text()).bold(),
        )]);
        if !entry.subtitle.is_empty() {
            push(vec![Span::styled(entry.subtitle.clone(), view.accent_style())]);
        }
        let place = if entry.location.is_empty() {
            entry.institution.clone()
        } else {
            format!("{} · {}", entry.institution, entry.location)
        };
        push(vec![Span::styled(place, view.muted_style().italic())]);
        for l in wrap(&entry.description, inner) {
            push(vec![Span::styled(l, view.text_style())]);
        }
        push(Vec::new());
    }
    rows.blank();
    rows.into_rows()
}
