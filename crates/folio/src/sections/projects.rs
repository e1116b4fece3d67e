//! Project cards behind category tabs.

use folio_config::Project;
use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
};

use super::{Row, Rows, View, tab_line};
use crate::section::SectionId;
use crate::tabs::FilterTabs;
use crate::text::{Card, card_grid, wrap};

const CARD_WIDTH: usize = 46;

pub fn rows(view: &View, tabs: &FilterTabs) -> Vec<Row> {
    let width = view.column();
    let card_width = CARD_WIDTH.min(width);
    let inner = card_width.saturating_sub(4);

    let mut rows = Rows::new();
    rows.heading(SectionId::Projects, view);
    rows.push(tab_line(tabs, view));
    rows.blank();

    let visible = tabs.apply(&view.profile.projects);
    if visible.is_empty() {
        rows.next_item();
        rows.push(Line::from(Span::styled("No projects yet.", view.muted_style())).centered());
    }
    let cards = visible
        .into_iter()
        .map(|project| project_card(view, project, inner))
        .collect();

    for group in card_grid(cards, card_width, 2, width, view.border_style()) {
        rows.next_item();
        rows.extend(group);
    }
    rows.blank();
    rows.into_rows()
}

fn project_card(view: &View, project: &Project, inner: usize) -> Card {
    let mut body = vec![Line::from(Span::styled(
        format!("[{}]", project.category),
        Style::new().fg(view.theme.highlight()),
    ))];
    body.extend(
        wrap(&project.description, inner)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, view.text_style()))),
    );
    if !project.highlights.is_empty() {
        body.push(Line::default());
        for highlight in &project.highlights {
            for (i, l) in wrap(highlight, inner.saturating_sub(2)).into_iter().enumerate() {
                let marker = if i == 0 { "▸ " } else { "  " };
                body.push(Line::from(vec![
                    Span::styled(marker, view.accent_style()),
                    Span::styled(l, view.muted_style()),
                ]));
            }
        }
    }
    if !project.technologies.is_empty() {
        body.push(Line::default());
        let tags = project.technologies.join(" · ");
        body.extend(
            wrap(&tags, inner)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, view.accent_style().italic()))),
        );
    }
    Card {
        title: Some(project.title.clone()),
        body,
    }
}
