//! Full-screen intro: name banner, typewriter role line, summary.

use std::time::Duration;

use folio_fonts::{art_width, build_art};
use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
};

use super::{Row, Rows, View};
use crate::text::paragraph;

const CURSOR_BLINK: Duration = Duration::from_millis(530);

pub fn rows(view: &View, typed: &str) -> Vec<Row> {
    let profile = view.profile;
    let mut body = Vec::new();

    body.push(
        Line::from(Span::styled(profile.greeting.clone(), view.muted_style())).centered(),
    );
    body.push(Line::default());
    if art_width(&profile.name) <= view.column() {
        body.extend(build_art(&profile.name).into_iter().map(|row| {
            Line::from(Span::styled(row, Style::new().fg(view.theme.accent()))).centered()
        }));
    } else {
        body.push(
            Line::from(Span::styled(
                profile.name.clone(),
                Style::new().fg(view.theme.accent()).bold(),
            ))
            .centered(),
        );
    }
    body.push(Line::default());

    let cursor_on = (view.now.as_millis() / CURSOR_BLINK.as_millis()) % 2 == 0;
    body.push(
        Line::from(vec![
            Span::styled("> ", view.muted_style()),
            Span::styled(typed.to_string(), Style::new().fg(view.theme.highlight()).bold()),
            Span::styled(
                if cursor_on { "▌" } else { " " },
                Style::new().fg(view.theme.highlight()),
            ),
        ])
        .centered(),
    );
    body.push(Line::default());

    let width = view.column().min(70);
    body.extend(
        paragraph(&profile.summary, width, 0, view.text_style())
            .into_iter()
            .map(Line::centered),
    );
    body.push(Line::default());
    body.push(
        Line::from(vec![
            Span::styled("Enter", view.accent_style().bold()),
            Span::styled(" explore  ", view.muted_style()),
            Span::styled("c", view.accent_style().bold()),
            Span::styled(" get in touch", view.muted_style()),
        ])
        .centered(),
    );

    // Fill the screen with the body vertically centered.
    let height = view.height as usize;
    let top = height.saturating_sub(body.len()) / 2;
    let bottom = height.saturating_sub(body.len() + top);

    let mut rows = Rows::new();
    (0..top).for_each(|_| rows.blank());
    for line in body {
        rows.push(line);
        rows.next_item();
    }
    (0..bottom).for_each(|_| rows.blank());
    rows.into_rows()
}
