//! Contact details, the message form and the footer.

use chrono::{Datelike, Local};
use ratatui::{
    style::{Color, Style, Stylize},
    text::{Line, Span},
};

use super::{Row, Rows, View};
use crate::form::{ContactForm, Field};
use crate::section::SectionId;
use crate::text::{Card, boxed, card_grid};

const FORM_WIDTH: usize = 60;

pub fn rows(view: &View, form: &ContactForm) -> Vec<Row> {
    let profile = view.profile;
    let width = view.column();
    let mut rows = Rows::new();
    rows.heading(SectionId::Contact, view);

    rows.next_item();
    let mut details = vec![detail(view, "Email", &profile.contact.email)];
    if !profile.contact.phone.is_empty() {
        details.push(detail(view, "Phone", &profile.contact.phone));
    }
    if !profile.contact.location.is_empty() {
        details.push(detail(view, "Location", &profile.contact.location));
    }
    for social in &profile.contact.socials {
        details.push(detail(view, &social.name, &social.url));
    }
    let info = Card {
        title: Some("Contact Information".to_string()),
        body: details,
    };
    for group in card_grid(vec![info], FORM_WIDTH.min(width), 2, width, view.border_style()) {
        rows.extend(group);
    }
    rows.blank();

    rows.next_item();
    rows.extend(
        form_box(view, form, FORM_WIDTH.min(width))
            .into_iter()
            .map(Line::centered),
    );
    rows.blank();

    rows.next_item();
    rows.push(
        Line::from(Span::styled(
            format!("© {} {}. {}", Local::now().year(), profile.name, profile.footer),
            view.muted_style(),
        ))
        .centered(),
    );
    rows.blank();
    rows.into_rows()
}

fn detail(view: &View, label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), view.muted_style()),
        Span::styled(value.to_string(), view.text_style()),
    ])
}

fn form_box(view: &View, form: &ContactForm, width: usize) -> Vec<Line<'static>> {
    let inner = width.saturating_sub(4);
    let mut body = Vec::new();

    for field in Field::ALL {
        let focused = form.is_editing() && form.focus() == field;
        let label_style = if focused {
            view.accent_style().bold()
        } else {
            view.muted_style()
        };
        let required = if field.is_required() { " *" } else { "" };
        body.push(Line::from(Span::styled(
            format!("{}{required}", field.label()),
            label_style,
        )));

        // Show the tail of long values so the cursor stays in view.
        let value = form.value(field);
        let room = inner.saturating_sub(3);
        let skip = value.chars().count().saturating_sub(room);
        let shown: String = value.chars().skip(skip).collect();
        let mut spans = vec![
            Span::styled("› ", label_style),
            Span::styled(shown, view.text_style()),
        ];
        if focused {
            spans.push(Span::styled("▌", Style::new().fg(view.theme.highlight())));
        }
        body.push(Line::from(spans));
    }

    body.push(Line::default());
    let status = if form.notice_visible() {
        Span::styled(
            "✓ Message sent. Thank you for reaching out!",
            Style::new().fg(view.theme.accent()).bold(),
        )
    } else if let Some(err) = form.error() {
        Span::styled(format!("✗ {err}"), Style::new().fg(Color::Red))
    } else if form.is_editing() {
        Span::styled(
            "Tab next field · Enter on Message sends · Esc done",
            view.muted_style(),
        )
    } else {
        Span::styled("Press c to write a message", view.muted_style())
    };
    body.push(Line::from(status));

    boxed(Some("Send a Message"), body, width, view.border_style())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::view;
    use folio_config::Profile;
    use folio_core::FrameScheduler;
    use std::time::Duration;

    fn text(rows: &[Row]) -> String {
        rows.iter()
            .map(|(_, l)| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_shows_contact_details() {
        let profile = Profile::builtin().unwrap();
        let form = ContactForm::new(Duration::from_secs(4));
        let out = text(&rows(&view(&profile), &form));
        assert!(out.contains(&profile.contact.email));
        assert!(out.contains("Name *"));
        assert!(out.contains("Subject "));
    }

    #[test]
    fn test_status_line_follows_form() {
        let profile = Profile::builtin().unwrap();
        let view = view(&profile);
        let scheduler = FrameScheduler::new();
        let mut form = ContactForm::new(Duration::from_secs(4));

        let _ = form.submit(&scheduler);
        assert!(text(&rows(&view, &form)).contains("Name is required"));

        form.begin_edit();
        for c in "Ada".chars() {
            form.insert(c);
        }
        form.focus_next();
        for c in "ada@example.com".chars() {
            form.insert(c);
        }
        form.focus_next();
        form.focus_next();
        for c in "hi".chars() {
            form.insert(c);
        }
        form.submit(&scheduler).unwrap();
        assert!(text(&rows(&view, &form)).contains("Message sent"));
    }
}
