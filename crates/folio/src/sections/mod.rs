//! Line builders for each page section.
//!
//! A section is a list of rows tagged with an item number. Item 0 is the
//! heading; cards and entries follow in order so the reveal can stagger
//! them.

pub mod about;
pub mod contact;
pub mod education;
pub mod hero;
pub mod projects;
pub mod skills;

use std::time::Duration;

use folio_config::Profile;
use folio_core::ColorTheme;
use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
};

use crate::section::SectionId;
use crate::tabs::FilterTabs;
use crate::text::heading;

/// A page row and the reveal item it belongs to.
pub type Row = (usize, Line<'static>);

/// What every section builder reads.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub profile: &'a Profile,
    pub theme: ColorTheme,
    /// Page width in cells.
    pub width: u16,
    /// Height of the scrolling area.
    pub height: u16,
    pub now: Duration,
}

impl View<'_> {
    /// Width of the text column, leaving side margins.
    pub fn column(&self) -> usize {
        (self.width as usize).saturating_sub(4).min(96)
    }

    pub fn text_style(&self) -> Style {
        Style::new().fg(self.theme.text())
    }

    pub fn muted_style(&self) -> Style {
        Style::new().fg(self.theme.muted())
    }

    pub fn accent_style(&self) -> Style {
        Style::new().fg(self.theme.accent())
    }

    pub fn border_style(&self) -> Style {
        Style::new().fg(self.theme.muted())
    }
}

/// Collects rows while tracking the current item.
#[derive(Debug, Default)]
pub struct Rows {
    rows: Vec<Row>,
    item: usize,
}

impl Rows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the next reveal item.
    pub fn next_item(&mut self) {
        self.item += 1;
    }

    pub fn push(&mut self, line: Line<'static>) {
        self.rows.push((self.item, line));
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = Line<'static>>) {
        for line in lines {
            self.push(line);
        }
    }

    pub fn blank(&mut self) {
        self.push(Line::default());
    }

    /// Standard top padding and heading for `id`, as item 0.
    pub fn heading(&mut self, id: SectionId, view: &View) {
        let (plain, accent) = id.heading();
        self.blank();
        self.extend(heading(plain, accent, view.theme));
        self.blank();
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// Filter tabs as one centered line, the selected one highlighted.
pub fn tab_line(tabs: &FilterTabs, view: &View) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (label, selected)) in tabs.labels().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let text = format!(" {label} ");
        spans.push(if selected {
            Span::styled(text, Style::new().fg(view.theme.accent()).bold().reversed())
        } else {
            Span::styled(text, view.muted_style())
        });
    }
    Line::from(spans).centered()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn view(profile: &Profile) -> View<'_> {
        View {
            profile,
            theme: ColorTheme::default(),
            width: 100,
            height: 30,
            now: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_track_items() {
        let profile = Profile::builtin().unwrap();
        let view = test_support::view(&profile);
        let mut rows = Rows::new();
        rows.heading(SectionId::About, &view);
        rows.next_item();
        rows.push(Line::from("card"));
        let rows = rows.into_rows();
        assert_eq!(rows.len(), 5);
        assert!(rows[..4].iter().all(|(item, _)| *item == 0));
        assert_eq!(rows[4].0, 1);
    }

    #[test]
    fn test_tab_line_marks_selection() {
        let profile = Profile::builtin().unwrap();
        let view = test_support::view(&profile);
        let tabs = FilterTabs::new(&profile.projects);
        let line = tab_line(&tabs, &view);
        assert!(line.spans[0].content.contains("all"));
        assert!(line.spans[0].style.add_modifier.contains(ratatui::style::Modifier::REVERSED));
    }
}
