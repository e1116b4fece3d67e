//! Skill cards with counting percentages and progress bars.

use folio_config::Skill;
use folio_fx::StatCounter;
use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
};

use super::{Row, Rows, View, tab_line};
use crate::section::SectionId;
use crate::tabs::FilterTabs;
use crate::text::{Card, card_grid, progress_bar, wrap};

const CARD_WIDTH: usize = 44;

/// `counters` runs parallel to `profile.skills`.
pub fn rows(view: &View, tabs: &FilterTabs, counters: &[StatCounter]) -> Vec<Row> {
    let skills = &view.profile.skills;
    let width = view.column();
    let card_width = CARD_WIDTH.min(width);
    let inner = card_width.saturating_sub(4);

    let mut rows = Rows::new();
    rows.heading(SectionId::Skills, view);
    rows.push(tab_line(tabs, view));
    rows.blank();

    let cards = tabs
        .apply(skills)
        .into_iter()
        .map(|skill| {
            let value = skills
                .iter()
                .position(|s| std::ptr::eq(s, skill))
                .and_then(|i| counters.get(i))
                .map_or(skill.percentage, StatCounter::value);
            skill_card(view, skill, value, inner)
        })
        .collect();

    for group in card_grid(cards, card_width, 2, width, view.border_style()) {
        rows.next_item();
        rows.extend(group);
    }
    rows.blank();
    rows.into_rows()
}

fn skill_card(view: &View, skill: &Skill, value: u32, inner: usize) -> Card {
    let percent = format!("{value}%");
    let name_width = inner.saturating_sub(percent.len() + 1);
    let name: String = skill.name.chars().take(name_width).collect();
    let gap = inner.saturating_sub(name.chars().count() + percent.len());

    let mut body = vec![
        Line::from(vec![
            Span::styled(name, Style::new().fg(view.theme.text()).bold()),
            Span::raw(" ".repeat(gap)),
            Span::styled(percent, view.accent_style().bold()),
        ]),
        Line::from(progress_bar(
            value,
            inner,
            Style::new().fg(view.theme.highlight()),
            view.muted_style(),
        )),
    ];
    body.extend(
        wrap(&skill.description, inner)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, view.muted_style()))),
    );
    Card { title: None, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::view;
    use folio_config::Profile;

    fn text(rows: &[Row]) -> String {
        rows.iter()
            .flat_map(|(_, l)| l.spans.iter().map(|s| s.content.to_string()))
            .collect()
    }

    #[test]
    fn test_unstarted_counters_show_zero() {
        let profile = Profile::builtin().unwrap();
        let view = view(&profile);
        let tabs = FilterTabs::new(&profile.skills);
        let counters: Vec<StatCounter> = profile
            .skills
            .iter()
            .map(|s| StatCounter::new(s.percentage, 60))
            .collect();
        let out = text(&rows(&view, &tabs, &counters));
        assert!(out.contains("0%"));
        assert!(!out.contains("80%"));
    }

    #[test]
    fn test_filter_hides_other_categories() {
        let profile = Profile::builtin().unwrap();
        let view = view(&profile);
        let mut tabs = FilterTabs::new(&profile.skills);
        tabs.next();
        let category = tabs.current().unwrap().to_string();
        let out = text(&rows(&view, &tabs, &[]));
        for skill in &profile.skills {
            let shown = out.contains(&skill.name);
            assert_eq!(shown, skill.category == category, "{}", skill.name);
        }
    }
}
