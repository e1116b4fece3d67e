//! Line building helpers shared by the sections.

use folio_core::ColorTheme;
use folio_fx::scale_rgb;
use ratatui::{
    style::{Color, Style, Stylize},
    text::{Line, Span},
};

/// Greedy word wrap by character count. Words longer than `width` are
/// split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current_len == 0 { word.len() } else { word.len() + 1 };
        if current_len + needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Wrap `text` into styled lines with a leading indent.
pub fn paragraph(text: &str, width: usize, indent: usize, style: Style) -> Vec<Line<'static>> {
    wrap(text, width.saturating_sub(indent))
        .into_iter()
        .map(|l| Line::from(Span::styled(format!("{}{l}", " ".repeat(indent)), style)))
        .collect()
}

/// Centered section heading with an underline.
pub fn heading(plain: &str, accent: &str, theme: ColorTheme) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(plain.to_string(), Style::new().fg(Color::White).bold()),
            Span::styled(accent.to_string(), Style::new().fg(theme.accent()).bold()),
        ])
        .centered(),
        Line::from(Span::styled("━".repeat(12), Style::new().fg(theme.highlight()))).centered(),
    ]
}

/// Frame `body` in a rounded box `width` cells wide. Body lines should
/// already fit in `width - 4` cells.
pub fn boxed(
    title: Option<&str>,
    body: Vec<Line<'static>>,
    width: usize,
    border: Style,
) -> Vec<Line<'static>> {
    let width = width.max(4);
    let inner = width - 4;
    let mut lines = Vec::with_capacity(body.len() + 2);

    let top = match title {
        Some(t) => {
            let t: String = t.chars().take(inner.saturating_sub(2)).collect();
            let fill = (width - 2).saturating_sub(t.chars().count() + 3);
            format!("╭─ {t} {}╮", "─".repeat(fill))
        }
        None => format!("╭{}╮", "─".repeat(width - 2)),
    };
    lines.push(Line::from(Span::styled(top, border)));

    for line in body {
        let pad = inner.saturating_sub(line.width());
        let mut spans = vec![Span::styled("│ ", border)];
        spans.extend(line.spans);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(" │", border));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(
        format!("╰{}╯", "─".repeat(width - 2)),
        border,
    )));
    lines
}

/// A boxed card before layout.
#[derive(Debug, Clone, Default)]
pub struct Card {
    pub title: Option<String>,
    pub body: Vec<Line<'static>>,
}

/// Lay cards out left to right in rows that fit `width`. Cards in a row
/// are padded to the same height. Returns one group of lines per row.
pub fn card_grid(
    cards: Vec<Card>,
    card_width: usize,
    gap: usize,
    width: usize,
    border: Style,
) -> Vec<Vec<Line<'static>>> {
    let per_row = ((width + gap) / (card_width + gap)).max(1);
    let mut rows = Vec::new();
    let mut cards = cards.into_iter().peekable();

    while cards.peek().is_some() {
        let mut row: Vec<Card> = cards.by_ref().take(per_row).collect();
        let height = row.iter().map(|c| c.body.len()).max().unwrap_or(0);
        let boxes: Vec<Vec<Line<'static>>> = row
            .iter_mut()
            .map(|card| {
                let mut body = std::mem::take(&mut card.body);
                body.resize(height, Line::default());
                boxed(card.title.as_deref(), body, card_width, border)
            })
            .collect();

        let lines = (0..height + 2)
            .map(|i| {
                let mut spans = Vec::new();
                for (n, lines) in boxes.iter().enumerate() {
                    if n > 0 {
                        spans.push(Span::raw(" ".repeat(gap)));
                    }
                    spans.extend(lines[i].spans.iter().cloned());
                }
                Line::from(spans).centered()
            })
            .collect();
        rows.push(lines);
    }
    rows
}

/// Dim a line for a reveal in progress. Progress 0 hides the line.
pub fn fade_line(line: Line<'static>, progress: f32) -> Line<'static> {
    if progress >= 1.0 {
        return line;
    }
    if progress <= 0.0 {
        return Line::default();
    }
    let alignment = line.alignment;
    let spans: Vec<Span<'static>> = line
        .spans
        .into_iter()
        .map(|span| {
            let fg = match span.style.fg {
                Some(color @ Color::Rgb(..)) => scale_rgb(color, progress),
                Some(Color::White) | None => scale_rgb(Color::Rgb(230, 230, 230), progress),
                Some(other) if progress > 0.5 => other,
                Some(_) => Color::DarkGray,
            };
            Span::styled(span.content, span.style.fg(fg))
        })
        .collect();
    let mut faded = Line::from(spans);
    faded.alignment = alignment;
    faded
}

/// Text progress bar: `███████░░░`.
pub fn progress_bar(percent: u32, width: usize, fill: Style, empty: Style) -> Vec<Span<'static>> {
    let filled = (percent.min(100) as usize * width) / 100;
    vec![
        Span::styled("█".repeat(filled), fill),
        Span::styled("░".repeat(width - filled), empty),
    ]
}
