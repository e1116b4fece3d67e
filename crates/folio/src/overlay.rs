//! Draw page text over the rain without blanking it.

use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Paragraph, widgets::Widget};

/// Render `lines` into `area` of `buf`, keeping whatever is already there
/// outside the text. Each row is copied from its first to its last
/// non-blank cell, so words stay readable and margins show through.
pub fn overlay(buf: &mut Buffer, area: Rect, lines: Vec<Line<'static>>) {
    let area = area.intersection(buf.area);
    if area.is_empty() {
        return;
    }
    let mut scratch = Buffer::empty(area);
    Paragraph::new(lines).render(area, &mut scratch);

    for y in area.top()..area.bottom() {
        let filled = |x: u16| scratch.cell((x, y)).is_some_and(|c| c.symbol() != " ");
        let Some(first) = (area.left()..area.right()).find(|&x| filled(x)) else {
            continue;
        };
        let last = (area.left()..area.right())
            .rev()
            .find(|&x| filled(x))
            .unwrap_or(first);

        // Rain glyphs are two cells wide; a half-covered glyph is cleared.
        if first > area.left() {
            if let Some(cell) = buf.cell_mut((first - 1, y)) {
                if !cell.symbol().is_ascii() {
                    cell.reset();
                }
            }
        }
        for x in first..=last {
            if let (Some(src), Some(dst)) = (scratch.cell((x, y)), buf.cell_mut((x, y))) {
                *dst = src.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margins_show_through() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::with_lines(["##########", "##########"]);
        overlay(&mut buf, area, vec![Line::from("  a b"), Line::from("")]);
        assert_eq!(buf, Buffer::with_lines(["##a b#####", "##########"]));
    }

    #[test]
    fn test_half_covered_wide_glyph_is_cleared() {
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        buf.set_string(0, 0, "ア", ratatui::style::Style::new());
        overlay(&mut buf, area, vec![Line::from(" x")]);
        assert_eq!(buf.cell((0, 0)).map(|c| c.symbol()), Some(" "));
        assert_eq!(buf.cell((1, 0)).map(|c| c.symbol()), Some("x"));
    }
}
