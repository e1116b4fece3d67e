//! Half-block ASCII art font for banners and large counters.
//!
//! Every glyph is [`HEIGHT`] rows tall. Widths vary per glyph but all rows
//! of one glyph have the same number of characters.

/// Rows per glyph.
pub const HEIGHT: usize = 3;

/// Columns between adjacent glyphs.
const SPACING: usize = 1;

/// Look up the art for `c`. Lowercase letters map to uppercase.
pub fn glyph(c: char) -> Option<[&'static str; HEIGHT]> {
    let art = match c.to_ascii_uppercase() {
        '0' => ["█▀█", "█ █", "▀▀▀"],
        '1' => ["▀█ ", " █ ", "▀▀▀"],
        '2' => ["▀▀█", "█▀▀", "▀▀▀"],
        '3' => ["▀▀█", " ▀█", "▀▀▀"],
        '4' => ["█ █", "▀▀█", "  ▀"],
        '5' => ["█▀▀", "▀▀█", "▀▀▀"],
        '6' => ["█▀▀", "█▀█", "▀▀▀"],
        '7' => ["▀▀█", "  █", "  ▀"],
        '8' => ["█▀█", "█▀█", "▀▀▀"],
        '9' => ["█▀█", "▀▀█", "▀▀▀"],
        'A' => ["█▀█", "█▀█", "▀ ▀"],
        'B' => ["█▀▄", "█▀▄", "▀▀ "],
        'C' => ["█▀▀", "█  ", "▀▀▀"],
        'D' => ["█▀▄", "█ █", "▀▀ "],
        'E' => ["█▀▀", "█▀▀", "▀▀▀"],
        'F' => ["█▀▀", "█▀▀", "▀  "],
        'G' => ["█▀▀", "█ █", "▀▀▀"],
        'H' => ["█ █", "█▀█", "▀ ▀"],
        'I' => ["▀█▀", " █ ", "▀▀▀"],
        'J' => ["  █", "█ █", "▀▀▀"],
        'K' => ["█ █", "█▀▄", "▀ ▀"],
        'L' => ["█  ", "█  ", "▀▀▀"],
        'M' => ["█▄ ▄█", "█ ▀ █", "▀   ▀"],
        'N' => ["█▄ █", "█ ▀█", "▀  ▀"],
        'O' => ["█▀█", "█ █", "▀▀▀"],
        'P' => ["█▀█", "█▀▀", "▀  "],
        'Q' => ["█▀█", "█ █", "▀▀█"],
        'R' => ["█▀█", "█▀▄", "▀ ▀"],
        'S' => ["█▀▀", "▀▀█", "▀▀▀"],
        'T' => ["▀█▀", " █ ", " ▀ "],
        'U' => ["█ █", "█ █", "▀▀▀"],
        'V' => ["█ █", "█ █", " ▀ "],
        'W' => ["█   █", "█ █ █", " ▀ ▀ "],
        'X' => ["█ █", "▄▀▄", "▀ ▀"],
        'Y' => ["█ █", " █ ", " ▀ "],
        'Z' => ["▀▀█", "▄▀ ", "▀▀▀"],
        '+' => ["   ", "▄█▄", " ▀ "],
        '%' => ["▀ █", " █ ", "█ ▄"],
        '-' => ["   ", "▀▀▀", "   "],
        '_' => ["   ", "   ", "▀▀▀"],
        '.' => [" ", " ", "▀"],
        ' ' => ["  ", "  ", "  "],
        _ => return None,
    };
    Some(art)
}

/// Build the art for `text`. Characters without a glyph are skipped.
pub fn build_art(text: &str) -> Vec<String> {
    let glyphs: Vec<[&str; HEIGHT]> = text.chars().filter_map(glyph).collect();
    (0..HEIGHT)
        .map(|row| {
            glyphs
                .iter()
                .map(|g| g[row])
                .collect::<Vec<_>>()
                .join(&" ".repeat(SPACING))
        })
        .collect()
}

/// Width in terminal cells of `build_art(text)`.
pub fn art_width(text: &str) -> usize {
    let widths: Vec<usize> = text
        .chars()
        .filter_map(glyph)
        .map(|g| g[0].chars().count())
        .collect();
    if widths.is_empty() {
        return 0;
    }
    widths.iter().sum::<usize>() + SPACING * (widths.len() - 1)
}

/// Art for a counter value with an optional suffix such as `+` or `%`.
pub fn build_number_art(value: u32, suffix: &str) -> Vec<String> {
    build_art(&format!("{value}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_rows_have_equal_width() {
        let all = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ+%-_. ";
        for c in all.chars() {
            let g = glyph(c).unwrap();
            let w = g[0].chars().count();
            assert!(g.iter().all(|row| row.chars().count() == w), "glyph {c:?}");
        }
    }

    #[test]
    fn test_build_art() {
        let art = build_number_art(5, "+");
        assert_eq!(art.len(), HEIGHT);
        assert_eq!(art[0], "█▀▀    ");
        assert_eq!(art[1], "▀▀█ ▄█▄");
        assert!(art.iter().all(|line| line.chars().count() == art_width("5+")));
    }

    #[test]
    fn test_lowercase_and_unknown() {
        assert_eq!(build_art("hi"), build_art("HI"));
        assert_eq!(build_art("a!b"), build_art("ab"));
        assert_eq!(art_width(""), 0);
        assert_eq!(build_art(""), vec![String::new(); HEIGHT]);
    }
}
