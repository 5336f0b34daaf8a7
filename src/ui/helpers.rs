//! Shared rendering utilities.
//!
//! Every length here is counted in characters, not bytes, so company names
//! such as "Zürich Labs" line up with ASCII rows.
//!
//! # Example
//!
//! ```rust
//! use jobboard::ui::helpers::{truncate, wrap};
//!
//! assert_eq!(truncate("Senior Rust Engineer", 10), "Senior Ru…");
//! assert_eq!(wrap("one two three", 8), vec!["one two", "three"]);
//! ```

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn display_len(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` characters, ending in `…` when shortened.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if display_len(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

/// Greedy word wrap to lines of at most `width` characters.
///
/// Words longer than `width` are hard-split. Existing newlines are kept.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                lines.push(word.drain(..width).collect());
            }
            let word: String = word.into_iter().collect();
            if word.is_empty() {
                continue;
            }
            let needed = if line.is_empty() {
                display_len(&word)
            } else {
                display_len(&line) + 1 + display_len(&word)
            };
            if needed > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        lines.push(line);
    }
    lines
}

/// Prints `text` padded with spaces to exactly `width` characters.
pub fn print_padded(text: &str, width: usize) {
    let text = truncate(text, width);
    print!("{text}{}", " ".repeat(width.saturating_sub(display_len(&text))));
}

/// Prints `text` with character `ranges` highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive. Selected rows
/// skip match highlighting so the selection colors stay intact.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Zürich", 6), "Zürich");
        assert_eq!(truncate("Zürich", 4), "Zür…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn wrap_splits_long_words_and_keeps_paragraphs() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("a b\nc", 10), vec!["a b", "c"]);
    }
}
