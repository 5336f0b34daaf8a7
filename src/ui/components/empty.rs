//! Centered messages: welcome text, empty lists, load errors and loading.

use crate::ui::helpers::{display_len, position_cursor, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message a few rows below `row`, wrapping long subtitles.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row + 2;
    current_row = render_centered(current_row, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);

    let dim = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    for line in wrap(&empty.subtitle, cols.saturating_sub(8)) {
        current_row = render_centered(current_row, &line, &dim, cols);
    }
    current_row
}

pub fn render_loading(row: usize, theme: &Theme, cols: usize) -> usize {
    render_centered(row + 2, "Loading...", &Theme::fg(&theme.colors.text_dim), cols)
}

fn render_centered(row: usize, text: &str, style: &str, cols: usize) -> usize {
    let len = display_len(text);
    let padding = (cols.saturating_sub(len)) / 2;

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
    row + 1
}
