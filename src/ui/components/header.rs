//! Title bar and route navigation bar.

use crate::ui::helpers::{display_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HeaderInfo, NavInfo};

/// Renders the centered title and returns the next row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = display_len(&title);
    let padding = (cols.saturating_sub(title_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{title}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders `1 Home  2 Find Jobs ...` with the identity right-aligned.
pub fn render_nav(row: usize, nav: &NavInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let mut used = 1;
    print!(" ");
    for item in &nav.items {
        let label = format!("{} {}", item.key, item.title);
        let len = display_len(&label) + 2;
        if used + len > cols {
            break;
        }
        if item.is_active {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.nav_active_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{label}{}  ", Theme::reset());
        used += len;
    }

    let identity_len = display_len(&nav.identity);
    if used + identity_len + 1 <= cols {
        print!("{}", " ".repeat(cols - used - identity_len - 1));
        print!("{}{}{} ", Theme::fg(&theme.colors.text_dim), nav.identity, Theme::reset());
    }
    row + 1
}
