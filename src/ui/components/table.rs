use crate::ui::helpers::{self, display_len, position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, TableView};

/// Width of the title column, including the gap after it.
const NAME_COLUMN: usize = 37;

/// Width reserved on the right for badges.
const BADGE_COLUMN: usize = 14;

pub fn render_table(row: usize, table: &TableView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = render_table_headers(row, &table.columns, theme);
    for item in &table.rows {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

fn render_table_headers(row: usize, columns: &(String, String), theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{:<NAME_COLUMN$}{}", columns.0, columns.1);
    print!("{}", Theme::reset());
    row + 1
}

fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base}");

    let indent = if item.indent { "  ↳ " } else { "" };
    print!("{indent}");

    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    let name_len = display_len(indent) + display_len(&item.title);
    print!("{}", " ".repeat(NAME_COLUMN.saturating_sub(name_len)));

    let detail_width = cols.saturating_sub(NAME_COLUMN.max(name_len) + BADGE_COLUMN);
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print_padded(&item.detail, detail_width);

    match &item.badge {
        Some(badge) => {
            if !item.is_selected {
                print!("{}", Theme::fg(theme.colors.tone(badge.tone)));
            }
            print!(" ");
            print_padded(&badge.label, BADGE_COLUMN.saturating_sub(1));
        }
        None => print!("{}", " ".repeat(BADGE_COLUMN)),
    }

    print!("{}", Theme::reset());
    row + 1
}
