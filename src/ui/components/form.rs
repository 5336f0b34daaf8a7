//! Field-by-field form rendering, shared by the job posting screen and the
//! apply dialog.

use crate::forms::FieldKind;
use crate::ui::helpers::{display_len, position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FieldView, FormView};

/// Width of the label column.
const LABEL_WIDTH: usize = 22;

/// Renders `form` inside the box starting at (`row`, `col`) of `width` columns.
///
/// Stops before `max_row`; returns the next free row.
pub fn render_form(
    row: usize,
    col: usize,
    width: usize,
    max_row: usize,
    form: &FormView,
    theme: &Theme,
) -> usize {
    let mut current_row = row;

    for field in &form.fields {
        if current_row >= max_row {
            return current_row;
        }
        current_row = render_field(current_row, col, width, field, theme);

        if let Some(error) = &field.error {
            if current_row >= max_row {
                return current_row;
            }
            position_cursor(current_row, col);
            print!("{}", Theme::fg(&theme.colors.error_fg));
            print!("{}", " ".repeat(LABEL_WIDTH + 2));
            print_padded(error, width.saturating_sub(LABEL_WIDTH + 2));
            print!("{}", Theme::reset());
            current_row += 1;
        }
    }

    if form.is_submitting && current_row < max_row {
        position_cursor(current_row, col);
        print!("{}", Theme::fg(&theme.colors.info_fg));
        print_padded("  Submitting...", width);
        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row
}

fn render_field(row: usize, col: usize, width: usize, field: &FieldView, theme: &Theme) -> usize {
    position_cursor(row, col);

    let marker = if field.is_focused { "▸ " } else { "  " };
    let required = if field.required { "*" } else { "" };
    let label = format!("{}{required}", field.label);

    if field.is_focused {
        print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.nav_active_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{marker}");
    print_padded(&label, LABEL_WIDTH);
    print!("{}", Theme::reset());

    let value_width = width.saturating_sub(LABEL_WIDTH + 2);
    let value = display_value(field);

    if field.is_editing {
        print!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        );
    } else if field.error.is_some() {
        print!("{}", Theme::fg(&theme.colors.error_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print_padded(&value, value_width);
    print!("{}", Theme::reset());

    row + 1
}

/// Value as shown in the form; the tail of long text stays visible while typing.
fn display_value(field: &FieldView) -> String {
    let value = field.value.replace('\n', " ⏎ ");
    match field.kind {
        FieldKind::Choice => format!("‹ {value} ›"),
        FieldKind::Toggle => value,
        FieldKind::Text | FieldKind::Multiline | FieldKind::Path if field.is_editing => {
            let len = display_len(&value);
            let tail: String = value.chars().skip(len.saturating_sub(60)).collect();
            format!("{tail}▏")
        }
        FieldKind::Path if value.is_empty() => "(path to file)".to_string(),
        FieldKind::Text | FieldKind::Multiline | FieldKind::Path => value,
    }
}
