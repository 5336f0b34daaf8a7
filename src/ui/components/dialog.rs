//! Modal box drawn over the jobs list.

use super::form::render_form;
use crate::ui::helpers::{display_len, position_cursor, print_padded, truncate, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DialogView;

const MAX_DIALOG_WIDTH: usize = 84;

/// Renders `dialog` centered between `top` and `bottom` (exclusive).
pub fn render_dialog(dialog: &DialogView, theme: &Theme, top: usize, bottom: usize, cols: usize) {
    let width = cols.saturating_sub(4).min(MAX_DIALOG_WIDTH);
    if width < 20 || bottom <= top + 4 {
        return;
    }
    let inner = width - 4;
    let col = (cols - width) / 2 + 1;

    let (title, body_rows) = match dialog {
        DialogView::Details { title, lines } => (title, details_lines(lines, inner)),
        DialogView::Apply { title, form, error } => {
            let mut rows = form.fields.len() + form.fields.iter().filter(|f| f.error.is_some()).count();
            rows += usize::from(form.is_submitting) + usize::from(error.is_some());
            (title, vec![String::new(); rows])
        }
    };

    let height = (body_rows.len() + 4).min(bottom - top);
    let start = top + (bottom - top - height) / 2;
    let end = start + height - 1;

    draw_frame(start, end, col, width, title, theme);

    let content_row = start + 2;
    match dialog {
        DialogView::Details { .. } => {
            for (offset, line) in body_rows.iter().enumerate() {
                let row = content_row + offset;
                if row >= end {
                    break;
                }
                position_cursor(row, col + 2);
                print!("{}", Theme::fg(&theme.colors.text_normal));
                print_padded(line, inner);
                print!("{}", Theme::reset());
            }
        }
        DialogView::Apply { form, error, .. } => {
            let mut row = content_row;
            if let Some(error) = error {
                position_cursor(row, col + 2);
                print!("{}", Theme::fg(&theme.colors.error_fg));
                print_padded(error, inner);
                print!("{}", Theme::reset());
                row += 1;
            }
            render_form(row, col + 2, inner, end, form, theme);
        }
    }
}

fn details_lines(lines: &[String], width: usize) -> Vec<String> {
    lines.iter().flat_map(|line| wrap(line, width)).collect()
}

/// Border, title row and blanked interior.
fn draw_frame(start: usize, end: usize, col: usize, width: usize, title: &str, theme: &Theme) {
    let border = Theme::fg(&theme.colors.dialog_border);
    let inner = width - 2;

    position_cursor(start, col);
    print!("{border}┌{}┐{}", "─".repeat(inner), Theme::reset());

    let title = truncate(title, inner.saturating_sub(2));
    position_cursor(start + 1, col);
    print!("{border}│{}", Theme::reset());
    print!(" {}{}{title}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg), Theme::reset());
    print!("{}", " ".repeat(inner.saturating_sub(display_len(&title) + 1)));
    print!("{border}│{}", Theme::reset());

    for row in start + 2..end {
        position_cursor(row, col);
        print!("{border}│{}{}{border}│{}", Theme::reset(), " ".repeat(inner), Theme::reset());
    }

    position_cursor(end, col);
    print!("{border}└{}┘{}", "─".repeat(inner), Theme::reset());
}
