//! Composable UI component renderers.
//!
//! Each component prints one part of the screen starting at a given row and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar and route navigation
//! - [`search`]: Search box with the active filters
//! - [`status`]: Error and confirmation banner
//! - [`table`]: Job, application and moderation lists
//! - [`form`]: Job posting and application forms
//! - [`empty`]: Centered messages and the loading indicator
//! - [`dialog`]: Details and apply modal
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Navigation]
//! [Border]
//! [Search Bar - 3 lines, jobs screen only]
//! [Status]
//! [Body: table, form or message]
//! [Border]
//! [Footer]
//! ```

mod dialog;
mod empty;
mod footer;
mod form;
mod header;
mod search;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

/// Draws a horizontal rule at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole screen for `vm`.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = header::render_header(current_row, &vm.header, theme, cols);
    current_row = header::render_nav(current_row, &vm.nav, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = search::render_search_bar(current_row, search, theme, cols);
    }
    current_row = status::render_status(current_row, vm.status.as_ref(), theme, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    let body_top = current_row;
    match &vm.body {
        Body::Table(table) => {
            table::render_table(current_row, table, theme, cols);
        }
        Body::Form(form) => {
            let summary_row = form::render_form(current_row, 1, cols, border_row, form, theme);
            render_summary(summary_row, border_row, &form.summary, theme, cols);
        }
        Body::Message(empty) => {
            empty::render_empty_state(current_row, empty, theme, cols);
        }
        Body::Loading => {
            empty::render_loading(current_row, theme, cols);
        }
    }

    if let Some(dialog) = &vm.dialog {
        dialog::render_dialog(dialog, theme, body_top, border_row, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    footer::render_footer(footer_start, &vm.footer, theme, cols);
}

/// Lists validation messages below a form while room is left.
fn render_summary(row: usize, max_row: usize, summary: &[String], theme: &Theme, cols: usize) {
    if summary.is_empty() || row + 1 >= max_row {
        return;
    }
    let mut current_row = row + 1;
    position_cursor(current_row, 1);
    print!(
        "{}{} Please fix {} field(s) before submitting.{}",
        Theme::bold(),
        Theme::fg(&theme.colors.error_fg),
        summary.len(),
        Theme::reset()
    );
    current_row += 1;
    for message in summary {
        if current_row >= max_row {
            break;
        }
        position_cursor(current_row, 1);
        print!("{}   • {message}{}", Theme::fg(&theme.colors.error_fg), Theme::reset());
        current_row += 1;
    }
}
