//! One-line banner for errors and confirmations.

use crate::ui::helpers::{position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the banner, or a blank row when there is none.
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    match status {
        Some(status) => {
            print!("{}", Theme::fg(theme.colors.tone(status.tone)));
            print!(" ");
            print_padded(&status.message, cols.saturating_sub(1));
            print!("{}", Theme::reset());
        }
        None => print!("{}", " ".repeat(cols)),
    }
    row + 1
}
