//! Input mode state machine.
//!
//! - **Normal**: navigation and screen commands
//! - **Search**: typing a query on the jobs screen, or moving through results
//! - **Editing**: typing into the focused form field

/// Focus within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keys edit the query.
    Typing,
    /// Keys move the selection through filtered results.
    Navigating,
}

/// How keys are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search(SearchFocus),
    /// A form field has focus; printable keys are inserted into it.
    Editing,
}
