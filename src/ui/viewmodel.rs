//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings, highlight ranges and
//! selection flags; no business logic.
//!
//! # Example
//!
//! ```rust
//! use jobboard::ui::viewmodel::{Badge, DisplayItem, Tone};
//!
//! let item = DisplayItem {
//!     title: "Rust Engineer".to_string(),
//!     detail: "Ferris GmbH · Berlin".to_string(),
//!     badge: Some(Badge { label: "Contract".to_string(), tone: Tone::Info }),
//!     is_selected: true,
//!     indent: false,
//!     highlight_ranges: vec![(0, 4)],
//! };
//! assert!(item.is_selected);
//! ```

use crate::forms::FieldKind;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub nav: NavInfo,
    /// Query and filter line, shown on the jobs screen while searching or filtering.
    pub search_bar: Option<SearchBarInfo>,
    /// Banner between the chrome and the body.
    pub status: Option<StatusLine>,
    pub body: Body,
    /// Modal drawn over the body.
    pub dialog: Option<DialogView>,
    pub footer: FooterInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Route tabs plus the signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavInfo {
    pub items: Vec<NavItem>,
    /// "Signed in as ..." or a sign-in hint.
    pub identity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Digit that opens the route.
    pub key: char,
    pub title: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Search box contents on the jobs screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Summary of the type and category filters, e.g. `type: Contract`.
    pub filters: String,
    /// Whether keys currently edit the query.
    pub is_typing: bool,
}

/// Semantic color of a badge or banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
    Muted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

/// Main content area.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Table(TableView),
    Form(FormView),
    /// Centered message: welcome text, empty states, load errors, access denied.
    Message(EmptyState),
    Loading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// Column titles for the name and detail columns.
    pub columns: (String, String),
    /// Rows inside the visible window.
    pub rows: Vec<DisplayItem>,
    /// Index of the selected row within `rows`.
    pub selected_index: usize,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    pub detail: String,
    pub badge: Option<Badge>,
    pub is_selected: bool,
    /// Nested under the previous header row (applications under their job).
    pub indent: bool,
    /// Character ranges of `title` matching the search query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// A form rendered field by field.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    /// Validation messages, in field order.
    pub summary: Vec<String>,
    pub is_submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: String,
    pub value: String,
    pub kind: FieldKind,
    pub required: bool,
    pub is_focused: bool,
    /// Focused and accepting typed characters.
    pub is_editing: bool,
    pub error: Option<String>,
}

/// Modal content on the jobs screen.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogView {
    Details {
        title: String,
        lines: Vec<String>,
    },
    Apply {
        title: String,
        form: FormView,
        error: Option<String>,
    },
}
