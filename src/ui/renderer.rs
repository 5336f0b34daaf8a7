//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process: compute the [`UIViewModel`] from the
//! application state, then print it through the components.
//!
//! # Example
//!
//! ```rust
//! use jobboard::api::ApiClient;
//! use jobboard::app::AppState;
//! use jobboard::domain::Session;
//! use jobboard::ui::{render, Theme};
//!
//! let state = AppState::new(Session::Anonymous, ApiClient::default(), Theme::default());
//! render(&state, 24, 80);
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; Zellij hands the plugin a fresh pane buffer on
/// every render call.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    let viewmodel: UIViewModel = state.compute_viewmodel(rows, cols);

    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
