//! Terminal user interface.
//!
//! Turns application state into ANSI-styled output:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Renderable UI state
//! - [`renderer`]: Rendering entry point
//! - [`components`]: Header, navigation, tables, forms, dialogs, footer
//! - [`helpers`]: Cursor positioning, truncation, wrapping and highlighting
//! - [`theme`]: Color themes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{Body, DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
