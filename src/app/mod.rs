//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the domain, API and worker
//! layers:
//!
//! ```text
//! Key / Response → Event → handle_event → Screen mutations → Effects → Actions
//!                    ↑                                                   ↓
//!                    └────────── HTTP responses, worker results ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands executed by the plugin shim
//! - [`handler`]: Event processing and state transitions
//! - [`keymap`]: Key bindings per mode and screen
//! - [`screens`]: Per-screen state, fetches and mutations
//! - [`dialog`]: Details/apply dialog state machine
//! - [`filter`]: Client-side job filtering and highlighting
//! - [`patch`]: Key-based local patches after mutations
//! - [`router`]: Routes and their paths
//! - [`modes`]: Input mode state machine
//! - [`state`]: Application state and view model computation
//!
//! # Example
//!
//! ```rust
//! use jobboard::api::ApiClient;
//! use jobboard::app::{handle_event, AppState, Event};
//! use jobboard::domain::Session;
//! use jobboard::ui::Theme;
//!
//! let mut state = AppState::new(Session::Anonymous, ApiClient::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Down)?;
//! assert!(!render);
//! assert!(actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod dialog;
pub mod filter;
pub mod handler;
pub mod keymap;
pub mod modes;
pub mod patch;
pub mod router;
pub mod screens;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use keymap::map_key;
pub use modes::{InputMode, SearchFocus};
pub use router::Route;
pub use state::AppState;
