//! Jobboard: a Zellij plugin client for the CareerCraft job board.
//!
//! Applicants browse verified vacancies, filter them and apply with a resume;
//! employers post jobs and review applications; admins verify and moderate
//! posts. All data lives behind a REST API reached through the host's web
//! request facility.

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Routes, screens, dialogs                         │
//! │  - Event handling and key bindings                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Worker Layer  │
//! │ (ui/)         │   │ (api/)        │   │ (worker/)     │
//! │ - Rendering   │   │ - Endpoints   │   │ - Attachment  │
//! │ - Theming     │   │ - Multipart   │   │   file reads  │
//! │ - Components  │   │ - Responses   │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Forms & Infrastructure                     │
//! │  - Jobs, applications, users, errors (domain/)      │
//! │  - Form models and validation (forms/)              │
//! │  - Host paths (infrastructure/)                     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/jobboard.wasm" {
//!         api_base_url "https://careercraft.example.com/api"
//!         user_name "Ada Lovelace"
//!         user_email "ada@example.com"
//!         start_route "/dashboard"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!         confirmation_delay_secs "2"
//!         redirect_after_apply "true"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use jobboard::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert!(actions.is_empty()); // anonymous home screen fetches nothing
//! # Ok::<(), jobboard::JobBoardError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod forms;
pub mod infrastructure;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, map_key, Action, AppState, Event, InputMode, Route, SearchFocus};
pub use domain::{JobBoardError, Result, Session};
pub use ui::Theme;

use api::{ApiClient, DEFAULT_BASE_URL};
use app::state::DEFAULT_CONFIRMATION_DELAY_SECS;
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// API root every endpoint path is appended to.
    pub api_base_url: String,

    /// Signed-in user's display name; defaults to the email's local part.
    pub user_name: Option<String>,

    /// Signed-in user's email. Without it the session is anonymous.
    pub user_email: Option<String>,

    /// Route opened once permissions are granted.
    pub start_route: Route,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,

    /// Seconds between a successful application and the redirect.
    pub confirmation_delay_secs: f64,

    /// Whether a successful application opens the applied jobs screen.
    pub redirect_after_apply: bool,

    /// Options that were present but invalid, as `(key, value)`.
    ///
    /// Parsing runs before tracing is installed, so [`initialize`] logs these.
    pub rejected: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            user_name: None,
            user_email: None,
            start_route: Route::Home,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            confirmation_delay_secs: DEFAULT_CONFIRMATION_DELAY_SECS,
            redirect_after_apply: true,
            rejected: Vec::new(),
        }
    }
}

impl Config {
    /// Parses the plugin configuration, falling back to defaults per key.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use jobboard::{Config, Route};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("start_route".to_string(), "/job-status".to_string());
    /// map.insert("confirmation_delay_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.start_route, Route::AppliedJobs);
    /// assert_eq!(config.confirmation_delay_secs, 2.0);
    /// assert_eq!(config.rejected.len(), 1);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let mut rejected = Vec::new();

        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_base_url = text("api_base_url").unwrap_or(defaults.api_base_url);

        let start_route = match text("start_route") {
            Some(path) => Route::from_path(&path).unwrap_or_else(|| {
                rejected.push(("start_route".to_string(), path));
                Route::Home
            }),
            None => defaults.start_route,
        };

        let confirmation_delay_secs = match text("confirmation_delay_secs") {
            Some(raw) => match raw.parse::<f64>() {
                Ok(secs) if secs.is_finite() && secs >= 0.0 => secs,
                _ => {
                    rejected.push(("confirmation_delay_secs".to_string(), raw));
                    defaults.confirmation_delay_secs
                }
            },
            None => defaults.confirmation_delay_secs,
        };

        let redirect_after_apply = match text("redirect_after_apply") {
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => true,
                "false" | "no" | "0" => false,
                _ => {
                    rejected.push(("redirect_after_apply".to_string(), raw));
                    defaults.redirect_after_apply
                }
            },
            None => defaults.redirect_after_apply,
        };

        Self {
            api_base_url,
            user_name: text("user_name"),
            user_email: text("user_email"),
            start_route,
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
            confirmation_delay_secs,
            redirect_after_apply,
            rejected,
        }
    }

    /// Session described by `user_name` and `user_email`.
    #[must_use]
    pub fn session(&self) -> Session {
        Session::from_parts(self.user_name.as_deref(), self.user_email.as_deref())
    }
}

/// Builds the application state from `config`.
///
/// Nothing is requested yet: the start route opens once the host grants the
/// web access permission.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing jobboard plugin");

    for (key, value) in &config.rejected {
        tracing::warn!(key = %key, value = %value, "invalid configuration value, using default");
    }

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let session = config.session();
    tracing::debug!(
        signed_in = session.is_signed_in(),
        api_base_url = %config.api_base_url,
        start_route = %config.start_route,
        "configuration applied"
    );

    let mut state = AppState::new(session, ApiClient::new(&config.api_base_url), theme);
    state.start_route = config.start_route;
    state.confirmation_delay_secs = config.confirmation_delay_secs;
    state.redirect_after_apply = config.redirect_after_apply;
    state
}
