//! Sandbox filesystem helpers.
//!
//! The plugin sees the host filesystem mounted under `/host`; these helpers
//! translate between what the user types and what the sandbox can open.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, resolve_upload_path, strip_host_prefix};
