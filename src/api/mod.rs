//! HTTP layer for the job board API.
//!
//! The plugin runs inside Zellij's sandbox, where requests are fire-and-forget
//! host calls whose results arrive later as events. This module therefore only
//! *describes* requests and *decodes* responses; executing them is the plugin
//! shim's job.
//!
//! # Modules
//!
//! - [`endpoints`]: One variant per API endpoint
//! - [`client`]: Request builder bound to the base URL
//! - [`request`]: Request value and wire verb mapping
//! - [`multipart`]: `multipart/form-data` encoder
//! - [`response`]: Status checks and envelope decoding
//! - [`context`]: Request tags echoed back with responses

pub mod client;
pub mod context;
pub mod endpoints;
pub mod multipart;
pub mod request;
pub mod response;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use context::{RequestContext, RequestTag};
pub use endpoints::{ApiCall, Body};
pub use multipart::Multipart;
pub use request::{HttpMethod, HttpRequest, WireVerb};
pub use response::AdminOverview;
