//! Request builder bound to the configured API base URL.

use super::context::RequestContext;
use super::endpoints::{ApiCall, Body};
use super::request::HttpRequest;
use crate::observability::TraceContext;
use std::collections::BTreeMap;

/// Default API base URL used when the configuration does not set one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Builds [`HttpRequest`]s for API calls.
///
/// Single attempt per call: no retries, caching or backoff. Failures surface
/// through the response event as a status and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    /// Creates a client; trailing slashes on `base_url` are ignored.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a path relative to the base.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Builds the request for `call`, tagged for the screen mounted as `mount`.
    ///
    /// Adds `Accept`, the body's `Content-Type` and, when a sampled span is
    /// active, a W3C `traceparent` header.
    #[must_use]
    pub fn build(&self, call: &ApiCall, mount: u64) -> HttpRequest {
        let method = call.method();
        let url = self.url(&call.path());
        let _span = tracing::debug_span!("build_request", method = method.as_str(), url = %url).entered();

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        let body = match call.body() {
            Body::Empty => Vec::new(),
            Body::Json(value) => {
                headers.insert("Content-Type".to_string(), "application/json".to_string());
                value.to_string().into_bytes()
            }
            Body::Multipart(multipart) => {
                headers.insert("Content-Type".to_string(), multipart.content_type());
                multipart.encode()
            }
        };

        if let Some(trace) = TraceContext::from_current() {
            headers.insert("traceparent".to_string(), trace.traceparent());
        }

        let context = RequestContext {
            tag: call.tag(),
            mount,
        }
        .to_map();

        tracing::debug!(body_len = body.len(), "request built");

        HttpRequest {
            method,
            url,
            headers,
            body,
            context,
        }
    }
}
