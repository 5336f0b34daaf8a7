//! Outgoing HTTP request description.
//!
//! The event handler never performs I/O; it returns [`HttpRequest`] values inside
//! actions and the plugin shim hands them to Zellij's `web_request`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header used to carry the real method when tunnelling `PATCH` through `POST`.
pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// Logical HTTP method of an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Methods the host runtime can put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireVerb {
    Get,
    Post,
    Put,
    Delete,
}

/// A fully built request, ready to be executed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    /// Opaque context echoed back with the response.
    pub context: BTreeMap<String, String>,
}

impl HttpRequest {
    /// Returns the verb and headers to send through the host runtime.
    ///
    /// The host has no `PATCH` verb, so a `PATCH` goes out as `POST` carrying
    /// [`METHOD_OVERRIDE_HEADER`].
    #[must_use]
    pub fn wire_parts(&self) -> (WireVerb, BTreeMap<String, String>) {
        let mut headers = self.headers.clone();
        let verb = match self.method {
            HttpMethod::Get => WireVerb::Get,
            HttpMethod::Post => WireVerb::Post,
            HttpMethod::Delete => WireVerb::Delete,
            HttpMethod::Patch => {
                headers.insert(
                    METHOD_OVERRIDE_HEADER.to_string(),
                    HttpMethod::Patch.as_str().to_string(),
                );
                WireVerb::Post
            }
        };
        (verb, headers)
    }
}
