//! Trace context propagation.
//!
//! Spans started on the plugin thread are continued on the worker thread (via
//! [`TraceContext`] fields on worker messages) and announced to the API (via a
//! W3C `traceparent` header).

use serde::{Deserialize, Serialize};

/// Serializable snapshot of the active span's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a 32-character hex string.
    pub trace_id: String,

    /// Span ID of the parent, as a 16-character hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the current tracing span, if it maps to a valid OpenTelemetry span.
    ///
    /// Returns `None` when tracing is not initialized or the span is not sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Formats the context as a W3C `traceparent` header value (sampled).
    #[must_use]
    pub fn traceparent(&self) -> String {
        format!("00-{}-{}-01", self.trace_id, self.parent_span_id)
    }

    /// Makes this context the parent of spans created while the guard lives.
    ///
    /// Returns `None` if either id fails to parse.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traceparent_format() {
        let ctx = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert_eq!(
            ctx.traceparent(),
            "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"
        );
    }

    #[test]
    fn no_context_without_subscriber() {
        assert!(TraceContext::from_current().is_none());
    }

    #[test]
    fn malformed_ids_do_not_attach() {
        let ctx = TraceContext {
            trace_id: "zz".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert!(ctx.attach().is_none());
    }
}
