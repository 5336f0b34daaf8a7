//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → FileSpanExporter → jobboard-otlp.json
//! ```
//!
//! The trace file lives in the plugin data directory
//! (`~/.local/share/zellij/jobboard/`) and rotates at 10 MB keeping three
//! backups. The level comes from the `trace_level` plugin option.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: OTLP JSON span exporter
//! - [`rotating_file`]: Size-rotated line writer
//! - [`context`]: Trace context carried across the worker boundary and to the API

pub mod context;
mod exporter;
mod init;
pub mod rotating_file;

pub use context::TraceContext;
pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
