//! Background worker for attachment file I/O.
//!
//! - [`messages`]: Request/response protocol with trace context propagation
//! - [`handler`]: Host-independent message processing

pub mod handler;
pub mod messages;

pub use handler::{ensure_worker_tracing, AttachmentWorker, MAX_ATTACHMENT_BYTES};
pub use messages::{AttachmentPurpose, WorkerMessage, WorkerResponse, WORKER_NAME};
