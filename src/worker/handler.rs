//! Attachment loading on the worker thread.

use crate::domain::error::{JobBoardError, Result};
use crate::domain::Attachment;
use crate::infrastructure::paths;
use crate::worker::messages::{AttachmentPurpose, WorkerMessage, WorkerResponse};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Largest file the worker will read (10 MiB).
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Reads upload files on behalf of the plugin.
///
/// Host-independent: the Zellij worker shim deserializes the payload, calls
/// [`AttachmentWorker::handle_payload`] and posts the returned string back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentWorker {
    max_bytes: u64,
}

impl Default for AttachmentWorker {
    fn default() -> Self {
        Self::with_limit(MAX_ATTACHMENT_BYTES)
    }
}

impl AttachmentWorker {
    #[must_use]
    pub const fn with_limit(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    fn read_attachment(&self, path: &str) -> Result<Attachment> {
        let resolved: PathBuf = paths::resolve_upload_path(path)
            .ok_or_else(|| JobBoardError::Attachment("No file selected".to_string()))?;

        let metadata = std::fs::metadata(&resolved)?;
        if !metadata.is_file() {
            return Err(JobBoardError::Attachment(format!(
                "{} is not a file",
                paths::strip_host_prefix(&resolved.to_string_lossy())
            )));
        }
        if metadata.len() > self.max_bytes {
            return Err(JobBoardError::Attachment(format!(
                "File is too large ({} bytes, limit {} bytes)",
                metadata.len(),
                self.max_bytes
            )));
        }

        let bytes = std::fs::read(&resolved)?;
        Ok(Attachment::from_path(&resolved, bytes))
    }

    /// Runs `result` through consistent logging and maps it to a response.
    fn handle_io_result<T, F>(
        operation: &str,
        purpose: AttachmentPurpose,
        mount: u64,
        result: Result<T>,
        on_success: F,
    ) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "worker operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "worker operation failed");
                WorkerResponse::Error {
                    purpose,
                    mount,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Processes one message, continuing the sender's trace if it sent one.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = message.trace_context().and_then(|ctx| ctx.attach());
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadAttachment {
                purpose, path, mount, ..
            } => Self::handle_io_result(
                "load attachment",
                purpose,
                mount,
                self.read_attachment(&path),
                |attachment| {
                    tracing::debug!(
                        file_name = %attachment.file_name,
                        size = attachment.bytes.len(),
                        "attachment loaded"
                    );
                    WorkerResponse::AttachmentLoaded {
                        purpose,
                        mount,
                        attachment,
                    }
                },
            ),
        }
    }

    /// Decodes a JSON [`WorkerMessage`], handles it and encodes the response.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Worker`] if the payload is not a valid message
    /// and [`JobBoardError::Decode`] if the response cannot be serialized.
    pub fn handle_payload(&mut self, payload: &str) -> Result<String> {
        let message: WorkerMessage = serde_json::from_str(payload)
            .map_err(|e| JobBoardError::Worker(format!("invalid message: {e}")))?;
        let response = self.handle_message(message);
        Ok(serde_json::to_string(&response)?)
    }
}

static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initializes tracing on the worker thread once per worker lifetime.
pub fn ensure_worker_tracing() {
    if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
        crate::observability::init_tracing(&crate::Config::default());
    }
}
