//! Plugin ↔ worker protocol.
//!
//! The plugin thread cannot block on file I/O, so attachments (resumes and job
//! images) are read on the worker thread. Every message carries the mount id
//! of the screen that asked for it; responses echo it back so the plugin can
//! drop results for screens that are no longer shown.

use crate::domain::Attachment;
use crate::observability::TraceContext;
use serde::{Deserialize, Serialize};

/// Name the worker is registered under.
pub const WORKER_NAME: &str = "attachment";

/// What a loaded file will be uploaded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentPurpose {
    /// `resumeFile` part of a job application.
    Resume,
    /// `image` part of a new job posting.
    JobImage,
}

impl AttachmentPurpose {
    /// Multipart field name the attachment is sent under.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Resume => "resumeFile",
            Self::JobImage => "image",
        }
    }
}

/// Generates constructors that capture the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Creates a `", stringify!($variant), "` message carrying the current trace context.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_attachment(LoadAttachment { purpose: AttachmentPurpose, path: String, mount: u64 }),
}

/// Requests from the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read a file from the host filesystem for upload.
    LoadAttachment {
        purpose: AttachmentPurpose,

        /// Path as typed by the user (`~/cv.pdf`, `docs/cv.pdf`, ...).
        path: String,

        /// Mount id of the requesting screen.
        mount: u64,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadAttachment { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Results sent back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The file was read successfully.
    AttachmentLoaded {
        purpose: AttachmentPurpose,
        mount: u64,
        attachment: Attachment,
    },

    /// The file could not be read.
    Error {
        purpose: AttachmentPurpose,
        mount: u64,
        /// Human-readable reason.
        message: String,
    },
}

impl WorkerResponse {
    /// Mount id of the screen that requested this result.
    #[must_use]
    pub const fn mount(&self) -> u64 {
        match self {
            Self::AttachmentLoaded { mount, .. } | Self::Error { mount, .. } => *mount,
        }
    }

    #[must_use]
    pub const fn purpose(&self) -> AttachmentPurpose {
        match self {
            Self::AttachmentLoaded { purpose, .. } | Self::Error { purpose, .. } => *purpose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_without_subscriber_has_no_trace() {
        let msg = WorkerMessage::load_attachment(AttachmentPurpose::Resume, "~/cv.pdf".into(), 3);
        assert!(msg.trace_context().is_none());

        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("trace_context"));
        let back: WorkerMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn field_names() {
        assert_eq!(AttachmentPurpose::Resume.field_name(), "resumeFile");
        assert_eq!(AttachmentPurpose::JobImage.field_name(), "image");
    }
}
